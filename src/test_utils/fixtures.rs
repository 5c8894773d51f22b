use std::path::{Path, PathBuf};

use rusqlite::types::Value as SqlValue;
use rusqlite::{Connection, params_from_iter};
use tempfile::TempDir;

use crate::core::skill::Skill;

/// An on-disk SQLite snapshot built up table by table.
///
/// Every table column is declared without a type so cells keep whatever
/// storage class they were inserted with.
pub struct SnapshotFixture {
    pub temp_dir: TempDir,
    path: PathBuf,
    conn: Connection,
}

impl SnapshotFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let path = temp_dir.path().join("skill.db");
        let conn = Connection::open(&path).expect("open fixture db");
        conn.execute_batch("PRAGMA user_version = 1;")
            .expect("initialize fixture db");
        println!("[FIXTURE] Created snapshot: {}", path.display());
        Self {
            temp_dir,
            path,
            conn,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File location as a string, for config and CLI flags.
    pub fn location(&self) -> String {
        self.path.display().to_string()
    }

    pub fn create_table(&self, table: &str, columns: &[&str]) {
        let cols = columns
            .iter()
            .map(|c| format!("\"{c}\""))
            .collect::<Vec<_>>()
            .join(", ");
        self.conn
            .execute_batch(&format!("CREATE TABLE \"{table}\" ({cols});"))
            .expect("create fixture table");
    }

    /// Insert one row; values are positional in column order.
    pub fn insert(&self, table: &str, values: &[SqlValue]) {
        let placeholders = vec!["?"; values.len()].join(", ");
        self.conn
            .execute(
                &format!("INSERT INTO \"{table}\" VALUES ({placeholders})"),
                params_from_iter(values.iter()),
            )
            .expect("insert fixture row");
    }

    /// Raw file contents as served to a loader.
    pub fn bytes(&self) -> Vec<u8> {
        std::fs::read(&self.path).expect("read fixture db")
    }
}

impl Default for SnapshotFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Two-row `skills` table used across loader and CLI tests.
pub fn sample_snapshot() -> SnapshotFixture {
    let fixture = SnapshotFixture::new();
    fixture.create_table(
        "skills",
        &["id", "skill_name", "tags", "categories", "repostars", "updated_at", "download_url"],
    );
    fixture.insert(
        "skills",
        &[
            SqlValue::Integer(1),
            SqlValue::Text("Foo".into()),
            SqlValue::Text("a,b".into()),
            SqlValue::Text(r#"["代码与工程化"]"#.into()),
            SqlValue::Integer(5),
            SqlValue::Text("2024-01-01".into()),
            SqlValue::Text("https://github.com/acme/skills/tree/main/foo".into()),
        ],
    );
    fixture.insert(
        "skills",
        &[
            SqlValue::Null,
            SqlValue::Text("Bar".into()),
            SqlValue::Text(r#"["x"]"#.into()),
            SqlValue::Null,
            SqlValue::Integer(10),
            SqlValue::Null,
            SqlValue::Null,
        ],
    );
    fixture
}

/// A skill with only identity fields set.
pub fn skill(identifier: &str, name: &str) -> Skill {
    Skill {
        identifier: identifier.to_string(),
        skill_name: name.to_string(),
        ..Skill::default()
    }
}
