//! Record normalization: one raw snapshot row into one [`Skill`].
//!
//! Each canonical field reads from an ordered list of candidate columns; the
//! first candidate holding a non-empty value wins.

use crate::core::skill::Skill;
use crate::normalize::fields::{to_category_label, to_string_list};
use crate::normalize::value::{RawRow, RawValue};

pub const ID_COLUMN: &str = "id";

pub const SKILL_NAME: &[&str] = &["skill_name", "skillName", "name"];
pub const SOURCE_REPOSITORY: &[&str] = &["fromRepo", "from_repo"];
pub const SOURCE_PATH: &[&str] = &["skillPath", "skill_path"];
pub const STAR_COUNT: &[&str] = &["repostars", "repoStars", "stars"];
pub const TAGLINE: &[&str] = &["tagline"];
pub const TAGS: &[&str] = &["tags"];
pub const CATEGORIES: &[&str] = &["categories", "category"];
pub const DESCRIPTION: &[&str] = &["description"];
pub const DESCRIPTION_ENGLISH: &[&str] = &["description_en", "descriptionEn"];
pub const USE_CASE: &[&str] = &["use_case", "useCase"];
pub const DOWNLOAD_URL: &[&str] = &["download_url", "downloadUrl"];
pub const DOCUMENT_CONTENT: &[&str] = &["skill_md_content", "skillMdContent"];
pub const DOCUMENT_TRANSLATION: &[&str] =
    &["skill_md_content_translation", "skillMdContentTranslation"];
pub const FILE_TREE: &[&str] = &["file_tree", "fileTree"];
pub const INSTALL_INSTRUCTIONS: &[&str] = &["how_to_install", "howToInstall"];
pub const CREATED_AT: &[&str] = &["created_at", "createdAt"];
pub const UPDATED_AT: &[&str] = &["updated_at", "updatedAt"];

/// Build a [`Skill`] from a raw row at zero-based position `index`.
///
/// Total: missing or malformed cells fall back to empty values.
#[must_use]
pub fn normalize_row(row: &RawRow, index: usize) -> Skill {
    let skill_name = text_field(row, SKILL_NAME);
    let raw_categories = row.first_present(CATEGORIES).cloned().unwrap_or_default();
    let categories = to_string_list(&raw_categories);
    let category = categories
        .first()
        .cloned()
        .unwrap_or_else(|| to_category_label(&raw_categories));

    Skill {
        identifier: derive_identifier(row, &skill_name, index),
        source_repository: text_field(row, SOURCE_REPOSITORY),
        source_path: text_field(row, SOURCE_PATH),
        download_url: text_field(row, DOWNLOAD_URL),
        star_count: row.first_present(STAR_COUNT).map_or(0, star_count),
        tagline: text_field(row, TAGLINE),
        tags: row.first_present(TAGS).map(to_string_list).unwrap_or_default(),
        categories,
        category,
        description: text_field(row, DESCRIPTION),
        description_english: text_field(row, DESCRIPTION_ENGLISH),
        use_case: text_field(row, USE_CASE),
        document_content: text_field(row, DOCUMENT_CONTENT),
        document_translation: text_field(row, DOCUMENT_TRANSLATION),
        file_tree_raw: text_field(row, FILE_TREE),
        install_instructions: text_field(row, INSTALL_INSTRUCTIONS),
        created_at: date_text(row, CREATED_AT),
        updated_at: date_text(row, UPDATED_AT),
        skill_name,
    }
}

/// Row id, else percent-encoded name, else the 1-based row position.
#[must_use]
pub fn derive_identifier(row: &RawRow, skill_name: &str, index: usize) -> String {
    let explicit = row
        .get(ID_COLUMN)
        .and_then(RawValue::text_form)
        .filter(|id| !id.trim().is_empty());
    if let Some(id) = explicit {
        return id;
    }
    if !skill_name.is_empty() {
        return urlencoding::encode(skill_name).into_owned();
    }
    (index + 1).to_string()
}

fn text_field(row: &RawRow, candidates: &[&str]) -> String {
    optional_text(row, candidates).unwrap_or_default()
}

fn optional_text(row: &RawRow, candidates: &[&str]) -> Option<String> {
    row.first_present(candidates).and_then(RawValue::text_form)
}

/// Date cells keep their epoch meaning: REAL milliseconds become integer digits.
#[allow(clippy::cast_possible_truncation)]
fn date_text(row: &RawRow, candidates: &[&str]) -> Option<String> {
    match row.first_present(candidates)? {
        RawValue::Real(millis) if millis.is_finite() => Some((millis.trunc() as i64).to_string()),
        other => other.text_form(),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn star_count(value: &RawValue) -> u64 {
    let number = match value {
        RawValue::Integer(n) => return u64::try_from(*n).unwrap_or(0),
        RawValue::Real(r) => *r,
        RawValue::Text(text) => text.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if number.is_finite() && number > 0.0 {
        number.trunc() as u64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::categories::DEFAULT_CATEGORY;

    #[test]
    fn identifier_prefers_explicit_id() {
        let row = RawRow::new().with("id", 12).with("skill_name", "pdf");
        assert_eq!(normalize_row(&row, 0).identifier, "12");

        let text_id = RawRow::new().with("id", "abc-1");
        assert_eq!(normalize_row(&text_id, 0).identifier, "abc-1");
    }

    #[test]
    fn real_epoch_dates_stay_parseable() {
        let row = RawRow::new()
            .with("updated_at", 1_717_200_000_000.5)
            .with("created_at", RawValue::Real(1_600_000_000_000.0));
        let skill = normalize_row(&row, 0);
        assert_eq!(skill.updated_at.as_deref(), Some("1717200000000"));
        assert_eq!(
            skill.updated_at_parsed().map(|dt| dt.timestamp_millis()),
            Some(1_717_200_000_000)
        );
        assert_eq!(skill.created_at.as_deref(), Some("1600000000000"));
    }

    #[test]
    fn identifier_zero_id_is_still_explicit() {
        let row = RawRow::new().with("id", 0).with("skill_name", "pdf");
        assert_eq!(normalize_row(&row, 5).identifier, "0");
    }

    #[test]
    fn identifier_falls_back_to_encoded_name_then_position() {
        let named = RawRow::new().with("id", RawValue::Null).with("skill_name", "web search/v2");
        assert_eq!(normalize_row(&named, 0).identifier, "web%20search%2Fv2");

        let blank_id = RawRow::new().with("id", "  ");
        assert_eq!(normalize_row(&blank_id, 6).identifier, "7");

        assert_eq!(normalize_row(&RawRow::new(), 0).identifier, "1");
    }

    #[test]
    fn fallback_spellings_are_used_in_order() {
        let row = RawRow::new()
            .with("skillName", "camel")
            .with("name", "plain")
            .with("from_repo", "https://github.com/acme/skills")
            .with("skill_path", "skills/pdf")
            .with("descriptionEn", "English")
            .with("useCase", "Reports")
            .with("downloadUrl", "https://example.com/pdf.zip")
            .with("skillMdContent", "# PDF")
            .with("skillMdContentTranslation", "# 翻译")
            .with("fileTree", "[]")
            .with("howToInstall", "cp -r pdf ~/.claude/skills")
            .with("createdAt", "2024-01-01")
            .with("updatedAt", 1_717_200_000_000_i64);

        let skill = normalize_row(&row, 0);
        assert_eq!(skill.skill_name, "camel");
        assert_eq!(skill.source_repository, "https://github.com/acme/skills");
        assert_eq!(skill.source_path, "skills/pdf");
        assert_eq!(skill.description_english, "English");
        assert_eq!(skill.use_case, "Reports");
        assert_eq!(skill.download_url, "https://example.com/pdf.zip");
        assert_eq!(skill.document_content, "# PDF");
        assert_eq!(skill.document_translation, "# 翻译");
        assert_eq!(skill.file_tree_raw, "[]");
        assert_eq!(skill.install_instructions, "cp -r pdf ~/.claude/skills");
        assert_eq!(skill.created_at.as_deref(), Some("2024-01-01"));
        assert_eq!(skill.updated_at.as_deref(), Some("1717200000000"));
        assert!(skill.updated_at_parsed().is_some());
    }

    #[test]
    fn empty_primary_column_falls_through() {
        let row = RawRow::new().with("skill_name", "").with("name", "fallback");
        assert_eq!(normalize_row(&row, 0).skill_name, "fallback");
    }

    #[test]
    fn missing_text_fields_are_empty_strings() {
        let skill = normalize_row(&RawRow::new(), 0);
        assert_eq!(skill.skill_name, "");
        assert_eq!(skill.description, "");
        assert_eq!(skill.tagline, "");
        assert!(skill.tags.is_empty());
        assert!(skill.created_at.is_none());
        assert_eq!(skill.star_count, 0);
        assert_eq!(skill.category, DEFAULT_CATEGORY);
    }

    #[test]
    fn star_count_coerces_numbers() {
        let stars = |value: RawValue| normalize_row(&RawRow::new().with("repostars", value), 0).star_count;
        assert_eq!(stars(RawValue::Integer(120)), 120);
        assert_eq!(stars(RawValue::Real(12.9)), 12);
        assert_eq!(stars(RawValue::from(" 300 ")), 300);
        assert_eq!(stars(RawValue::from("many")), 0);
        assert_eq!(stars(RawValue::Integer(-4)), 0);
        assert_eq!(stars(RawValue::Blob(vec![1, 2])), 0);

        let alt = RawRow::new().with("repostars", 0).with("stars", 9);
        assert_eq!(normalize_row(&alt, 0).star_count, 9);
    }

    #[test]
    fn category_from_list_or_raw_label() {
        let listed = RawRow::new().with("categories", r#"["代码与工程化","数据处理与分析"]"#);
        let skill = normalize_row(&listed, 0);
        assert_eq!(skill.categories, vec!["代码与工程化", "数据处理与分析"]);
        assert_eq!(skill.category, "代码与工程化");

        let singular = RawRow::new().with("category", "监控与运维");
        assert_eq!(normalize_row(&singular, 0).category, "监控与运维");

        let empty_json = RawRow::new().with("categories", "[]");
        let skill = normalize_row(&empty_json, 0);
        assert!(skill.categories.is_empty());
        assert_eq!(skill.category, "[]");
    }

    #[test]
    fn tags_accept_every_encoding() {
        let tags = |value: RawValue| normalize_row(&RawRow::new().with("tags", value), 0).tags;
        assert_eq!(tags(RawValue::from("a,b")), vec!["a", "b"]);
        assert_eq!(tags(RawValue::from(r#"["x"]"#)), vec!["x"]);
        assert_eq!(tags(RawValue::from(vec!["p", " q "])), vec!["p", "q"]);
        assert_eq!(tags(RawValue::Integer(5)), vec!["5"]);
    }

    #[test]
    fn malformed_cells_degrade_without_panicking() {
        let row = RawRow::new()
            .with("skill_name", RawValue::Blob(vec![0xff, 0xfe]))
            .with("tags", RawValue::Blob(vec![0xc3]))
            .with("updated_at", RawValue::Blob(vec![0xff]));
        let skill = normalize_row(&row, 2);
        assert_eq!(skill.skill_name, "");
        assert!(skill.tags.is_empty());
        assert!(skill.updated_at.is_none());
        assert_eq!(skill.identifier, "3");
    }
}
