use skilldex::core::SkillIndex;
use skilldex::search::{QueryEngine, SearchQuery, SortKey};

use crate::fixture::{file_cache, foo_bar_snapshot};

#[tokio::test]
async fn foo_bar_end_to_end() {
    let fixture = foo_bar_snapshot();
    let skills = file_cache(&fixture).ensure_loaded().await.unwrap();

    assert_eq!(skills.len(), 2);
    assert_eq!(skills[0].identifier, "1");
    assert_eq!(skills[0].tags, vec!["a", "b"]);
    assert_eq!(skills[1].identifier, "2");
    assert_eq!(skills[1].tags, vec!["x"]);

    let engine = QueryEngine::default();
    let found = engine.run(&skills, &SearchQuery::new("foo"));
    let names: Vec<&str> = found.skills.iter().map(|s| s.skill_name.as_str()).collect();
    assert_eq!(names, vec!["Foo"]);
    assert_eq!(found.total_matches, 1);

    let latest = engine.run(&skills, &SearchQuery::default().with_sort(SortKey::Latest));
    let names: Vec<&str> = latest.skills.iter().map(|s| s.skill_name.as_str()).collect();
    assert_eq!(names, vec!["Bar", "Foo"]);

    let oldest = engine.run(&skills, &SearchQuery::default().with_sort(SortKey::Oldest));
    let names: Vec<&str> = oldest.skills.iter().map(|s| s.skill_name.as_str()).collect();
    assert_eq!(names, vec!["Foo", "Bar"]);
}

#[tokio::test]
async fn tag_search_and_detail_lookup() {
    let fixture = foo_bar_snapshot();
    let skills = file_cache(&fixture).ensure_loaded().await.unwrap();

    let by_tag = QueryEngine::default().run(&skills, &SearchQuery::new("X"));
    assert_eq!(by_tag.skills.len(), 1);
    assert_eq!(by_tag.skills[0].skill_name, "Bar");

    let index = SkillIndex::build(&skills);
    assert_eq!(index.find("1").map(|s| s.skill_name.as_str()), Some("Foo"));
    assert_eq!(index.find("Bar").map(|s| s.identifier.as_str()), Some("2"));
    assert!(index.find("Baz").is_none());
}

#[tokio::test]
async fn raw_request_parameters_never_fail() {
    let fixture = foo_bar_snapshot();
    let skills = file_cache(&fixture).ensure_loaded().await.unwrap();

    let query = SearchQuery::from_params(Some(""), Some("代码与工程化"), Some("-3"), Some("random"));
    let results = QueryEngine::default().run(&skills, &query);
    assert_eq!(results.page, 1);
    assert_eq!(results.total_pages, 1);
    assert!(results.skills.is_empty());
}
