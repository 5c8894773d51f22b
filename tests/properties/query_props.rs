//! Query engine properties: filter commutativity, stable sorting and page bounds.

use proptest::prelude::*;

use skilldex::core::Skill;
use skilldex::search::{QueryEngine, SearchFilters, SearchQuery, SortKey};

const LABELS: [&str; 3] = ["文档处理", "数据处理与分析", "其他"];

fn arb_skill() -> impl Strategy<Value = Skill> {
    (
        "[a-z]{1,8}",
        0u64..5,
        0usize..LABELS.len(),
        prop::collection::vec("[a-z]{1,4}", 0..3),
    )
        .prop_map(|(name, stars, label, tags)| Skill {
            skill_name: name,
            star_count: stars,
            category: LABELS[label].to_string(),
            tags,
            ..Skill::default()
        })
}

fn arb_catalog() -> impl Strategy<Value = Vec<Skill>> {
    prop::collection::vec(arb_skill(), 0..60).prop_map(|skills| {
        skills
            .into_iter()
            .enumerate()
            .map(|(index, skill)| Skill {
                identifier: format!("s{index}"),
                ..skill
            })
            .collect()
    })
}

fn ids(skills: &[&Skill]) -> Vec<String> {
    skills.iter().map(|skill| skill.identifier.clone()).collect()
}

proptest! {
    #[test]
    fn category_and_term_filters_commute(
        skills in arb_catalog(),
        term in "[a-z]{0,2}",
        label in 0usize..LABELS.len(),
    ) {
        let by_category = SearchFilters::new().with_category(LABELS[label]);
        let by_term = SearchFilters::new().with_term(term.clone());

        let category_first: Vec<Skill> = by_category.apply(&skills).into_iter().cloned().collect();
        let then_term = ids(&by_term.apply(&category_first));

        let term_first: Vec<Skill> = by_term.apply(&skills).into_iter().cloned().collect();
        let then_category = ids(&by_category.apply(&term_first));

        prop_assert_eq!(then_term, then_category);
    }

    #[test]
    fn stars_sort_is_stable(skills in arb_catalog()) {
        let results = QueryEngine::new(1_000)
            .run(&skills, &SearchQuery::default().with_sort(SortKey::Stars));
        for pair in results.skills.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            prop_assert!(a.star_count >= b.star_count);
            if a.star_count == b.star_count {
                let pos = |s: &Skill| s.identifier[1..].parse::<usize>().unwrap();
                prop_assert!(pos(a) < pos(b));
            }
        }
    }

    #[test]
    fn pages_stay_in_bounds(
        skills in arb_catalog(),
        page_size in 1usize..25,
        page in 0usize..200,
    ) {
        let results = QueryEngine::new(page_size)
            .run(&skills, &SearchQuery::default().with_page(page));
        prop_assert!(results.total_pages >= 1);
        prop_assert!((1..=results.total_pages).contains(&results.page));
        prop_assert!(results.skills.len() <= page_size);
        prop_assert_eq!(results.total_matches, skills.len());
        if !skills.is_empty() {
            prop_assert!(!results.skills.is_empty());
        }
    }
}
