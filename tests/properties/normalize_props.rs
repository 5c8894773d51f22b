//! Normalization never panics and never produces empty list entries.

use std::collections::HashSet;

use proptest::prelude::*;

use skilldex::normalize::{RawRow, RawValue, normalize_row, to_string_list};

fn arb_raw_value() -> impl Strategy<Value = RawValue> {
    let leaf = prop_oneof![
        Just(RawValue::Null),
        any::<i64>().prop_map(RawValue::Integer),
        any::<f64>().prop_map(RawValue::Real),
        ".{0,40}".prop_map(RawValue::Text),
        r"[a-z ,;|\[\]\x22]{0,40}".prop_map(RawValue::Text),
        prop::collection::vec(any::<u8>(), 0..16).prop_map(RawValue::Blob),
    ];
    leaf.prop_recursive(2, 16, 4, |inner| {
        prop::collection::vec(inner, 0..4).prop_map(RawValue::List)
    })
}

proptest! {
    #[test]
    fn string_list_has_no_empty_entries(value in arb_raw_value()) {
        for item in to_string_list(&value) {
            prop_assert!(!item.is_empty());
            prop_assert_eq!(item.trim(), item.as_str());
        }
    }

    #[test]
    fn normalize_row_is_total(
        name in arb_raw_value(),
        tags in arb_raw_value(),
        stars in arb_raw_value(),
        updated in arb_raw_value(),
        index in 0usize..10_000,
    ) {
        let row = RawRow::new()
            .with("skill_name", name)
            .with("tags", tags)
            .with("repostars", stars)
            .with("updated_at", updated);
        let skill = normalize_row(&row, index);
        prop_assert!(!skill.identifier.is_empty());
        prop_assert!(!skill.category.is_empty());
        prop_assert!(skill.tags.iter().all(|tag| !tag.is_empty()));
    }

    #[test]
    fn identifiers_are_unique_for_unique_ids(ids in prop::collection::hash_set(any::<i64>(), 0..40)) {
        let skills: Vec<_> = ids
            .iter()
            .enumerate()
            .map(|(index, id)| normalize_row(&RawRow::new().with("id", *id), index))
            .collect();
        let unique: HashSet<&str> = skills.iter().map(|s| s.identifier.as_str()).collect();
        prop_assert_eq!(unique.len(), skills.len());
    }

    #[test]
    fn identifiers_are_unique_for_unique_names(
        names in prop::collection::hash_set(".{1,24}", 0..40)
    ) {
        let names: Vec<String> = names.into_iter().collect();
        let skills: Vec<_> = names
            .iter()
            .enumerate()
            .map(|(index, name)| normalize_row(&RawRow::new().with("skill_name", name.as_str()), index))
            .collect();
        let unique: HashSet<&str> = skills.iter().map(|s| s.identifier.as_str()).collect();
        prop_assert_eq!(unique.len(), skills.len());
    }
}
