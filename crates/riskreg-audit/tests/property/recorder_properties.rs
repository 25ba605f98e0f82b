use proptest::prelude::*;
use riskreg_audit::diff_and_log;
use riskreg_core::models::{EntityRef, FieldMap, FieldValue, TrackedField};
use test_fixtures::fixed_now;

fn arb_value() -> impl Strategy<Value = FieldValue> {
    prop_oneof![
        Just(FieldValue::Null),
        "[a-c]{0,2}".prop_map(FieldValue::Text),
        (0i64..4).prop_map(FieldValue::Integer),
    ]
}

fn arb_map() -> impl Strategy<Value = FieldMap> {
    prop::collection::btree_map(prop::sample::select(TrackedField::ALL.to_vec()), arb_value(), 0..8)
}

proptest! {
    #[test]
    fn entries_match_changed_tracked_fields(old in arb_map(), new in arb_map()) {
        let tracked = TrackedField::ALL;
        let entries = diff_and_log(&EntityRef::risk("r"), "u", &old, &new, &tracked, fixed_now());

        let expected = new
            .iter()
            .filter(|(field, value)| {
                let before = old.get(*field).map(FieldValue::render).unwrap_or_default();
                before != value.render()
            })
            .count();
        prop_assert_eq!(entries.len(), expected);
        for entry in &entries {
            prop_assert_ne!(&entry.old_value, &entry.new_value);
            prop_assert_eq!(entry.created_at, fixed_now());
        }
    }

    #[test]
    fn diff_against_self_is_empty(map in arb_map()) {
        let entries = diff_and_log(&EntityRef::risk("r"), "u", &map, &map, &TrackedField::ALL, fixed_now());
        prop_assert!(entries.is_empty());
    }
}
