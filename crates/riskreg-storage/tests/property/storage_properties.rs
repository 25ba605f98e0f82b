use proptest::prelude::*;
use riskreg_core::models::TaskStatus;
use riskreg_core::traits::IRegisterStorage;
use riskreg_storage::StorageEngine;
use test_fixtures::{plan, risk, task};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn bilingual_text_survives_storage(
        title_en in "\\PC{0,40}",
        title_ar in "[\u{0621}-\u{064A} ]{0,40}",
    ) {
        let s = StorageEngine::open_in_memory().unwrap();
        let mut r = risk("r-1");
        r.title_en = title_en;
        r.title_ar = title_ar;
        s.create_risk(&r, &[]).unwrap();
        prop_assert_eq!(s.get_risk("r-1").unwrap(), Some(r));
    }

    #[test]
    fn tasks_list_in_position_order(positions in prop::collection::btree_set(0u32..1000, 1..10)) {
        let s = StorageEngine::open_in_memory().unwrap();
        s.create_risk(&risk("r-1"), &[]).unwrap();
        s.create_plan(&plan("p-1", "r-1")).unwrap();
        // Insert in reverse so storage order has to come from the query.
        for position in positions.iter().rev() {
            let mut t = task(&format!("t-{position}"), "p-1", *position);
            t.status = TaskStatus::InProgress;
            s.create_task(&t).unwrap();
        }
        let listed: Vec<u32> = s.list_tasks("p-1").unwrap().into_iter().map(|t| t.position).collect();
        let expected: Vec<u32> = positions.into_iter().collect();
        prop_assert_eq!(listed, expected);
    }
}
