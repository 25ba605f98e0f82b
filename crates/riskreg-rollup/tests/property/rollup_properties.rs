use chrono::Duration;
use proptest::prelude::*;
use riskreg_core::models::{PlanStatus, TaskStatus};
use riskreg_rollup::{recalculate_task_status, recalculate_treatment_status};
use test_fixtures::{fixed_now, plan, steps_with, task, tasks_with};

fn arb_status() -> impl Strategy<Value = TaskStatus> {
    prop::sample::select(TaskStatus::ALL.to_vec())
}

fn arb_plan_status() -> impl Strategy<Value = PlanStatus> {
    prop::sample::select(PlanStatus::ALL.to_vec())
}

proptest! {
    #[test]
    fn plan_recalculation_is_idempotent(
        start in arb_plan_status(),
        statuses in prop::collection::vec(arb_status(), 0..12),
        due_offset in prop::option::of(-30i64..30),
    ) {
        let now = fixed_now();
        let mut p = plan("p", "r");
        p.status = start;
        p.due_date = due_offset.map(|d| now + Duration::days(d));
        let tasks = tasks_with("p", &statuses);

        let once = recalculate_treatment_status(&p, &tasks, now);
        let twice = recalculate_treatment_status(&once, &tasks, now);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn cancelled_is_sticky(statuses in prop::collection::vec(arb_status(), 0..12)) {
        let mut p = plan("p", "r");
        p.status = PlanStatus::Cancelled;
        p.due_date = Some(fixed_now() - Duration::days(1));
        let next = recalculate_treatment_status(&p, &tasks_with("p", &statuses), fixed_now());
        prop_assert_eq!(next, p);
    }

    #[test]
    fn progress_bounded_and_complete_iff_all_done(
        statuses in prop::collection::vec(arb_status(), 1..12),
    ) {
        let next = recalculate_treatment_status(&plan("p", "r"), &tasks_with("p", &statuses), fixed_now());
        prop_assert!(next.progress <= 100);
        let all_done = statuses.iter().all(|s| *s == TaskStatus::Completed);
        prop_assert_eq!(next.status == PlanStatus::Completed, all_done);
        prop_assert_eq!(next.progress == 100, all_done);
    }

    #[test]
    fn task_recalculation_is_idempotent(
        manual in arb_status(),
        statuses in prop::collection::vec(arb_status(), 0..8),
    ) {
        let mut t = task("t", "p", 1);
        t.status = manual;
        let steps = steps_with("t", &statuses);
        let once = recalculate_task_status(&t, &steps);
        prop_assert_eq!(recalculate_task_status(&once, &steps), once);
    }
}
