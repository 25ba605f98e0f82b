//! Change audit recorder: diff semantics and bilingual descriptions.

use chrono::{Duration, Utc};
use riskreg_audit::{diff_and_log, field_spec, tracked_fields_for, ChangeRecorder};
use riskreg_core::models::{
    ChangeCategory, ChangeKind, EntityRef, EntityType, FieldMap, FieldValue, PlanStatus,
    Snapshot, TrackedField,
};
use test_fixtures::fixed_now;

fn fields(pairs: &[(TrackedField, FieldValue)]) -> FieldMap {
    pairs.iter().cloned().collect()
}

#[test]
fn title_ar_change_yields_exactly_one_entry() {
    let subject = EntityRef::risk("r-1");
    let old = fields(&[
        (TrackedField::TitleEn, "Same".into()),
        (TrackedField::TitleAr, "A".into()),
    ]);
    let new = fields(&[
        (TrackedField::TitleEn, "Same".into()),
        (TrackedField::TitleAr, "B".into()),
    ]);

    let entries = diff_and_log(
        &subject,
        "u-1",
        &old,
        &new,
        tracked_fields_for(EntityType::Risk),
        fixed_now(),
    );

    assert_eq!(entries.len(), 1);
    let entry = &entries[0];
    assert_eq!(entry.field_name, "titleAr");
    assert_eq!(entry.old_value, "A");
    assert_eq!(entry.new_value, "B");
    assert_eq!(entry.kind, ChangeKind::Changed);
    assert_eq!(entry.category, ChangeCategory::Info);
    assert_eq!(entry.entity_type, EntityType::Risk);
    assert_eq!(entry.entity_id, "r-1");
    assert_eq!(entry.actor_id, "u-1");
    assert_eq!(entry.created_at, fixed_now());
    assert_eq!(entry.description_en, "Title (Arabic) changed from \"A\" to \"B\"");
    assert_eq!(entry.description_ar, "تم تغيير العنوان (بالعربية) من \"A\" إلى \"B\"");
}

#[test]
fn untracked_and_absent_fields_are_ignored() {
    let subject = EntityRef::risk("r-1");
    let old = fields(&[(TrackedField::TitleEn, "a".into()), (TrackedField::OwnerId, "u-1".into())]);
    // OwnerId missing from new: not a removal.
    let new = fields(&[(TrackedField::TitleEn, "b".into()), (TrackedField::Status, "x".into())]);

    let entries = diff_and_log(
        &subject,
        "u-1",
        &old,
        &new,
        &[TrackedField::TitleEn, TrackedField::OwnerId],
        fixed_now(),
    );
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].field_name, "titleEn");
}

#[test]
fn added_and_removed_use_their_templates() {
    let subject = EntityRef::plan("p-1");
    let old = fields(&[(TrackedField::OwnerId, FieldValue::Null), (TrackedField::DueDate, "2026-04-01".into())]);
    let new = fields(&[(TrackedField::OwnerId, "u-2".into()), (TrackedField::DueDate, FieldValue::Null)]);

    let entries = diff_and_log(
        &subject,
        "u-1",
        &old,
        &new,
        &[TrackedField::OwnerId, TrackedField::DueDate],
        fixed_now(),
    );
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].batch_id, entries[1].batch_id);

    let owner = &entries[0];
    assert_eq!(owner.kind, ChangeKind::Added);
    assert_eq!(owner.old_value, "");
    assert_eq!(owner.description_en, "Owner set to \"u-2\"");
    assert_eq!(owner.description_ar, "تم تعيين المالك إلى \"u-2\"");

    let due = &entries[1];
    assert_eq!(due.kind, ChangeKind::Removed);
    assert_eq!(due.new_value, "");
    assert_eq!(due.description_en, "Due date cleared (was \"2026-04-01\")");
    assert_eq!(due.category, ChangeCategory::Treatment);
}

#[test]
fn values_compare_by_rendered_form() {
    let subject = EntityRef::risk("r-1");
    let old = fields(&[(TrackedField::ResidualScore, FieldValue::Text("6".into()))]);
    let new = fields(&[(TrackedField::ResidualScore, FieldValue::Integer(6))]);
    assert!(diff_and_log(&subject, "u-1", &old, &new, &[TrackedField::ResidualScore], fixed_now()).is_empty());
}

#[test]
fn sub_second_timestamp_changes_are_logged() {
    let subject = EntityRef::plan("p-1");
    let due = fixed_now();
    let old = fields(&[(TrackedField::DueDate, due.into())]);
    let new = fields(&[(TrackedField::DueDate, (due + Duration::milliseconds(250)).into())]);

    let entries = diff_and_log(&subject, "u-1", &old, &new, &[TrackedField::DueDate], fixed_now());
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].old_value, "2026-03-01T09:00:00Z");
    assert_eq!(entries[0].new_value, "2026-03-01T09:00:00.250Z");
}

#[test]
fn snapshot_record_logs_only_changed_fields() {
    let before = test_fixtures::plan("p-1", "r-1");
    let mut after = before.clone();
    after.status = PlanStatus::InProgress;
    after.progress = 33;

    let at = Utc::now();
    let mut recorder = ChangeRecorder::new("u-7", at);
    assert_eq!(recorder.record(&before, &after), 2);

    let names: Vec<_> = recorder.entries().iter().map(|e| e.field_name.as_str()).collect();
    assert_eq!(names, ["status", "progress"]);
    let status = &recorder.entries()[0];
    assert_eq!(status.old_value, "notStarted");
    assert_eq!(status.new_value, "inProgress");
    assert_eq!(status.category, ChangeCategory::Status);
    assert_eq!(status.subject(), after.entity_ref());
}

#[test]
fn record_created_logs_every_populated_field() {
    let risk = test_fixtures::risk("r-1");
    let mut recorder = ChangeRecorder::new("u-1", Utc::now());
    let added = recorder.record_created(&risk);

    // Every risk field in the fixture is populated.
    assert_eq!(added, tracked_fields_for(EntityType::Risk).len());
    assert!(recorder.entries().iter().all(|e| e.kind == ChangeKind::Added));
}

#[test]
fn identical_snapshots_write_nothing() {
    let task = test_fixtures::task("t-1", "p-1", 1);
    let mut recorder = ChangeRecorder::new("u-1", Utc::now());
    assert_eq!(recorder.record(&task, &task.clone()), 0);
    assert!(recorder.is_empty());
}

#[test]
fn residual_labels_are_bilingual() {
    let spec = field_spec(TrackedField::ResidualLikelihood);
    assert_eq!(spec.label_en, "Residual likelihood");
    assert_eq!(spec.label_ar, "الاحتمالية المتبقية");
}
