//! Snapshot diffing into `ChangeLogEntry` batches.
//!
//! One `ChangeRecorder` corresponds to one mutation. Every entry it produces shares
//! the batch id, actor, and timestamp, so history views can group them. The
//! batch is handed to storage together with the entity write so both land in
//! the same transaction.

use chrono::{DateTime, Utc};
use riskreg_core::models::{ChangeLogEntry, EntityRef, FieldMap, FieldValue, Snapshot, TrackedField};
use uuid::Uuid;

use crate::describe::{classify, describe_ar, describe_en};
use crate::registry::{field_spec, tracked_fields_for};

/// Diff `old` against `new_fields` and return one entry per changed field.
///
/// Only fields that are both tracked and present in `new_fields` are
/// considered. A field missing from `old` is treated as empty. Values are
/// compared by their rendered string form. Every entry is stamped `at`.
pub fn diff_and_log(
    subject: &EntityRef,
    actor_id: &str,
    old: &FieldMap,
    new_fields: &FieldMap,
    tracked: &[TrackedField],
    at: DateTime<Utc>,
) -> Vec<ChangeLogEntry> {
    let mut batch = ChangeRecorder::new(actor_id, at);
    batch.diff(subject, old, new_fields, tracked);
    batch.into_entries()
}

/// Records the change log entries of a single mutation as one batch.
#[derive(Debug, Clone)]
pub struct ChangeRecorder {
    batch_id: String,
    actor_id: String,
    at: DateTime<Utc>,
    entries: Vec<ChangeLogEntry>,
}

impl ChangeRecorder {
    pub fn new(actor_id: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            batch_id: Uuid::new_v4().to_string(),
            actor_id: actor_id.into(),
            at,
            entries: Vec::new(),
        }
    }

    pub fn batch_id(&self) -> &str {
        &self.batch_id
    }

    /// Diff two field maps for `subject`. Returns the number of entries added.
    pub fn diff(
        &mut self,
        subject: &EntityRef,
        old: &FieldMap,
        new_fields: &FieldMap,
        tracked: &[TrackedField],
    ) -> usize {
        let before = self.entries.len();
        let mut seen: Vec<TrackedField> = Vec::with_capacity(tracked.len());

        for &field in tracked {
            if seen.contains(&field) {
                continue;
            }
            seen.push(field);

            let Some(new_value) = new_fields.get(&field) else {
                continue;
            };
            let old_value = old.get(&field).map(FieldValue::render).unwrap_or_default();
            let new_value = new_value.render();
            let Some(kind) = classify(&old_value, &new_value) else {
                continue;
            };

            let spec = field_spec(field);
            self.entries.push(ChangeLogEntry {
                id: Uuid::new_v4().to_string(),
                batch_id: self.batch_id.clone(),
                entity_type: subject.entity_type,
                entity_id: subject.id.clone(),
                actor_id: self.actor_id.clone(),
                field_name: field.as_str().to_string(),
                label_en: spec.label_en.to_string(),
                label_ar: spec.label_ar.to_string(),
                description_en: describe_en(&spec, kind, &old_value, &new_value),
                description_ar: describe_ar(&spec, kind, &old_value, &new_value),
                old_value,
                new_value,
                category: spec.category,
                kind,
                created_at: self.at,
            });
        }

        let added = self.entries.len() - before;
        if added > 0 {
            tracing::trace!(subject = %subject, added, batch_id = %self.batch_id, "diffed snapshot");
        }
        added
    }

    /// Diff two snapshots of the same entity over its default tracked set.
    pub fn record<T: Snapshot>(&mut self, before: &T, after: &T) -> usize {
        let subject = after.entity_ref();
        let tracked = tracked_fields_for(subject.entity_type);
        self.diff(&subject, &before.snapshot(), &after.snapshot(), tracked)
    }

    /// Log every non-empty field of a freshly created entity as added.
    pub fn record_created<T: Snapshot>(&mut self, created: &T) -> usize {
        let subject = created.entity_ref();
        let tracked = tracked_fields_for(subject.entity_type);
        self.diff(&subject, &FieldMap::new(), &created.snapshot(), tracked)
    }

    pub fn entries(&self) -> &[ChangeLogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<ChangeLogEntry> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use riskreg_core::models::{ChangeKind, FieldValue};

    fn map(pairs: &[(TrackedField, FieldValue)]) -> FieldMap {
        pairs.iter().cloned().collect()
    }

    #[test]
    fn entries_share_batch_metadata() {
        let at = Utc::now();
        let mut batch = ChangeRecorder::new("u-1", at);
        let old = map(&[(TrackedField::TitleEn, "a".into()), (TrackedField::TitleAr, "b".into())]);
        let new = map(&[(TrackedField::TitleEn, "c".into()), (TrackedField::TitleAr, "d".into())]);
        let added = batch.diff(&EntityRef::risk("r-1"), &old, &new, &[TrackedField::TitleEn, TrackedField::TitleAr]);

        assert_eq!(added, 2);
        let ids: Vec<_> = batch.entries().iter().map(|e| e.id.clone()).collect();
        assert_ne!(ids[0], ids[1]);
        for entry in batch.entries() {
            assert_eq!(entry.batch_id, batch.batch_id());
            assert_eq!(entry.actor_id, "u-1");
            assert_eq!(entry.created_at, at);
        }
    }

    #[test]
    fn duplicate_tracked_fields_log_once() {
        let mut batch = ChangeRecorder::new("u-1", Utc::now());
        let new = map(&[(TrackedField::OwnerId, "u-9".into())]);
        batch.diff(
            &EntityRef::risk("r-1"),
            &FieldMap::new(),
            &new,
            &[TrackedField::OwnerId, TrackedField::OwnerId],
        );
        assert_eq!(batch.len(), 1);
        assert_eq!(batch.entries()[0].kind, ChangeKind::Added);
    }
}
