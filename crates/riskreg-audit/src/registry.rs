//! Static field → (label, category) registry and per-entity tracked sets.

use riskreg_core::models::{ChangeCategory, EntityType, TrackedField};

/// Display metadata for one tracked field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub label_en: &'static str,
    pub label_ar: &'static str,
    pub category: ChangeCategory,
}

const fn spec(label_en: &'static str, label_ar: &'static str, category: ChangeCategory) -> FieldSpec {
    FieldSpec {
        label_en,
        label_ar,
        category,
    }
}

pub fn field_spec(field: TrackedField) -> FieldSpec {
    use ChangeCategory::*;
    match field {
        TrackedField::TitleEn => spec("Title (English)", "العنوان (بالإنجليزية)", Info),
        TrackedField::TitleAr => spec("Title (Arabic)", "العنوان (بالعربية)", Info),
        TrackedField::DescriptionEn => spec("Description (English)", "الوصف (بالإنجليزية)", Info),
        TrackedField::DescriptionAr => spec("Description (Arabic)", "الوصف (بالعربية)", Info),
        TrackedField::DepartmentId => spec("Department", "الإدارة", Ownership),
        TrackedField::OwnerId => spec("Owner", "المالك", Ownership),
        TrackedField::AssigneeId => spec("Assignee", "المكلف", Ownership),
        TrackedField::InherentLikelihood => spec("Inherent likelihood", "الاحتمالية الكامنة", Assessment),
        TrackedField::InherentImpact => spec("Inherent impact", "الأثر الكامن", Assessment),
        TrackedField::InherentScore => spec("Inherent score", "الدرجة الكامنة", Assessment),
        TrackedField::InherentRating => spec("Inherent rating", "التصنيف الكامن", Assessment),
        TrackedField::ResidualLikelihood => spec("Residual likelihood", "الاحتمالية المتبقية", Assessment),
        TrackedField::ResidualImpact => spec("Residual impact", "الأثر المتبقي", Assessment),
        TrackedField::ResidualScore => spec("Residual score", "الدرجة المتبقية", Assessment),
        TrackedField::ResidualRating => spec("Residual rating", "التصنيف المتبقي", Assessment),
        TrackedField::Status => spec("Status", "الحالة", Status),
        TrackedField::Progress => spec("Progress", "نسبة الإنجاز", Status),
        TrackedField::Strategy => spec("Treatment strategy", "استراتيجية المعالجة", Treatment),
        TrackedField::DueDate => spec("Due date", "تاريخ الاستحقاق", Treatment),
        TrackedField::Position => spec("Order", "الترتيب", Treatment),
        TrackedField::ReviewerId => spec("Reviewer", "المراجع", Ownership),
        TrackedField::ReviewNote => spec("Review note", "ملاحظة المراجعة", Info),
    }
}

const RISK_FIELDS: &[TrackedField] = &[
    TrackedField::TitleEn,
    TrackedField::TitleAr,
    TrackedField::DescriptionEn,
    TrackedField::DescriptionAr,
    TrackedField::DepartmentId,
    TrackedField::OwnerId,
    TrackedField::InherentLikelihood,
    TrackedField::InherentImpact,
    TrackedField::InherentScore,
    TrackedField::InherentRating,
    TrackedField::ResidualLikelihood,
    TrackedField::ResidualImpact,
    TrackedField::ResidualScore,
    TrackedField::ResidualRating,
];

const PLAN_FIELDS: &[TrackedField] = &[
    TrackedField::TitleEn,
    TrackedField::TitleAr,
    TrackedField::Strategy,
    TrackedField::Status,
    TrackedField::Progress,
    TrackedField::DueDate,
    TrackedField::OwnerId,
];

const TASK_FIELDS: &[TrackedField] = &[
    TrackedField::TitleEn,
    TrackedField::TitleAr,
    TrackedField::Position,
    TrackedField::Status,
    TrackedField::AssigneeId,
];

const STEP_FIELDS: &[TrackedField] = &[
    TrackedField::TitleEn,
    TrackedField::TitleAr,
    TrackedField::Position,
    TrackedField::Status,
];

const REQUEST_FIELDS: &[TrackedField] = &[
    TrackedField::Status,
    TrackedField::ReviewerId,
    TrackedField::ReviewNote,
];

/// Default tracked set for an entity type, in log order.
pub fn tracked_fields_for(entity_type: EntityType) -> &'static [TrackedField] {
    match entity_type {
        EntityType::Risk => RISK_FIELDS,
        EntityType::TreatmentPlan => PLAN_FIELDS,
        EntityType::TreatmentTask => TASK_FIELDS,
        EntityType::TaskStep => STEP_FIELDS,
        EntityType::ChangeRequest => REQUEST_FIELDS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_field_has_bilingual_labels() {
        for field in TrackedField::ALL {
            let spec = field_spec(field);
            assert!(!spec.label_en.is_empty(), "{field}");
            assert!(!spec.label_ar.is_empty(), "{field}");
        }
    }

    #[test]
    fn residual_fields_are_assessment() {
        for field in TrackedField::RESIDUAL {
            assert_eq!(field_spec(field).category, ChangeCategory::Assessment);
        }
    }

    #[test]
    fn tracked_sets_have_no_duplicates() {
        for entity in EntityType::ALL {
            let fields = tracked_fields_for(entity);
            let unique: std::collections::BTreeSet<_> = fields.iter().collect();
            assert_eq!(unique.len(), fields.len(), "{entity}");
        }
    }
}
