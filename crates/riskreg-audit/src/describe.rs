//! Bilingual description templates.

use riskreg_core::models::ChangeKind;

use crate::registry::FieldSpec;

/// Classify a change between two rendered values. `None` when equal.
pub fn classify(old: &str, new: &str) -> Option<ChangeKind> {
    if old == new {
        None
    } else if old.is_empty() {
        Some(ChangeKind::Added)
    } else if new.is_empty() {
        Some(ChangeKind::Removed)
    } else {
        Some(ChangeKind::Changed)
    }
}

pub fn describe_en(spec: &FieldSpec, kind: ChangeKind, old: &str, new: &str) -> String {
    let label = spec.label_en;
    match kind {
        ChangeKind::Added => format!("{label} set to \"{new}\""),
        ChangeKind::Removed => format!("{label} cleared (was \"{old}\")"),
        ChangeKind::Changed => format!("{label} changed from \"{old}\" to \"{new}\""),
    }
}

pub fn describe_ar(spec: &FieldSpec, kind: ChangeKind, old: &str, new: &str) -> String {
    let label = spec.label_ar;
    match kind {
        ChangeKind::Added => format!("تم تعيين {label} إلى \"{new}\""),
        ChangeKind::Removed => format!("تم مسح {label} (كانت \"{old}\")"),
        ChangeKind::Changed => format!("تم تغيير {label} من \"{old}\" إلى \"{new}\""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use riskreg_core::models::ChangeCategory;

    const SPEC: FieldSpec = FieldSpec {
        label_en: "Owner",
        label_ar: "المالك",
        category: ChangeCategory::Ownership,
    };

    #[test]
    fn classify_distinguishes_all_shapes() {
        assert_eq!(classify("a", "a"), None);
        assert_eq!(classify("", ""), None);
        assert_eq!(classify("", "x"), Some(ChangeKind::Added));
        assert_eq!(classify("x", ""), Some(ChangeKind::Removed));
        assert_eq!(classify("x", "y"), Some(ChangeKind::Changed));
    }

    #[test]
    fn templates_quote_values() {
        assert_eq!(describe_en(&SPEC, ChangeKind::Added, "", "u-1"), "Owner set to \"u-1\"");
        assert_eq!(
            describe_en(&SPEC, ChangeKind::Removed, "u-1", ""),
            "Owner cleared (was \"u-1\")"
        );
        assert_eq!(
            describe_ar(&SPEC, ChangeKind::Changed, "u-1", "u-2"),
            "تم تغيير المالك من \"u-1\" إلى \"u-2\""
        );
    }
}
