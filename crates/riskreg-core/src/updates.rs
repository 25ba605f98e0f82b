//! Tagged partial updates for direct risk edits.
//!
//! Each variant is the field-set one role tier may touch. Residual
//! assessment fields appear in none of them: those change only through an
//! accepted residual-risk change request.

use serde::{Deserialize, Serialize};

use crate::models::Role;

/// Descriptive fields. Any writing role may edit these.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContributorRiskEdit {
    pub title_en: Option<String>,
    pub title_ar: Option<String>,
    pub description_en: Option<String>,
    pub description_ar: Option<String>,
}

impl ContributorRiskEdit {
    pub fn is_empty(&self) -> bool {
        self.title_en.is_none()
            && self.title_ar.is_none()
            && self.description_en.is_none()
            && self.description_ar.is_none()
    }
}

/// Descriptive fields plus the inherent assessment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerRiskEdit {
    pub details: ContributorRiskEdit,
    pub inherent_likelihood: Option<u8>,
    pub inherent_impact: Option<u8>,
}

/// Everything a manager may touch plus department and owner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminRiskEdit {
    pub assessment: ManagerRiskEdit,
    pub department_id: Option<String>,
    /// `Some(None)` clears the owner.
    pub owner_id: Option<Option<String>>,
}

/// A direct edit to a risk, tagged by the field-set it is allowed to touch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tier", content = "edit", rename_all = "snake_case")]
pub enum RiskUpdate {
    Contributor(ContributorRiskEdit),
    Manager(ManagerRiskEdit),
    Admin(AdminRiskEdit),
}

const CONTRIBUTOR_ROLES: &[Role] = &[
    Role::Contributor,
    Role::RiskChampion,
    Role::RiskManager,
    Role::Admin,
];
const MANAGER_ROLES: &[Role] = &[Role::RiskManager, Role::Admin];
const ADMIN_ROLES: &[Role] = &[Role::Admin];

impl RiskUpdate {
    /// Roles allowed to submit this variant.
    pub fn permitted_roles(&self) -> &'static [Role] {
        match self {
            Self::Contributor(_) => CONTRIBUTOR_ROLES,
            Self::Manager(_) => MANAGER_ROLES,
            Self::Admin(_) => ADMIN_ROLES,
        }
    }

    pub fn is_permitted(&self, role: Role) -> bool {
        self.permitted_roles().contains(&role)
    }

    pub fn tier(&self) -> &'static str {
        match self {
            Self::Contributor(_) => "contributor",
            Self::Manager(_) => "manager",
            Self::Admin(_) => "admin",
        }
    }

    pub fn details(&self) -> &ContributorRiskEdit {
        match self {
            Self::Contributor(d) => d,
            Self::Manager(m) => &m.details,
            Self::Admin(a) => &a.assessment.details,
        }
    }

    /// Requested inherent likelihood / impact, if the tier carries them.
    pub fn inherent(&self) -> (Option<u8>, Option<u8>) {
        match self {
            Self::Contributor(_) => (None, None),
            Self::Manager(m) => (m.inherent_likelihood, m.inherent_impact),
            Self::Admin(a) => (a.assessment.inherent_likelihood, a.assessment.inherent_impact),
        }
    }

    /// Requested department / owner, if the tier carries them.
    pub fn ownership(&self) -> (Option<&str>, Option<Option<&str>>) {
        match self {
            Self::Admin(a) => (
                a.department_id.as_deref(),
                a.owner_id.as_ref().map(|o| o.as_deref()),
            ),
            _ => (None, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_are_nested_by_role() {
        let contributor = RiskUpdate::Contributor(ContributorRiskEdit::default());
        let manager = RiskUpdate::Manager(ManagerRiskEdit::default());
        let admin = RiskUpdate::Admin(AdminRiskEdit::default());

        assert!(!contributor.is_permitted(Role::Viewer));
        assert!(contributor.is_permitted(Role::Contributor));
        assert!(!manager.is_permitted(Role::RiskChampion));
        assert!(manager.is_permitted(Role::RiskManager));
        assert!(!admin.is_permitted(Role::RiskManager));
        assert!(admin.is_permitted(Role::Admin));
    }

    #[test]
    fn nested_accessors_reach_inner_fields() {
        let update = RiskUpdate::Admin(AdminRiskEdit {
            assessment: ManagerRiskEdit {
                details: ContributorRiskEdit {
                    title_ar: Some("عنوان".into()),
                    ..Default::default()
                },
                inherent_likelihood: Some(4),
                inherent_impact: None,
            },
            department_id: Some("dept-ops".into()),
            owner_id: Some(None),
        });
        assert_eq!(update.details().title_ar.as_deref(), Some("عنوان"));
        assert_eq!(update.inherent(), (Some(4), None));
        assert_eq!(update.ownership(), (Some("dept-ops"), Some(None)));
    }
}
