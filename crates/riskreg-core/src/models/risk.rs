use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::field::{FieldMap, FieldValue, Snapshot, TrackedField};
use super::{EntityRef, Rating};

/// Likelihood × impact assessment with its derived score and rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub likelihood: u8,
    pub impact: u8,
    pub score: u8,
    pub rating: Rating,
}

/// A registered risk. Owns its treatment plans and change requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Risk {
    pub id: String,
    pub title_en: String,
    pub title_ar: String,
    pub description_en: String,
    pub description_ar: String,
    pub department_id: String,
    pub owner_id: Option<String>,
    /// Pre-mitigation assessment.
    pub inherent: RiskAssessment,
    /// Post-mitigation assessment. Only changed through an accepted change request.
    pub residual: RiskAssessment,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Optimistic concurrency token, bumped by every successful update.
    pub version: i64,
}

impl Snapshot for Risk {
    fn entity_ref(&self) -> EntityRef {
        EntityRef::risk(&self.id)
    }

    fn snapshot(&self) -> FieldMap {
        let mut map = FieldMap::new();
        map.insert(TrackedField::TitleEn, FieldValue::from(&self.title_en));
        map.insert(TrackedField::TitleAr, FieldValue::from(&self.title_ar));
        map.insert(TrackedField::DescriptionEn, FieldValue::from(&self.description_en));
        map.insert(TrackedField::DescriptionAr, FieldValue::from(&self.description_ar));
        map.insert(TrackedField::DepartmentId, FieldValue::from(&self.department_id));
        map.insert(TrackedField::OwnerId, FieldValue::from(&self.owner_id));
        map.insert(TrackedField::InherentLikelihood, self.inherent.likelihood.into());
        map.insert(TrackedField::InherentImpact, self.inherent.impact.into());
        map.insert(TrackedField::InherentScore, self.inherent.score.into());
        map.insert(TrackedField::InherentRating, self.inherent.rating.as_str().into());
        map.insert(TrackedField::ResidualLikelihood, self.residual.likelihood.into());
        map.insert(TrackedField::ResidualImpact, self.residual.impact.into());
        map.insert(TrackedField::ResidualScore, self.residual.score.into());
        map.insert(TrackedField::ResidualRating, self.residual.rating.as_str().into());
        map
    }
}

/// Input for registering a new risk. Scores and ratings are derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRisk {
    pub title_en: String,
    pub title_ar: String,
    #[serde(default)]
    pub description_en: String,
    #[serde(default)]
    pub description_ar: String,
    pub department_id: String,
    #[serde(default)]
    pub owner_id: Option<String>,
    pub inherent_likelihood: u8,
    pub inherent_impact: u8,
    /// Defaults to the inherent likelihood when absent.
    #[serde(default)]
    pub residual_likelihood: Option<u8>,
    /// Defaults to the inherent impact when absent.
    #[serde(default)]
    pub residual_impact: Option<u8>,
}
