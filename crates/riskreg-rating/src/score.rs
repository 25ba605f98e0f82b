use serde::{Deserialize, Serialize};

use riskreg_core::constants::{MAX_FACTOR, MIN_FACTOR};
use riskreg_core::errors::{RiskRegError, RiskRegResult};
use riskreg_core::models::{Rating, RiskAssessment};

/// A computed score with its rating bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredRating {
    pub score: u8,
    pub rating: Rating,
}

impl ScoredRating {
    /// Combine with the factors that produced it.
    pub fn into_assessment(self, likelihood: u8, impact: u8) -> RiskAssessment {
        RiskAssessment {
            likelihood,
            impact,
            score: self.score,
            rating: self.rating,
        }
    }
}

/// Reject a likelihood or impact outside `[1, 5]`.
pub fn validate_factor(field: &str, value: u8) -> RiskRegResult<u8> {
    if (MIN_FACTOR..=MAX_FACTOR).contains(&value) {
        Ok(value)
    } else {
        Err(RiskRegError::OutOfRange {
            field: field.to_string(),
            value: i64::from(value),
            min: i64::from(MIN_FACTOR),
            max: i64::from(MAX_FACTOR),
        })
    }
}

/// `likelihood × impact`, after range checks. Result is in `1..=25`.
pub fn compute_score(likelihood: u8, impact: u8) -> RiskRegResult<u8> {
    let likelihood = validate_factor("likelihood", likelihood)?;
    let impact = validate_factor("impact", impact)?;
    Ok(likelihood * impact)
}
