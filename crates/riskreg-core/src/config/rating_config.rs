use serde::{Deserialize, Serialize};

use super::defaults;
use crate::constants::MAX_SCORE;
use crate::errors::RatingError;
use crate::models::{RatingDomain, RatingThreshold};

/// Threshold tables for every rating domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    pub risk: Vec<RatingThreshold>,
    pub compliance: Vec<RatingThreshold>,
    pub residual_request: Vec<RatingThreshold>,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            risk: defaults::DEFAULT_RISK_THRESHOLDS.to_vec(),
            compliance: defaults::DEFAULT_COMPLIANCE_THRESHOLDS.to_vec(),
            residual_request: defaults::DEFAULT_RESIDUAL_REQUEST_THRESHOLDS.to_vec(),
        }
    }
}

impl RatingConfig {
    pub fn table(&self, domain: RatingDomain) -> &[RatingThreshold] {
        match domain {
            RatingDomain::Risk => &self.risk,
            RatingDomain::Compliance => &self.compliance,
            RatingDomain::ResidualRequest => &self.residual_request,
        }
    }

    /// Structural check of one table.
    ///
    /// A table must be non-empty, strictly descending by `min_score`, never
    /// rate a lower bucket more severely than a higher one, and reach down
    /// to score 1 so that every score in 1..=25 is covered.
    pub fn check_table(domain: RatingDomain, table: &[RatingThreshold]) -> Result<(), RatingError> {
        let invalid = |reason: String| RatingError::InvalidThresholdTable { domain, reason };

        let (first, last) = match (table.first(), table.last()) {
            (Some(f), Some(l)) => (f, l),
            _ => return Err(invalid("table is empty".to_string())),
        };
        if first.min_score > MAX_SCORE {
            return Err(invalid(format!(
                "top threshold {} exceeds max score {MAX_SCORE}",
                first.min_score
            )));
        }
        if last.min_score > 1 {
            return Err(invalid(format!(
                "lowest threshold {} leaves scores below it unrated",
                last.min_score
            )));
        }
        for pair in table.windows(2) {
            if pair[0].min_score <= pair[1].min_score {
                return Err(invalid(format!(
                    "thresholds must be strictly descending: {} then {}",
                    pair[0].min_score, pair[1].min_score
                )));
            }
            if pair[0].rating < pair[1].rating {
                return Err(invalid(format!(
                    "rating {} at {} is less severe than {} at {}",
                    pair[0].rating, pair[0].min_score, pair[1].rating, pair[1].min_score
                )));
            }
        }
        Ok(())
    }

    /// Check every domain's table.
    pub fn validate(&self) -> Result<(), RatingError> {
        for domain in RatingDomain::ALL {
            Self::check_table(domain, self.table(domain))?;
        }
        Ok(())
    }
}
