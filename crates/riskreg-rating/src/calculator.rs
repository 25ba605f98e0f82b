use riskreg_core::config::RatingConfig;
use riskreg_core::errors::{RatingError, RiskRegResult};
use riskreg_core::models::{Rating, RatingDomain, RiskAssessment};

use crate::score::{compute_score, ScoredRating};
use crate::table::ThresholdTable;

/// Score and rate one likelihood/impact pair against an explicit table.
pub fn compute_rating(table: &ThresholdTable, likelihood: u8, impact: u8) -> RiskRegResult<ScoredRating> {
    let score = compute_score(likelihood, impact)?;
    Ok(ScoredRating {
        score,
        rating: table.rate(score),
    })
}

/// Holds the validated table of every rating domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingCalculator {
    risk: ThresholdTable,
    compliance: ThresholdTable,
    residual_request: ThresholdTable,
}

impl RatingCalculator {
    /// Build from configuration, validating every table.
    pub fn from_config(config: &RatingConfig) -> Result<Self, RatingError> {
        Ok(Self {
            risk: ThresholdTable::new(RatingDomain::Risk, config.risk.clone())?,
            compliance: ThresholdTable::new(RatingDomain::Compliance, config.compliance.clone())?,
            residual_request: ThresholdTable::new(
                RatingDomain::ResidualRequest,
                config.residual_request.clone(),
            )?,
        })
    }

    pub fn table(&self, domain: RatingDomain) -> &ThresholdTable {
        match domain {
            RatingDomain::Risk => &self.risk,
            RatingDomain::Compliance => &self.compliance,
            RatingDomain::ResidualRequest => &self.residual_request,
        }
    }

    /// Score and rate against the named domain.
    pub fn rate(&self, domain: RatingDomain, likelihood: u8, impact: u8) -> RiskRegResult<ScoredRating> {
        compute_rating(self.table(domain), likelihood, impact)
    }

    /// Rate an already-computed score against the named domain.
    pub fn rate_score(&self, domain: RatingDomain, score: u8) -> Rating {
        self.table(domain).rate(score)
    }

    /// Full assessment (factors, score, rating) for the named domain.
    pub fn assess(&self, domain: RatingDomain, likelihood: u8, impact: u8) -> RiskRegResult<RiskAssessment> {
        Ok(self
            .rate(domain, likelihood, impact)?
            .into_assessment(likelihood, impact))
    }
}

impl Default for RatingCalculator {
    /// Compiled default tables; these satisfy `RatingConfig::check_table`
    /// (covered by the crate's tests).
    fn default() -> Self {
        let config = RatingConfig::default();
        Self {
            risk: ThresholdTable::from_defaults(RatingDomain::Risk, config.risk),
            compliance: ThresholdTable::from_defaults(RatingDomain::Compliance, config.compliance),
            residual_request: ThresholdTable::from_defaults(
                RatingDomain::ResidualRequest,
                config.residual_request,
            ),
        }
    }
}
