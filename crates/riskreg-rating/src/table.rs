use riskreg_core::config::RatingConfig;
use riskreg_core::errors::RatingError;
use riskreg_core::models::{Rating, RatingDomain, RatingThreshold};

/// A validated, ordered (high → low) threshold table for one domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThresholdTable {
    domain: RatingDomain,
    thresholds: Vec<RatingThreshold>,
}

impl ThresholdTable {
    pub fn new(domain: RatingDomain, thresholds: Vec<RatingThreshold>) -> Result<Self, RatingError> {
        RatingConfig::check_table(domain, &thresholds)?;
        Ok(Self { domain, thresholds })
    }

    /// Wrap a compiled default table without re-validating it.
    pub(crate) fn from_defaults(domain: RatingDomain, thresholds: Vec<RatingThreshold>) -> Self {
        Self { domain, thresholds }
    }

    pub fn domain(&self) -> RatingDomain {
        self.domain
    }

    pub fn thresholds(&self) -> &[RatingThreshold] {
        &self.thresholds
    }

    /// First bucket whose minimum the score reaches. Validation guarantees
    /// the last bucket starts at or below 1, so any score ≥ 1 is rated; a
    /// score of 0 falls back to the lowest bucket.
    pub fn rate(&self, score: u8) -> Rating {
        self.thresholds
            .iter()
            .find(|t| score >= t.min_score)
            .or(self.thresholds.last())
            .map_or(Rating::Low, |t| t.rating)
    }
}
