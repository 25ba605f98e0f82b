use crate::models::RatingDomain;

/// Rating domain / threshold table errors.
#[derive(Debug, thiserror::Error)]
pub enum RatingError {
    #[error("invalid threshold table for domain {domain}: {reason}")]
    InvalidThresholdTable { domain: RatingDomain, reason: String },

    #[error("unknown rating domain: {0}")]
    UnknownDomain(String),
}
