use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Qualitative rating bucket. Declaration order is severity order, so
/// `Ord` compares by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Low,
    Medium,
    High,
    Critical,
}

impl Rating {
    pub const ALL: [Rating; 4] = [Rating::Low, Rating::Medium, Rating::High, Rating::Critical];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    pub fn label_en(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }

    pub fn label_ar(self) -> &'static str {
        match self {
            Self::Low => "منخفض",
            Self::Medium => "متوسط",
            Self::High => "مرتفع",
            Self::Critical => "حرج",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rating {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| format!("unknown rating: {s}"))
    }
}

/// Named threshold table. Each call site states which one it rates against;
/// the tables are not unified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingDomain {
    /// General enterprise risk (inherent and residual ratings on a Risk).
    Risk,
    /// Compliance obligations.
    Compliance,
    /// Proposed ratings recorded on residual-risk change requests.
    ResidualRequest,
}

impl RatingDomain {
    pub const ALL: [RatingDomain; 3] = [
        RatingDomain::Risk,
        RatingDomain::Compliance,
        RatingDomain::ResidualRequest,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Risk => "risk",
            Self::Compliance => "compliance",
            Self::ResidualRequest => "residual_request",
        }
    }
}

impl fmt::Display for RatingDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RatingDomain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| format!("unknown rating domain: {s}"))
    }
}

/// One row of a threshold table: scores at or above `min_score` map to `rating`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingThreshold {
    pub min_score: u8,
    pub rating: Rating,
}

impl RatingThreshold {
    pub const fn new(min_score: u8, rating: Rating) -> Self {
        Self { min_score, rating }
    }
}
