//! # riskreg-rating
//!
//! Pure scoring: `score = likelihood × impact`, rating from a named domain's
//! ordered threshold table. No shared state; safe to call concurrently.

pub mod calculator;
pub mod score;
pub mod table;

pub use calculator::{compute_rating, RatingCalculator};
pub use score::{compute_score, validate_factor, ScoredRating};
pub use table::ThresholdTable;
