//! Error handling for riskreg.
//! One error enum per subsystem, `thiserror` only, aggregated into `RiskRegError`.

pub mod config_error;
pub mod error_code;
pub mod rating_error;
pub mod riskreg_error;
pub mod storage_error;

pub use config_error::ConfigError;
pub use error_code::ErrorKind;
pub use rating_error::RatingError;
pub use riskreg_error::{ConflictReason, RiskRegError, RiskRegResult};
pub use storage_error::StorageError;
