//! Configuration system for riskreg.
//! TOML-based, 3-layer resolution: env > project file > compiled defaults.

pub mod defaults;
pub mod observability_config;
pub mod rating_config;
pub mod riskreg_config;
pub mod storage_config;
pub mod workflow_config;

pub use observability_config::ObservabilityConfig;
pub use rating_config::RatingConfig;
pub use riskreg_config::RiskRegConfig;
pub use storage_config::StorageConfig;
pub use workflow_config::WorkflowConfig;
