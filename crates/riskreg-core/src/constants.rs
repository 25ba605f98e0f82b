/// riskreg system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Lowest accepted likelihood / impact value.
pub const MIN_FACTOR: u8 = 1;

/// Highest accepted likelihood / impact value.
pub const MAX_FACTOR: u8 = 5;

/// Highest possible score (`MAX_FACTOR × MAX_FACTOR`).
pub const MAX_SCORE: u8 = MAX_FACTOR * MAX_FACTOR;

/// Progress value of a fully completed plan.
pub const FULL_PROGRESS: u8 = 100;

/// Name of the project-level configuration file.
pub const CONFIG_FILENAME: &str = "riskreg.toml";
