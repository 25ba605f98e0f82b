//! # riskreg-observability
//!
//! Structured tracing for the rules engines: subscriber setup, span names,
//! and one event helper per key operation.

pub mod tracing_setup;

pub use tracing_setup::{init_from_config, init_tracing, init_tracing_with_filter};
