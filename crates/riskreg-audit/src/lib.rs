//! # riskreg-audit
//!
//! Change audit recorder. Diffs an old snapshot against new field values and
//! produces immutable, bilingual `ChangeLogEntry` rows. It has no knowledge of
//! why fields changed; every mutation path calls it after deciding what changed.

pub mod describe;
pub mod recorder;
pub mod registry;

pub use recorder::{diff_and_log, ChangeRecorder};
pub use registry::{field_spec, tracked_fields_for, FieldSpec};
