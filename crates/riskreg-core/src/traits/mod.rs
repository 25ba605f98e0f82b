//! Seams between the core and its external collaborators.

pub mod notifier;
pub mod storage;

pub use notifier::{INotificationSink, IRecipientResolver};
pub use storage::IRegisterStorage;
