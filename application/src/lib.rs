//! Application layer for switchboard
//!
//! This crate contains the resolution and dispatch use cases together with
//! the notification sink port. It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::notification_sink::{
    Callback, Callbacks, Listener, Notification, NotificationSink,
};
pub use use_cases::dispatch_query::{DispatchError, Dispatcher, SendOutcome};
pub use use_cases::resolve_config::{ConfigResolver, ResolutionError};
