//! Event fan-out adapters.
//!
//! Provides [`EventBus`], the in-memory publish/subscribe primitive behind
//! the [`NotificationSink`](switchboard_application::NotificationSink) port.

mod event_bus;

pub use event_bus::EventBus;
