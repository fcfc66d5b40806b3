//! Notification sinks.

pub mod log;

pub use log::LogNotifier;
pub use orderflow_fulfillment::InMemoryNotifier;
