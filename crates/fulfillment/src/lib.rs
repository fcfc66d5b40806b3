//! Order fulfillment rules.
//!
//! Given an order, decide per product whether to consume one unit of stock or
//! to tell someone why it cannot be delivered right now. The decision depends
//! on the product type:
//!
//! - **normal**: consume stock, or announce a restock delay;
//! - **seasonal**: only sold inside its season window, and a restock only
//!   helps if it lands before the season ends;
//! - **expirable**: never sold on or after its expiry date, and a restock only
//!   helps if it lands before that date.
//!
//! ```text
//! OrderProcessor::process(order_id)
//!   ↓ OrderRepository::find_order
//!   ↓ for each product: StrategyRegistry::resolve(type tag)
//!   ↓ ProcessingStrategy::decide(product, today)   (pure)
//!   ↓ ConsumeStock → Product::take_one + OrderRepository::save_product
//!     Notify(..)   → Notifier
//! ```
//!
//! Storage and notification delivery are collaborators behind the traits in
//! [`ports`]; this crate performs no IO of its own. [`InMemoryNotifier`] is the
//! in-process notifier used by tests and hosts without a real transport.

pub mod clock;
pub mod decision;
pub mod error;
pub mod ports;
pub mod processor;
pub mod recording;
pub mod registry;
pub mod strategy;

#[cfg(test)]
mod testing;

pub use clock::{Clock, FixedClock, SystemClock};
pub use decision::{Decision, Notification};
pub use error::{ErrorKind, FulfillmentError, FulfillmentResult, StorageError};
pub use ports::{Notifier, OrderRepository};
pub use processor::{OrderProcessor, MAX_SAVE_ATTEMPTS};
pub use recording::InMemoryNotifier;
pub use registry::{StrategyRegistry, StrategyRegistryBuilder};
pub use strategy::{
    AvailabilityGate, ExpirableStrategy, ExpiryGate, Gated, NormalStrategy, ProcessingStrategy,
    SeasonGate, SeasonalStrategy, StockGate,
};
