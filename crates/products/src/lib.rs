//! Products domain module.
//!
//! Product records as the fulfillment rules see them: type tag, stock count,
//! lead time and the lifecycle dates that matter for seasonal and expirable
//! goods. Pure data plus the stock-decrement invariant (no IO, no storage).

pub mod product;

pub use product::{Product, ProductType, SeasonWindow};
