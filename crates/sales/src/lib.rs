//! Sales orders domain module.
//!
//! An order is an identifier plus the products it asks for. The fulfillment
//! engine reads orders but never changes them.

pub mod order;

pub use order::Order;
