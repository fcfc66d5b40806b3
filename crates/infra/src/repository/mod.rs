//! Order/product storage.
//!
//! Only an in-memory store ships with the workspace; durable storage is a
//! host concern and plugs in through `orderflow_fulfillment::OrderRepository`.

pub mod in_memory;

pub use in_memory::InMemoryOrderRepository;
