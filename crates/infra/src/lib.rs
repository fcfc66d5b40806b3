//! Infrastructure layer: collaborator implementations for the fulfillment
//! engine (storage, notification delivery, seed data).

pub mod notifications;
pub mod repository;
pub mod seed;


pub use notifications::{InMemoryNotifier, LogNotifier};
pub use repository::InMemoryOrderRepository;
pub use seed::{SeedData, SeedError, SeedOrder};
