//! Start-up seed data for the in-memory repository.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use orderflow_core::{OrderId, ProductId};
use orderflow_fulfillment::StorageError;
use orderflow_products::Product;

use crate::repository::InMemoryOrderRepository;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed seed data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("seed data rejected: {0}")]
    Storage(#[from] StorageError),
}

/// An order as written in a seed file: its id plus the ids of its products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedOrder {
    pub id: OrderId,
    #[serde(default)]
    pub items: Vec<ProductId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub orders: Vec<SeedOrder>,
}

impl SeedData {
    pub fn from_json(raw: &str) -> Result<Self, SeedError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Store every product, then every order. Stops at the first rejected row;
    /// rows stored before it stay.
    pub fn load_into(self, repository: &InMemoryOrderRepository) -> Result<(), SeedError> {
        let products = self.products.len();
        let orders = self.orders.len();

        for product in self.products {
            repository.insert_product(product)?;
        }
        for order in self.orders {
            repository.insert_order(order.id, &order.items)?;
        }

        info!(products, orders, "seed data loaded");
        Ok(())
    }
}
