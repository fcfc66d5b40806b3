//! Test doubles for the collaborator ports.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::NaiveDate;

use orderflow_core::{OrderId, ProductId};
use orderflow_products::Product;
use orderflow_sales::Order;

use crate::decision::Decision;
use crate::error::{FulfillmentResult, StorageError};
use crate::ports::OrderRepository;
use crate::strategy::ProcessingStrategy;

/// Repository over a fixed set of orders. Saves are recorded and written
/// back into every order holding the product.
#[derive(Default)]
pub struct MemoryRepository {
    orders: Mutex<HashMap<OrderId, Order>>,
    saved: Mutex<Vec<Product>>,
    failing_saves: Option<StorageError>,
    concurrent_writes: Mutex<Vec<Product>>,
}

impl MemoryRepository {
    pub fn with_order(order: Order) -> Self {
        let repository = Self::default();
        repository.insert(order);
        repository
    }

    /// Every `save_product` call fails with `error`.
    pub fn failing_saves(mut self, error: StorageError) -> Self {
        self.failing_saves = Some(error);
        self
    }

    /// Before each of the next saves, store one of `rows` as if another
    /// caller had written it in between.
    pub fn interleave_writes(self, rows: Vec<Product>) -> Self {
        *self.concurrent_writes.lock().unwrap() = rows;
        self
    }

    pub fn insert(&self, order: Order) {
        self.orders.lock().unwrap().insert(order.id_typed(), order);
    }

    pub fn saved(&self) -> Vec<Product> {
        self.saved.lock().unwrap().clone()
    }

    pub fn saved_stock(&self, id: ProductId) -> Option<u32> {
        self.saved
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|p| p.id_typed() == id)
            .map(Product::available)
    }

    fn write_back(orders: &mut HashMap<OrderId, Order>, product: &Product) {
        for order in orders.values_mut() {
            for item in order.items_mut() {
                if item.id_typed() == product.id_typed() {
                    *item = product.clone();
                }
            }
        }
    }

    fn stored(orders: &HashMap<OrderId, Order>, id: ProductId) -> Option<Product> {
        orders
            .values()
            .flat_map(|o| o.items())
            .find(|p| p.id_typed() == id)
            .cloned()
    }
}

impl OrderRepository for MemoryRepository {
    fn find_order(&self, id: OrderId) -> Result<Option<Order>, StorageError> {
        Ok(self.orders.lock().unwrap().get(&id).cloned())
    }

    fn find_product(&self, id: ProductId) -> Result<Option<Product>, StorageError> {
        Ok(Self::stored(&self.orders.lock().unwrap(), id))
    }

    fn save_product(&self, product: &Product, expected_available: u32) -> Result<(), StorageError> {
        if let Some(err) = &self.failing_saves {
            return Err(err.clone());
        }

        let mut orders = self.orders.lock().unwrap();
        let mut interleaved = self.concurrent_writes.lock().unwrap();
        if !interleaved.is_empty() {
            let row = interleaved.remove(0);
            Self::write_back(&mut orders, &row);
        }

        let actual = Self::stored(&orders, product.id_typed())
            .map(|p| p.available())
            .unwrap_or(expected_available);
        if actual != expected_available {
            return Err(StorageError::Conflict {
                product: product.id_typed(),
                expected: expected_available,
                actual,
            });
        }

        self.saved.lock().unwrap().push(product.clone());
        Self::write_back(&mut orders, product);
        Ok(())
    }
}

/// Strategy that records which products it saw and always returns `decision`.
pub struct SpyStrategy {
    decision: Decision,
    seen: std::sync::Arc<Mutex<Vec<(String, NaiveDate)>>>,
}

impl SpyStrategy {
    pub fn new(decision: Decision) -> (Self, std::sync::Arc<Mutex<Vec<(String, NaiveDate)>>>) {
        let seen = std::sync::Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                decision,
                seen: seen.clone(),
            },
            seen,
        )
    }
}

impl ProcessingStrategy for SpyStrategy {
    fn decide(&self, product: &Product, today: NaiveDate) -> FulfillmentResult<Decision> {
        self.seen
            .lock()
            .unwrap()
            .push((product.name().to_string(), today));
        Ok(self.decision.clone())
    }
}
