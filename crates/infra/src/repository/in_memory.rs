use std::collections::HashMap;
use std::sync::RwLock;

use orderflow_core::{OrderId, ProductId};
use orderflow_fulfillment::{OrderRepository, StorageError};
use orderflow_products::Product;
use orderflow_sales::Order;

/// In-memory order/product store for tests/dev.
///
/// Products are stored once and orders only reference them by id, so an order
/// always sees the latest stock of its products, including decrements made
/// while processing other orders.
///
/// `save_product` compares and writes under one write lock, so of two callers
/// that read the same stock only the first save lands; the other gets
/// `StorageError::Conflict` and re-reads.
#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    products: RwLock<HashMap<ProductId, Product>>,
    orders: RwLock<HashMap<OrderId, Vec<ProductId>>>,
}

fn poisoned(_: impl std::fmt::Debug) -> StorageError {
    StorageError::Unavailable("in-memory store lock poisoned".to_string())
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a product row.
    pub fn insert_product(&self, product: Product) -> Result<ProductId, StorageError> {
        product
            .validate()
            .map_err(|e| StorageError::Rejected(e.to_string()))?;

        let id = product.id_typed();
        self.products.write().map_err(poisoned)?.insert(id, product);
        Ok(id)
    }

    /// Insert an order over already stored products.
    pub fn insert_order(&self, id: OrderId, items: &[ProductId]) -> Result<(), StorageError> {
        {
            let products = self.products.read().map_err(poisoned)?;
            if let Some(missing) = items.iter().find(|p| !products.contains_key(*p)) {
                return Err(StorageError::Rejected(format!(
                    "order {id} references unknown product {missing}"
                )));
            }
        }

        let mut orders = self.orders.write().map_err(poisoned)?;
        if orders.contains_key(&id) {
            return Err(StorageError::Rejected(format!("order {id} already exists")));
        }

        let mut distinct = items.to_vec();
        distinct.sort_unstable();
        distinct.dedup();
        if distinct.len() != items.len() {
            return Err(StorageError::Rejected(format!(
                "order {id} lists a product more than once"
            )));
        }

        orders.insert(id, items.to_vec());
        Ok(())
    }

    /// Store the products and a fresh order over them.
    pub fn create_order(&self, products: Vec<Product>) -> Result<OrderId, StorageError> {
        let ids = products
            .into_iter()
            .map(|p| self.insert_product(p))
            .collect::<Result<Vec<_>, _>>()?;

        let id = OrderId::new();
        self.insert_order(id, &ids)?;
        Ok(id)
    }

    /// Current state of a product row.
    pub fn product(&self, id: ProductId) -> Result<Option<Product>, StorageError> {
        Ok(self.products.read().map_err(poisoned)?.get(&id).cloned())
    }

    pub fn order_count(&self) -> Result<usize, StorageError> {
        Ok(self.orders.read().map_err(poisoned)?.len())
    }

    pub fn product_count(&self) -> Result<usize, StorageError> {
        Ok(self.products.read().map_err(poisoned)?.len())
    }
}

impl OrderRepository for InMemoryOrderRepository {
    fn find_order(&self, id: OrderId) -> Result<Option<Order>, StorageError> {
        let orders = self.orders.read().map_err(poisoned)?;
        let Some(item_ids) = orders.get(&id) else {
            return Ok(None);
        };

        let products = self.products.read().map_err(poisoned)?;
        let items = item_ids
            .iter()
            .map(|pid| {
                products.get(pid).cloned().ok_or_else(|| {
                    StorageError::Unavailable(format!(
                        "order {id} references missing product {pid}"
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Order::new(id, items)
            .map(Some)
            .map_err(|e| StorageError::Unavailable(e.to_string()))
    }

    fn find_product(&self, id: ProductId) -> Result<Option<Product>, StorageError> {
        self.product(id)
    }

    fn save_product(&self, product: &Product, expected_available: u32) -> Result<(), StorageError> {
        let id = product.id_typed();
        let mut products = self.products.write().map_err(poisoned)?;
        let current = products
            .get_mut(&id)
            .ok_or_else(|| StorageError::Rejected(format!("unknown product {id}")))?;

        if current.available() != expected_available {
            return Err(StorageError::Conflict {
                product: id,
                expected: expected_available,
                actual: current.available(),
            });
        }

        *current = product.clone();
        Ok(())
    }
}
