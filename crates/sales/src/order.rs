use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use orderflow_core::{DomainError, DomainResult, Entity, OrderId, ProductId};
use orderflow_products::Product;

/// Order record: an identifier and the products it asks for.
///
/// Items behave like a set keyed by product id. Their order carries no
/// meaning; nothing downstream may depend on it.
///
/// Deserialization goes through [`Order::new`], so a payload listing a product
/// twice is rejected like any other construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "OrderRecord")]
pub struct Order {
    id: OrderId,
    items: Vec<Product>,
}

/// Unchecked wire shape of an [`Order`].
#[derive(Deserialize)]
struct OrderRecord {
    id: OrderId,
    #[serde(default)]
    items: Vec<Product>,
}

impl TryFrom<OrderRecord> for Order {
    type Error = DomainError;

    fn try_from(record: OrderRecord) -> Result<Self, Self::Error> {
        Order::new(record.id, record.items)
    }
}

impl Order {
    /// Order without products.
    pub fn empty(id: OrderId) -> Self {
        Self {
            id,
            items: Vec::new(),
        }
    }

    /// Build an order, rejecting a product that appears twice.
    pub fn new(id: OrderId, items: Vec<Product>) -> DomainResult<Self> {
        let mut seen = HashSet::with_capacity(items.len());
        for product in &items {
            if !seen.insert(product.id_typed()) {
                return Err(DomainError::validation(format!(
                    "product {} appears more than once in order {}",
                    product.id_typed(),
                    id
                )));
            }
        }
        Ok(Self { id, items })
    }

    pub fn id_typed(&self) -> OrderId {
        self.id
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    /// Mutable access for in-place stock updates while the order is processed.
    pub fn items_mut(&mut self) -> &mut [Product] {
        &mut self.items
    }

    pub fn product_ids(&self) -> Vec<ProductId> {
        self.items.iter().map(Product::id_typed).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
