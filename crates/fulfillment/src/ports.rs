//! Collaborator interfaces the engine calls out to.

use std::sync::Arc;

use chrono::NaiveDate;

use orderflow_core::{OrderId, ProductId};
use orderflow_products::Product;
use orderflow_sales::Order;

use crate::decision::Notification;
use crate::error::StorageError;

/// Storage collaborator.
///
/// Stock writes are conditional: a save only lands if the stored stock still
/// equals the value the decision was made on. Together with
/// [`find_product`](OrderRepository::find_product) this lets the engine re-read
/// and re-decide on conflict, so concurrent processing of a shared product
/// never loses a decrement.
pub trait OrderRepository: Send + Sync {
    /// Load an order with the current state of its products.
    fn find_order(&self, id: OrderId) -> Result<Option<Order>, StorageError>;

    /// Current state of a single product.
    fn find_product(&self, id: ProductId) -> Result<Option<Product>, StorageError>;

    /// Persist `product` if its stored stock is still `expected_available`.
    /// Otherwise nothing is written and [`StorageError::Conflict`] is returned.
    fn save_product(&self, product: &Product, expected_available: u32) -> Result<(), StorageError>;
}

impl<R> OrderRepository for Arc<R>
where
    R: OrderRepository + ?Sized,
{
    fn find_order(&self, id: OrderId) -> Result<Option<Order>, StorageError> {
        (**self).find_order(id)
    }

    fn find_product(&self, id: ProductId) -> Result<Option<Product>, StorageError> {
        (**self).find_product(id)
    }

    fn save_product(&self, product: &Product, expected_available: u32) -> Result<(), StorageError> {
        (**self).save_product(product, expected_available)
    }
}

/// Notification collaborator. Fire-and-forget: nothing is returned to the
/// engine, so delivery failures are the implementation's business.
pub trait Notifier: Send + Sync {
    fn notify_delay(&self, lead_time_days: u32, product_name: &str);

    fn notify_expiration(&self, product_name: &str, expiry_date: NaiveDate);

    fn notify_out_of_stock(&self, product_name: &str);

    /// Route a notification to the matching call above.
    fn send(&self, notification: &Notification) {
        match notification {
            Notification::Delay {
                lead_time_days,
                product_name,
            } => self.notify_delay(*lead_time_days, product_name),
            Notification::OutOfStock { product_name } => self.notify_out_of_stock(product_name),
            Notification::Expiration {
                product_name,
                expiry_date,
            } => self.notify_expiration(product_name, *expiry_date),
        }
    }
}

impl<N> Notifier for Arc<N>
where
    N: Notifier + ?Sized,
{
    fn notify_delay(&self, lead_time_days: u32, product_name: &str) {
        (**self).notify_delay(lead_time_days, product_name)
    }

    fn notify_expiration(&self, product_name: &str, expiry_date: NaiveDate) {
        (**self).notify_expiration(product_name, expiry_date)
    }

    fn notify_out_of_stock(&self, product_name: &str) {
        (**self).notify_out_of_stock(product_name)
    }
}
