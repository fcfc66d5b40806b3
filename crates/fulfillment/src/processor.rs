//! Order processing: look the order up, then run every product through the
//! strategy registered for its type.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use orderflow_core::{OrderId, ProductId};
use orderflow_products::Product;
use orderflow_sales::Order;

use crate::clock::Clock;
use crate::decision::Decision;
use crate::error::{FulfillmentError, FulfillmentResult, StorageError};
use crate::ports::{Notifier, OrderRepository};
use crate::registry::StrategyRegistry;

/// Conditional saves tried per product before a conflict is reported.
pub const MAX_SAVE_ATTEMPTS: u32 = 256;

/// Applies the fulfillment rules to whole orders.
///
/// Products are handled one after another and independently: no product's
/// outcome depends on another's. Each stock change is persisted as soon as it
/// is made, with a conditional save so that concurrent calls sharing a product
/// never overwrite each other's decrements. The first failure aborts the
/// remaining products; earlier changes are not rolled back.
pub struct OrderProcessor<R, N, C> {
    repository: R,
    notifier: N,
    clock: C,
    registry: Arc<StrategyRegistry>,
}

impl<R, N, C> OrderProcessor<R, N, C>
where
    R: OrderRepository,
    N: Notifier,
    C: Clock,
{
    pub fn new(repository: R, notifier: N, clock: C, registry: Arc<StrategyRegistry>) -> Self {
        Self {
            repository,
            notifier,
            clock,
            registry,
        }
    }

    pub fn registry(&self) -> &StrategyRegistry {
        &self.registry
    }

    /// Process an order as of today's date.
    pub fn process(&self, order_id: OrderId) -> FulfillmentResult<Order> {
        self.process_on(order_id, self.clock.today())
    }

    /// Process an order as of `today`. Every product of the order is evaluated
    /// against the same date.
    pub fn process_on(&self, order_id: OrderId, today: NaiveDate) -> FulfillmentResult<Order> {
        let mut order = self
            .repository
            .find_order(order_id)?
            .ok_or(FulfillmentError::OrderNotFound(order_id))
            .inspect_err(|e| warn!(order_id = %order_id, error = %e, "order lookup failed"))?;

        info!(order_id = %order_id, products = order.len(), %today, "processing order");

        for product in order.items_mut() {
            self.process_product(product, today).inspect_err(|e| {
                warn!(
                    order_id = %order_id,
                    product = %product.name(),
                    error = %e,
                    "order processing aborted"
                )
            })?;
        }

        info!(order_id = %order_id, "order processed");
        Ok(order)
    }

    /// Decide for one product and apply the outcome. A stock save that loses
    /// a race re-reads the product and decides again on the fresh state.
    fn process_product(
        &self,
        product: &mut Product,
        today: NaiveDate,
    ) -> FulfillmentResult<Decision> {
        let mut attempt = 1;
        loop {
            let strategy = self.registry.resolve(product.type_tag())?;
            let decision = strategy.decide(product, today)?;

            debug!(
                product_id = %product.id_typed(),
                product = %product.name(),
                product_type = %product.type_tag(),
                available = product.available(),
                decision = decision.label(),
                attempt,
                "product evaluated"
            );

            let notification = match &decision {
                Decision::Notify(notification) => notification,
                Decision::ConsumeStock => {
                    let expected = product.available();
                    let mut updated = product.clone();
                    updated.take_one()?;

                    match self.repository.save_product(&updated, expected) {
                        Ok(()) => {
                            *product = updated;
                            return Ok(decision);
                        }
                        Err(StorageError::Conflict { actual, .. })
                            if attempt < MAX_SAVE_ATTEMPTS =>
                        {
                            debug!(
                                product_id = %product.id_typed(),
                                expected,
                                actual,
                                attempt,
                                "stock changed concurrently, re-evaluating"
                            );
                            attempt += 1;
                            *product = self.reload(product.id_typed())?;
                            continue;
                        }
                        Err(e) => return Err(e.into()),
                    }
                }
            };

            self.notifier.send(notification);
            return Ok(decision);
        }
    }

    fn reload(&self, id: ProductId) -> FulfillmentResult<Product> {
        self.repository.find_product(id)?.ok_or_else(|| {
            StorageError::Unavailable(format!("product {id} disappeared during processing")).into()
        })
    }
}
