//! Service wiring: the order processor and the collaborators behind it.

use std::sync::Arc;

use orderflow_core::OrderId;
use orderflow_fulfillment::{
    Clock, FulfillmentResult, Notifier, OrderProcessor, StrategyRegistry, SystemClock,
};
use orderflow_infra::{InMemoryOrderRepository, LogNotifier, SeedData, SeedError};
use orderflow_sales::Order;

use crate::config::ApiConfig;

pub type Processor =
    OrderProcessor<Arc<InMemoryOrderRepository>, Arc<dyn Notifier>, Arc<dyn Clock>>;

pub struct AppServices {
    repository: Arc<InMemoryOrderRepository>,
    processor: Processor,
}

impl AppServices {
    pub fn new(
        repository: Arc<InMemoryOrderRepository>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let processor = OrderProcessor::new(
            repository.clone(),
            notifier,
            clock,
            Arc::new(StrategyRegistry::standard()),
        );
        Self {
            repository,
            processor,
        }
    }

    /// Empty in-memory store, notifications logged, system date.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryOrderRepository::new()),
            Arc::new(LogNotifier),
            Arc::new(SystemClock),
        )
    }

    /// In-memory services, seeded from `config.seed_path` when set.
    pub fn from_config(config: &ApiConfig) -> Result<Self, SeedError> {
        let services = Self::in_memory();
        if let Some(path) = &config.seed_path {
            tracing::info!(path = %path.display(), "loading seed data");
            SeedData::from_path(path)?.load_into(&services.repository)?;
        }
        Ok(services)
    }

    pub fn repository(&self) -> &Arc<InMemoryOrderRepository> {
        &self.repository
    }

    pub fn processor(&self) -> &Processor {
        &self.processor
    }

    pub fn process_order(&self, order_id: OrderId) -> FulfillmentResult<Order> {
        self.processor.process(order_id)
    }
}
