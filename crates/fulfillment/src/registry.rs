//! Type tag → strategy lookup.

use std::collections::HashMap;
use std::sync::Arc;

use orderflow_products::ProductType;

use crate::error::{FulfillmentError, FulfillmentResult};
use crate::strategy::{ExpirableStrategy, NormalStrategy, ProcessingStrategy, SeasonalStrategy};

/// Immutable mapping from stored type tags to strategies.
///
/// Built once at start-up through [`StrategyRegistryBuilder`] and shared
/// read-only afterwards (typically behind an `Arc`).
#[derive(Clone)]
pub struct StrategyRegistry {
    strategies: HashMap<String, Arc<dyn ProcessingStrategy>>,
}

impl StrategyRegistry {
    pub fn builder() -> StrategyRegistryBuilder {
        StrategyRegistryBuilder::default()
    }

    /// Registry with the built-in normal, seasonal and expirable strategies.
    pub fn standard() -> Self {
        Self::builder().with_standard().build()
    }

    /// Strategy for a stored type tag. The match is exact and case-sensitive.
    pub fn resolve(&self, tag: &str) -> FulfillmentResult<&dyn ProcessingStrategy> {
        self.strategies
            .get(tag)
            .map(|s| s.as_ref())
            .ok_or_else(|| FulfillmentError::UnknownStrategy(tag.to_string()))
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.strategies.contains_key(tag)
    }

    /// Registered tags, sorted.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.strategies.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

impl core::fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StrategyRegistry")
            .field("tags", &self.tags())
            .finish()
    }
}

/// Collects strategies before the registry is frozen.
#[derive(Default)]
pub struct StrategyRegistryBuilder {
    strategies: HashMap<String, Arc<dyn ProcessingStrategy>>,
}

impl StrategyRegistryBuilder {
    /// Register `strategy` for `tag`. The tag is normalized the same way
    /// product tags are before storage; a later registration for the same tag
    /// replaces the earlier one.
    pub fn register<S>(mut self, tag: &str, strategy: S) -> Self
    where
        S: ProcessingStrategy + 'static,
    {
        self.strategies
            .insert(ProductType::normalize(tag), Arc::new(strategy));
        self
    }

    pub fn with_standard(self) -> Self {
        self.register(ProductType::Normal.as_str(), NormalStrategy::default())
            .register(ProductType::Seasonal.as_str(), SeasonalStrategy::default())
            .register(ProductType::Expirable.as_str(), ExpirableStrategy::default())
    }

    pub fn build(self) -> StrategyRegistry {
        StrategyRegistry {
            strategies: self.strategies,
        }
    }
}
