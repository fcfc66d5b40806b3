//! Fulfillment error model.

use thiserror::Error;

use orderflow_core::{DomainError, OrderId, ProductId};

pub type FulfillmentResult<T> = Result<T, FulfillmentError>;

/// Failure reported by the storage collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The backing store could not be reached or is in a broken state.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The store refused the write.
    #[error("storage rejected write: {0}")]
    Rejected(String),

    /// A conditional save found the stock changed since it was read.
    #[error("stock of product {product} changed concurrently: expected {expected}, found {actual}")]
    Conflict {
        product: ProductId,
        expected: u32,
        actual: u32,
    },
}

/// Everything that can abort processing of an order.
///
/// None of these are retried or recovered inside the engine. Products handled
/// before the failure keep whatever was already persisted for them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FulfillmentError {
    #[error("Order not found with id: {0}")]
    OrderNotFound(OrderId),

    /// A product carries a type tag with no registered strategy.
    #[error("No strategy found for product type: {0}")]
    UnknownStrategy(String),

    /// A product lacks a date its strategy needs (season bounds, expiry date).
    #[error("product '{product}' has no {attribute}")]
    MissingAttribute {
        product: String,
        attribute: &'static str,
    },

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Coarse classification for callers that map failures to responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidArgument,
    Internal,
}

impl FulfillmentError {
    pub fn missing(product: &str, attribute: &'static str) -> Self {
        Self::MissingAttribute {
            product: product.to_string(),
            attribute,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            FulfillmentError::OrderNotFound(_) => ErrorKind::NotFound,
            FulfillmentError::UnknownStrategy(_) | FulfillmentError::MissingAttribute { .. } => {
                ErrorKind::InvalidArgument
            }
            FulfillmentError::Domain(DomainError::NotFound) => ErrorKind::NotFound,
            FulfillmentError::Domain(DomainError::Validation(_) | DomainError::InvalidId(_)) => {
                ErrorKind::InvalidArgument
            }
            FulfillmentError::Domain(DomainError::InvariantViolation(_))
            | FulfillmentError::Storage(_) => ErrorKind::Internal,
        }
    }
}
