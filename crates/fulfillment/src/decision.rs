//! What a strategy decided for one product.

use chrono::NaiveDate;

/// Message sent to the notifier instead of shipping a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// Out of stock now; restock is expected after `lead_time_days`.
    Delay {
        lead_time_days: u32,
        product_name: String,
    },
    /// Not sellable (out of season, or a restock would miss the season).
    OutOfStock { product_name: String },
    /// Expired, or a restock would only arrive on/after the expiry date.
    Expiration {
        product_name: String,
        expiry_date: NaiveDate,
    },
}

impl Notification {
    pub fn delay(lead_time_days: u32, product_name: &str) -> Self {
        Self::Delay {
            lead_time_days,
            product_name: product_name.to_string(),
        }
    }

    pub fn out_of_stock(product_name: &str) -> Self {
        Self::OutOfStock {
            product_name: product_name.to_string(),
        }
    }

    pub fn expiration(product_name: &str, expiry_date: NaiveDate) -> Self {
        Self::Expiration {
            product_name: product_name.to_string(),
            expiry_date,
        }
    }

    pub fn product_name(&self) -> &str {
        match self {
            Notification::Delay { product_name, .. }
            | Notification::OutOfStock { product_name }
            | Notification::Expiration { product_name, .. } => product_name,
        }
    }
}

/// Outcome of evaluating one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Take one unit from stock and persist the product.
    ConsumeStock,
    /// Leave the product alone and send this notification.
    Notify(Notification),
}

impl Decision {
    pub fn consumes_stock(&self) -> bool {
        matches!(self, Decision::ConsumeStock)
    }

    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Decision::ConsumeStock => "consume_stock",
            Decision::Notify(Notification::Delay { .. }) => "notify_delay",
            Decision::Notify(Notification::OutOfStock { .. }) => "notify_out_of_stock",
            Decision::Notify(Notification::Expiration { .. }) => "notify_expiration",
        }
    }
}
