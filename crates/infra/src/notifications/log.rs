use chrono::NaiveDate;
use tracing::info;

use orderflow_fulfillment::Notifier;

/// Delivers notifications as structured log events.
///
/// Used when no real transport (email, SMS, ...) is wired in.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify_delay(&self, lead_time_days: u32, product_name: &str) {
        info!(
            target: "orderflow::notifications",
            kind = "delay",
            product = %product_name,
            lead_time_days,
            "product delayed until restock"
        );
    }

    fn notify_expiration(&self, product_name: &str, expiry_date: NaiveDate) {
        info!(
            target: "orderflow::notifications",
            kind = "expiration",
            product = %product_name,
            %expiry_date,
            "product expired"
        );
    }

    fn notify_out_of_stock(&self, product_name: &str) {
        info!(
            target: "orderflow::notifications",
            kind = "out_of_stock",
            product = %product_name,
            "product unavailable"
        );
    }
}
