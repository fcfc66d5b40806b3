use std::sync::Mutex;

use chrono::NaiveDate;

use crate::decision::Notification;
use crate::ports::Notifier;

/// Keeps every notification in arrival order.
#[derive(Debug, Default)]
pub struct InMemoryNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl InMemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.sent.lock().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut sent) = self.sent.lock() {
            sent.clear();
        }
    }

    fn push(&self, notification: Notification) {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(notification);
        }
    }
}

impl Notifier for InMemoryNotifier {
    fn notify_delay(&self, lead_time_days: u32, product_name: &str) {
        self.push(Notification::delay(lead_time_days, product_name));
    }

    fn notify_expiration(&self, product_name: &str, expiry_date: NaiveDate) {
        self.push(Notification::expiration(product_name, expiry_date));
    }

    fn notify_out_of_stock(&self, product_name: &str) {
        self.push(Notification::out_of_stock(product_name));
    }
}
