use serde::Serialize;

use orderflow_sales::Order;

#[derive(Debug, Serialize)]
pub struct ProcessOrderResponse {
    pub id: String,
}

impl From<&Order> for ProcessOrderResponse {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id_typed().to_string(),
        }
    }
}
