use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};

use orderflow_core::OrderId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new().route("/:order_id/processOrder", post(process_order))
}

pub async fn process_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(order_id): Path<String>,
) -> axum::response::Response {
    let order_id: OrderId = match order_id.parse() {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.process_order(order_id) {
        Ok(order) => {
            (StatusCode::OK, Json(dto::ProcessOrderResponse::from(&order))).into_response()
        }
        Err(e) => errors::fulfillment_error_to_response(e),
    }
}
