use crate::api::controllers::sale_controller;
use crate::api::state::AppState;
use axum::Router;
use axum::routing::{get, post};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(sale_controller::list_sales_and_purchases))
        .route("/checkout", post(sale_controller::checkout_cart))
        .route("/direct/{book_id}", post(sale_controller::checkout_direct))
}
