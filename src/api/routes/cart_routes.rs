use crate::api::controllers::cart_controller;
use crate::api::state::AppState;
use axum::Router;
use axum::routing::{delete, get, post};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart_controller::get_cart))
        .route("/items", post(cart_controller::add_to_cart))
        .route(
            "/items/{book_id}/{quantity}",
            delete(cart_controller::remove_from_cart),
        )
}
