use crate::api::controllers::book_controller;
use crate::api::state::AppState;
use axum::Router;
use axum::routing::{delete, get, post, put};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(book_controller::list_books))
        .route("/", post(book_controller::create_book))
        .route("/{id}", get(book_controller::get_book_by_id))
        .route("/{id}", put(book_controller::update_book))
        .route("/{id}", delete(book_controller::delete_book))
}
