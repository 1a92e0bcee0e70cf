use crate::api::controllers::user_controller;
use crate::api::state::AppState;
use axum::Router;
use axum::routing::post;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(user_controller::register_user))
        .route(
            "/activate-author/{id}",
            post(user_controller::activate_author),
        )
}
