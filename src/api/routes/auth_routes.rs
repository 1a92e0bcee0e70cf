use crate::api::controllers::user_controller::login;
use crate::api::state::AppState;
use axum::Router;
use axum::routing::post;

pub fn routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}
