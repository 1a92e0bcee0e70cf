use crate::api::routes::{auth_routes, book_routes, cart_routes, sale_routes, user_routes};
use crate::api::state::AppState;
use axum::Router;
use axum::routing::get;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub async fn start(state: AppState, addr: SocketAddr) {
    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let router = Router::new()
        .route("/api", get(|| async { "Bookstore API is running!" }))
        .nest("/api/v1/users", user_routes::routes())
        .nest("/api/v1/auth", auth_routes::routes())
        .nest("/api/v1/books", book_routes::routes())
        .nest("/api/v1/cart", cart_routes::routes())
        .nest("/api/v1/sales", sale_routes::routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(state);

    let listener = TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server running on http://{addr}");

    axum::serve(listener, router)
        .await
        .expect("Failed to start the server");
}
