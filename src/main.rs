use bookstore_server_lib::api;
use bookstore_server_lib::api::config::Config;
use bookstore_server_lib::api::state::AppState;
use bookstore_server_lib::data::database::Database;
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load();

    let db = Database::connect(&config.database_url)
        .expect("Failed to create database connection pool");

    let addr: SocketAddr = config
        .bind_addr
        .parse()
        .expect("SERVER_ADDR must be a valid socket address");

    let state = AppState { db, config };

    api::server::start(state, addr).await;
}
