pub mod auth_routes;
pub mod book_routes;
pub mod cart_routes;
pub mod sale_routes;
pub mod user_routes;
