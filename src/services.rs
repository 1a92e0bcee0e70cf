pub mod book_service;
pub mod cart_service;
pub mod errors;
pub mod sale_service;
