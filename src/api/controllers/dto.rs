pub mod book_dto;
pub mod cart_dto;
pub mod login_dto;
pub mod sale_dto;
pub mod user_dto;
