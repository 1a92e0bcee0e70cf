use crate::api::controllers::dto::book_dto::BookResponse;
use crate::services::cart_service::{CartLine, CartView};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct AddCartItemRequest {
    pub book_id: i32,
    pub quantity: i32,
}

#[derive(Serialize)]
pub struct CartItemResponse {
    pub book: BookResponse,
    pub quantity: i32,
    pub line_total: BigDecimal,
}

impl From<CartLine> for CartItemResponse {
    fn from(line: CartLine) -> Self {
        Self {
            book: BookResponse::from(line.book),
            quantity: line.quantity,
            line_total: line.line_total,
        }
    }
}

#[derive(Serialize)]
pub struct CartResponse {
    pub items: Vec<CartItemResponse>,
    pub cart_total: BigDecimal,
}

impl From<CartView> for CartResponse {
    fn from(view: CartView) -> Self {
        Self {
            items: view.items.into_iter().map(CartItemResponse::from).collect(),
            cart_total: view.cart_total,
        }
    }
}
