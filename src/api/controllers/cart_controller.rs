use crate::api::controllers::dto::cart_dto::{AddCartItemRequest, CartResponse};
use crate::api::extractors::AuthenticatedUser;
use crate::api::state::AppState;
use crate::services::cart_service::CartService;
use crate::services::errors::CartServiceError;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

/// Add a quantity of a book to the caller's cart
pub async fn add_to_cart(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<AddCartItemRequest>,
) -> impl IntoResponse {
    let service = CartService::new(state.db.clone());

    match service
        .add_to_cart(payload.book_id, user.user_id, payload.quantity)
        .await
    {
        Ok(_) => (StatusCode::OK, "Item added to cart").into_response(),
        Err(CartServiceError::BookNotFound) => {
            (StatusCode::NOT_FOUND, "Book not found").into_response()
        }
        Err(CartServiceError::InvalidQuantity) => {
            (StatusCode::BAD_REQUEST, "Invalid quantity").into_response()
        }
        Err(e @ CartServiceError::InsufficientStock { .. }) => {
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
        Err(e) => {
            tracing::error!("Error adding item to cart: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response()
        }
    }
}

/// View the caller's cart, grouped by book
pub async fn get_cart(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> impl IntoResponse {
    let service = CartService::new(state.db.clone());

    match service.get_cart(user.user_id).await {
        Ok(view) => (StatusCode::OK, Json(CartResponse::from(view))).into_response(),
        Err(e) => {
            tracing::error!("Error fetching cart: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response()
        }
    }
}

/// Remove a quantity of a book from the caller's cart
pub async fn remove_from_cart(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path((book_id, quantity)): Path<(i32, i32)>,
) -> impl IntoResponse {
    let service = CartService::new(state.db.clone());

    match service.remove_from_cart(book_id, user.user_id, quantity).await {
        Ok(_) => (StatusCode::OK, "Item removed from cart").into_response(),
        Err(CartServiceError::BookNotFound) => {
            (StatusCode::NOT_FOUND, "Book not found").into_response()
        }
        Err(CartServiceError::EntryNotFound) => {
            (StatusCode::NOT_FOUND, "Item not found in cart").into_response()
        }
        Err(CartServiceError::InvalidQuantity) => {
            (StatusCode::BAD_REQUEST, "Invalid quantity").into_response()
        }
        Err(e) => {
            tracing::error!("Error removing item from cart: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response()
        }
    }
}
