use crate::api::controllers::dto::sale_dto::{CheckoutResponse, SalesAndPurchasesResponse};
use crate::api::extractors::AuthenticatedUser;
use crate::api::state::AppState;
use crate::services::errors::SaleServiceError;
use crate::services::sale_service::SaleService;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

/// Convert the caller's cart into a sale
pub async fn checkout_cart(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> impl IntoResponse {
    let service = SaleService::new(state.db.clone());

    match service.checkout_cart(user.user_id).await {
        Ok(sale_id) => (StatusCode::OK, Json(CheckoutResponse { sale_id })).into_response(),
        Err(SaleServiceError::EmptyCart) => {
            (StatusCode::NOT_FOUND, "Cart is empty").into_response()
        }
        Err(e @ SaleServiceError::InsufficientStock { .. }) => {
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
        Err(e @ SaleServiceError::DataIntegrity { .. }) => {
            tracing::error!("Checkout consistency failure: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Checkout failed").into_response()
        }
        Err(e) => {
            tracing::error!("Error during cart checkout: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Checkout failed").into_response()
        }
    }
}

/// Buy one copy of a single book directly
pub async fn checkout_direct(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(book_id): Path<i32>,
) -> impl IntoResponse {
    let service = SaleService::new(state.db.clone());

    match service.checkout_direct(book_id, user.user_id).await {
        Ok(sale_id) => (StatusCode::OK, Json(CheckoutResponse { sale_id })).into_response(),
        Err(SaleServiceError::BookNotFound) => {
            (StatusCode::NOT_FOUND, "Book not found").into_response()
        }
        Err(e @ SaleServiceError::InsufficientStock { .. }) => {
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
        Err(e) => {
            tracing::error!("Error during direct checkout: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Checkout failed").into_response()
        }
    }
}

/// List the caller's sales (as author) and purchases (as buyer)
pub async fn list_sales_and_purchases(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> impl IntoResponse {
    let service = SaleService::new(state.db.clone());

    match service.list_sales_and_purchases(user.user_id).await {
        Ok(listing) => (
            StatusCode::OK,
            Json(SalesAndPurchasesResponse::from(listing)),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Error listing sales and purchases: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response()
        }
    }
}
