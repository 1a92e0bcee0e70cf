use crate::api::controllers::dto::book_dto::{
    BookListParams, BookPageResponse, BookResponse, CreateBookRequest, UpdateBookRequest,
};
use crate::api::extractors::{AuthenticatedUser, OptionalUser};
use crate::api::state::AppState;
use crate::data::models::book::UpdateBook;
use crate::services::book_service::BookService;
use crate::services::errors::BookServiceError;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

const DEFAULT_PAGE_SIZE: i64 = 10;

/// Paginated public listing of active books. `mine=true` narrows the page
/// to the caller's own books when a valid token is attached.
pub async fn list_books(
    State(state): State<AppState>,
    OptionalUser(user): OptionalUser,
    Query(params): Query<BookListParams>,
) -> impl IntoResponse {
    let service = BookService::new(state.db.clone());

    let page = params.page.unwrap_or(1);
    let page_size = params.page_size.unwrap_or(DEFAULT_PAGE_SIZE);

    let author_id = match params.mine {
        Some(true) => user.map(|u| u.user_id),
        _ => None,
    };

    match service
        .get_book_page(page, page_size, params.filter.as_deref(), author_id)
        .await
    {
        Ok(book_page) => (
            StatusCode::OK,
            Json(BookPageResponse::from_page(book_page, page, page_size)),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Error listing books: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response()
        }
    }
}

/// Get book by ID
pub async fn get_book_by_id(
    State(state): State<AppState>,
    Path(book_id): Path<i32>,
) -> impl IntoResponse {
    let service = BookService::new(state.db.clone());

    match service.get_book_by_id(book_id).await {
        Ok(Some(book)) => (StatusCode::OK, Json(BookResponse::from(book))).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Book not found").into_response(),
        Err(e) => {
            tracing::error!("Error fetching book: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response()
        }
    }
}

/// Create a new book (authors only)
pub async fn create_book(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateBookRequest>,
) -> impl IntoResponse {
    let service = BookService::new(state.db.clone());

    match service
        .create_book(
            &payload.title,
            &payload.genre,
            payload.stock_quantity,
            payload.price.clone(),
            &payload.description,
            &payload.image_url,
            &user,
        )
        .await
    {
        Ok(_) => (StatusCode::CREATED, "Book created").into_response(),
        Err(BookServiceError::PermissionDenied) => {
            (StatusCode::FORBIDDEN, "Only authors can publish books").into_response()
        }
        Err(e) => {
            tracing::error!("Error creating book: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to create book").into_response()
        }
    }
}

/// Update a book (owning author only)
pub async fn update_book(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(book_id): Path<i32>,
    Json(payload): Json<UpdateBookRequest>,
) -> impl IntoResponse {
    let service = BookService::new(state.db.clone());

    let update = UpdateBook {
        title: payload.title.as_deref(),
        genre: payload.genre.as_deref(),
        stock_quantity: payload.stock_quantity,
        price: payload.price.clone(),
        description: payload.description.as_deref(),
        image_url: payload.image_url.as_deref(),
        deleted: None,
    };

    match service.update_book(book_id, update, &user).await {
        Ok(_) => (StatusCode::OK, "Book updated").into_response(),
        Err(BookServiceError::BookNotFound) => {
            (StatusCode::NOT_FOUND, "Book not found").into_response()
        }
        Err(BookServiceError::PermissionDenied) => (
            StatusCode::FORBIDDEN,
            "Only the owning author can update this book",
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Error updating book: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to update book").into_response()
        }
    }
}

/// Soft-delete a book (owning author only)
pub async fn delete_book(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(book_id): Path<i32>,
) -> impl IntoResponse {
    let service = BookService::new(state.db.clone());

    match service.delete_book(book_id, &user).await {
        Ok(_) => (StatusCode::OK, "Book deleted").into_response(),
        Err(BookServiceError::BookNotFound) => {
            (StatusCode::NOT_FOUND, "Book not found").into_response()
        }
        Err(BookServiceError::PermissionDenied) => (
            StatusCode::FORBIDDEN,
            "Only the owning author can delete this book",
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Error deleting book: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to delete book").into_response()
        }
    }
}
