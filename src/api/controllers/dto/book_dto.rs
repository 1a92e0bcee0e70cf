use crate::data::models::book::Book;
use crate::data::repos::implementors::book_repo::BookPage;
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct CreateBookRequest {
    pub title: String,
    pub genre: String,
    pub stock_quantity: i32,
    pub price: BigDecimal,
    pub description: String,
    pub image_url: String,
}

#[derive(Deserialize)]
pub struct UpdateBookRequest {
    pub title: Option<String>,
    pub genre: Option<String>,
    pub stock_quantity: Option<i32>,
    pub price: Option<BigDecimal>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Deserialize)]
pub struct BookListParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub filter: Option<String>,
    pub mine: Option<bool>,
}

#[derive(Serialize)]
pub struct BookResponse {
    pub book_id: i32,
    pub title: String,
    pub user_id: i32,
    pub genre: String,
    pub stock_quantity: i32,
    pub price: BigDecimal,
    pub description: String,
    pub image_url: String,
    pub deleted: bool,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            book_id: book.book_id,
            title: book.title,
            user_id: book.user_id,
            genre: book.genre,
            stock_quantity: book.stock_quantity,
            price: book.price,
            description: book.description,
            image_url: book.image_url,
            deleted: book.deleted,
        }
    }
}

#[derive(Serialize)]
pub struct BookPageResponse {
    pub data: Vec<BookResponse>,
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl BookPageResponse {
    pub fn from_page(page: BookPage, page_number: i64, page_size: i64) -> Self {
        Self {
            data: page.books.into_iter().map(BookResponse::from).collect(),
            page: page_number,
            page_size,
            total: page.total,
            total_pages: page.total_pages,
        }
    }
}
