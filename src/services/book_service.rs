use crate::data::database::Database;
use crate::data::models::book::{Book, NewBook, UpdateBook};
use crate::data::models::user::User;
use crate::data::repos::implementors::book_repo::{BookPage, BookRepo};
use crate::data::repos::traits::repository::Repository;
use crate::services::errors::BookServiceError;
use bigdecimal::BigDecimal;

pub struct BookService {
    db: Database,
}

impl BookService {
    pub fn new(db: Database) -> Self {
        BookService { db }
    }

    /// Creates a book owned by `user`. Only authors may publish.
    pub async fn create_book(
        &self,
        title: &str,
        genre: &str,
        stock_quantity: i32,
        price: BigDecimal,
        description: &str,
        image_url: &str,
        user: &User,
    ) -> Result<(), BookServiceError> {
        if !user.author {
            return Err(BookServiceError::PermissionDenied);
        }

        let repo = BookRepo::new(self.db.clone());

        let new_book = NewBook {
            title,
            user_id: user.user_id,
            genre,
            stock_quantity,
            price,
            description,
            image_url,
            deleted: false,
        };

        repo.add(new_book)
            .await
            .map_err(|_| BookServiceError::DatabaseError)
    }

    pub async fn get_book_page(
        &self,
        page: i64,
        page_size: i64,
        title_filter: Option<&str>,
        author_id: Option<i32>,
    ) -> Result<BookPage, BookServiceError> {
        let repo = BookRepo::new(self.db.clone());

        repo.get_page(page.max(1), page_size.max(1), title_filter, author_id)
            .await
            .map_err(|_| BookServiceError::DatabaseError)
    }

    pub async fn get_book_by_id(&self, book_id: i32) -> Result<Option<Book>, BookServiceError> {
        let repo = BookRepo::new(self.db.clone());

        repo.get_by_id(book_id)
            .await
            .map_err(|_| BookServiceError::DatabaseError)
    }

    /// Updates a book. The caller must be an author and own the book.
    pub async fn update_book(
        &self,
        book_id: i32,
        update: UpdateBook<'_>,
        user: &User,
    ) -> Result<(), BookServiceError> {
        let repo = BookRepo::new(self.db.clone());

        let book = repo
            .get_by_id(book_id)
            .await
            .map_err(|_| BookServiceError::DatabaseError)?
            .ok_or(BookServiceError::BookNotFound)?;

        if !user.author || book.user_id != user.user_id {
            return Err(BookServiceError::PermissionDenied);
        }

        repo.update(book_id, update)
            .await
            .map_err(|_| BookServiceError::DatabaseError)
    }

    /// Soft-deletes a book. Same ownership rules as updating.
    pub async fn delete_book(&self, book_id: i32, user: &User) -> Result<(), BookServiceError> {
        let repo = BookRepo::new(self.db.clone());

        let book = repo
            .get_by_id(book_id)
            .await
            .map_err(|_| BookServiceError::DatabaseError)?
            .ok_or(BookServiceError::BookNotFound)?;

        if !user.author || book.user_id != user.user_id {
            return Err(BookServiceError::PermissionDenied);
        }

        repo.delete(book_id)
            .await
            .map_err(|_| BookServiceError::DatabaseError)
    }
}
