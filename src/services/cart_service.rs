use crate::data::database::Database;
use crate::data::models::book::Book;
use crate::data::repos::implementors::book_repo::BookRepo;
use crate::data::repos::implementors::cart_repo::CartRepo;
use crate::data::repos::traits::repository::Repository;
use crate::services::errors::CartServiceError;
use bigdecimal::BigDecimal;
use std::collections::HashMap;

/// One book in the cart view, with duplicate rows already summed.
#[derive(Debug, PartialEq)]
pub struct CartLine {
    pub book: Book,
    pub quantity: i32,
    pub line_total: BigDecimal,
}

#[derive(Debug, PartialEq)]
pub struct CartView {
    pub items: Vec<CartLine>,
    pub cart_total: BigDecimal,
}

pub struct CartService {
    db: Database,
}

impl CartService {
    pub fn new(db: Database) -> Self {
        CartService { db }
    }

    /// Adds `quantity` of a book to the user's cart, collapsing any
    /// duplicate rows for the pair into a single merged row. The merged
    /// quantity must stay strictly below the book's stock; equality is
    /// rejected.
    pub async fn add_to_cart(
        &self,
        book_id: i32,
        user_id: i32,
        quantity: i32,
    ) -> Result<(), CartServiceError> {
        if quantity <= 0 {
            return Err(CartServiceError::InvalidQuantity);
        }

        let book_repo = BookRepo::new(self.db.clone());

        let book = book_repo
            .get_by_id(book_id)
            .await
            .map_err(|_| CartServiceError::DatabaseError)?
            .ok_or(CartServiceError::BookNotFound)?;

        let cart_repo = CartRepo::new(self.db.clone());

        let existing = cart_repo
            .get_entries_for_book(user_id, book_id)
            .await
            .map_err(|_| CartServiceError::DatabaseError)?;

        let mut effective_quantity = quantity;
        for entry in &existing {
            effective_quantity += entry.quantity;
        }

        if effective_quantity >= book.stock_quantity {
            return Err(CartServiceError::InsufficientStock {
                title: book.title,
                available: book.stock_quantity,
                requested: effective_quantity,
            });
        }

        let old_ids = existing.iter().map(|e| e.cart_entry_id).collect();

        cart_repo
            .replace_for_book(user_id, book_id, effective_quantity, old_ids)
            .await
            .map_err(|_| CartServiceError::DatabaseError)
    }

    /// The user's cart grouped by book, with line totals computed from the
    /// books' current prices.
    pub async fn get_cart(&self, user_id: i32) -> Result<CartView, CartServiceError> {
        let cart_repo = CartRepo::new(self.db.clone());

        let rows = cart_repo
            .get_cart_with_books(user_id)
            .await
            .map_err(|_| CartServiceError::DatabaseError)?;

        let mut items: Vec<CartLine> = Vec::new();
        let mut index_by_book: HashMap<i32, usize> = HashMap::new();

        for (entry, book) in rows {
            match index_by_book.get(&book.book_id) {
                Some(&i) => {
                    items[i].quantity += entry.quantity;
                    items[i].line_total =
                        items[i].book.price.clone() * BigDecimal::from(items[i].quantity);
                }
                None => {
                    index_by_book.insert(book.book_id, items.len());
                    let line_total = book.price.clone() * BigDecimal::from(entry.quantity);
                    items.push(CartLine {
                        book,
                        quantity: entry.quantity,
                        line_total,
                    });
                }
            }
        }

        let cart_total = items
            .iter()
            .fold(BigDecimal::from(0), |acc, line| acc + line.line_total.clone());

        Ok(CartView { items, cart_total })
    }

    /// Removes `quantity` of a book from the cart. Removing the full held
    /// quantity deletes the row; removing more than is held is an error.
    pub async fn remove_from_cart(
        &self,
        book_id: i32,
        user_id: i32,
        quantity: i32,
    ) -> Result<(), CartServiceError> {
        if quantity <= 0 {
            return Err(CartServiceError::InvalidQuantity);
        }

        let book_repo = BookRepo::new(self.db.clone());

        book_repo
            .get_by_id(book_id)
            .await
            .map_err(|_| CartServiceError::DatabaseError)?
            .ok_or(CartServiceError::BookNotFound)?;

        let cart_repo = CartRepo::new(self.db.clone());

        let existing = cart_repo
            .get_entries_for_book(user_id, book_id)
            .await
            .map_err(|_| CartServiceError::DatabaseError)?;

        if existing.is_empty() {
            return Err(CartServiceError::EntryNotFound);
        }

        let held: i32 = existing.iter().map(|e| e.quantity).sum();

        if held < quantity {
            return Err(CartServiceError::InvalidQuantity);
        }

        let old_ids = existing.iter().map(|e| e.cart_entry_id).collect();

        cart_repo
            .replace_for_book(user_id, book_id, held - quantity, old_ids)
            .await
            .map_err(|_| CartServiceError::DatabaseError)
    }
}
