#[derive(Debug, PartialEq)]
pub enum BookServiceError {
    BookNotFound,
    PermissionDenied,
    DatabaseError,
}

impl std::error::Error for BookServiceError {}

impl std::fmt::Display for BookServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookServiceError::BookNotFound => write!(f, "Book not found"),
            BookServiceError::PermissionDenied => write!(f, "Permission denied"),
            BookServiceError::DatabaseError => write!(f, "Database error"),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum CartServiceError {
    BookNotFound,
    EntryNotFound,
    InvalidQuantity,
    InsufficientStock {
        title: String,
        available: i32,
        requested: i32,
    },
    DatabaseError,
}

impl std::error::Error for CartServiceError {}

impl std::fmt::Display for CartServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CartServiceError::BookNotFound => write!(f, "Book not found"),
            CartServiceError::EntryNotFound => write!(f, "Item not found in cart"),
            CartServiceError::InvalidQuantity => write!(f, "Invalid quantity"),
            CartServiceError::InsufficientStock {
                title,
                available,
                requested,
            } => write!(
                f,
                "Insufficient stock for book {title}: only {available} units remain, you tried to add {requested}"
            ),
            CartServiceError::DatabaseError => write!(f, "Database error"),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum SaleServiceError {
    BookNotFound,
    EmptyCart,
    InsufficientStock {
        title: String,
        available: i32,
        requested: i32,
    },
    DataIntegrity {
        cart_book_id: i32,
        joined_book_id: i32,
    },
    DatabaseError,
}

impl std::error::Error for SaleServiceError {}

impl std::fmt::Display for SaleServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaleServiceError::BookNotFound => write!(f, "Book not found"),
            SaleServiceError::EmptyCart => write!(f, "Cart is empty"),
            SaleServiceError::InsufficientStock {
                title,
                available,
                requested,
            } => write!(
                f,
                "Insufficient stock for book {title}: only {available} units remain, you tried to buy {requested}"
            ),
            SaleServiceError::DataIntegrity {
                cart_book_id,
                joined_book_id,
            } => write!(
                f,
                "Cart entry references book {cart_book_id} but joined row is book {joined_book_id}"
            ),
            SaleServiceError::DatabaseError => write!(f, "Database error"),
        }
    }
}
