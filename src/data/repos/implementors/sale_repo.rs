use crate::data::database::Database;
use crate::data::models::book::Book;
use crate::data::models::cart::CartEntry;
use crate::data::models::sale::{NewSale, NewSaleItem, Sale, SaleItem};
use crate::data::models::schema::{books, cart_entries, sale_items, sales};
use diesel::prelude::*;
use diesel::result;
use diesel_async::{AsyncConnection, RunQueryDsl};
use diesel_async::scoped_futures::ScopedFutureExt;
use std::collections::HashMap;

/// Failure of a checkout transaction. Any variant rolls the whole
/// transaction back; no stock decrement, sale row, or cart deletion
/// survives a failed checkout.
#[derive(Debug)]
pub enum CheckoutTxError {
    BookNotFound,
    EmptyCart,
    InsufficientStock {
        title: String,
        available: i32,
        requested: i32,
    },
    BookMismatch {
        cart_book_id: i32,
        joined_book_id: i32,
    },
    Database(result::Error),
}

impl From<result::Error> for CheckoutTxError {
    fn from(e: result::Error) -> Self {
        CheckoutTxError::Database(e)
    }
}

impl std::error::Error for CheckoutTxError {}

impl std::fmt::Display for CheckoutTxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckoutTxError::BookNotFound => write!(f, "Book not found"),
            CheckoutTxError::EmptyCart => write!(f, "Cart is empty"),
            CheckoutTxError::InsufficientStock {
                title,
                available,
                requested,
            } => write!(
                f,
                "Insufficient stock for book {title}: only {available} units remain, you tried to buy {requested}"
            ),
            CheckoutTxError::BookMismatch {
                cart_book_id,
                joined_book_id,
            } => write!(
                f,
                "Cart entry references book {cart_book_id} but joined row is book {joined_book_id}"
            ),
            CheckoutTxError::Database(e) => write!(f, "Database error: {e}"),
        }
    }
}

pub struct SaleRepo {
    db: Database,
}

impl SaleRepo {
    pub fn new(db: Database) -> Self {
        SaleRepo { db }
    }

    /// Converts the buyer's cart into a sale in one transaction: locks the
    /// book rows, checks stock against the aggregated cart quantities,
    /// snapshots prices into sale items, decrements stock, and deletes the
    /// consumed cart rows. The sale id is generated by the caller so items
    /// can reference it before the sale row hits the database.
    pub async fn checkout_from_cart(
        &self,
        buyer_id: i32,
        sale_id: &str,
        sold_at: chrono::NaiveDateTime,
    ) -> Result<(), CheckoutTxError> {
        let mut conn = self.db.conn().await?;

        conn.transaction::<_, CheckoutTxError, _>(|connection| {
            async move {
                let pairs: Vec<(CartEntry, Book)> = cart_entries::table
                    .inner_join(books::table)
                    .filter(cart_entries::user_id.eq(buyer_id))
                    .filter(books::deleted.eq(false))
                    .load::<(CartEntry, Book)>(connection)
                    .await?;

                if pairs.is_empty() {
                    return Err(CheckoutTxError::EmptyCart);
                }

                // Aggregate duplicate rows per book before any stock check.
                let mut book_order: Vec<i32> = Vec::new();
                let mut quantities: HashMap<i32, i32> = HashMap::new();
                let mut consumed_entry_ids: Vec<i32> = Vec::new();

                for (entry, joined_book) in &pairs {
                    if entry.book_id != joined_book.book_id {
                        return Err(CheckoutTxError::BookMismatch {
                            cart_book_id: entry.book_id,
                            joined_book_id: joined_book.book_id,
                        });
                    }

                    if !quantities.contains_key(&entry.book_id) {
                        book_order.push(entry.book_id);
                    }
                    *quantities.entry(entry.book_id).or_insert(0) += entry.quantity;
                    consumed_entry_ids.push(entry.cart_entry_id);
                }

                // Re-read the book rows under a row lock so no concurrent
                // checkout can interleave between check and decrement.
                let locked: Vec<Book> = books::table
                    .filter(books::book_id.eq_any(book_order.clone()))
                    .filter(books::deleted.eq(false))
                    .for_update()
                    .load::<Book>(connection)
                    .await?;

                let locked_by_id: HashMap<i32, Book> =
                    locked.into_iter().map(|b| (b.book_id, b)).collect();

                let mut new_items: Vec<NewSaleItem<'_>> = Vec::new();
                let mut decrements: Vec<(i32, i32)> = Vec::new();

                for id in &book_order {
                    let book = locked_by_id
                        .get(id)
                        .ok_or(CheckoutTxError::BookNotFound)?;
                    let requested = quantities[id];

                    if book.stock_quantity < requested {
                        return Err(CheckoutTxError::InsufficientStock {
                            title: book.title.clone(),
                            available: book.stock_quantity,
                            requested,
                        });
                    }

                    new_items.push(NewSaleItem {
                        sale_id,
                        book_id: book.book_id,
                        quantity: requested,
                        unit_price: book.price.clone(),
                    });
                    decrements.push((book.book_id, book.stock_quantity - requested));
                }

                diesel::insert_into(sales::table)
                    .values(&NewSale {
                        sale_id,
                        buyer_id,
                        sold_at,
                    })
                    .execute(connection)
                    .await?;

                diesel::insert_into(sale_items::table)
                    .values(&new_items)
                    .execute(connection)
                    .await?;

                for (id, new_stock) in decrements {
                    diesel::update(books::table.filter(books::book_id.eq(id)))
                        .set(books::stock_quantity.eq(new_stock))
                        .execute(connection)
                        .await?;
                }

                diesel::delete(
                    cart_entries::table
                        .filter(cart_entries::cart_entry_id.eq_any(consumed_entry_ids)),
                )
                .execute(connection)
                .await?;

                Ok(())
            }
            .scope_boxed()
        })
        .await
    }

    /// Single-book purchase of quantity 1 with no cart involvement.
    pub async fn checkout_direct(
        &self,
        book_id_query: i32,
        buyer_id: i32,
        sale_id: &str,
        sold_at: chrono::NaiveDateTime,
    ) -> Result<(), CheckoutTxError> {
        let mut conn = self.db.conn().await?;

        conn.transaction::<_, CheckoutTxError, _>(|connection| {
            async move {
                let book: Book = match books::table
                    .filter(books::book_id.eq(book_id_query))
                    .filter(books::deleted.eq(false))
                    .for_update()
                    .first::<Book>(connection)
                    .await
                {
                    Ok(value) => value,
                    Err(result::Error::NotFound) => return Err(CheckoutTxError::BookNotFound),
                    Err(e) => return Err(e.into()),
                };

                if book.stock_quantity < 1 {
                    return Err(CheckoutTxError::InsufficientStock {
                        title: book.title.clone(),
                        available: book.stock_quantity,
                        requested: 1,
                    });
                }

                diesel::insert_into(sales::table)
                    .values(&NewSale {
                        sale_id,
                        buyer_id,
                        sold_at,
                    })
                    .execute(connection)
                    .await?;

                diesel::insert_into(sale_items::table)
                    .values(&NewSaleItem {
                        sale_id,
                        book_id: book.book_id,
                        quantity: 1,
                        unit_price: book.price.clone(),
                    })
                    .execute(connection)
                    .await?;

                diesel::update(books::table.filter(books::book_id.eq(book.book_id)))
                    .set(books::stock_quantity.eq(book.stock_quantity - 1))
                    .execute(connection)
                    .await?;

                Ok(())
            }
            .scope_boxed()
        })
        .await
    }

    /// Sold items of every book authored by the given user, oldest line
    /// first (insertion order of the items).
    pub async fn get_sold_items_by_author(
        &self,
        author_id: i32,
    ) -> Result<Vec<(SaleItem, Book)>, result::Error> {
        let mut conn = self.db.conn().await?;

        sale_items::table
            .inner_join(books::table)
            .filter(books::user_id.eq(author_id))
            .order(sale_items::sale_item_id.asc())
            .load::<(SaleItem, Book)>(&mut conn)
            .await
    }

    pub async fn get_sales_by_ids(
        &self,
        ids: Vec<String>,
    ) -> Result<Vec<Sale>, result::Error> {
        let mut conn = self.db.conn().await?;

        sales::table
            .filter(sales::sale_id.eq_any(ids))
            .load::<Sale>(&mut conn)
            .await
    }

    /// Every item belonging to the given sales, for computing per-sale
    /// totals on read.
    pub async fn get_items_for_sales(
        &self,
        ids: Vec<String>,
    ) -> Result<Vec<SaleItem>, result::Error> {
        let mut conn = self.db.conn().await?;

        sale_items::table
            .filter(sale_items::sale_id.eq_any(ids))
            .order(sale_items::sale_item_id.asc())
            .load::<SaleItem>(&mut conn)
            .await
    }

    pub async fn get_by_buyer(&self, buyer_id_query: i32) -> Result<Vec<Sale>, result::Error> {
        let mut conn = self.db.conn().await?;

        sales::table
            .filter(sales::buyer_id.eq(buyer_id_query))
            .order(sales::sold_at.asc())
            .load::<Sale>(&mut conn)
            .await
    }

    /// Attaches each sale's items (with their books) to the sale, keeping
    /// item insertion order within every sale.
    pub async fn attach_items(
        &self,
        sales_list: Vec<Sale>,
    ) -> Result<Vec<(Sale, Vec<(SaleItem, Book)>)>, result::Error> {
        if sales_list.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.db.conn().await?;

        let ids: Vec<String> = sales_list.iter().map(|s| s.sale_id.clone()).collect();

        let items_data: Vec<(SaleItem, Book)> = sale_items::table
            .inner_join(books::table)
            .filter(sale_items::sale_id.eq_any(ids))
            .order(sale_items::sale_item_id.asc())
            .load::<(SaleItem, Book)>(&mut conn)
            .await?;

        let mut map: HashMap<String, Vec<(SaleItem, Book)>> = HashMap::new();

        for item in items_data {
            map.entry(item.0.sale_id.clone()).or_default().push(item);
        }

        let result = sales_list
            .into_iter()
            .map(|s| {
                let items = map.remove(&s.sale_id).unwrap_or_default();
                (s, items)
            })
            .collect();

        Ok(result)
    }
}
