use crate::data::database::Database;
use crate::data::models::book::Book;
use crate::data::models::cart::{CartEntry, NewCartEntry};
use diesel::prelude::*;
use diesel::result;
use diesel_async::{AsyncConnection, RunQueryDsl};
use diesel_async::scoped_futures::ScopedFutureExt;

pub struct CartRepo {
    db: Database,
}

impl CartRepo {
    pub fn new(db: Database) -> Self {
        CartRepo { db }
    }

    /// All rows for one (user, book) pair. Normally at most one, but
    /// duplicates can exist transiently and callers must sum them.
    pub async fn get_entries_for_book(
        &self,
        user_id_query: i32,
        book_id_query: i32,
    ) -> Result<Vec<CartEntry>, result::Error> {
        use crate::data::models::schema::cart_entries::dsl::{book_id, cart_entries, user_id};

        let mut conn = self.db.conn().await?;

        cart_entries
            .filter(user_id.eq(user_id_query))
            .filter(book_id.eq(book_id_query))
            .load::<CartEntry>(&mut conn)
            .await
    }

    /// The user's whole cart joined with the referenced (non-deleted) books.
    pub async fn get_cart_with_books(
        &self,
        user_id_query: i32,
    ) -> Result<Vec<(CartEntry, Book)>, result::Error> {
        use crate::data::models::schema::books::dsl::{books, deleted};
        use crate::data::models::schema::cart_entries::dsl::{cart_entries, user_id};

        let mut conn = self.db.conn().await?;

        cart_entries
            .inner_join(books)
            .filter(user_id.eq(user_id_query))
            .filter(deleted.eq(false))
            .load::<(CartEntry, Book)>(&mut conn)
            .await
    }

    /// Replaces every row for (user, book) with a single row holding
    /// `quantity`, or with nothing when `quantity` is zero. Insert and
    /// delete commit together; a failure leaves the old rows in place.
    pub async fn replace_for_book(
        &self,
        user_id_value: i32,
        book_id_value: i32,
        quantity: i32,
        old_entry_ids: Vec<i32>,
    ) -> Result<(), result::Error> {
        use crate::data::models::schema::cart_entries::dsl::{cart_entries, cart_entry_id};

        let mut conn = self.db.conn().await?;

        conn.transaction(|connection| {
            async move {
                if quantity > 0 {
                    let merged = NewCartEntry {
                        user_id: user_id_value,
                        book_id: book_id_value,
                        quantity,
                    };

                    diesel::insert_into(cart_entries)
                        .values(&merged)
                        .execute(connection)
                        .await?;
                }

                diesel::delete(cart_entries.filter(cart_entry_id.eq_any(old_entry_ids)))
                    .execute(connection)
                    .await?;

                Ok(())
            }
            .scope_boxed()
        })
        .await
    }
}
