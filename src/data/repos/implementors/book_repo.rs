use crate::data::database::Database;
use crate::data::models::book::{Book, NewBook, UpdateBook};
use crate::data::repos::traits::repository::Repository;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result;
use diesel_async::{AsyncConnection, RunQueryDsl};
use diesel_async::scoped_futures::ScopedFutureExt;

pub struct BookRepo {
    db: Database,
}

/// One page of active books plus the listing totals.
#[derive(Debug, PartialEq)]
pub struct BookPage {
    pub books: Vec<Book>,
    pub total: i64,
    pub total_pages: i64,
}

impl BookRepo {
    pub fn new(db: Database) -> Self {
        BookRepo { db }
    }

    /// Paginated listing of non-deleted books, optionally narrowed by a
    /// title substring and/or an owning author.
    pub async fn get_page(
        &self,
        page: i64,
        page_size: i64,
        title_filter: Option<&str>,
        author_id: Option<i32>,
    ) -> Result<BookPage, result::Error> {
        use crate::data::models::schema::books::dsl::{book_id, books, deleted, title, user_id};

        let mut conn = self.db.conn().await?;

        let mut count_query = books
            .filter(deleted.eq(false))
            .select(diesel::dsl::count_star())
            .into_boxed();
        let mut page_query = books.filter(deleted.eq(false)).into_boxed();

        if let Some(filter) = title_filter {
            let pattern = format!("%{filter}%");
            count_query = count_query.filter(title.like(pattern.clone()));
            page_query = page_query.filter(title.like(pattern));
        }

        if let Some(author) = author_id {
            count_query = count_query.filter(user_id.eq(author));
            page_query = page_query.filter(user_id.eq(author));
        }

        let total: i64 = count_query.first(&mut conn).await?;

        let rows = page_query
            .order(book_id.asc())
            .limit(page_size)
            .offset((page - 1) * page_size)
            .load::<Book>(&mut conn)
            .await?;

        Ok(BookPage {
            books: rows,
            total,
            total_pages: (total + page_size - 1) / page_size,
        })
    }

    pub async fn get_by_title(&self, title_query: &str) -> Result<Option<Book>, result::Error> {
        use crate::data::models::schema::books::dsl::{books, title};

        let mut conn = self.db.conn().await?;

        match books
            .filter(title.eq(title_query))
            .first::<Book>(&mut conn)
            .await
        {
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl Repository for BookRepo {
    type Id = i32;
    type Item = Book;
    type NewItem<'a> = NewBook<'a>;
    type UpdateForm<'a> = UpdateBook<'a>;

    async fn get_all(&self) -> Result<Option<Vec<Self::Item>>, result::Error> {
        use crate::data::models::schema::books::dsl::{books, deleted};

        let mut conn = self.db.conn().await?;

        match books
            .filter(deleted.eq(false))
            .load::<Self::Item>(&mut conn)
            .await
        {
            Ok(value) if value.is_empty() => Ok(None),
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn get_by_id(&self, id: Self::Id) -> Result<Option<Self::Item>, result::Error> {
        use crate::data::models::schema::books::dsl::{book_id, books, deleted};

        let mut conn = self.db.conn().await?;

        match books
            .filter(book_id.eq(id))
            .filter(deleted.eq(false))
            .first::<Self::Item>(&mut conn)
            .await
        {
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn add<'a>(&self, item: Self::NewItem<'a>) -> Result<(), result::Error> {
        use crate::data::models::schema::books::dsl::books;

        let mut conn = self.db.conn().await?;

        conn.transaction(|connection| {
            async move {
                diesel::insert_into(books)
                    .values(&item)
                    .execute(connection)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
    }

    async fn update<'a>(
        &self,
        id: Self::Id,
        item: Self::UpdateForm<'a>,
    ) -> Result<(), result::Error> {
        use crate::data::models::schema::books::dsl::{book_id, books};

        let mut conn = self.db.conn().await?;

        conn.transaction(|connection| {
            async move {
                diesel::update(books.filter(book_id.eq(id)))
                    .set(&item)
                    .execute(connection)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
    }

    /// Soft delete: the row stays, every listing filters it out.
    async fn delete(&self, id: Self::Id) -> Result<(), result::Error> {
        use crate::data::models::schema::books::dsl::{book_id, books, deleted};

        let mut conn = self.db.conn().await?;

        conn.transaction(|connection| {
            async move {
                diesel::update(books.filter(book_id.eq(id)))
                    .set(deleted.eq(true))
                    .execute(connection)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
    }
}
