use crate::data::models::schema::*;
use crate::data::models::user::User;
use bigdecimal::BigDecimal;
use diesel::prelude::*;

#[derive(Queryable, Selectable, Identifiable, Associations, PartialEq, Debug, Clone)]
#[diesel(table_name = books)]
#[diesel(primary_key(book_id))]
#[diesel(belongs_to(User, foreign_key = user_id))]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct Book {
    pub book_id: i32,
    pub title: String,
    /// The owning author.
    pub user_id: i32,
    pub genre: String,
    pub stock_quantity: i32,
    pub price: BigDecimal,
    pub description: String,
    pub image_url: String,
    pub deleted: bool,
    pub created_at: Option<chrono::NaiveDateTime>,
    pub updated_at: Option<chrono::NaiveDateTime>,
}

#[derive(Insertable, PartialEq, Debug)]
#[diesel(table_name = books)]
pub struct NewBook<'a> {
    pub title: &'a str,
    pub user_id: i32,
    pub genre: &'a str,
    pub stock_quantity: i32,
    pub price: BigDecimal,
    pub description: &'a str,
    pub image_url: &'a str,
    pub deleted: bool,
}

#[derive(AsChangeset, PartialEq, Debug, Default)]
#[diesel(table_name = books)]
pub struct UpdateBook<'a> {
    pub title: Option<&'a str>,
    pub genre: Option<&'a str>,
    pub stock_quantity: Option<i32>,
    pub price: Option<BigDecimal>,
    pub description: Option<&'a str>,
    pub image_url: Option<&'a str>,
    pub deleted: Option<bool>,
}
