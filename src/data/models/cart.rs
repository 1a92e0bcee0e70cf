use crate::data::models::book::Book;
use crate::data::models::schema::*;
use crate::data::models::user::User;
use diesel::prelude::*;

/// One pending intent to buy a quantity of a book. Duplicate rows for the
/// same (user, book) pair can exist transiently; readers must sum them.
#[derive(Queryable, Selectable, Identifiable, Associations, PartialEq, Debug, Clone)]
#[diesel(table_name = cart_entries)]
#[diesel(primary_key(cart_entry_id))]
#[diesel(belongs_to(User, foreign_key = user_id))]
#[diesel(belongs_to(Book, foreign_key = book_id))]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct CartEntry {
    pub cart_entry_id: i32,
    pub user_id: i32,
    pub book_id: i32,
    pub quantity: i32,
}

#[derive(Insertable, PartialEq, Debug)]
#[diesel(table_name = cart_entries)]
pub struct NewCartEntry {
    pub user_id: i32,
    pub book_id: i32,
    pub quantity: i32,
}
