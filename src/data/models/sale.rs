use crate::data::models::book::Book;
use crate::data::models::schema::*;
use bigdecimal::BigDecimal;
use diesel::prelude::*;

/// A completed transaction. The id is a UUID stored as CHAR(36) and is
/// generated before the row is persisted so items can reference it inside
/// the same transaction.
#[derive(Queryable, Selectable, Identifiable, PartialEq, Debug, Clone)]
#[diesel(table_name = sales)]
#[diesel(primary_key(sale_id))]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct Sale {
    pub sale_id: String,
    pub buyer_id: i32,
    pub sold_at: chrono::NaiveDateTime,
}

#[derive(Insertable, PartialEq, Debug)]
#[diesel(table_name = sales)]
pub struct NewSale<'a> {
    pub sale_id: &'a str,
    pub buyer_id: i32,
    pub sold_at: chrono::NaiveDateTime,
}

/// One line of a sale. `unit_price` is a snapshot of the book's price at
/// checkout time; later price edits must not change recorded sales.
#[derive(Queryable, Selectable, Identifiable, Associations, PartialEq, Debug, Clone)]
#[diesel(table_name = sale_items)]
#[diesel(primary_key(sale_item_id))]
#[diesel(belongs_to(Sale, foreign_key = sale_id))]
#[diesel(belongs_to(Book, foreign_key = book_id))]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct SaleItem {
    pub sale_item_id: i32,
    pub sale_id: String,
    pub book_id: i32,
    pub quantity: i32,
    pub unit_price: BigDecimal,
}

#[derive(Insertable, PartialEq, Debug)]
#[diesel(table_name = sale_items)]
pub struct NewSaleItem<'a> {
    pub sale_id: &'a str,
    pub book_id: i32,
    pub quantity: i32,
    pub unit_price: BigDecimal,
}
