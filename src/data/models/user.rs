use crate::data::models::schema::*;
use diesel::prelude::*;

#[derive(Queryable, Selectable, Identifiable, PartialEq, Debug, Clone)]
#[diesel(table_name = users)]
#[diesel(primary_key(user_id))]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct User {
    pub user_id: i32,
    pub name: String,
    pub surname: String,
    pub birth_date: chrono::NaiveDate,
    pub email: String,
    pub password_hash: String,
    pub active: bool,
    pub deleted: bool,
    pub author: bool,
    pub created_at: Option<chrono::NaiveDateTime>,
    pub updated_at: Option<chrono::NaiveDateTime>,
}

#[derive(Insertable, PartialEq, Debug)]
#[diesel(table_name = users)]
pub struct NewUser<'a> {
    pub name: &'a str,
    pub surname: &'a str,
    pub birth_date: chrono::NaiveDate,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub active: bool,
    pub deleted: bool,
    pub author: bool,
}

impl<'a> NewUser<'a> {
    /// A freshly registered user: active, not deleted, not yet an author.
    pub fn registration(
        name: &'a str,
        surname: &'a str,
        birth_date: chrono::NaiveDate,
        email: &'a str,
        password_hash: &'a str,
    ) -> Self {
        NewUser {
            name,
            surname,
            birth_date,
            email,
            password_hash,
            active: true,
            deleted: false,
            author: false,
        }
    }
}

#[derive(AsChangeset, PartialEq, Debug, Default)]
#[diesel(table_name = users)]
pub struct UpdateUser<'a> {
    pub name: Option<&'a str>,
    pub surname: Option<&'a str>,
    pub email: Option<&'a str>,
    pub password_hash: Option<&'a str>,
    pub active: Option<bool>,
    pub deleted: Option<bool>,
    pub author: Option<bool>,
}
