use crate::data::models::user::User;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

#[derive(Deserialize, Debug, Clone)]
pub struct RegisterUserRequest {
    pub name: String,
    pub surname: String,
    pub birth_date: chrono::NaiveDate,
    pub email: String,
    pub password: String,
}

#[skip_serializing_none]
#[derive(Serialize, Debug, Clone)]
pub struct UserResponse {
    pub user_id: i32,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub active: bool,
    pub author: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            name: user.name,
            surname: user.surname,
            email: user.email,
            active: user.active,
            author: user.author,
            created_at: user.created_at.map(|dt| dt.format("%d/%m/%Y").to_string()),
            updated_at: user.updated_at.map(|dt| dt.format("%d/%m/%Y").to_string()),
        }
    }
}
