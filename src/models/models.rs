use serde::Serialize;
use sqlx::any::AnyRow;
use sqlx::{FromRow, Row};

use crate::core::db::text_column;

/// A row of `Posts`, serialized with the column names clients expect.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Post {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "UserID")]
    pub user_id: i64,
    #[serde(rename = "postTitle")]
    pub title: String,
    #[serde(rename = "postDescription")]
    pub description: String,
}

impl<'r> FromRow<'r, AnyRow> for Post {
    fn from_row(row: &'r AnyRow) -> Result<Self, sqlx::Error> {
        Ok(Post {
            id: row.try_get("ID")?,
            user_id: row.try_get("UserID")?,
            title: text_column(row, "postTitle")?,
            description: text_column(row, "postDescription")?,
        })
    }
}

/// What login needs from `Users`. Never serialized.
#[derive(Clone, sqlx::FromRow)]
pub struct UserCredentials {
    #[sqlx(rename = "ID")]
    pub id: i64,
    #[sqlx(rename = "HashedPassword")]
    pub hashed_password: String,
}

#[derive(Serialize, Debug)]
pub struct LoginResponse {
    #[serde(rename = "userID")]
    pub user_id: i64,
}

#[derive(Serialize, Debug)]
pub struct HealthResponse {
    pub message: String,
}
