//! Marketplace user model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User from users
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub name: String,
    pub is_host: bool,
}
