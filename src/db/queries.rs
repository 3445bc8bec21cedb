//! Database queries for users

use sqlx::PgPool;

use crate::error::{AppError, Result};
use crate::models::User;

/// Get a user by id
pub async fn get_user(pool: &PgPool, user_id: i32) -> Result<User> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, name, is_host
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("user {}", user_id)))?;

    Ok(user)
}
