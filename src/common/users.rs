use chrono::Utc;
use sqlx::Result;

use crate::common::model::User;
use crate::common::Pool;

/// Create a new user. Authentication lives outside this service; a user here
/// is only an owner for watchlist entries.
#[tracing::instrument(skip(db))]
pub async fn create_user(db: &Pool, username: &str) -> Result<User> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (username, created_at) VALUES (?, ?)
        RETURNING id, username, created_at
        "#,
    )
    .bind(username)
    .bind(Utc::now())
    .fetch_one(db)
    .await
}

/// Return the user matching the id
#[tracing::instrument(skip(db), level = "debug")]
pub async fn get_user_by_id(db: &Pool, id: i64) -> Result<Option<User>> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, created_at FROM users WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await
}
