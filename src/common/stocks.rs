use chrono::Utc;
use sqlx::Result;

use crate::common::model::Stock;
use crate::common::Pool;

/// Return the stock matching the name
#[tracing::instrument(skip(db))]
pub async fn get_stock_by_name(db: &Pool, name: &str) -> Result<Option<Stock>> {
    sqlx::query_as::<_, Stock>(
        r#"
        SELECT id, name, symbol, created_at, updated_at FROM stocks WHERE name = ?
        "#,
    )
    .bind(name)
    .fetch_optional(db)
    .await
}

/// Return the stock matching the id
#[tracing::instrument(skip(db), level = "debug")]
pub async fn get_stock_by_id(db: &Pool, id: i64) -> Result<Option<Stock>> {
    sqlx::query_as::<_, Stock>(
        r#"
        SELECT id, name, symbol, created_at, updated_at FROM stocks WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

/// List the whole catalogue
#[tracing::instrument(skip(db))]
pub async fn list_stocks(db: &Pool) -> Result<Vec<Stock>> {
    sqlx::query_as::<_, Stock>(
        r#"
        SELECT id, name, symbol, created_at, updated_at FROM stocks ORDER BY name
        "#,
    )
    .fetch_all(db)
    .await
}

/// Insert a stock or refresh the symbol of the existing row sharing its name
#[tracing::instrument(skip(db))]
pub async fn upsert_stock(db: &Pool, name: &str, symbol: &str) -> Result<Stock> {
    let now = Utc::now();
    sqlx::query_as::<_, Stock>(
        r#"
        INSERT INTO stocks (name, symbol, created_at, updated_at)
        VALUES (?, ?, ?, ?)
        ON CONFLICT (name) DO UPDATE SET
            symbol = excluded.symbol,
            updated_at = excluded.updated_at
        RETURNING id, name, symbol, created_at, updated_at
        "#,
    )
    .bind(name)
    .bind(symbol)
    .bind(now)
    .bind(now)
    .fetch_one(db)
    .await
}
