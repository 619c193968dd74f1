use sqlx::Result;

use crate::common::model::StockSelection;
use crate::common::Pool;

/// Record whether a user tracks a stock. One row per (user, stock) pair.
#[tracing::instrument(skip(db))]
pub async fn upsert_selection(
    db: &Pool,
    user_id: i64,
    stock_id: i64,
    selected: bool,
) -> Result<StockSelection> {
    sqlx::query_as::<_, StockSelection>(
        r#"
        INSERT INTO stock_selections (user_id, stock_id, selected)
        VALUES (?, ?, ?)
        ON CONFLICT (user_id, stock_id) DO UPDATE SET selected = excluded.selected
        RETURNING user_id, stock_id, selected
        "#,
    )
    .bind(user_id)
    .bind(stock_id)
    .bind(selected)
    .fetch_one(db)
    .await
}

/// Remove a selection row entirely. Returns false when there was nothing to
/// remove. Readers treat a missing row and `selected = false` alike, so both
/// deselection paths are equivalent.
#[tracing::instrument(skip(db))]
pub async fn delete_selection(db: &Pool, user_id: i64, stock_id: i64) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM stock_selections WHERE user_id = ? AND stock_id = ?
        "#,
    )
    .bind(user_id)
    .bind(stock_id)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Distinct names of the stocks at least one user currently tracks. This is
/// the work list of a scheduler tick.
#[tracing::instrument(skip(db))]
pub async fn selected_stock_names(db: &Pool) -> Result<Vec<String>> {
    sqlx::query_scalar::<_, String>(
        r#"
        SELECT DISTINCT stocks.name
        FROM stocks
                 JOIN stock_selections ON stock_selections.stock_id = stocks.id
        WHERE stock_selections.selected = TRUE
        ORDER BY stocks.name
        "#,
    )
    .fetch_all(db)
    .await
}
