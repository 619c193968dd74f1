use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Recorded when the whole image fallback chain came up empty. Distinct from
/// a fetch error, and treated as "nothing to store" by the upsert.
pub const NO_IMAGE_FOUND: &str = "no image found";

/// Recorded when no summary could be produced for an article. Like
/// [`NO_IMAGE_FOUND`], it never replaces a previously stored summary.
pub const NO_SUMMARY_FOUND: &str = "summary not found";

/// A listed company
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Stock {
    pub id: i64,
    pub name: String,
    pub symbol: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A news article attached to a stock. At most one row exists per URL.
#[derive(Debug, Clone, FromRow, Serialize, PartialEq, Eq)]
pub struct News {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub content: String,
    pub image: Option<String>,
    pub source: String,
    pub published: DateTime<Utc>,
    pub stock_id: i64,
}

/// News representation to be upserted in the database
#[derive(Debug, Clone, Serialize)]
pub struct NewNews {
    pub title: String,
    pub url: String,
    pub content: String,
    pub image: Option<String>,
    pub source: String,
    pub published: DateTime<Utc>,
    pub stock_id: i64,
}

/// A stored article whose summary is still missing, with the stock it
/// belongs to. Feeds the scheduler's re-enrichment pass.
#[derive(Debug, FromRow, Serialize)]
pub struct PendingNews {
    pub url: String,
    pub stock_name: String,
}

/// A user owning watchlist entries. Credentials live outside this service.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// A watchlist entry. A missing row and `selected = false` are equivalent
/// "not selected" states for every reader.
#[derive(Debug, FromRow, Serialize)]
pub struct StockSelection {
    pub user_id: i64,
    pub stock_id: i64,
    pub selected: bool,
}
