use serde::Deserialize;

/// Query of `GET /news`. The parameter is validated by hand so a missing
/// value maps to the JSON error shape rather than a bare 400.
#[derive(Debug, Deserialize)]
pub struct NewsQuery {
    pub stock_name: Option<String>,
}

/// Body of `POST /extract`
#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub url: Option<String>,
    pub stock_name: Option<String>,
}

/// Body of `POST /stocks`
#[derive(Debug, Deserialize)]
pub struct CreateStockRequest {
    pub name: String,
    pub symbol: String,
}

/// Body of `POST /users`
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
}

/// Body of `POST /stocks/select`
#[derive(Debug, Deserialize)]
pub struct SelectStockRequest {
    pub user_id: i64,
    pub stock_id: i64,
    pub selected: bool,
}

/// Body of `DELETE /stocks/select`
#[derive(Debug, Deserialize)]
pub struct DeleteSelectionRequest {
    pub user_id: i64,
    pub stock_id: i64,
}
