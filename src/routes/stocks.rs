use actix_web::{delete, get, post, web, HttpResponse};
use serde_json::json;

use crate::common::{selections, stocks, users};
use crate::errors::ApiError;
use crate::model::{CreateStockRequest, DeleteSelectionRequest, SelectStockRequest};
use crate::startup::AppState;

#[get("/stocks")]
#[tracing::instrument(skip(app_state))]
pub async fn list_stocks(app_state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let stocks = stocks::list_stocks(&app_state.db).await?;

    Ok(HttpResponse::Ok().json(stocks))
}

/// Seed a catalogue entry. Replaces the listing-page scraper, which lives
/// outside this service.
#[post("/stocks")]
#[tracing::instrument(skip(app_state))]
pub async fn create_stock(
    request: web::Json<CreateStockRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let request = request.into_inner();
    if request.name.is_empty() || request.symbol.is_empty() {
        return Err(ApiError::invalid("name and symbol are required."));
    }

    let stock = stocks::upsert_stock(&app_state.db, &request.name, &request.symbol).await?;

    Ok(HttpResponse::Created().json(stock))
}

/// Select or deselect a stock for a user's watchlist
#[post("/stocks/select")]
#[tracing::instrument(skip(app_state))]
pub async fn select_stock(
    request: web::Json<SelectStockRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let request = request.into_inner();

    stocks::get_stock_by_id(&app_state.db, request.stock_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Stock not found"))?;
    users::get_user_by_id(&app_state.db, request.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let selection = selections::upsert_selection(
        &app_state.db,
        request.user_id,
        request.stock_id,
        request.selected,
    )
    .await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Stock selection updated successfully",
        "data": selection,
    })))
}

/// Drop a watchlist row entirely; equivalent to deselecting it.
#[delete("/stocks/select")]
#[tracing::instrument(skip(app_state))]
pub async fn delete_selection(
    request: web::Json<DeleteSelectionRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let request = request.into_inner();

    let deleted =
        selections::delete_selection(&app_state.db, request.user_id, request.stock_id).await?;
    if !deleted {
        return Err(ApiError::not_found("Stock selection not found"));
    }

    Ok(HttpResponse::Ok().json(json!({ "message": "Stock selection deleted successfully" })))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_stocks)
        .service(create_stock)
        .service(select_stock)
        .service(delete_selection);
}
