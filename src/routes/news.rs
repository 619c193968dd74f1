use actix_web::{get, post, web, HttpResponse};

use crate::errors::ApiError;
use crate::model::{ExtractRequest, NewsQuery};
use crate::startup::AppState;

/// Run the discovery pipeline for a stock and return what it stored.
#[get("/news")]
#[tracing::instrument(skip(app_state))]
pub async fn get_news(
    query: web::Query<NewsQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let stock_name = query
        .stock_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ApiError::invalid("Missing 'stock_name' parameter"))?;

    let articles = app_state.pipeline.run_for_stock(stock_name).await?;

    // An empty batch is a valid pipeline result, but the API reports it as
    // not found, distinct from an unknown stock.
    if articles.is_empty() {
        return Err(ApiError::not_found("No news found for the given stock name."));
    }

    Ok(HttpResponse::Ok().json(articles))
}

/// Enrich a single article directly from its URL.
#[post("/extract")]
#[tracing::instrument(skip(app_state, request))]
pub async fn extract_article(
    request: web::Json<ExtractRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let request = request.into_inner();
    let (url, stock_name) = match (request.url, request.stock_name) {
        (Some(url), Some(stock_name)) if !url.is_empty() && !stock_name.is_empty() => {
            (url, stock_name)
        }
        _ => return Err(ApiError::invalid("URL and stock_name are required.")),
    };

    let news = app_state.pipeline.extract_one(&url, &stock_name).await?;

    Ok(HttpResponse::Ok().json(news))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(get_news).service(extract_article);
}
