use actix_web::{post, web, HttpResponse};

use crate::common::users;
use crate::errors::ApiError;
use crate::model::CreateUserRequest;
use crate::startup::AppState;

/// Create a watchlist owner. Credentials and authentication are handled
/// outside this service.
#[post("/users")]
#[tracing::instrument(skip(app_state))]
pub async fn create_user(
    request: web::Json<CreateUserRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let request = request.into_inner();
    if request.username.is_empty() {
        return Err(ApiError::invalid("username is required."));
    }

    let user = users::create_user(&app_state.db, &request.username).await?;

    Ok(HttpResponse::Created().json(user))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_user);
}
