use std::net::TcpListener;

use actix_web::web::Data;
use actix_web::{App, HttpServer};

use crate::common::Pool;
use crate::news::NewsPipeline;
use crate::routes;

/// Process-scoped dependencies, built once at startup and handed to every
/// request handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Pool,
    pub pipeline: NewsPipeline,
}

pub async fn startup(state: AppState, listener: TcpListener) -> std::io::Result<()> {
    HttpServer::new(move || {
        App::new()
            .wrap(tracing_actix_web::TracingLogger::default())
            .app_data(Data::new(state.clone()))
            .configure(routes::configure)
    })
    .listen(listener)?
    .run()
    .await
}
