use actix_web::web;

pub mod news;
pub mod stocks;
pub mod users;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(news::configure)
        .configure(stocks::configure)
        .configure(users::configure);
}
