pub mod model;
pub mod news;
pub mod selections;
pub mod stocks;
pub mod users;

pub type Pool = sqlx::SqlitePool;
