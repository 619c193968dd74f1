pub mod common;
pub mod configuration;
pub mod database;
pub mod errors;
pub mod model;
pub mod news;
pub mod observability;
pub mod routes;
pub mod scheduler;
pub mod startup;
