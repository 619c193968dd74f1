use std::str::FromStr;

use anyhow::Context;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::common::Pool;

/// Open the database, creating the file when missing, and bring the schema
/// up to date.
pub async fn init_database(database_url: &str) -> anyhow::Result<Pool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .context("Invalid DATABASE_URL")?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .context("Could not open the database")?;

    sqlx::migrate!()
        .run(&pool)
        .await
        .context("Could not run the database migrations")?;

    Ok(pool)
}
