use std::env;

use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    Pool, Postgres,
};

pub mod domain;
pub mod entity;
pub mod error;
pub mod format;
pub mod seed;

// Re-export commonly used types
pub use entity::{
    Chain, NewToken, NewTransaction, NewWallet, Token, Transaction, TransactionStatus,
    TransactionType, Wallet, WalletChanges,
};
pub use error::DbError;

mod defaults {
    pub const DATABASE_MAX_CONNECTIONS: &str = "5";
}

async fn create_pool(max_connections: u32) -> Result<Pool<Postgres>, DbError> {
    // DATABASE_URL wins; otherwise libpq-style PG* variables are picked up
    let conn = match env::var("DATABASE_URL") {
        Ok(url) => url.parse::<PgConnectOptions>()?,
        Err(_) => PgConnectOptions::new(),
    };

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect_with(conn)
        .await?;

    Ok(pool)
}

pub async fn initialize_database() -> Result<Pool<Postgres>, DbError> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let raw = env::var("DATABASE_MAX_CONNECTIONS")
        .unwrap_or(String::from(defaults::DATABASE_MAX_CONNECTIONS));
    let db_max_connections = raw
        .parse::<u32>()
        .map_err(|_| DbError::InvalidMaxConnections(raw))?;

    let pool = create_pool(db_max_connections).await?;
    tracing::debug!(max_connections = db_max_connections, "database pool ready");

    Ok(pool)
}

/// Apply the schema in `migrations/` to the connected database.
pub async fn run_migrations(pool: &Pool<Postgres>) -> Result<(), DbError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
