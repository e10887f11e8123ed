use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Invalid DATABASE_MAX_CONNECTIONS value: `{0}`")]
    InvalidMaxConnections(String),

    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}
