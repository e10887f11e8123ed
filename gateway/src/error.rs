use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Invalid PORT value `{0}`")]
    InvalidPort(String),

    #[error("Invalid CORS origin `{0}`")]
    InvalidOrigin(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A stored row that has no faithful GraphQL representation
#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Transaction {0} has negative block number {1}")]
    NegativeBlockNumber(Uuid, i64),

    #[error("Transaction {0} has no type")]
    MissingTransactionType(Uuid),

    #[error("Token balances are not valid JSON: {0}")]
    TokenBalances(#[from] serde_json::Error),
}
