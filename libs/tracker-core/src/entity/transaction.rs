use serde::{Deserialize, Serialize};
use sqlx::{
    types::{
        chrono::{DateTime, Utc},
        BigDecimal, Uuid,
    },
    Executor, Postgres,
};

use super::Chain;

#[derive(sqlx::Type, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "graphql", derive(async_graphql::Enum))]
#[sqlx(type_name = "transaction_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Pending,
    Confirmed,
    Failed,
}

#[derive(sqlx::Type, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "graphql", derive(async_graphql::Enum))]
#[sqlx(type_name = "transaction_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Transfer,
    Swap,
    Approval,
    Mint,
    Burn,
    ContractCall,
}

/// On-chain transaction touching a tracked wallet
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Transaction {
    pub id: Uuid,
    pub time: DateTime<Utc>,
    pub wallet_id: Uuid,
    pub hash: String,
    pub chain: Chain,
    pub from_address: String,
    pub to_address: String,
    pub token_id: Option<Uuid>,
    /// Raw amount in the token's smallest unit
    pub amount: BigDecimal,
    pub gas_fee: Option<BigDecimal>,
    pub block_number: i64,
    pub status: TransactionStatus,
    #[sqlx(rename = "type")]
    pub tx_type: Option<TransactionType>,
}

#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub time: DateTime<Utc>,
    pub wallet_id: Uuid,
    pub hash: String,
    pub chain: Chain,
    pub from_address: String,
    pub to_address: String,
    pub token_id: Option<Uuid>,
    pub amount: BigDecimal,
    pub gas_fee: Option<BigDecimal>,
    pub block_number: i64,
    pub status: TransactionStatus,
    pub tx_type: Option<TransactionType>,
}

impl Transaction {
    /// Insert a transaction; a re-seen (hash, chain) refreshes status and block
    pub async fn upsert<'c, E>(
        tx: &NewTransaction,
        connection: E,
    ) -> Result<Transaction, sqlx::Error>
    where
        E: Executor<'c, Database = Postgres>,
    {
        let query = r#"
            INSERT INTO transactions (
                time, wallet_id, hash, chain, from_address, to_address,
                token_id, amount, gas_fee, block_number, status, type
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ON CONFLICT (hash, chain) DO UPDATE SET
                status = EXCLUDED.status,
                block_number = EXCLUDED.block_number
            RETURNING *
        "#;

        sqlx::query_as::<_, Transaction>(query)
            .bind(tx.time)
            .bind(tx.wallet_id)
            .bind(&tx.hash)
            .bind(tx.chain)
            .bind(&tx.from_address)
            .bind(&tx.to_address)
            .bind(tx.token_id)
            .bind(&tx.amount)
            .bind(&tx.gas_fee)
            .bind(tx.block_number)
            .bind(tx.status)
            .bind(tx.tx_type)
            .fetch_one(connection)
            .await
    }

    /// Most recent transactions for a wallet
    pub async fn find_by_wallet<'c, E>(
        wallet_id: Uuid,
        limit: i64,
        offset: i64,
        connection: E,
    ) -> Result<Vec<Transaction>, sqlx::Error>
    where
        E: Executor<'c, Database = Postgres>,
    {
        sqlx::query_as::<_, Transaction>(
            r#"
            SELECT * FROM transactions
            WHERE wallet_id = $1
            ORDER BY time DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(wallet_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(connection)
        .await
    }

    pub async fn count_by_wallet<'c, E>(wallet_id: Uuid, connection: E) -> Result<i64, sqlx::Error>
    where
        E: Executor<'c, Database = Postgres>,
    {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions WHERE wallet_id = $1")
            .bind(wallet_id)
            .fetch_one(connection)
            .await?;

        Ok(count)
    }

    pub async fn count_pending<'c, E>(connection: E) -> Result<i64, sqlx::Error>
    where
        E: Executor<'c, Database = Postgres>,
    {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM transactions WHERE status = 'PENDING'")
                .fetch_one(connection)
                .await?;

        Ok(count)
    }
}
