use serde::Serialize;
use sqlx::{
    types::{
        chrono::{DateTime, Utc},
        Uuid,
    },
    Executor, Postgres,
};

use super::Chain;

/// Wallet tracked on a single chain
#[derive(sqlx::FromRow, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub id: Uuid,
    pub address: String,
    pub chain: Chain,
    pub label: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_synced_at: Option<DateTime<Utc>>,
    pub is_active: bool,
}

/// Input for creating a new wallet
#[derive(Debug, Clone)]
pub struct NewWallet {
    pub address: String,
    pub chain: Chain,
    pub label: Option<String>,
    pub is_active: bool,
}

/// Partial update; `None` leaves the column untouched
#[derive(Debug, Clone, Default)]
pub struct WalletChanges {
    pub label: Option<String>,
    pub is_active: Option<bool>,
}

impl Wallet {
    /// Create a wallet, or refresh label/activity of an existing (address, chain) pair
    pub async fn create<'c, E>(wallet: &NewWallet, connection: E) -> Result<Wallet, sqlx::Error>
    where
        E: Executor<'c, Database = Postgres>,
    {
        let query = r#"
            INSERT INTO wallets (address, chain, label, is_active)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (address, chain) DO UPDATE SET
                label = COALESCE(EXCLUDED.label, wallets.label),
                is_active = EXCLUDED.is_active,
                updated_at = NOW()
            RETURNING *
        "#;

        sqlx::query_as::<_, Wallet>(query)
            .bind(&wallet.address)
            .bind(wallet.chain)
            .bind(&wallet.label)
            .bind(wallet.is_active)
            .fetch_one(connection)
            .await
    }

    pub async fn find_by_id<'c, E>(id: Uuid, connection: E) -> Result<Option<Wallet>, sqlx::Error>
    where
        E: Executor<'c, Database = Postgres>,
    {
        sqlx::query_as::<_, Wallet>("SELECT * FROM wallets WHERE id = $1")
            .bind(id)
            .fetch_optional(connection)
            .await
    }

    /// Find wallet by address on a chain
    pub async fn find_by_address<'c, E>(
        address: &str,
        chain: Chain,
        connection: E,
    ) -> Result<Option<Wallet>, sqlx::Error>
    where
        E: Executor<'c, Database = Postgres>,
    {
        sqlx::query_as::<_, Wallet>("SELECT * FROM wallets WHERE address = $1 AND chain = $2")
            .bind(address)
            .bind(chain)
            .fetch_optional(connection)
            .await
    }

    /// Page through wallets, newest first; an empty `chains` slice means every chain
    pub async fn find_all<'c, E>(
        chains: &[Chain],
        limit: i64,
        offset: i64,
        connection: E,
    ) -> Result<Vec<Wallet>, sqlx::Error>
    where
        E: Executor<'c, Database = Postgres>,
    {
        sqlx::query_as::<_, Wallet>(
            r#"
            SELECT * FROM wallets
            WHERE cardinality($1::chain[]) = 0 OR chain = ANY($1)
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(chains)
        .bind(limit)
        .bind(offset)
        .fetch_all(connection)
        .await
    }

    pub async fn update<'c, E>(
        address: &str,
        chain: Chain,
        changes: &WalletChanges,
        connection: E,
    ) -> Result<Option<Wallet>, sqlx::Error>
    where
        E: Executor<'c, Database = Postgres>,
    {
        sqlx::query_as::<_, Wallet>(
            r#"
            UPDATE wallets SET
                label = COALESCE($3, label),
                is_active = COALESCE($4, is_active),
                updated_at = NOW()
            WHERE address = $1 AND chain = $2
            RETURNING *
            "#,
        )
        .bind(address)
        .bind(chain)
        .bind(&changes.label)
        .bind(changes.is_active)
        .fetch_optional(connection)
        .await
    }

    /// Delete wallet by address on a chain
    pub async fn delete_by_address<'c, E>(
        address: &str,
        chain: Chain,
        connection: E,
    ) -> Result<bool, sqlx::Error>
    where
        E: Executor<'c, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM wallets WHERE address = $1 AND chain = $2")
            .bind(address)
            .bind(chain)
            .execute(connection)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn mark_synced<'c, E>(
        id: Uuid,
        synced_at: DateTime<Utc>,
        connection: E,
    ) -> Result<(), sqlx::Error>
    where
        E: Executor<'c, Database = Postgres>,
    {
        sqlx::query("UPDATE wallets SET last_synced_at = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(synced_at)
            .execute(connection)
            .await?;

        Ok(())
    }

    /// Count total wallets
    pub async fn count<'c, E>(connection: E) -> Result<i64, sqlx::Error>
    where
        E: Executor<'c, Database = Postgres>,
    {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM wallets")
            .fetch_one(connection)
            .await?;

        Ok(count)
    }

    pub async fn count_active<'c, E>(connection: E) -> Result<i64, sqlx::Error>
    where
        E: Executor<'c, Database = Postgres>,
    {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM wallets WHERE is_active")
            .fetch_one(connection)
            .await?;

        Ok(count)
    }
}
