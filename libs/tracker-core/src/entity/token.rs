use serde::Serialize;
use sqlx::{
    types::{
        chrono::{DateTime, Utc},
        Uuid,
    },
    Executor, Postgres,
};

use super::Chain;

/// Token metadata; native tokens have no contract address
#[derive(sqlx::FromRow, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub id: Uuid,
    pub symbol: String,
    pub name: String,
    pub contract_address: Option<String>,
    pub chain: Chain,
    pub decimals: i32,
    pub logo_url: Option<String>,
    pub coingecko_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new token
#[derive(Debug, Clone)]
pub struct NewToken {
    pub symbol: String,
    pub name: String,
    pub contract_address: Option<String>,
    pub chain: Chain,
    pub decimals: i32,
    pub logo_url: Option<String>,
    pub coingecko_id: Option<String>,
}

impl Token {
    /// Insert a token; an existing (contract_address, chain) row is returned as is
    pub async fn upsert<'c, E>(token: &NewToken, connection: E) -> Result<Token, sqlx::Error>
    where
        E: Executor<'c, Database = Postgres>,
    {
        // The no-op update makes RETURNING yield the existing row on conflict
        let query = r#"
            INSERT INTO tokens (symbol, name, contract_address, chain, decimals, logo_url, coingecko_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (contract_address, chain) DO UPDATE SET
                symbol = tokens.symbol
            RETURNING *
        "#;

        sqlx::query_as::<_, Token>(query)
            .bind(&token.symbol)
            .bind(&token.name)
            .bind(&token.contract_address)
            .bind(token.chain)
            .bind(token.decimals)
            .bind(&token.logo_url)
            .bind(&token.coingecko_id)
            .fetch_one(connection)
            .await
    }

    pub async fn find_by_id<'c, E>(id: Uuid, connection: E) -> Result<Option<Token>, sqlx::Error>
    where
        E: Executor<'c, Database = Postgres>,
    {
        sqlx::query_as::<_, Token>("SELECT * FROM tokens WHERE id = $1")
            .bind(id)
            .fetch_optional(connection)
            .await
    }

    /// Find token by contract address on a chain
    pub async fn find_by_contract<'c, E>(
        contract_address: &str,
        chain: Chain,
        connection: E,
    ) -> Result<Option<Token>, sqlx::Error>
    where
        E: Executor<'c, Database = Postgres>,
    {
        sqlx::query_as::<_, Token>(
            "SELECT * FROM tokens WHERE contract_address = $1 AND chain = $2",
        )
        .bind(contract_address)
        .bind(chain)
        .fetch_optional(connection)
        .await
    }

    /// Case-insensitive match on symbol or name, optionally restricted to one chain
    pub async fn search<'c, E>(
        chain: Option<Chain>,
        search: Option<&str>,
        limit: i64,
        connection: E,
    ) -> Result<Vec<Token>, sqlx::Error>
    where
        E: Executor<'c, Database = Postgres>,
    {
        let pattern = search.map(|s| format!("%{}%", s.trim()));

        sqlx::query_as::<_, Token>(
            r#"
            SELECT * FROM tokens
            WHERE ($1::chain IS NULL OR chain = $1)
              AND ($2::text IS NULL OR symbol ILIKE $2 OR name ILIKE $2)
            ORDER BY symbol ASC
            LIMIT $3
            "#,
        )
        .bind(chain)
        .bind(pattern)
        .bind(limit)
        .fetch_all(connection)
        .await
    }

    pub async fn count<'c, E>(connection: E) -> Result<i64, sqlx::Error>
    where
        E: Executor<'c, Database = Postgres>,
    {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tokens")
            .fetch_one(connection)
            .await?;

        Ok(count)
    }
}
