use async_graphql::{Object, ID};
use chrono::{DateTime, Utc};
use tracker_core::format::{format_address, DEFAULT_ADDRESS_CHARS};

use crate::schema::types::{
    Chain, Currency, DeFiPosition, Portfolio, PortfolioSnapshot, TimeInterval, Token, TokenPrice,
    TransactionConnection, Wallet, WalletConnection,
};

/// Root query object for GraphQL
pub struct Query;

#[Object]
impl Query {
    /// Wallet tracked at `address` on `chain`
    async fn wallet(&self, address: String, chain: Chain) -> Option<Wallet> {
        tracing::debug!(
            address = %format_address(&address, DEFAULT_ADDRESS_CHARS),
            %chain,
            "wallet requested"
        );
        Some(Wallet::placeholder())
    }

    /// Tracked wallets, optionally restricted to some chains
    async fn wallets(
        &self,
        chains: Option<Vec<Chain>>,
        limit: Option<i32>,
        offset: Option<i32>,
    ) -> WalletConnection {
        tracing::debug!(?chains, ?limit, ?offset, "wallets requested");
        WalletConnection::empty()
    }

    /// Aggregated value of the given wallets
    async fn portfolio(&self, wallet_addresses: Vec<String>) -> Portfolio {
        tracing::debug!(wallets = wallet_addresses.len(), "portfolio requested");
        Portfolio::empty()
    }

    async fn portfolio_history(
        &self,
        wallet_addresses: Vec<String>,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        interval: TimeInterval,
    ) -> Vec<PortfolioSnapshot> {
        tracing::debug!(
            wallets = wallet_addresses.len(),
            %from,
            %to,
            interval_secs = interval.as_secs(),
            "portfolio history requested"
        );
        Vec::new()
    }

    async fn token(&self, id: ID) -> Option<Token> {
        tracing::debug!(id = %id.as_str(), "token requested");
        None
    }

    /// Known tokens, matched case-insensitively on symbol or name
    async fn tokens(
        &self,
        chain: Option<Chain>,
        search: Option<String>,
        limit: Option<i32>,
    ) -> Vec<Token> {
        tracing::debug!(?chain, ?search, ?limit, "tokens requested");
        Vec::new()
    }

    async fn token_price(&self, token_id: ID, currency: Option<Currency>) -> Option<TokenPrice> {
        tracing::debug!(token_id = %token_id.as_str(), ?currency, "token price requested");
        None
    }

    async fn token_price_history(
        &self,
        token_id: ID,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        interval: TimeInterval,
    ) -> Vec<TokenPrice> {
        tracing::debug!(
            token_id = %token_id.as_str(),
            %from,
            %to,
            interval_secs = interval.as_secs(),
            "token price history requested"
        );
        Vec::new()
    }

    async fn transactions(
        &self,
        wallet_address: String,
        chain: Chain,
        limit: Option<i32>,
        offset: Option<i32>,
    ) -> TransactionConnection {
        tracing::debug!(
            address = %format_address(&wallet_address, DEFAULT_ADDRESS_CHARS),
            %chain,
            ?limit,
            ?offset,
            "transactions requested"
        );
        TransactionConnection::empty()
    }

    async fn defi_positions(&self, wallet_address: String) -> Vec<DeFiPosition> {
        tracing::debug!(
            address = %format_address(&wallet_address, DEFAULT_ADDRESS_CHARS),
            "defi positions requested"
        );
        Vec::new()
    }
}
