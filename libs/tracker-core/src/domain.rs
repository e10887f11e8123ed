//! Read models assembled from entity rows for portfolio views.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    entity::{Token, Transaction, Wallet},
    format::to_token_units,
};

/// Holding of one token, with the raw balance kept as a decimal string
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalance {
    pub token: Token,
    pub balance: String,
    pub balance_formatted: f64,
    #[serde(rename = "valueUSD")]
    pub value_usd: f64,
}

impl TokenBalance {
    /// Scale `balance` by the token's decimals and value it at `price_usd`.
    /// A balance that does not parse counts as zero.
    pub fn new(token: Token, balance: impl Into<String>, price_usd: f64) -> Self {
        let balance = balance.into();
        let decimals = u32::try_from(token.decimals).unwrap_or(0);
        let balance_formatted = to_token_units(&balance, decimals).unwrap_or(0.0);

        Self {
            token,
            balance,
            balance_formatted,
            value_usd: balance_formatted * price_usd,
        }
    }
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WalletWithBalance {
    #[serde(flatten)]
    pub wallet: Wallet,
    #[serde(rename = "totalValueUSD")]
    pub total_value_usd: f64,
    pub tokens: Vec<TokenBalance>,
}

impl WalletWithBalance {
    pub fn new(wallet: Wallet, tokens: Vec<TokenBalance>) -> Self {
        let total_value_usd = tokens.iter().map(|t| t.value_usd).sum();
        Self {
            wallet,
            total_value_usd,
            tokens,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TransactionWithDetails {
    pub transaction: Transaction,
    pub token: Option<Token>,
    pub gas_fee_usd: f64,
}

/// Value of one wallet at a point in time, balances keyed by token id
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WalletSnapshot {
    pub wallet_id: Uuid,
    #[serde(rename = "valueUSD")]
    pub value_usd: f64,
    pub token_balances: BTreeMap<String, TokenBalance>,
}

impl From<&WalletWithBalance> for WalletSnapshot {
    fn from(wallet: &WalletWithBalance) -> Self {
        let token_balances = wallet
            .tokens
            .iter()
            .map(|balance| (balance.token.id.to_string(), balance.clone()))
            .collect();

        Self {
            wallet_id: wallet.wallet.id,
            value_usd: wallet.total_value_usd,
            token_balances,
        }
    }
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSnapshot {
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "totalValueUSD")]
    pub total_value_usd: f64,
    pub wallets: Vec<WalletSnapshot>,
}

impl PortfolioSnapshot {
    pub fn new(timestamp: DateTime<Utc>, wallets: Vec<WalletSnapshot>) -> Self {
        let total_value_usd = wallets.iter().map(|w| w.value_usd).sum();
        Self {
            timestamp,
            total_value_usd,
            wallets,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Chain;

    fn token(symbol: &str, decimals: i32) -> Token {
        Token {
            id: Uuid::new_v4(),
            symbol: symbol.to_string(),
            name: symbol.to_string(),
            contract_address: None,
            chain: Chain::Ethereum,
            decimals,
            logo_url: None,
            coingecko_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn wallet() -> Wallet {
        Wallet {
            id: Uuid::new_v4(),
            address: "0xd2674dA94285660c9b2353131bef2d8211369A4B".to_string(),
            chain: Chain::Ethereum,
            label: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            last_synced_at: None,
            is_active: true,
        }
    }

    #[test]
    fn token_balance_scales_by_decimals() {
        let balance = TokenBalance::new(token("USDC", 6), "2500000", 1.0);
        assert_eq!(balance.balance_formatted, 2.5);
        assert_eq!(balance.value_usd, 2.5);

        let junk = TokenBalance::new(token("ETH", 18), "oops", 3000.0);
        assert_eq!(junk.value_usd, 0.0);
    }

    #[test]
    fn wallet_and_portfolio_totals_add_up() {
        let balances = vec![
            TokenBalance::new(token("ETH", 18), "2000000000000000000", 1500.0),
            TokenBalance::new(token("USDC", 6), "250000000", 1.0),
        ];
        let wallet = WalletWithBalance::new(wallet(), balances);
        assert_eq!(wallet.total_value_usd, 3250.0);

        let snapshot = WalletSnapshot::from(&wallet);
        assert_eq!(snapshot.token_balances.len(), 2);

        let portfolio = PortfolioSnapshot::new(Utc::now(), vec![snapshot.clone(), snapshot]);
        assert_eq!(portfolio.total_value_usd, 6500.0);
    }

    #[test]
    fn serializes_with_schema_field_names() {
        let wallet = WalletWithBalance::new(wallet(), Vec::new());
        let json = serde_json::to_value(&wallet).unwrap();

        assert_eq!(json["totalValueUSD"], 0.0);
        assert_eq!(json["chain"], "ETHEREUM");
        assert_eq!(json["isActive"], true);
    }
}
