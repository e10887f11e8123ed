use async_graphql::{Json, SimpleObject, ID};
use chrono::{DateTime, Utc};

use tracker_core::domain;

use super::{common::Chain, token::Token, wallet::Wallet};
use crate::error::ConversionError;

#[derive(SimpleObject, Debug, Clone)]
pub struct Portfolio {
    pub wallets: Vec<Wallet>,
    #[graphql(name = "totalValueUSD")]
    pub total_value_usd: f64,
    #[graphql(name = "totalValueChange24h")]
    pub total_value_change24h: f64,
    #[graphql(name = "totalValueChange24hPercent")]
    pub total_value_change24h_percent: f64,
    pub chain_breakdown: Vec<ChainBreakdown>,
    pub token_breakdown: Vec<TokenBreakdown>,
    pub performance_metrics: PerformanceMetrics,
}

impl Portfolio {
    /// Zero totals with empty breakdowns
    pub fn empty() -> Self {
        Self {
            wallets: Vec::new(),
            total_value_usd: 0.0,
            total_value_change24h: 0.0,
            total_value_change24h_percent: 0.0,
            chain_breakdown: Vec::new(),
            token_breakdown: Vec::new(),
            performance_metrics: PerformanceMetrics::default(),
        }
    }
}

#[derive(SimpleObject, Debug, Clone)]
pub struct ChainBreakdown {
    pub chain: Chain,
    #[graphql(name = "valueUSD")]
    pub value_usd: f64,
    pub percentage: f64,
}

#[derive(SimpleObject, Debug, Clone)]
pub struct TokenBreakdown {
    pub token: Token,
    pub total_balance: String,
    #[graphql(name = "totalValueUSD")]
    pub total_value_usd: f64,
    pub percentage: f64,
    #[graphql(name = "valueChange24h")]
    pub value_change24h: f64,
}

#[derive(SimpleObject, Debug, Clone, Default)]
pub struct PerformanceMetrics {
    pub total_return: f64,
    pub total_return_percent: f64,
    pub best_performer: Option<TokenBreakdown>,
    pub worst_performer: Option<TokenBreakdown>,
}

#[derive(SimpleObject, Debug, Clone)]
pub struct PortfolioSnapshot {
    pub timestamp: DateTime<Utc>,
    #[graphql(name = "totalValueUSD")]
    pub total_value_usd: f64,
    pub wallet_snapshots: Vec<WalletSnapshot>,
}

impl TryFrom<domain::PortfolioSnapshot> for PortfolioSnapshot {
    type Error = ConversionError;

    fn try_from(snapshot: domain::PortfolioSnapshot) -> Result<Self, Self::Error> {
        let wallet_snapshots = snapshot
            .wallets
            .iter()
            .map(WalletSnapshot::try_from)
            .collect::<Result<_, _>>()?;

        Ok(Self {
            timestamp: snapshot.timestamp,
            total_value_usd: snapshot.total_value_usd,
            wallet_snapshots,
        })
    }
}

#[derive(SimpleObject, Debug, Clone)]
pub struct WalletSnapshot {
    pub wallet_id: ID,
    #[graphql(name = "valueUSD")]
    pub value_usd: f64,
    /// Balances keyed by token id
    pub token_balances: Json<serde_json::Value>,
}

impl TryFrom<&domain::WalletSnapshot> for WalletSnapshot {
    type Error = ConversionError;

    fn try_from(snapshot: &domain::WalletSnapshot) -> Result<Self, Self::Error> {
        Ok(Self {
            wallet_id: ID(snapshot.wallet_id.to_string()),
            value_usd: snapshot.value_usd,
            token_balances: Json(serde_json::to_value(&snapshot.token_balances)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use tracker_core::domain::{TokenBalance, WalletWithBalance};
    use uuid::Uuid;

    use super::*;

    fn usdc() -> tracker_core::Token {
        tracker_core::Token {
            id: Uuid::new_v4(),
            symbol: "USDC".to_string(),
            name: "USD Coin".to_string(),
            contract_address: Some("0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48".to_string()),
            chain: Chain::Ethereum,
            decimals: 6,
            logo_url: None,
            coingecko_id: Some("usd-coin".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn wallet() -> tracker_core::Wallet {
        tracker_core::Wallet {
            id: Uuid::new_v4(),
            address: "0xd2674dA94285660c9b2353131bef2d8211369A4B".to_string(),
            chain: Chain::Ethereum,
            label: Some("Main".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            last_synced_at: None,
            is_active: true,
        }
    }

    #[test]
    fn snapshot_keeps_balances_by_token_id() {
        let token = usdc();
        let token_id = token.id.to_string();
        let wallet = WalletWithBalance::new(wallet(), vec![TokenBalance::new(token, "5000000", 1.0)]);
        let wallet_id = wallet.wallet.id;
        let stored = domain::PortfolioSnapshot::new(
            Utc::now(),
            vec![domain::WalletSnapshot::from(&wallet)],
        );

        let snapshot = PortfolioSnapshot::try_from(stored).unwrap();

        assert_eq!(snapshot.total_value_usd, 5.0);
        assert_eq!(snapshot.wallet_snapshots.len(), 1);

        let wallet_snapshot = &snapshot.wallet_snapshots[0];
        assert_eq!(wallet_snapshot.wallet_id, ID(wallet_id.to_string()));
        assert_eq!(wallet_snapshot.value_usd, 5.0);

        let balance = &wallet_snapshot.token_balances.0[token_id.as_str()];
        assert_eq!(balance["balance"], "5000000");
        assert_eq!(balance["balanceFormatted"], 5.0);
        assert_eq!(balance["token"]["symbol"], "USDC");
    }
}
