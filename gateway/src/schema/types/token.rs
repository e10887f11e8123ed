use async_graphql::{ComplexObject, SimpleObject, ID};
use chrono::{DateTime, Utc};

use super::common::{Chain, PriceSource, TimeInterval};

#[derive(SimpleObject, Debug, Clone)]
#[graphql(complex)]
pub struct Token {
    pub id: ID,
    pub symbol: String,
    pub name: String,
    pub contract_address: Option<String>,
    pub chain: Chain,
    pub decimals: i32,
    pub logo_url: Option<String>,
    pub coingecko_id: Option<String>,
    pub current_price: Option<TokenPrice>,
    #[graphql(name = "priceChange24h")]
    pub price_change24h: Option<f64>,
    pub market_cap: Option<f64>,
    #[graphql(name = "volume24h")]
    pub volume24h: Option<f64>,
}

#[ComplexObject]
impl Token {
    async fn price_history(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        interval: TimeInterval,
    ) -> Vec<TokenPrice> {
        tracing::debug!(token = %self.symbol, %from, %to, ?interval, "token price history requested");
        Vec::new()
    }
}

impl Token {
    /// The chain's gas token, which has no contract address
    pub fn native(chain: Chain) -> Self {
        let native = chain.native_token();
        Self {
            id: ID(format!("{}:native", chain)),
            symbol: native.symbol.to_string(),
            name: native.name.to_string(),
            contract_address: None,
            chain,
            decimals: native.decimals,
            logo_url: None,
            coingecko_id: None,
            current_price: None,
            price_change24h: None,
            market_cap: None,
            volume24h: None,
        }
    }
}

impl From<tracker_core::Token> for Token {
    fn from(token: tracker_core::Token) -> Self {
        Self {
            id: ID(token.id.to_string()),
            symbol: token.symbol,
            name: token.name,
            contract_address: token.contract_address,
            chain: token.chain,
            decimals: token.decimals,
            logo_url: token.logo_url,
            coingecko_id: token.coingecko_id,
            current_price: None,
            price_change24h: None,
            market_cap: None,
            volume24h: None,
        }
    }
}

#[derive(SimpleObject, Debug, Clone)]
pub struct TokenPrice {
    pub token_id: ID,
    #[graphql(name = "priceUSD")]
    pub price_usd: f64,
    #[graphql(name = "priceBTC")]
    pub price_btc: Option<f64>,
    #[graphql(name = "priceETH")]
    pub price_eth: Option<f64>,
    pub timestamp: DateTime<Utc>,
    pub source: PriceSource,
}

#[derive(SimpleObject, Debug, Clone)]
pub struct TokenBalance {
    pub token: Token,
    pub balance: String,
    pub balance_formatted: f64,
    #[graphql(name = "valueUSD")]
    pub value_usd: f64,
    #[graphql(name = "valueChange24h")]
    pub value_change24h: f64,
}

impl TokenBalance {
    pub fn zero(token: Token) -> Self {
        Self {
            token,
            balance: "0".to_string(),
            balance_formatted: 0.0,
            value_usd: 0.0,
            value_change24h: 0.0,
        }
    }
}

impl From<tracker_core::domain::TokenBalance> for TokenBalance {
    fn from(balance: tracker_core::domain::TokenBalance) -> Self {
        Self {
            token: balance.token.into(),
            balance: balance.balance,
            balance_formatted: balance.balance_formatted,
            value_usd: balance.value_usd,
            value_change24h: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn usdt() -> tracker_core::Token {
        tracker_core::Token {
            id: Uuid::new_v4(),
            symbol: "USDT".to_string(),
            name: "Tether USD".to_string(),
            contract_address: Some("0xdac17f958d2ee523a2206206994597c13d831ec7".to_string()),
            chain: Chain::Ethereum,
            decimals: 6,
            logo_url: Some("https://example.com/usdt.png".to_string()),
            coingecko_id: Some("tether".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn maps_stored_token_without_market_data() {
        let stored = usdt();
        let id = stored.id;

        let token = Token::from(stored);

        assert_eq!(token.id, ID(id.to_string()));
        assert_eq!(token.symbol, "USDT");
        assert_eq!(token.name, "Tether USD");
        assert_eq!(
            token.contract_address.as_deref(),
            Some("0xdac17f958d2ee523a2206206994597c13d831ec7")
        );
        assert_eq!(token.decimals, 6);
        assert_eq!(token.coingecko_id.as_deref(), Some("tether"));
        assert!(token.current_price.is_none());
        assert!(token.market_cap.is_none());
    }

    #[test]
    fn maps_balance_with_value() {
        let stored = tracker_core::domain::TokenBalance::new(usdt(), "12500000", 1.0);

        let balance = TokenBalance::from(stored);

        assert_eq!(balance.token.symbol, "USDT");
        assert_eq!(balance.balance, "12500000");
        assert_eq!(balance.balance_formatted, 12.5);
        assert_eq!(balance.value_usd, 12.5);
        assert_eq!(balance.value_change24h, 0.0);
    }

    #[test]
    fn native_token_has_no_contract() {
        let token = Token::native(Chain::Avalanche);

        assert_eq!(token.id, ID("AVALANCHE:native".to_string()));
        assert_eq!(token.symbol, "AVAX");
        assert_eq!(token.decimals, 18);
        assert!(token.contract_address.is_none());
    }
}
