use async_graphql::{ComplexObject, InputObject, SimpleObject, ID};
use chrono::{DateTime, Utc};

use super::{
    common::{Chain, PageInfo, PLACEHOLDER_ADDRESS, PLACEHOLDER_ID},
    token::{Token, TokenBalance},
    transaction::{Nft, TransactionConnection},
};

#[derive(SimpleObject, Debug, Clone)]
#[graphql(complex)]
pub struct Wallet {
    pub id: ID,
    pub address: String,
    pub chain: Chain,
    pub label: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_synced_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub balance: WalletBalance,
    pub tokens: Vec<TokenBalance>,
    pub nfts: Vec<Nft>,
    #[graphql(name = "totalValueUSD")]
    pub total_value_usd: f64,
}

#[ComplexObject]
impl Wallet {
    async fn transactions(&self, limit: Option<i32>, offset: Option<i32>) -> TransactionConnection {
        tracing::debug!(wallet = %self.id.as_str(), ?limit, ?offset, "wallet transactions requested");
        TransactionConnection::empty()
    }
}

impl Wallet {
    /// Fixed wallet returned until resolvers are backed by storage
    pub fn placeholder() -> Self {
        let now = Utc::now();
        let chain = Chain::Ethereum;

        Self {
            id: ID(PLACEHOLDER_ID.to_string()),
            address: PLACEHOLDER_ADDRESS.to_string(),
            chain,
            label: None,
            created_at: now,
            updated_at: now,
            last_synced_at: None,
            is_active: true,
            balance: WalletBalance::empty(chain),
            tokens: Vec::new(),
            nfts: Vec::new(),
            total_value_usd: 0.0,
        }
    }
}

impl From<tracker_core::domain::WalletWithBalance> for Wallet {
    fn from(value: tracker_core::domain::WalletWithBalance) -> Self {
        let wallet = value.wallet;
        let tokens: Vec<TokenBalance> = value.tokens.into_iter().map(TokenBalance::from).collect();

        Self {
            id: ID(wallet.id.to_string()),
            address: wallet.address,
            chain: wallet.chain,
            label: wallet.label,
            created_at: wallet.created_at,
            updated_at: wallet.updated_at,
            last_synced_at: wallet.last_synced_at,
            is_active: wallet.is_active,
            balance: WalletBalance {
                native: TokenBalance::zero(Token::native(wallet.chain)),
                tokens: tokens.clone(),
                total_value_usd: value.total_value_usd,
            },
            tokens,
            nfts: Vec::new(),
            total_value_usd: value.total_value_usd,
        }
    }
}

#[derive(SimpleObject, Debug, Clone)]
pub struct WalletBalance {
    pub native: TokenBalance,
    pub tokens: Vec<TokenBalance>,
    #[graphql(name = "totalValueUSD")]
    pub total_value_usd: f64,
}

impl WalletBalance {
    /// Zero native balance and no tokens
    pub fn empty(chain: Chain) -> Self {
        Self {
            native: TokenBalance::zero(Token::native(chain)),
            tokens: Vec::new(),
            total_value_usd: 0.0,
        }
    }
}

#[derive(SimpleObject, Debug, Clone)]
pub struct WalletEdge {
    pub node: Wallet,
    pub cursor: String,
}

#[derive(SimpleObject, Debug, Clone, Default)]
pub struct WalletConnection {
    pub edges: Vec<WalletEdge>,
    pub page_info: PageInfo,
    pub total_count: i32,
}

impl WalletConnection {
    pub fn empty() -> Self {
        Self::default()
    }
}

#[derive(InputObject, Debug, Clone)]
pub struct AddWalletInput {
    pub address: String,
    pub chain: Chain,
    pub label: Option<String>,
}

#[derive(InputObject, Debug, Clone, Default)]
pub struct UpdateWalletInput {
    pub label: Option<String>,
    pub is_active: Option<bool>,
}
