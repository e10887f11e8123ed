use async_graphql::{Enum, SimpleObject, ID};

use super::{token::Token, wallet::Wallet};

#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeFiProtocol {
    Aave,
    Compound,
    Uniswap,
    Curve,
    Morpho,
    Pendle,
}

#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeFiPositionType {
    Lending,
    Borrowing,
    LiquidityPool,
    Staking,
    YieldFarming,
}

#[derive(SimpleObject, Debug, Clone)]
pub struct DeFiTokenAmount {
    pub token: Token,
    pub amount: String,
    pub amount_formatted: f64,
    #[graphql(name = "valueUSD")]
    pub value_usd: f64,
}

/// Position held by a wallet in a lending, liquidity or staking protocol
#[derive(SimpleObject, Debug, Clone)]
pub struct DeFiPosition {
    pub id: ID,
    pub protocol: DeFiProtocol,
    #[graphql(name = "type")]
    pub position_type: DeFiPositionType,
    pub wallet: Wallet,
    pub supplied_tokens: Vec<DeFiTokenAmount>,
    pub borrowed_tokens: Vec<DeFiTokenAmount>,
    pub reward_tokens: Vec<DeFiTokenAmount>,
    #[graphql(name = "totalSuppliedUSD")]
    pub total_supplied_usd: f64,
    #[graphql(name = "totalBorrowedUSD")]
    pub total_borrowed_usd: f64,
    #[graphql(name = "totalRewardsUSD")]
    pub total_rewards_usd: f64,
    #[graphql(name = "netValueUSD")]
    pub net_value_usd: f64,
    pub apy: Option<f64>,
    pub health_factor: Option<f64>,
}
