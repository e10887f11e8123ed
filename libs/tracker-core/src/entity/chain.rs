use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// EVM chains tracked by the portfolio
#[derive(sqlx::Type, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "graphql", derive(async_graphql::Enum))]
#[sqlx(type_name = "chain", rename_all = "SCREAMING_SNAKE_CASE", no_pg_array)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Chain {
    Ethereum,
    Polygon,
    Arbitrum,
    Base,
    Optimism,
    Bsc,
    Avalanche,
}

/// Native gas token of a chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeToken {
    pub symbol: &'static str,
    pub name: &'static str,
    pub decimals: i32,
}

impl Chain {
    pub const ALL: [Chain; 7] = [
        Chain::Ethereum,
        Chain::Polygon,
        Chain::Arbitrum,
        Chain::Base,
        Chain::Optimism,
        Chain::Bsc,
        Chain::Avalanche,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Chain::Ethereum => "ETHEREUM",
            Chain::Polygon => "POLYGON",
            Chain::Arbitrum => "ARBITRUM",
            Chain::Base => "BASE",
            Chain::Optimism => "OPTIMISM",
            Chain::Bsc => "BSC",
            Chain::Avalanche => "AVALANCHE",
        }
    }

    /// Short badge label shown next to wallets in the dashboard
    pub fn label(&self) -> &'static str {
        match self {
            Chain::Ethereum => "ETH",
            Chain::Polygon => "MATIC",
            Chain::Arbitrum => "ARB",
            Chain::Base => "BASE",
            Chain::Optimism => "OP",
            Chain::Bsc => "BSC",
            Chain::Avalanche => "AVAX",
        }
    }

    pub fn native_token(&self) -> NativeToken {
        let (symbol, name) = match self {
            Chain::Ethereum | Chain::Arbitrum | Chain::Base | Chain::Optimism => ("ETH", "Ethereum"),
            Chain::Polygon => ("MATIC", "Polygon"),
            Chain::Bsc => ("BNB", "BNB"),
            Chain::Avalanche => ("AVAX", "Avalanche"),
        };

        NativeToken {
            symbol,
            name,
            decimals: 18,
        }
    }
}

impl sqlx::postgres::PgHasArrayType for Chain {
    fn array_type_info() -> sqlx::postgres::PgTypeInfo {
        sqlx::postgres::PgTypeInfo::with_name("_chain")
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownChain(pub String);

impl fmt::Display for UnknownChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown chain `{}`", self.0)
    }
}

impl std::error::Error for UnknownChain {}

impl FromStr for Chain {
    type Err = UnknownChain;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Chain::ALL
            .into_iter()
            .find(|chain| chain.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownChain(s.to_string()))
    }
}
