use async_graphql::{Enum, SimpleObject};

pub use tracker_core::{Chain, TransactionStatus, TransactionType};

/// Id used by every placeholder object
pub const PLACEHOLDER_ID: &str = "1";
pub const PLACEHOLDER_ADDRESS: &str = "0x...";

#[derive(SimpleObject, Debug, Clone, Default, PartialEq, Eq)]
pub struct PageInfo {
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
}

#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
    Btc,
    Eth,
}

#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceSource {
    Coingecko,
    Chainlink,
    Uniswap,
    Aggregate,
}

/// Bucket width for historical series
#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeInterval {
    #[graphql(name = "MINUTE_5")]
    Minute5,
    #[graphql(name = "MINUTE_15")]
    Minute15,
    #[graphql(name = "HOUR_1")]
    Hour1,
    #[graphql(name = "HOUR_4")]
    Hour4,
    #[graphql(name = "DAY_1")]
    Day1,
    #[graphql(name = "WEEK_1")]
    Week1,
    #[graphql(name = "MONTH_1")]
    Month1,
}

impl TimeInterval {
    pub fn as_secs(&self) -> u64 {
        match self {
            TimeInterval::Minute5 => 5 * 60,
            TimeInterval::Minute15 => 15 * 60,
            TimeInterval::Hour1 => 60 * 60,
            TimeInterval::Hour4 => 4 * 60 * 60,
            TimeInterval::Day1 => 24 * 60 * 60,
            TimeInterval::Week1 => 7 * 24 * 60 * 60,
            TimeInterval::Month1 => 30 * 24 * 60 * 60,
        }
    }
}
