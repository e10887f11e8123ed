pub mod common;
pub mod defi;
pub mod portfolio;
pub mod sync;
pub mod token;
pub mod transaction;
pub mod wallet;

pub use common::{
    Chain, Currency, PageInfo, PriceSource, TimeInterval, TransactionStatus, TransactionType,
};
pub use defi::{DeFiPosition, DeFiPositionType, DeFiProtocol, DeFiTokenAmount};
pub use portfolio::{
    ChainBreakdown, PerformanceMetrics, Portfolio, PortfolioSnapshot, TokenBreakdown,
    WalletSnapshot,
};
pub use sync::{BatchSyncResult, SyncResult};
pub use token::{Token, TokenBalance, TokenPrice};
pub use transaction::{
    Nft, NftCollection, NftTransfer, TokenTransfer, Transaction, TransactionConnection,
    TransactionEdge, WalletEvent,
};
pub use wallet::{
    AddWalletInput, UpdateWalletInput, Wallet, WalletBalance, WalletConnection, WalletEdge,
};
