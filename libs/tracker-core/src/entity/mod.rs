pub mod chain;
pub mod token;
pub mod transaction;
pub mod wallet;

// Re-exports for convenience
pub use chain::{Chain, NativeToken, UnknownChain};
pub use token::{NewToken, Token};
pub use transaction::{NewTransaction, Transaction, TransactionStatus, TransactionType};
pub use wallet::{NewWallet, Wallet, WalletChanges};
