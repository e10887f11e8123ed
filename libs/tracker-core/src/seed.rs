//! Fixed sample rows for local development databases.

use sqlx::{
    types::{chrono::Utc, BigDecimal},
    Pool, Postgres,
};

use crate::entity::{
    Chain, NewToken, NewTransaction, NewWallet, Token, Transaction, TransactionStatus,
    TransactionType, Wallet,
};

/// Public address with recent mainnet activity, handy for manual testing
pub const TEST_WALLET_ADDRESS: &str = "0xd2674dA94285660c9b2353131bef2d8211369A4B";
pub const TEST_WALLET_LABEL: &str = "Real Test Wallet";
pub const TEST_TRANSACTION_HASH: &str = "0x_test_transaction_hash";
pub const TEST_TRANSACTION_BLOCK: i64 = 100;

/// Rows written by one seeding pass
#[derive(Debug)]
pub struct SeedReport {
    pub tokens: Vec<Token>,
    pub wallet: Wallet,
    pub transaction: Transaction,
}

pub fn seed_tokens() -> Vec<NewToken> {
    let token = |symbol: &str, name: &str, address: &str, decimals: i32, coingecko: &str| NewToken {
        symbol: symbol.to_string(),
        name: name.to_string(),
        contract_address: Some(address.to_string()),
        chain: Chain::Ethereum,
        decimals,
        logo_url: None,
        coingecko_id: Some(coingecko.to_string()),
    };

    vec![
        token(
            "ETH",
            "Ethereum",
            "0x0000000000000000000000000000000000000000",
            18,
            "ethereum",
        ),
        token(
            "USDC",
            "USD Coin",
            "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48",
            6,
            "usd-coin",
        ),
        token(
            "USDT",
            "Tether",
            "0xdAC17F958D2ee523a2206206994597C13D831ec7",
            6,
            "tether",
        ),
    ]
}

pub fn seed_wallet() -> NewWallet {
    NewWallet {
        address: TEST_WALLET_ADDRESS.to_string(),
        chain: Chain::Ethereum,
        label: Some(TEST_WALLET_LABEL.to_string()),
        is_active: true,
    }
}

/// Insert the sample tokens, wallet and one confirmed 1 ETH transfer.
/// Safe to run repeatedly: every insert is an upsert.
pub async fn run(pool: &Pool<Postgres>) -> Result<SeedReport, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let mut tokens = Vec::new();
    for token in seed_tokens() {
        tokens.push(Token::upsert(&token, &mut *tx).await?);
    }
    tracing::info!(count = tokens.len(), "seeded tokens");

    let wallet = Wallet::create(&seed_wallet(), &mut *tx).await?;
    tracing::info!(address = %wallet.address, "created/updated test wallet");

    let transfer = NewTransaction {
        time: Utc::now(),
        wallet_id: wallet.id,
        hash: TEST_TRANSACTION_HASH.to_string(),
        chain: Chain::Ethereum,
        from_address: "0x_from".to_string(),
        to_address: "0x_to".to_string(),
        token_id: None,
        // 1 ETH in wei
        amount: BigDecimal::from(1_000_000_000_000_000_000i64),
        gas_fee: None,
        block_number: TEST_TRANSACTION_BLOCK,
        status: TransactionStatus::Confirmed,
        tx_type: Some(TransactionType::Transfer),
    };
    let transaction = Transaction::upsert(&transfer, &mut *tx).await?;
    tracing::info!(hash = %transaction.hash, "seeded test transaction");

    tx.commit().await?;

    Ok(SeedReport {
        tokens,
        wallet,
        transaction,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_tokens_are_unique_per_contract() {
        let tokens = seed_tokens();
        assert_eq!(tokens.len(), 3);

        let mut contracts: Vec<_> = tokens.iter().map(|t| t.contract_address.clone()).collect();
        contracts.dedup();
        assert_eq!(contracts.len(), 3);
        assert!(tokens.iter().all(|t| t.chain == Chain::Ethereum));
    }

    #[test]
    fn stablecoins_use_six_decimals() {
        for token in seed_tokens().iter().filter(|t| t.symbol.starts_with("USD")) {
            assert_eq!(token.decimals, 6);
        }
    }

    #[test]
    fn seed_wallet_is_active_and_labelled() {
        let wallet = seed_wallet();
        assert!(wallet.is_active);
        assert_eq!(wallet.label.as_deref(), Some(TEST_WALLET_LABEL));
    }
}
