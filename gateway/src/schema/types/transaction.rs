use async_graphql::{Json, SimpleObject, Union, ID};
use chrono::{DateTime, Utc};
use tracker_core::domain::TransactionWithDetails;

use super::{
    common::{Chain, PageInfo, TransactionStatus, TransactionType},
    token::Token,
};
use crate::{error::ConversionError, schema::scalars::BigInt};

#[derive(SimpleObject, Debug, Clone)]
pub struct Transaction {
    pub id: ID,
    pub hash: String,
    pub chain: Chain,
    pub block_number: BigInt,
    pub timestamp: DateTime<Utc>,
    pub from: String,
    pub to: String,
    pub value: String,
    pub gas_used: String,
    pub gas_price: String,
    #[graphql(name = "gasFeeUSD")]
    pub gas_fee_usd: f64,
    pub status: TransactionStatus,
    #[graphql(name = "type")]
    pub tx_type: TransactionType,
    pub token: Option<Token>,
    pub token_transfers: Vec<TokenTransfer>,
    pub nft_transfers: Vec<NftTransfer>,
}

impl TryFrom<TransactionWithDetails> for Transaction {
    type Error = ConversionError;

    fn try_from(details: TransactionWithDetails) -> Result<Self, Self::Error> {
        let tx = details.transaction;
        let block_number = u64::try_from(tx.block_number)
            .map_err(|_| ConversionError::NegativeBlockNumber(tx.id, tx.block_number))?;
        let tx_type = tx
            .tx_type
            .ok_or(ConversionError::MissingTransactionType(tx.id))?;

        Ok(Self {
            id: ID(tx.id.to_string()),
            hash: tx.hash,
            chain: tx.chain,
            block_number: BigInt::from(block_number),
            timestamp: tx.time,
            from: tx.from_address,
            to: tx.to_address,
            value: tx.amount.to_string(),
            gas_used: "0".to_string(),
            gas_price: "0".to_string(),
            gas_fee_usd: details.gas_fee_usd,
            status: tx.status,
            tx_type,
            token: details.token.map(Token::from),
            token_transfers: Vec::new(),
            nft_transfers: Vec::new(),
        })
    }
}

#[derive(SimpleObject, Debug, Clone)]
pub struct TransactionEdge {
    pub node: Transaction,
    pub cursor: String,
}

#[derive(SimpleObject, Debug, Clone, Default)]
pub struct TransactionConnection {
    pub edges: Vec<TransactionEdge>,
    pub page_info: PageInfo,
    pub total_count: i32,
}

impl TransactionConnection {
    pub fn empty() -> Self {
        Self::default()
    }
}

#[derive(SimpleObject, Debug, Clone)]
pub struct TokenTransfer {
    pub token: Token,
    pub from: String,
    pub to: String,
    pub amount: String,
    pub amount_formatted: f64,
    #[graphql(name = "valueUSD")]
    pub value_usd: f64,
}

#[derive(SimpleObject, Debug, Clone)]
#[graphql(name = "NFTCollection")]
pub struct NftCollection {
    pub address: String,
    pub name: String,
    pub symbol: Option<String>,
    pub chain: Chain,
}

#[derive(SimpleObject, Debug, Clone)]
#[graphql(name = "NFT")]
pub struct Nft {
    pub id: ID,
    pub token_id: String,
    pub collection: NftCollection,
    pub name: Option<String>,
    pub image_url: Option<String>,
    pub traits: Option<Json<serde_json::Value>>,
}

#[derive(SimpleObject, Debug, Clone)]
#[graphql(name = "NFTTransfer")]
pub struct NftTransfer {
    pub collection: NftCollection,
    pub token_id: String,
    pub from: String,
    pub to: String,
}

/// Activity pushed to wallet subscribers
#[derive(Union, Debug, Clone)]
pub enum WalletEvent {
    Transaction(Transaction),
    TokenTransfer(TokenTransfer),
    NftTransfer(NftTransfer),
}
