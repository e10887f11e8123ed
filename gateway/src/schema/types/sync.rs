use async_graphql::SimpleObject;

use crate::schema::scalars::BigInt;

#[derive(SimpleObject, Debug, Clone, PartialEq, Eq)]
pub struct SyncResult {
    pub success: bool,
    pub message: Option<String>,
    pub transactions_synced: Option<i32>,
    pub last_synced_block: Option<BigInt>,
}

impl SyncResult {
    pub fn started() -> Self {
        Self {
            success: true,
            message: Some("Sync started".to_string()),
            transactions_synced: Some(0),
            last_synced_block: Some(BigInt::ZERO),
        }
    }
}

#[derive(SimpleObject, Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSyncResult {
    pub total_wallets: i32,
    pub success_count: i32,
    pub failure_count: i32,
    pub results: Vec<SyncResult>,
}

impl BatchSyncResult {
    pub fn from_results(total_wallets: i32, results: Vec<SyncResult>) -> Self {
        let success_count = results.iter().filter(|r| r.success).count() as i32;
        Self {
            total_wallets,
            success_count,
            failure_count: results.len() as i32 - success_count,
            results,
        }
    }
}
