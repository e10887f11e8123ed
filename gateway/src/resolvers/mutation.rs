use async_graphql::Object;
use tracker_core::format::{format_address, DEFAULT_ADDRESS_CHARS};

use crate::schema::types::{
    AddWalletInput, BatchSyncResult, Chain, SyncResult, UpdateWalletInput, Wallet,
};

/// Root mutation object for GraphQL
pub struct Mutation;

#[Object]
impl Mutation {
    /// Start tracking a wallet
    async fn add_wallet(&self, input: AddWalletInput) -> Wallet {
        tracing::info!(
            address = %format_address(&input.address, DEFAULT_ADDRESS_CHARS),
            chain = %input.chain,
            label = ?input.label,
            "add wallet"
        );
        Wallet::placeholder()
    }

    async fn update_wallet(
        &self,
        address: String,
        chain: Chain,
        input: UpdateWalletInput,
    ) -> Wallet {
        tracing::info!(
            address = %format_address(&address, DEFAULT_ADDRESS_CHARS),
            %chain,
            label = ?input.label,
            is_active = ?input.is_active,
            "update wallet"
        );
        Wallet::placeholder()
    }

    /// Stop tracking a wallet
    async fn remove_wallet(&self, address: String, chain: Chain) -> bool {
        tracing::info!(
            address = %format_address(&address, DEFAULT_ADDRESS_CHARS),
            %chain,
            "remove wallet"
        );
        true
    }

    /// Queue a balance and history sync for one wallet
    async fn sync_wallet(&self, address: String, chain: Chain) -> SyncResult {
        tracing::info!(
            address = %format_address(&address, DEFAULT_ADDRESS_CHARS),
            %chain,
            "sync wallet"
        );
        SyncResult::started()
    }

    async fn sync_all_wallets(&self) -> BatchSyncResult {
        tracing::info!("sync all wallets");
        BatchSyncResult::from_results(0, Vec::new())
    }
}
