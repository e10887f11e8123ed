use async_graphql::{Error, Result, Subscription as SubscriptionObject, ID};
use futures_util::stream::BoxStream;

use crate::schema::types::{Chain, Portfolio, TokenPrice, WalletEvent};

pub const NOT_IMPLEMENTED: &str = "Subscriptions not implemented yet";

/// Root subscription object. No live feed exists yet, so every field fails
/// when subscribed.
pub struct Subscription;

#[SubscriptionObject]
impl Subscription {
    async fn price_updates(&self, token_ids: Vec<ID>) -> Result<BoxStream<'static, TokenPrice>> {
        tracing::debug!(tokens = token_ids.len(), "price updates subscription rejected");
        Err(Error::new(NOT_IMPLEMENTED))
    }

    async fn wallet_activity(
        &self,
        address: String,
        chain: Chain,
    ) -> Result<BoxStream<'static, WalletEvent>> {
        tracing::debug!(%address, %chain, "wallet activity subscription rejected");
        Err(Error::new(NOT_IMPLEMENTED))
    }

    async fn portfolio_value_changed(
        &self,
        wallet_addresses: Vec<String>,
    ) -> Result<BoxStream<'static, Portfolio>> {
        tracing::debug!(
            wallets = wallet_addresses.len(),
            "portfolio subscription rejected"
        );
        Err(Error::new(NOT_IMPLEMENTED))
    }
}
