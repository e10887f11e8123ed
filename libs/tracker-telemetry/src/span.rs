//! Span helpers carrying the `crypto.*` attributes.

use std::{fmt::Display, future::Future};

use tracing::{field::Empty, Instrument, Span};

use crate::constants::{
    ATTR_BLOCK_NUMBER, ATTR_TRANSACTION_HASH, ATTR_WALLET_ADDRESS, ATTR_WALLET_CHAIN,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CryptoSpanAttributes {
    pub wallet_address: Option<String>,
    pub chain: Option<String>,
    pub transaction_hash: Option<String>,
    pub block_number: Option<u64>,
}

impl CryptoSpanAttributes {
    pub fn wallet(address: impl Into<String>, chain: impl Into<String>) -> Self {
        Self {
            wallet_address: Some(address.into()),
            chain: Some(chain.into()),
            ..Self::default()
        }
    }

    pub fn with_transaction(mut self, hash: impl Into<String>, block_number: u64) -> Self {
        self.transaction_hash = Some(hash.into());
        self.block_number = Some(block_number);
        self
    }

    /// Set attributes keyed by their `crypto.*` names
    pub fn to_attributes(&self) -> Vec<(&'static str, String)> {
        let mut attributes = Vec::new();
        if let Some(address) = &self.wallet_address {
            attributes.push((ATTR_WALLET_ADDRESS, address.clone()));
        }
        if let Some(chain) = &self.chain {
            attributes.push((ATTR_WALLET_CHAIN, chain.clone()));
        }
        if let Some(hash) = &self.transaction_hash {
            attributes.push((ATTR_TRANSACTION_HASH, hash.clone()));
        }
        if let Some(block) = self.block_number {
            attributes.push((ATTR_BLOCK_NUMBER, block.to_string()));
        }
        attributes
    }
}

/// Open an info-level span for a tracker operation. The operation name goes
/// in `otel.name` since `tracing` span names are static.
pub fn crypto_span(name: &str, attributes: &CryptoSpanAttributes) -> Span {
    let span = tracing::info_span!(
        "crypto.operation",
        otel.name = %name,
        otel.status_code = Empty,
        error.message = Empty,
        crypto.wallet.address = Empty,
        crypto.wallet.chain = Empty,
        crypto.transaction.hash = Empty,
        crypto.block.number = Empty,
    );

    if let Some(address) = &attributes.wallet_address {
        span.record(ATTR_WALLET_ADDRESS, address.as_str());
    }
    if let Some(chain) = &attributes.chain {
        span.record(ATTR_WALLET_CHAIN, chain.as_str());
    }
    if let Some(hash) = &attributes.transaction_hash {
        span.record(ATTR_TRANSACTION_HASH, hash.as_str());
    }
    if let Some(block) = attributes.block_number {
        span.record(ATTR_BLOCK_NUMBER, block);
    }

    span
}

/// Run `future` inside a [`crypto_span`], marking the span `OK` or `ERROR`
pub async fn with_span<F, T, E>(
    name: &str,
    attributes: &CryptoSpanAttributes,
    future: F,
) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    let span = crypto_span(name, attributes);
    let result = future.instrument(span.clone()).await;
    record_outcome(&span, name, &result);
    result
}

/// Blocking counterpart of [`with_span`]
pub fn in_span<F, T, E>(name: &str, attributes: &CryptoSpanAttributes, f: F) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E>,
    E: Display,
{
    let span = crypto_span(name, attributes);
    let result = span.in_scope(f);
    record_outcome(&span, name, &result);
    result
}

fn record_outcome<T, E: Display>(span: &Span, name: &str, result: &Result<T, E>) {
    match result {
        Ok(_) => {
            span.record("otel.status_code", "OK");
        }
        Err(e) => {
            span.record("otel.status_code", "ERROR");
            span.record("error.message", tracing::field::display(e));
            tracing::error!(parent: span, error = %e, "{} failed", name);
        }
    }
}

/// Set string attributes on `span`. Only fields declared when the span was
/// created are kept; `tracing` drops unknown keys.
pub fn record_span_attributes(span: &Span, attributes: &[(&str, &str)]) {
    for (key, value) in attributes {
        span.record(*key, *value);
    }
}

/// Emit a named event inside the current span
pub fn add_span_event(name: &str, attributes: &[(&str, &str)]) {
    tracing::info!(event.name = %name, attributes = ?attributes, "span event");
}
