//! GraphQL gateway for the crypto tracker.
//!
//! Every query and mutation returns a fixed placeholder shape; subscriptions
//! are rejected until a live feed exists.

pub mod config;
pub mod context;
pub mod error;
pub mod extension;
pub mod metrics;
pub mod resolvers;
pub mod schema;
pub mod server;

pub use config::{GatewayConfig, SERVICE_NAME};
pub use error::{ConversionError, GatewayError};
pub use metrics::GatewayMetrics;
pub use schema::{build_schema, GatewaySchema};
pub use server::{router, serve, AppState};
