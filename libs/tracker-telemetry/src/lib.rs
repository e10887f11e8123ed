//! Shared observability setup for crypto tracker services.
//!
//! Traces are `tracing` spans named with OpenTelemetry attribute keys, metrics
//! go through the `metrics` facade into a Prometheus recorder.

pub mod config;
pub mod constants;
pub mod error;
pub mod metrics;
pub mod sdk;
pub mod span;

pub use config::{Resource, TelemetryConfig};
pub use error::TelemetryError;
pub use metrics::{measure_duration, CryptoTrackerMetrics, MetricDoc, MetricKind};
pub use sdk::{initialize_telemetry, TelemetrySdk};
pub use span::{
    add_span_event, crypto_span, in_span, record_span_attributes, with_span, CryptoSpanAttributes,
};
