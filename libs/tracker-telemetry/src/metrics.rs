//! Metric catalog shared by every tracker service.
//!
//! Names follow the Prometheus conventions (`_total` for counters, base units
//! in the suffix) and all carry the `crypto_tracker_` prefix.

use std::{
    future::Future,
    time::{Duration, Instant},
};

use metrics::{
    counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram, Label,
};

pub const WALLET_SYNC_TOTAL: &str = "crypto_tracker_wallet_sync_total";
pub const TRANSACTION_PROCESSED_TOTAL: &str = "crypto_tracker_transaction_processed_total";
pub const API_REQUESTS_TOTAL: &str = "crypto_tracker_api_requests_total";
pub const GRAPHQL_OPERATIONS_TOTAL: &str = "crypto_tracker_graphql_operations_total";
pub const ERRORS_TOTAL: &str = "crypto_tracker_errors_total";

pub const WALLET_SYNC_DURATION: &str = "crypto_tracker_wallet_sync_duration_seconds";
pub const DB_QUERY_DURATION: &str = "crypto_tracker_db_query_duration_seconds";
pub const EXTERNAL_API_DURATION: &str = "crypto_tracker_external_api_duration_seconds";
pub const TRANSACTION_PROCESSING_DURATION: &str =
    "crypto_tracker_transaction_processing_duration_seconds";

pub const WALLETS_ACTIVE: &str = "crypto_tracker_wallets_active";
pub const TRANSACTIONS_PENDING: &str = "crypto_tracker_transactions_pending";
pub const CACHE_HIT_RATIO: &str = "crypto_tracker_cache_hit_ratio";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Counter,
    Histogram,
    Gauge,
}

/// Description of one instrument, used to register help text with the recorder
#[derive(Debug, Clone)]
pub struct MetricDoc {
    pub name: &'static str,
    pub kind: MetricKind,
    pub help: &'static str,
    pub labels: &'static [&'static str],
}

impl MetricDoc {
    pub const fn new(
        name: &'static str,
        kind: MetricKind,
        help: &'static str,
        labels: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            kind,
            help,
            labels,
        }
    }

    /// Register the help text with whatever recorder is installed
    pub fn describe(&self) {
        match self.kind {
            MetricKind::Counter => describe_counter!(self.name, self.help),
            MetricKind::Histogram => describe_histogram!(self.name, self.help),
            MetricKind::Gauge => describe_gauge!(self.name, self.help),
        }
    }
}

fn status(success: bool) -> &'static str {
    if success {
        "success"
    } else {
        "failure"
    }
}

/// Business metrics for wallet syncing, transaction processing and API traffic
#[derive(Debug, Clone, Copy, Default)]
pub struct CryptoTrackerMetrics;

impl CryptoTrackerMetrics {
    pub fn new() -> Self {
        Self
    }

    pub fn metrics_documentation() -> Vec<MetricDoc> {
        use MetricKind::*;

        vec![
            MetricDoc::new(
                WALLET_SYNC_TOTAL,
                Counter,
                "Total number of wallet sync operations",
                &["chain", "status"],
            ),
            MetricDoc::new(
                TRANSACTION_PROCESSED_TOTAL,
                Counter,
                "Total number of transactions processed",
                &["chain", "type"],
            ),
            MetricDoc::new(
                API_REQUESTS_TOTAL,
                Counter,
                "Total number of API requests",
                &["endpoint", "method", "status_code"],
            ),
            MetricDoc::new(
                GRAPHQL_OPERATIONS_TOTAL,
                Counter,
                "Total number of GraphQL operations",
                &["operation_type", "operation_name", "status"],
            ),
            MetricDoc::new(
                ERRORS_TOTAL,
                Counter,
                "Total number of errors",
                &["error_type", "component"],
            ),
            MetricDoc::new(
                WALLET_SYNC_DURATION,
                Histogram,
                "Duration of wallet sync operations",
                &["chain", "status"],
            ),
            MetricDoc::new(
                DB_QUERY_DURATION,
                Histogram,
                "Duration of database queries",
                &["operation", "table"],
            ),
            MetricDoc::new(
                EXTERNAL_API_DURATION,
                Histogram,
                "Duration of external API calls",
                &["service", "status"],
            ),
            MetricDoc::new(
                TRANSACTION_PROCESSING_DURATION,
                Histogram,
                "Duration of transaction processing",
                &["chain", "type"],
            ),
            MetricDoc::new(WALLETS_ACTIVE, Gauge, "Number of active wallets", &[]),
            MetricDoc::new(
                TRANSACTIONS_PENDING,
                Gauge,
                "Number of pending transactions",
                &[],
            ),
            MetricDoc::new(CACHE_HIT_RATIO, Gauge, "Cache hit ratio", &["cache"]),
        ]
    }

    pub fn register_metrics() {
        for doc in Self::metrics_documentation() {
            doc.describe();
        }
    }

    pub fn record_wallet_sync(&self, chain: &str, success: bool, duration: Duration) {
        let labels = vec![
            Label::new("chain", chain.to_string()),
            Label::new("status", status(success)),
        ];
        counter!(WALLET_SYNC_TOTAL, labels.clone()).increment(1);
        histogram!(WALLET_SYNC_DURATION, labels).record(duration.as_secs_f64());
    }

    pub fn record_transaction_processed(&self, chain: &str, tx_type: &str, duration: Duration) {
        let labels = vec![
            Label::new("chain", chain.to_string()),
            Label::new("type", tx_type.to_string()),
        ];
        counter!(TRANSACTION_PROCESSED_TOTAL, labels.clone()).increment(1);
        histogram!(TRANSACTION_PROCESSING_DURATION, labels).record(duration.as_secs_f64());
    }

    pub fn record_api_request(&self, endpoint: &str, method: &str, status_code: u16) {
        counter!(
            API_REQUESTS_TOTAL,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
            "status_code" => status_code.to_string()
        )
        .increment(1);
    }

    pub fn record_graphql_operation(
        &self,
        operation_type: &str,
        operation_name: &str,
        success: bool,
    ) {
        counter!(
            GRAPHQL_OPERATIONS_TOTAL,
            "operation_type" => operation_type.to_string(),
            "operation_name" => operation_name.to_string(),
            "status" => status(success)
        )
        .increment(1);
    }

    pub fn record_db_query(&self, operation: &str, table: &str, duration: Duration) {
        histogram!(
            DB_QUERY_DURATION,
            "operation" => operation.to_string(),
            "table" => table.to_string()
        )
        .record(duration.as_secs_f64());
    }

    pub fn record_external_api_call(&self, service: &str, success: bool, duration: Duration) {
        histogram!(
            EXTERNAL_API_DURATION,
            "service" => service.to_string(),
            "status" => status(success)
        )
        .record(duration.as_secs_f64());
    }

    pub fn record_error(&self, error_type: &str, component: &str) {
        counter!(
            ERRORS_TOTAL,
            "error_type" => error_type.to_string(),
            "component" => component.to_string()
        )
        .increment(1);
    }

    pub fn set_active_wallets(&self, count: u64) {
        gauge!(WALLETS_ACTIVE).set(count as f64);
    }

    pub fn set_pending_transactions(&self, count: u64) {
        gauge!(TRANSACTIONS_PENDING).set(count as f64);
    }

    /// `ratio` is clamped to `0.0..=1.0`
    pub fn set_cache_hit_ratio(&self, cache: &str, ratio: f64) {
        gauge!(CACHE_HIT_RATIO, "cache" => cache.to_string()).set(ratio.clamp(0.0, 1.0));
    }
}

/// Await `future` and record its wall time in the `name` histogram, tagged with
/// `labels` plus `status=success|failure`. The duration is recorded on both
/// outcomes and the result is passed through untouched.
pub async fn measure_duration<F, T, E>(
    name: &'static str,
    labels: &[(&'static str, &str)],
    future: F,
) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
{
    let start = Instant::now();
    let result = future.await;
    let elapsed = start.elapsed();

    let mut labels: Vec<Label> = labels
        .iter()
        .map(|(key, value)| Label::new(*key, value.to_string()))
        .collect();
    labels.push(Label::new("status", status(result.is_ok())));

    histogram!(name, labels).record(elapsed.as_secs_f64());

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use metrics_exporter_prometheus::PrometheusBuilder;

    fn render_with<F: FnOnce()>(f: F) -> String {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        metrics::with_local_recorder(&recorder, f);
        handle.render()
    }

    #[test]
    fn catalog_names_are_prefixed_and_unique() {
        let docs = CryptoTrackerMetrics::metrics_documentation();
        assert_eq!(docs.len(), 12);

        let mut names: Vec<_> = docs.iter().map(|d| d.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), docs.len());

        for doc in &docs {
            assert!(doc.name.starts_with("crypto_tracker_"), "{}", doc.name);
            match doc.kind {
                MetricKind::Counter => assert!(doc.name.ends_with("_total")),
                MetricKind::Histogram => assert!(doc.name.ends_with("_seconds")),
                MetricKind::Gauge => {}
            }
        }
    }

    #[test]
    fn wallet_sync_records_counter_and_histogram() {
        let output = render_with(|| {
            CryptoTrackerMetrics::register_metrics();
            let metrics = CryptoTrackerMetrics::new();
            metrics.record_wallet_sync("ETHEREUM", true, Duration::from_millis(250));
            metrics.record_wallet_sync("ETHEREUM", false, Duration::from_millis(10));
        });

        assert!(output.contains("# HELP crypto_tracker_wallet_sync_total"));
        assert!(output.contains("crypto_tracker_wallet_sync_total{"));
        assert!(output.contains("status=\"success\""));
        assert!(output.contains("status=\"failure\""));
        assert!(output.contains("crypto_tracker_wallet_sync_duration_seconds"));
    }

    #[test]
    fn gauges_hold_latest_value() {
        let output = render_with(|| {
            let metrics = CryptoTrackerMetrics::new();
            metrics.set_active_wallets(3);
            metrics.set_active_wallets(7);
            metrics.set_cache_hit_ratio("prices", 1.5);
        });

        assert!(output.contains("crypto_tracker_wallets_active 7"));
        assert!(output.contains("crypto_tracker_cache_hit_ratio{cache=\"prices\"} 1"));
    }

    #[test]
    fn measure_duration_records_failures_too() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();

        let output = render_with(|| {
            let ok: Result<u8, &str> = runtime.block_on(measure_duration(
                DB_QUERY_DURATION,
                &[("operation", "select"), ("table", "wallets")],
                async { Ok(1) },
            ));
            assert_eq!(ok, Ok(1));

            let err: Result<u8, &str> = runtime.block_on(measure_duration(
                DB_QUERY_DURATION,
                &[("operation", "select"), ("table", "wallets")],
                async { Err("boom") },
            ));
            assert_eq!(err, Err("boom"));
        });

        assert!(output.contains("crypto_tracker_db_query_duration_seconds_count{"));
        assert!(output.contains("status=\"success\""));
        assert!(output.contains("status=\"failure\""));
        assert!(output.contains("table=\"wallets\""));
    }
}
