//! GraphQL request metrics, recorded alongside the shared tracker catalog.

use std::time::Duration;

use metrics::{counter, histogram};
use tracker_telemetry::{CryptoTrackerMetrics, MetricDoc, MetricKind};

pub const GRAPHQL_REQUESTS_TOTAL: &str = "graphql_requests_total";
pub const GRAPHQL_REQUEST_DURATION: &str = "graphql_request_duration_seconds";
pub const GRAPHQL_ERRORS_TOTAL: &str = "graphql_errors_total";
pub const GRAPHQL_RESOLVER_DURATION: &str = "graphql_resolver_duration_seconds";

const COMPONENT: &str = "graphql-gateway";

#[derive(Debug, Clone, Copy, Default)]
pub struct GatewayMetrics {
    tracker: CryptoTrackerMetrics,
}

impl GatewayMetrics {
    pub fn new() -> Self {
        Self {
            tracker: CryptoTrackerMetrics::new(),
        }
    }

    pub fn metrics_documentation() -> Vec<MetricDoc> {
        vec![
            MetricDoc::new(
                GRAPHQL_REQUESTS_TOTAL,
                MetricKind::Counter,
                "Total number of GraphQL requests",
                &["operation_type", "operation_name", "success"],
            ),
            MetricDoc::new(
                GRAPHQL_REQUEST_DURATION,
                MetricKind::Histogram,
                "GraphQL request duration",
                &["operation_type", "operation_name"],
            ),
            MetricDoc::new(
                GRAPHQL_ERRORS_TOTAL,
                MetricKind::Counter,
                "Total number of GraphQL errors",
                &["error_type", "operation_type", "operation_name"],
            ),
            MetricDoc::new(
                GRAPHQL_RESOLVER_DURATION,
                MetricKind::Histogram,
                "GraphQL resolver execution duration",
                &["field_name", "type_name"],
            ),
        ]
    }

    pub fn register_metrics() {
        for doc in Self::metrics_documentation() {
            doc.describe();
        }
    }

    pub fn record_request(&self, operation_type: &str, operation_name: &str, success: bool) {
        counter!(
            GRAPHQL_REQUESTS_TOTAL,
            "operation_type" => operation_type.to_string(),
            "operation_name" => operation_name.to_string(),
            "success" => success.to_string()
        )
        .increment(1);
        self.tracker
            .record_graphql_operation(operation_type, operation_name, success);
    }

    pub fn record_request_duration(
        &self,
        duration: Duration,
        operation_type: &str,
        operation_name: &str,
    ) {
        histogram!(
            GRAPHQL_REQUEST_DURATION,
            "operation_type" => operation_type.to_string(),
            "operation_name" => operation_name.to_string()
        )
        .record(duration.as_secs_f64());
    }

    pub fn record_error(&self, error_type: &str, operation_type: &str, operation_name: &str) {
        counter!(
            GRAPHQL_ERRORS_TOTAL,
            "error_type" => error_type.to_string(),
            "operation_type" => operation_type.to_string(),
            "operation_name" => operation_name.to_string()
        )
        .increment(1);
        self.tracker.record_error(error_type, COMPONENT);
    }

    pub fn record_resolver_duration(&self, duration: Duration, field_name: &str, type_name: &str) {
        histogram!(
            GRAPHQL_RESOLVER_DURATION,
            "field_name" => field_name.to_string(),
            "type_name" => type_name.to_string()
        )
        .record(duration.as_secs_f64());
    }

    pub fn record_http_request(&self, route: &str, method: &str, status_code: u16) {
        self.tracker.record_api_request(route, method, status_code);
    }
}
