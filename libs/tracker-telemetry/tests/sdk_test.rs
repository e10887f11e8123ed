//! Installs global state, so everything lives in one test.

use tracker_telemetry::{CryptoTrackerMetrics, TelemetryConfig, TelemetrySdk};

#[tokio::test]
async fn sdk_lifecycle() {
    let config = TelemetryConfig::from_env("sdk-test", "0.0.1")
        .with_console_exporter(true)
        .with_log_level("warn")
        .with_attribute("service.layer", "test");
    let mut sdk = TelemetrySdk::new(config);
    assert!(!sdk.is_started());
    assert!(sdk.metrics_handle().is_none());

    sdk.start().unwrap();
    assert!(sdk.is_started());

    // second start is a no-op
    sdk.start().unwrap();

    CryptoTrackerMetrics::new().set_active_wallets(2);
    let rendered = sdk.metrics_handle().unwrap().render();
    assert!(rendered.contains("crypto_tracker_wallets_active"));
    assert!(rendered.contains("service_name=\"sdk-test\""));
    assert!(rendered.contains("service_layer=\"test\""));

    sdk.shutdown().await.unwrap();
    assert!(!sdk.is_started());

    // shutting down twice is harmless
    sdk.shutdown().await.unwrap();
}
