use gateway::{build_schema, serve, AppState, GatewayConfig, GatewayMetrics, SERVICE_NAME};
use tracker_telemetry::{TelemetryConfig, TelemetrySdk};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config = GatewayConfig::from_env()?;

    let telemetry_config = TelemetryConfig::from_env(SERVICE_NAME, env!("CARGO_PKG_VERSION"))
        .with_attribute("service.layer", "api");
    let mut telemetry = TelemetrySdk::new(telemetry_config);
    if let Err(e) = telemetry.start() {
        // no subscriber may be installed at this point
        eprintln!("Failed to start telemetry: {e}");
    }

    GatewayMetrics::register_metrics();
    let metrics = GatewayMetrics::new();

    let state = AppState {
        schema: build_schema(metrics, config.masked_errors()),
        metrics,
        prometheus: telemetry.metrics_handle(),
    };

    tracing::info!(
        service = SERVICE_NAME,
        environment = %config.environment,
        masked_errors = config.masked_errors(),
        "Starting GraphQL gateway"
    );

    let served = serve(&config, state).await;

    if let Err(e) = telemetry.shutdown().await {
        tracing::error!(error = %e, "Error shutting down telemetry");
    }

    served?;
    Ok(())
}
