use std::{env, time::Duration};

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use reqwest::header::CONTENT_TYPE;
use tokio::task::JoinHandle;
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

use crate::{
    config::{Resource, TelemetryConfig},
    error::TelemetryError,
    metrics::CryptoTrackerMetrics,
};

mod defaults {
    pub const EXPORT_TIMEOUT_SECS: u64 = 5;
    pub const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4";
}

/// Owns the process-wide subscriber, metrics recorder and exporter task
pub struct TelemetrySdk {
    config: TelemetryConfig,
    resource: Resource,
    running: Option<Running>,
}

struct Running {
    exporter: MetricsExporter,
    task: JoinHandle<()>,
}

impl TelemetrySdk {
    pub fn new(config: TelemetryConfig) -> Self {
        let resource = Resource::from_config(&config);
        Self {
            config,
            resource,
            running: None,
        }
    }

    pub fn config(&self) -> &TelemetryConfig {
        &self.config
    }

    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    pub fn is_started(&self) -> bool {
        self.running.is_some()
    }

    /// Handle for rendering the Prometheus text format, once started
    pub fn metrics_handle(&self) -> Option<PrometheusHandle> {
        self.running.as_ref().map(|r| r.exporter.handle.clone())
    }

    /// Install the global subscriber and recorder, then spawn the exporter.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) -> Result<(), TelemetryError> {
        if self.running.is_some() {
            tracing::warn!("Telemetry SDK already started");
            return Ok(());
        }

        install_subscriber(&self.config)?;

        let mut builder = PrometheusBuilder::new();
        for (key, value) in self.resource.iter() {
            // prometheus label names cannot contain dots
            builder = builder.add_global_label(key.replace('.', "_"), value);
        }
        let handle = builder.install_recorder()?;
        CryptoTrackerMetrics::register_metrics();

        let exporter = MetricsExporter::new(&self.config, &self.resource, handle)?;
        let task = exporter.spawn(self.config.metric_export_interval);

        tracing::info!(
            service = %self.config.service_name,
            version = %self.config.service_version,
            environment = %self.config.environment,
            instance = %self.resource.instance_id(),
            push_url = ?exporter.push_url,
            "Telemetry SDK started"
        );

        self.running = Some(Running { exporter, task });
        Ok(())
    }

    /// Stop the exporter and push the final values once
    pub async fn shutdown(&mut self) -> Result<(), TelemetryError> {
        let Some(running) = self.running.take() else {
            return Ok(());
        };

        running.task.abort();
        let flushed = running.exporter.export().await;

        match &flushed {
            Ok(()) => tracing::info!("Telemetry SDK shut down"),
            Err(e) => tracing::error!(error = %e, "Failed to flush metrics on shutdown"),
        }

        flushed
    }
}

/// Build and start the SDK in one step
pub fn initialize_telemetry(config: TelemetryConfig) -> Result<TelemetrySdk, TelemetryError> {
    let mut sdk = TelemetrySdk::new(config);
    sdk.start()?;
    Ok(sdk)
}

fn install_subscriber(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let directive = env::var("RUST_LOG")
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| config.log_level.clone());
    let filter =
        EnvFilter::try_new(&directive).map_err(|_| TelemetryError::InvalidLogLevel(directive))?;

    let fmt_layer = if config.enable_console_exporter {
        tracing_subscriber::fmt::layer()
            .pretty()
            .with_span_events(FmtSpan::CLOSE)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Periodically renders the recorder and ships it to the console or a
/// Pushgateway-compatible collector.
#[derive(Clone)]
struct MetricsExporter {
    handle: PrometheusHandle,
    client: reqwest::Client,
    push_url: Option<String>,
    headers: Vec<(String, String)>,
}

impl MetricsExporter {
    fn new(
        config: &TelemetryConfig,
        resource: &Resource,
        handle: PrometheusHandle,
    ) -> Result<Self, TelemetryError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(defaults::EXPORT_TIMEOUT_SECS))
            .build()?;

        let push_url = if config.enable_console_exporter {
            None
        } else {
            config.metrics_push_url(resource)
        };

        Ok(Self {
            handle,
            client,
            push_url,
            headers: config.otlp_headers.clone(),
        })
    }

    fn spawn(&self, every: Duration) -> JoinHandle<()> {
        let exporter = self.clone();

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            // the first tick completes immediately
            interval.tick().await;

            loop {
                interval.tick().await;
                if let Err(e) = exporter.export().await {
                    tracing::warn!(error = %e, "Metrics export failed");
                }
            }
        })
    }

    async fn export(&self) -> Result<(), TelemetryError> {
        self.handle.run_upkeep();
        let body = self.handle.render();

        let Some(url) = &self.push_url else {
            tracing::debug!(target: "metrics", "\n{}", body);
            return Ok(());
        };

        let mut request = self
            .client
            .put(url)
            .header(CONTENT_TYPE, defaults::PROMETHEUS_CONTENT_TYPE);
        for (key, value) in &self.headers {
            request = request.header(key.as_str(), value.as_str());
        }

        let response = request.body(body).send().await?;
        if !response.status().is_success() {
            return Err(TelemetryError::ExportStatus(response.status().as_u16()));
        }

        Ok(())
    }
}
