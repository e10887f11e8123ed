use thiserror::Error;

#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to install tracing subscriber: {0}")]
    Subscriber(#[from] tracing_subscriber::util::TryInitError),

    #[error("Invalid log filter `{0}`")]
    InvalidLogLevel(String),

    #[error("Failed to install metrics recorder: {0}")]
    Recorder(#[from] metrics_exporter_prometheus::BuildError),

    #[error("Metrics export failed: {0}")]
    Export(#[from] reqwest::Error),

    #[error("Metrics collector returned status {0}")]
    ExportStatus(u16),
}
