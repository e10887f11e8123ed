use std::{
    collections::BTreeMap,
    env,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use uuid::Uuid;

use crate::constants::{
    ATTR_DEPLOYMENT_ENVIRONMENT_NAME, ATTR_HOST_NAME, ATTR_SERVICE_INSTANCE_ID, ATTR_SERVICE_NAME,
    ATTR_SERVICE_VERSION,
};

mod defaults {
    pub const ENVIRONMENT: &str = "development";
    pub const OTLP_ENDPOINT: &str = "http://localhost:4318";
    pub const LOG_LEVEL: &str = "info";
    pub const METRIC_EXPORT_INTERVAL_SECS: u64 = 30;
    pub const HOST_NAME: &str = "localhost";
}

/// How a service reports traces and metrics
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub service_name: String,
    pub service_version: String,
    pub environment: String,
    /// Collector base URL; `None` disables pushing metrics
    pub otlp_endpoint: Option<String>,
    pub otlp_headers: Vec<(String, String)>,
    /// Pretty console output with span timings instead of JSON lines
    pub enable_console_exporter: bool,
    /// Default `EnvFilter` directive, overridden by `RUST_LOG`
    pub log_level: String,
    pub attributes: Vec<(String, String)>,
    pub metric_export_interval: Duration,
}

impl TelemetryConfig {
    /// Build a config with defaults taken from `NODE_ENV` and
    /// `OTEL_EXPORTER_OTLP_ENDPOINT`.
    pub fn from_env(service_name: &str, service_version: &str) -> Self {
        Self::from_lookup(service_name, service_version, |key| env::var(key).ok())
    }

    fn from_lookup<F>(service_name: &str, service_version: &str, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("NODE_ENV")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| defaults::ENVIRONMENT.to_string());

        let otlp_endpoint = match lookup("OTEL_EXPORTER_OTLP_ENDPOINT") {
            Some(v) if v.trim().is_empty() => None,
            Some(v) => Some(v.trim().trim_end_matches('/').to_string()),
            None => Some(defaults::OTLP_ENDPOINT.to_string()),
        };

        Self {
            service_name: service_name.to_string(),
            service_version: service_version.to_string(),
            enable_console_exporter: environment == "development",
            environment,
            otlp_endpoint,
            otlp_headers: Vec::new(),
            log_level: defaults::LOG_LEVEL.to_string(),
            attributes: Vec::new(),
            metric_export_interval: Duration::from_secs(defaults::METRIC_EXPORT_INTERVAL_SECS),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.otlp_headers.push((key.into(), value.into()));
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    pub fn with_console_exporter(mut self, enabled: bool) -> Self {
        self.enable_console_exporter = enabled;
        self
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Pushgateway-style URL that receives this instance's metrics
    pub fn metrics_push_url(&self, resource: &Resource) -> Option<String> {
        self.otlp_endpoint.as_ref().map(|endpoint| {
            format!(
                "{}/metrics/job/{}/instance/{}",
                endpoint,
                self.service_name,
                resource.instance_id()
            )
        })
    }
}

/// Attributes identifying the process that emits telemetry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    attributes: BTreeMap<String, String>,
}

impl Resource {
    pub fn from_config(config: &TelemetryConfig) -> Self {
        let mut attributes = BTreeMap::new();
        attributes.insert(ATTR_SERVICE_NAME.to_string(), config.service_name.clone());
        attributes.insert(
            ATTR_SERVICE_VERSION.to_string(),
            config.service_version.clone(),
        );
        attributes.insert(
            ATTR_DEPLOYMENT_ENVIRONMENT_NAME.to_string(),
            config.environment.clone(),
        );
        attributes.insert(
            ATTR_SERVICE_INSTANCE_ID.to_string(),
            instance_id(&config.service_name),
        );
        attributes.insert(ATTR_HOST_NAME.to_string(), host_name());

        // custom attributes win over the defaults above
        for (key, value) in &config.attributes {
            attributes.insert(key.clone(), value.clone());
        }

        Self { attributes }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn instance_id(&self) -> &str {
        self.get(ATTR_SERVICE_INSTANCE_ID).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

fn instance_id(service_name: &str) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let suffix = Uuid::new_v4().simple().to_string();

    format!("{}-{}-{}", service_name, millis, &suffix[..6])
}

fn host_name() -> String {
    env::var("HOSTNAME")
        .ok()
        .or_else(|| std::fs::read_to_string("/etc/hostname").ok())
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| defaults::HOST_NAME.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(vars: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn defaults_without_environment() {
        let config = TelemetryConfig::from_lookup("svc", "0.0.1", lookup(&[]));

        assert_eq!(config.environment, "development");
        assert!(config.enable_console_exporter);
        assert_eq!(config.otlp_endpoint.as_deref(), Some("http://localhost:4318"));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.metric_export_interval, Duration::from_secs(30));
    }

    #[test]
    fn production_disables_console_exporter() {
        let config = TelemetryConfig::from_lookup(
            "svc",
            "0.0.1",
            lookup(&[
                ("NODE_ENV", "production"),
                ("OTEL_EXPORTER_OTLP_ENDPOINT", "http://collector:4318/"),
            ]),
        );

        assert!(config.is_production());
        assert!(!config.enable_console_exporter);
        assert_eq!(config.otlp_endpoint.as_deref(), Some("http://collector:4318"));
    }

    #[test]
    fn blank_endpoint_disables_push() {
        let config = TelemetryConfig::from_lookup(
            "svc",
            "0.0.1",
            lookup(&[("OTEL_EXPORTER_OTLP_ENDPOINT", "  ")]),
        );
        let resource = Resource::from_config(&config);

        assert!(config.metrics_push_url(&resource).is_none());
    }

    #[test]
    fn resource_carries_service_identity() {
        let config = TelemetryConfig::from_lookup("gateway", "1.2.3", lookup(&[("NODE_ENV", "test")]))
            .with_attribute("service.layer", "api");
        let resource = Resource::from_config(&config);

        assert_eq!(resource.get(ATTR_SERVICE_NAME), Some("gateway"));
        assert_eq!(resource.get(ATTR_SERVICE_VERSION), Some("1.2.3"));
        assert_eq!(resource.get(ATTR_DEPLOYMENT_ENVIRONMENT_NAME), Some("test"));
        assert_eq!(resource.get("service.layer"), Some("api"));
        assert!(resource.instance_id().starts_with("gateway-"));
        assert!(resource.get(ATTR_HOST_NAME).is_some());
    }

    #[test]
    fn custom_attributes_override_defaults() {
        let config = TelemetryConfig::from_lookup("svc", "0.0.1", lookup(&[]))
            .with_attribute(ATTR_HOST_NAME, "pinned-host");
        let resource = Resource::from_config(&config);

        assert_eq!(resource.get(ATTR_HOST_NAME), Some("pinned-host"));
    }

    #[test]
    fn push_url_includes_job_and_instance() {
        let config = TelemetryConfig::from_lookup("svc", "0.0.1", lookup(&[]));
        let resource = Resource::from_config(&config);
        let url = config.metrics_push_url(&resource).unwrap();

        assert_eq!(
            url,
            format!("http://localhost:4318/metrics/job/svc/instance/{}", resource.instance_id())
        );
    }

    #[test]
    fn instance_ids_are_unique() {
        assert_ne!(instance_id("svc"), instance_id("svc"));
    }
}
