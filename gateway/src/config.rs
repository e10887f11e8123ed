use std::env;

use crate::error::GatewayError;

mod defaults {
    pub const PORT: &str = "4000";
    pub const HOST: &str = "0.0.0.0";
    pub const ENVIRONMENT: &str = "development";
    pub const APP_URL: &str = "http://localhost:3000";
}

/// Name reported in telemetry resources
pub const SERVICE_NAME: &str = "crypto-tracker-graphql-gateway";

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    /// Single origin allowed by CORS, with credentials
    pub app_url: String,
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, GatewayError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, GatewayError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup("PORT").unwrap_or_else(|| defaults::PORT.to_string());
        let port = port
            .trim()
            .parse::<u16>()
            .map_err(|_| GatewayError::InvalidPort(port.clone()))?;

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| defaults::HOST.to_string()),
            port,
            environment: lookup("NODE_ENV")
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| defaults::ENVIRONMENT.to_string()),
            app_url: lookup("NEXT_PUBLIC_APP_URL")
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| defaults::APP_URL.to_string()),
        })
    }

    /// Execution error messages are hidden from clients in production
    pub fn masked_errors(&self) -> bool {
        self.environment == "production"
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
