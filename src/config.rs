/// Configuration management for MyCerts
use crate::error::{CertsError, CertsResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Main server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub service: ServiceConfig,
    pub storage: StorageConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}

/// Service-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub hostname: String,
    pub port: u16,
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_directory: PathBuf,
    pub database: PathBuf,
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// How long an issued session stays valid
    pub session_ttl_hours: i64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> CertsResult<Self> {
        dotenv::dotenv().ok();

        let hostname = env::var("MYCERTS_HOSTNAME").unwrap_or_else(|_| "localhost".to_string());
        let port = env::var("MYCERTS_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| CertsError::Validation {
                field: "port",
                reason: "Invalid port number".to_string(),
            })?;

        let data_directory: PathBuf = env::var("MYCERTS_DATA_DIRECTORY")
            .unwrap_or_else(|_| "./data".to_string())
            .into();
        let database = env::var("MYCERTS_DB_LOCATION")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_directory.join("mycerts.sqlite"));

        let session_ttl_hours = env::var("MYCERTS_SESSION_TTL_HOURS")
            .unwrap_or_else(|_| "12".to_string())
            .parse()
            .unwrap_or(12);

        let level = env::var("MYCERTS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            service: ServiceConfig { hostname, port },
            storage: StorageConfig {
                data_directory,
                database,
            },
            auth: AuthConfig { session_ttl_hours },
            logging: LoggingConfig { level },
        })
    }

    /// Validate the configuration
    pub fn validate(&self) -> CertsResult<()> {
        if self.service.hostname.is_empty() {
            return Err(CertsError::Validation {
                field: "hostname",
                reason: "Hostname cannot be empty".to_string(),
            });
        }

        if self.auth.session_ttl_hours <= 0 {
            return Err(CertsError::Validation {
                field: "session_ttl_hours",
                reason: "Session TTL must be positive".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_log_level_builds_a_valid_filter() {
        let logging = LoggingConfig {
            level: "info".to_string(),
        };

        let directives = format!("mycerts={},tower_http=debug", logging.level);
        assert!(tracing_subscriber::EnvFilter::try_new(&directives).is_ok());
    }
}
