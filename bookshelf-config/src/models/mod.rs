pub mod sources;

use std::{path::PathBuf, time::Duration};

use url::Url;

use crate::constants::{
    DEFAULT_LOG_FILTER, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
};

/// Fully composed runtime configuration. Build it with
/// [`ConfigLoader`](crate::ConfigLoader).
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub covers: CoversConfig,
    pub logging: LoggingConfig,
    pub dev_mode: bool,
    pub metadata: ConfigMetadata,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_SERVER_HOST.to_string(),
            port: DEFAULT_SERVER_PORT,
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Default)]
pub struct DatabaseConfig {
    pub primary_url: Option<String>,
}

/// Settings for the outbound cover service client.
#[derive(Debug, Clone)]
pub struct CoversConfig {
    /// Base URL of the cover service; request paths are appended to it.
    pub base_url: Url,
    /// Number of cover requests issued per book.
    pub cover_count: usize,
    /// 1-based index of the request sent with `returnFault=true`.
    pub fault_target: Option<usize>,
    /// Transport level timeout applied to each cover request.
    pub request_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file_loaded: bool,
}
