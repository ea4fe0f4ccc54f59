use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::util::{non_empty_var, parse_bool_var, path_var};

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FileConfig {
    #[serde(default)]
    pub server: FileServerConfig,
    #[serde(default)]
    pub database: FileDatabaseConfig,
    #[serde(default)]
    pub covers: FileCoversConfig,
    #[serde(default)]
    pub logging: FileLoggingConfig,
    pub dev_mode: Option<bool>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileServerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileDatabaseConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileCoversConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_count: Option<usize>,
    /// `0` disables fault injection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fault_target: Option<usize>,
    /// Humantime string, e.g. `"30s"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileLoggingConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

/// Environment-derived configuration values.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    pub config_path: Option<PathBuf>,
    pub server_host: Option<String>,
    pub server_port: Option<String>,
    pub database_url: Option<String>,
    pub database_url_file: Option<PathBuf>,
    pub covers_base_url: Option<String>,
    pub covers_count: Option<String>,
    pub covers_fault_target: Option<String>,
    pub covers_request_timeout: Option<String>,
    pub log_filter: Option<String>,
    pub dev_mode: Option<bool>,
}

impl EnvConfig {
    pub fn gather() -> Self {
        Self {
            config_path: path_var("BOOKSHELF_CONFIG_PATH"),
            server_host: non_empty_var("SERVER_HOST"),
            server_port: non_empty_var("SERVER_PORT"),
            database_url: non_empty_var("DATABASE_URL"),
            database_url_file: path_var("DATABASE_URL_FILE"),
            covers_base_url: non_empty_var("COVERS_BASE_URL"),
            covers_count: non_empty_var("COVERS_COUNT"),
            covers_fault_target: std::env::var("COVERS_FAULT_TARGET").ok(),
            covers_request_timeout: non_empty_var("COVERS_REQUEST_TIMEOUT"),
            log_filter: non_empty_var("BOOKSHELF_LOG"),
            dev_mode: parse_bool_var("DEV_MODE"),
        }
    }

    /// Layer `overrides` on top of `self`; set fields in `overrides` win.
    pub fn overlay(self, overrides: EnvConfig) -> Self {
        Self {
            config_path: overrides.config_path.or(self.config_path),
            server_host: overrides.server_host.or(self.server_host),
            server_port: overrides.server_port.or(self.server_port),
            database_url: overrides.database_url.or(self.database_url),
            database_url_file: overrides
                .database_url_file
                .or(self.database_url_file),
            covers_base_url: overrides.covers_base_url.or(self.covers_base_url),
            covers_count: overrides.covers_count.or(self.covers_count),
            covers_fault_target: overrides
                .covers_fault_target
                .or(self.covers_fault_target),
            covers_request_timeout: overrides
                .covers_request_timeout
                .or(self.covers_request_timeout),
            log_filter: overrides.log_filter.or(self.log_filter),
            dev_mode: overrides.dev_mode.or(self.dev_mode),
        }
    }
}
