pub mod error;

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::debug;
use url::Url;

use crate::{
    constants::{
        DEFAULT_CONFIG_FILE, DEFAULT_COVER_COUNT, DEFAULT_COVERS_BASE_URL,
        DEFAULT_COVERS_REQUEST_TIMEOUT, DEFAULT_FAULT_TARGET,
    },
    models::{
        Config, ConfigMetadata, CoversConfig, DatabaseConfig, LoggingConfig,
        ServerConfig,
        sources::{EnvConfig, FileConfig, FileCoversConfig},
    },
    util::{parse_duration, parse_fault_target},
    validation::{ConfigWarnings, apply_guard_rails},
};

use error::ConfigLoadError;

/// A loaded configuration together with the non-fatal findings produced
/// while composing it.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: ConfigWarnings,
}

#[derive(Debug, Clone, Default)]
enum EnvFileMode {
    #[default]
    Discover,
    Path(PathBuf),
    Disabled,
}

/// Composes [`Config`] from defaults, the TOML file, `.env`, the process
/// environment and explicit overrides. Later sources win.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    env_file: EnvFileMode,
    env: Option<EnvConfig>,
    overrides: Option<EnvConfig>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    pub fn with_env_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.env_file = EnvFileMode::Path(path.into());
        self
    }

    pub fn without_env_file(mut self) -> Self {
        self.env_file = EnvFileMode::Disabled;
        self
    }

    /// Use a fixed environment snapshot instead of reading the process
    /// environment.
    pub fn with_env(mut self, env: EnvConfig) -> Self {
        self.env = Some(env);
        self
    }

    /// Values that take precedence over every other source, typically
    /// command line flags.
    pub fn with_overrides(mut self, overrides: EnvConfig) -> Self {
        self.overrides = Some(overrides);
        self
    }

    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = self.load_env_file()?;
        let mut env = self.env.clone().unwrap_or_else(EnvConfig::gather);
        if let Some(overrides) = self.overrides.clone() {
            env = env.overlay(overrides);
        }

        let config_path = self.resolve_config_path(&env);
        let file = match &config_path {
            Some(path) => read_file_config(path)?,
            None => FileConfig::default(),
        };

        let mut config = compose(file, &env)?;
        config.metadata = ConfigMetadata {
            config_path,
            env_file_loaded,
        };

        let warnings = apply_guard_rails(&config)?;
        Ok(ConfigLoad { config, warnings })
    }

    fn load_env_file(&self) -> Result<bool, ConfigLoadError> {
        let result = match &self.env_file {
            EnvFileMode::Disabled => return Ok(false),
            EnvFileMode::Path(path) => dotenvy::from_path(path).map(|_| ()),
            EnvFileMode::Discover => dotenvy::dotenv().map(|_| ()),
        };

        match result {
            Ok(()) => Ok(true),
            Err(err) if err.not_found() => {
                debug!("no .env file found");
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn resolve_config_path(&self, env: &EnvConfig) -> Option<PathBuf> {
        if let Some(path) = self.config_path.clone().or(env.config_path.clone())
        {
            return Some(path);
        }

        let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
        fallback.is_file().then_some(fallback)
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig, ConfigLoadError> {
    let raw = fs::read_to_string(path).map_err(|source| {
        ConfigLoadError::ConfigFileIo {
            path: path.to_path_buf(),
            source,
        }
    })?;
    toml::from_str(&raw).map_err(|source| ConfigLoadError::ConfigFileParse {
        path: path.to_path_buf(),
        source,
    })
}

fn compose(
    file: FileConfig,
    env: &EnvConfig,
) -> Result<Config, ConfigLoadError> {
    let covers = compose_covers(&file.covers, env)?;

    let server_defaults = ServerConfig::default();
    let port = match env.server_port.as_deref() {
        Some(raw) => raw.trim().parse::<u16>().map_err(|source| {
            ConfigLoadError::InvalidPort {
                value: raw.to_string(),
                source,
            }
        })?,
        None => file.server.port.unwrap_or(server_defaults.port),
    };
    let server = ServerConfig {
        host: env
            .server_host
            .clone()
            .or(file.server.host)
            .unwrap_or(server_defaults.host),
        port,
    };

    let database = DatabaseConfig {
        primary_url: resolve_database_url(env, file.database.url)?,
    };

    let logging = LoggingConfig {
        filter: env
            .log_filter
            .clone()
            .or(file.logging.filter)
            .unwrap_or_else(|| LoggingConfig::default().filter),
    };

    Ok(Config {
        server,
        database,
        covers,
        logging,
        dev_mode: env.dev_mode.or(file.dev_mode).unwrap_or(false),
        metadata: ConfigMetadata::default(),
    })
}

fn compose_covers(
    file: &FileCoversConfig,
    env: &EnvConfig,
) -> Result<CoversConfig, ConfigLoadError> {
    let raw_base_url = env
        .covers_base_url
        .as_deref()
        .or(file.base_url.as_deref())
        .unwrap_or(DEFAULT_COVERS_BASE_URL);
    let base_url = Url::parse(raw_base_url.trim()).map_err(|source| {
        ConfigLoadError::InvalidCoversUrl {
            value: raw_base_url.to_string(),
            source,
        }
    })?;

    let cover_count = match env.covers_count.as_deref() {
        Some(raw) => raw.trim().parse::<usize>().map_err(|_| {
            ConfigLoadError::InvalidCoverCount {
                value: raw.to_string(),
            }
        })?,
        None => file.cover_count.unwrap_or(DEFAULT_COVER_COUNT),
    };

    let fault_target = match env.covers_fault_target.as_deref() {
        Some(raw) => parse_fault_target(raw).ok_or_else(|| {
            ConfigLoadError::InvalidFaultTarget {
                value: raw.to_string(),
            }
        })?,
        None => match file.fault_target {
            Some(0) => None,
            Some(index) => Some(index),
            // Only an explicit target is checked against the cover count.
            None => DEFAULT_FAULT_TARGET.filter(|index| {
                let fits = *index <= cover_count;
                if !fits {
                    debug!(
                        cover_count,
                        default_fault_target = *index,
                        "default fault target exceeds cover count; fault injection disabled"
                    );
                }
                fits
            }),
        },
    };

    let request_timeout = match env
        .covers_request_timeout
        .as_deref()
        .or(file.request_timeout.as_deref())
    {
        Some(raw) => parse_duration(raw).map_err(|source| {
            ConfigLoadError::InvalidDuration {
                field: "covers.request_timeout",
                value: raw.to_string(),
                source,
            }
        })?,
        None => DEFAULT_COVERS_REQUEST_TIMEOUT,
    };

    Ok(CoversConfig {
        base_url,
        cover_count,
        fault_target,
        request_timeout,
    })
}

fn resolve_database_url(
    env: &EnvConfig,
    file_url: Option<String>,
) -> Result<Option<String>, ConfigLoadError> {
    if let Some(url) = env.database_url.clone() {
        return Ok(Some(url));
    }

    if let Some(path) = env.database_url_file.as_ref() {
        let secret = fs::read_to_string(path).map_err(|source| {
            ConfigLoadError::SecretFileIo {
                path: path.clone(),
                source,
            }
        })?;
        let secret = secret.trim();
        if !secret.is_empty() {
            return Ok(Some(secret.to_string()));
        }
    }

    Ok(file_url
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty()))
}
