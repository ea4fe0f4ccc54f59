use thiserror::Error;

use super::models::Config;

#[derive(Debug, Error)]
pub enum ConfigGuardRailError {
    #[error("a database URL is required when DEV_MODE is false")]
    MissingDatabase,
    #[error("invalid database URL")]
    InvalidDatabaseUrl {
        #[source]
        source: url::ParseError,
    },
    #[error("unsupported database scheme '{scheme}' (expected postgres or postgresql)")]
    UnsupportedDatabaseScheme { scheme: String },
    #[error("unsupported cover service scheme '{scheme}' (expected http or https)")]
    UnsupportedCoversScheme { scheme: String },
    #[error("cover count must be at least 1")]
    ZeroCoverCount,
    #[error("cover fault target {target} is outside 1..={count}")]
    FaultTargetOutOfRange { target: usize, count: usize },
}

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn extend(&mut self, other: ConfigWarnings) {
        self.items.extend(other.items);
    }
}

pub fn apply_guard_rails(
    config: &Config,
) -> Result<ConfigWarnings, ConfigGuardRailError> {
    let mut warnings = ConfigWarnings::default();

    match config.database.primary_url.as_deref() {
        Some(raw) => {
            let parsed = url::Url::parse(raw).map_err(|source| {
                ConfigGuardRailError::InvalidDatabaseUrl { source }
            })?;
            if !matches!(parsed.scheme(), "postgres" | "postgresql") {
                return Err(ConfigGuardRailError::UnsupportedDatabaseScheme {
                    scheme: parsed.scheme().to_string(),
                });
            }
        }
        None if config.dev_mode => warnings.push_with_hint(
            "DATABASE_URL not configured; books are kept in memory and reset on restart",
            "Set DATABASE_URL to a PostgreSQL instance to persist books",
        ),
        None => return Err(ConfigGuardRailError::MissingDatabase),
    }

    let covers = &config.covers;
    if !matches!(covers.base_url.scheme(), "http" | "https") {
        return Err(ConfigGuardRailError::UnsupportedCoversScheme {
            scheme: covers.base_url.scheme().to_string(),
        });
    }
    if covers.cover_count == 0 {
        return Err(ConfigGuardRailError::ZeroCoverCount);
    }
    if let Some(target) = covers.fault_target {
        if target > covers.cover_count {
            return Err(ConfigGuardRailError::FaultTargetOutOfRange {
                target,
                count: covers.cover_count,
            });
        }
        warnings.push_with_hint(
            format!(
                "cover request #{target} asks the cover service to fail; every cover download will be cancelled"
            ),
            "Set COVERS_FAULT_TARGET=none to download covers normally",
        );
    }

    Ok(warnings)
}
