//! Shared configuration library for Bookshelf.
//!
//! Configuration is composed from built-in defaults, an optional TOML file,
//! an optional `.env` file and the process environment (highest precedence).
//! Binaries apply their own CLI overrides on top of the loaded [`Config`].

pub mod constants;
pub mod loader;
pub mod models;
pub mod util;
pub mod validation;

pub use loader::{ConfigLoad, ConfigLoader, error::ConfigLoadError};
pub use models::sources::{EnvConfig, FileConfig};
pub use models::{
    Config, ConfigMetadata, CoversConfig, DatabaseConfig, LoggingConfig,
    ServerConfig,
};
pub use validation::{ConfigGuardRailError, ConfigWarning, ConfigWarnings};
