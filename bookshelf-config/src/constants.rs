use std::time::Duration;

pub use bookshelf_model::{DEFAULT_COVER_COUNT, DEFAULT_FAULT_TARGET};

pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";
pub const DEFAULT_SERVER_PORT: u16 = 5000;

pub const DEFAULT_COVERS_BASE_URL: &str = "http://localhost:52644";
pub const DEFAULT_COVERS_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=warn";

pub const DEFAULT_CONFIG_FILE: &str = "bookshelf.toml";
