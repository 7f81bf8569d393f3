mod loader;
mod types;

pub use loader::{ConfigError, DEFAULT_CONFIG_PATH};
pub use types::{Config, Targets, DEFAULT_LOCAL_BINARY, DEFAULT_REMOTE_BINARY};
