//! Configuration: the TOML app config and the content configuration it points at.

pub mod cms;
pub mod loader;
pub mod types;

pub use cms::{CmsConfig, ContentEntry, ContentKind, MediaConfig, SchemaError, SchemaLoader};
pub use loader::{ConfigError, ConfigLoader, default_config_path};
pub use types::{LoggingConfig, ResolvedConfig};
