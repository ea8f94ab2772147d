pub mod loader;
pub mod types;

pub use loader::{CONFIG_FILE, ConfigSource, LoadedConfig, load_from_dir, load_from_path, parse_config};
pub use types::{Config, ConfigError, DeprecationConfig, RawConfig, RuleLevel};
