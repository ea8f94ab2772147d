use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{Config, ConfigError, RawConfig};

pub const CONFIG_FILE: &str = "deprec-lint.toml";

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ConfigSource {
    File(PathBuf),
    Default,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: ConfigSource,
}

pub fn load_from_dir(dir: &Path) -> Result<LoadedConfig, ConfigError> {
    let path = dir.join(CONFIG_FILE);
    if path.is_file() {
        let config = load_from_path(&path)?;
        return Ok(LoadedConfig {
            config,
            source: ConfigSource::File(path),
        });
    }

    Ok(LoadedConfig {
        config: Config::default(),
        source: ConfigSource::Default,
    })
}

pub fn load_from_path(path: &Path) -> Result<Config, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&raw, path)
}

pub fn parse_config(raw: &str, path: &Path) -> Result<Config, ConfigError> {
    let parsed = toml::from_str::<RawConfig>(raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Config::from_raw(parsed)
}
