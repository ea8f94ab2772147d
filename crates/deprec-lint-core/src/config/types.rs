use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::lints::{all_lints, find_lint, normalize_lint_id};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleLevel {
    Allow,
    Warn,
    Deny,
}

impl Display for RuleLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Allow => write!(f, "allow"),
            Self::Warn => write!(f, "warn"),
            Self::Deny => write!(f, "deny"),
        }
    }
}

/// Well-known annotation type names and where the marker's namespace import
/// comes from. Projects hosting the annotations under their own namespace
/// override these.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeprecationConfig {
    pub metadata_attribute: String,
    pub marker_attribute: String,
    pub pre_deprecation_attribute: String,
}

impl Default for DeprecationConfig {
    fn default() -> Self {
        Self {
            metadata_attribute: "Lifecycle.Annotations.DeprecationMetadataAttribute".to_string(),
            marker_attribute: "System.ObsoleteAttribute".to_string(),
            pre_deprecation_attribute: "Lifecycle.Annotations.PreDeprecationAttribute".to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    pub levels: BTreeMap<String, RuleLevel>,
    pub deprecation: DeprecationConfig,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub levels: BTreeMap<String, RuleLevel>,
    pub deprecation: DeprecationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            levels: BTreeMap::new(),
            deprecation: DeprecationConfig::default(),
        }
    }
}

impl Config {
    /// Validates and canonicalizes a parsed config. Unknown rule ids are
    /// rejected rather than silently ignored so typos do not disable a
    /// check.
    pub fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let mut levels = BTreeMap::new();
        for (rule_id, level) in raw.levels {
            let canonical = normalize_lint_id(&rule_id);
            if find_lint(&canonical).is_none() {
                return Err(ConfigError::UnknownRule { rule_id });
            }
            levels.insert(canonical, level);
        }
        Ok(Self {
            levels,
            deprecation: raw.deprecation,
        })
    }

    /// Catalog defaults overlaid with this config's overrides.
    pub fn effective_levels(&self) -> BTreeMap<String, RuleLevel> {
        let mut levels = all_lints()
            .iter()
            .map(|lint| (lint.id.to_string(), lint.default_level))
            .collect::<BTreeMap<_, _>>();
        for (rule_id, level) in &self.levels {
            levels.insert(rule_id.clone(), *level);
        }
        levels
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    UnknownRule {
        rule_id: String,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config '{}': {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "failed to parse config '{}': {source}", path.display())
            }
            Self::UnknownRule { rule_id } => {
                write!(f, "config names unknown rule '{rule_id}'")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::UnknownRule { .. } => None,
        }
    }
}
