//! Deployment-wide strategy configuration.
//!
//! Strategies are configured once while bootstrapping a deployment, usually
//! from a YAML document:
//!
//! ```yaml
//! naming:
//!   prefix: stz
//!   suffix: dev
//!   max_length: 63
//! tags:
//!   env: dev
//!   owner: platform
//! ```
//!
//! The environment can then override parts of it (see
//! [`StrategyConfig::with_env_overrides`]) before it is turned into a
//! [`StrategyContext`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{ENV_NAME_PREFIX, ENV_NAME_SUFFIX, ENV_TAGS};
use crate::strategy::{ConventionNaming, StaticTagging, StrategyContext, Tags};

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read config {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse config: {0}")]
  Parse(#[from] serde_yaml::Error),

  #[error("invalid {var} entry '{entry}': expected key=value")]
  InvalidEnvTag { var: &'static str, entry: String },
}

fn default_separator() -> String {
  "-".to_string()
}

fn default_lowercase() -> bool {
  true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingConfig {
  #[serde(default)]
  pub prefix: Option<String>,
  #[serde(default)]
  pub suffix: Option<String>,
  #[serde(default = "default_separator")]
  pub separator: String,
  #[serde(default = "default_lowercase")]
  pub lowercase: bool,
  #[serde(default)]
  pub max_length: Option<usize>,
}

impl Default for NamingConfig {
  fn default() -> Self {
    Self {
      prefix: None,
      suffix: None,
      separator: default_separator(),
      lowercase: default_lowercase(),
      max_length: None,
    }
  }
}

impl From<&NamingConfig> for ConventionNaming {
  fn from(config: &NamingConfig) -> Self {
    ConventionNaming {
      prefix: config.prefix.clone(),
      suffix: config.suffix.clone(),
      separator: config.separator.clone(),
      lowercase: config.lowercase,
      max_length: config.max_length,
    }
  }
}

/// Strategy configuration for one deployment.
///
/// A missing `naming` section leaves names untouched; an empty `tags` map
/// leaves tags untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyConfig {
  #[serde(default)]
  pub naming: Option<NamingConfig>,
  #[serde(default)]
  pub tags: Tags,
}

impl StrategyConfig {
  pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
    Ok(serde_yaml::from_str(yaml)?)
  }

  pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    Self::from_yaml_str(&content)
  }

  /// Apply `STRATUM_NAME_PREFIX`, `STRATUM_NAME_SUFFIX` and `STRATUM_TAGS`.
  ///
  /// Setting a prefix or suffix enables naming even when the file had no
  /// `naming` section. Tags from the environment override file tags with the
  /// same key.
  pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
    if let Ok(prefix) = std::env::var(ENV_NAME_PREFIX) {
      self.naming.get_or_insert_with(NamingConfig::default).prefix = Some(prefix);
    }
    if let Ok(suffix) = std::env::var(ENV_NAME_SUFFIX) {
      self.naming.get_or_insert_with(NamingConfig::default).suffix = Some(suffix);
    }
    if let Ok(raw) = std::env::var(ENV_TAGS) {
      self.tags.extend(parse_env_tags(&raw)?);
    }
    Ok(self)
  }

  pub fn to_context(&self) -> StrategyContext {
    let mut ctx = StrategyContext::new();
    if let Some(naming) = &self.naming {
      ctx = ctx.with_naming(ConventionNaming::from(naming));
    }
    if !self.tags.is_empty() {
      ctx = ctx.with_tagging(StaticTagging::new(self.tags.clone()));
    }
    ctx
  }
}

fn parse_env_tags(raw: &str) -> Result<Tags, ConfigError> {
  let mut tags = Tags::new();
  for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
    let Some((key, value)) = entry.split_once('=') else {
      return Err(ConfigError::InvalidEnvTag {
        var: ENV_TAGS,
        entry: entry.to_string(),
      });
    };
    let key = key.trim();
    if key.is_empty() {
      return Err(ConfigError::InvalidEnvTag {
        var: ENV_TAGS,
        entry: entry.to_string(),
      });
    }
    tags.insert(key.to_string(), value.trim().to_string());
  }
  Ok(tags)
}
