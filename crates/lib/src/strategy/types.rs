use std::collections::BTreeMap;

use thiserror::Error;

/// Tag map carried by taggable argument records.
pub type Tags = BTreeMap<String, String>;

/// Errors raised by a configured naming or tagging strategy.
///
/// Once a strategy is configured there is no fallback: these propagate
/// unchanged out of the `build` call that triggered them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StrategyError {
  #[error("cannot generate a name from an empty token")]
  EmptyToken,

  #[error("generated name '{name}' exceeds {max} characters")]
  NameTooLong { name: String, max: usize },

  #[error("invalid tag key '{0}'")]
  InvalidTagKey(String),

  #[error("{strategy} strategy failed: {message}")]
  Failed { strategy: String, message: String },
}

/// Maps a logical name token to the physical name of a resource.
pub trait NamingStrategy: Send + Sync {
  fn generate_name(&self, token: &str) -> Result<String, StrategyError>;
}

/// Supplies the base tag set merged into every taggable resource.
///
/// `existing` holds the tags the caller already set; implementations may
/// inspect it but the caller's values always win on collision.
pub trait TaggingStrategy: Send + Sync {
  fn add_tags(&self, existing: &Tags) -> Result<Tags, StrategyError>;
}

impl<F> NamingStrategy for F
where
  F: Fn(&str) -> Result<String, StrategyError> + Send + Sync,
{
  fn generate_name(&self, token: &str) -> Result<String, StrategyError> {
    self(token)
  }
}

impl<F> TaggingStrategy for F
where
  F: Fn(&Tags) -> Result<Tags, StrategyError> + Send + Sync,
{
  fn add_tags(&self, existing: &Tags) -> Result<Tags, StrategyError> {
    self(existing)
  }
}
