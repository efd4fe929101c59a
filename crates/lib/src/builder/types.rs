use std::fmt::Debug;

use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::engine::EngineError;
use crate::strategy::{StrategyError, Tags};

/// Errors raised while finalizing a builder.
///
/// All of them are synchronous and local to the offending `build` call;
/// nothing here is retried.
#[derive(Debug, Error)]
pub enum BuildError {
  /// A required argument is still unset after defaults were applied.
  #[error("{resource} '{name}': required field `{field}` is not set")]
  Validation {
    resource: &'static str,
    name: String,
    field: &'static str,
  },

  /// Conflicting or uniqueness-violating settings.
  #[error("{resource} '{name}': {message}")]
  Configuration {
    resource: &'static str,
    name: String,
    message: String,
  },

  /// The configured naming or tagging strategy failed.
  #[error("strategy error: {0}")]
  Strategy(#[from] StrategyError),

  #[error("engine error: {0}")]
  Engine(#[from] EngineError),

  #[error("failed to serialize arguments: {0}")]
  Serialize(#[from] serde_json::Error),
}

impl BuildError {
  pub fn configuration(resource: &'static str, name: impl Into<String>, message: impl Into<String>) -> Self {
    BuildError::Configuration {
      resource,
      name: name.into(),
      message: message.into(),
    }
  }
}

/// The argument record of one resource type.
///
/// Serializes to the engine's input object. Each record knows where its
/// physical name and tags live and which of its fields are required.
pub trait Arguments: Serialize {
  /// Resource type token handed to the engine.
  const TYPE_TOKEN: &'static str;
  /// Human-readable kind used in errors and logs.
  const KIND: &'static str;

  fn name_slot(&mut self) -> &mut Option<String>;

  /// `None` for resource types that carry no tags.
  fn tags_slot(&mut self) -> Option<&mut Tags> {
    None
  }

  /// Input property name of the first required field left unset.
  fn missing_field(&self) -> Option<&'static str>;
}

/// Returns the first `(field, is_set)` pair whose value is unset.
pub fn first_missing(fields: &[(&'static str, bool)]) -> Option<&'static str> {
  fields.iter().find(|(_, is_set)| !is_set).map(|(field, _)| *field)
}

/// Overwrite a mutually exclusive choice, warning when it replaces a
/// different earlier choice. The last call always wins.
pub(crate) fn replace_choice<T: PartialEq + Debug>(
  kind: &'static str,
  name: &str,
  setting: &'static str,
  slot: &mut Option<T>,
  value: T,
) {
  if let Some(previous) = slot.as_ref() {
    if *previous != value {
      warn!(kind, name, setting, ?previous, next = ?value, "overriding earlier choice");
    }
  }
  *slot = Some(value);
}
