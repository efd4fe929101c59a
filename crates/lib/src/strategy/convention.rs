//! Stock strategies driven by [`StrategyConfig`](crate::config::StrategyConfig).

use super::types::{NamingStrategy, StrategyError, Tags, TaggingStrategy};

/// Joins an optional prefix and suffix around the token.
///
/// `ConventionNaming { prefix: Some("stz"), suffix: Some("dev"), .. }` turns
/// `vnet1` into `stz-vnet1-dev`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConventionNaming {
  pub prefix: Option<String>,
  pub suffix: Option<String>,
  pub separator: String,
  pub lowercase: bool,
  pub max_length: Option<usize>,
}

impl Default for ConventionNaming {
  fn default() -> Self {
    Self {
      prefix: None,
      suffix: None,
      separator: "-".to_string(),
      lowercase: true,
      max_length: None,
    }
  }
}

impl NamingStrategy for ConventionNaming {
  fn generate_name(&self, token: &str) -> Result<String, StrategyError> {
    if token.trim().is_empty() {
      return Err(StrategyError::EmptyToken);
    }

    let parts: Vec<&str> = [self.prefix.as_deref(), Some(token), self.suffix.as_deref()]
      .into_iter()
      .flatten()
      .filter(|part| !part.is_empty())
      .collect();

    let mut name = parts.join(&self.separator);
    if self.lowercase {
      name = name.to_lowercase();
    }

    if let Some(max) = self.max_length {
      if name.chars().count() > max {
        return Err(StrategyError::NameTooLong { name, max });
      }
    }

    Ok(name)
  }
}

/// Hands out a fixed set of base tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticTagging {
  pub tags: Tags,
}

impl StaticTagging {
  pub fn new(tags: Tags) -> Self {
    Self { tags }
  }
}

impl TaggingStrategy for StaticTagging {
  fn add_tags(&self, _existing: &Tags) -> Result<Tags, StrategyError> {
    if let Some(key) = self.tags.keys().find(|key| key.trim().is_empty()) {
      return Err(StrategyError::InvalidTagKey(key.clone()));
    }
    Ok(self.tags.clone())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  mod convention_naming {
    use super::*;

    #[test]
    fn default_passes_token_through_lowercased() {
      let naming = ConventionNaming::default();
      assert_eq!(naming.generate_name("VNet1").unwrap(), "vnet1");
    }

    #[test]
    fn prefix_and_suffix_are_joined() {
      let naming = ConventionNaming {
        prefix: Some("stz".to_string()),
        suffix: Some("dev".to_string()),
        ..Default::default()
      };
      assert_eq!(naming.generate_name("vnet1").unwrap(), "stz-vnet1-dev");
    }

    #[test]
    fn empty_segments_are_skipped() {
      let naming = ConventionNaming {
        prefix: Some(String::new()),
        suffix: Some("prod".to_string()),
        separator: "_".to_string(),
        ..Default::default()
      };
      assert_eq!(naming.generate_name("db").unwrap(), "db_prod");
    }

    #[test]
    fn case_is_kept_when_lowercase_is_off() {
      let naming = ConventionNaming {
        lowercase: false,
        ..Default::default()
      };
      assert_eq!(naming.generate_name("MyServer").unwrap(), "MyServer");
    }

    #[test]
    fn empty_token_is_rejected() {
      let naming = ConventionNaming::default();
      assert_eq!(naming.generate_name("  "), Err(StrategyError::EmptyToken));
    }

    #[test]
    fn overlong_name_is_rejected() {
      let naming = ConventionNaming {
        prefix: Some("platform".to_string()),
        max_length: Some(12),
        ..Default::default()
      };
      let err = naming.generate_name("cluster").unwrap_err();
      assert_eq!(
        err,
        StrategyError::NameTooLong {
          name: "platform-cluster".to_string(),
          max: 12,
        }
      );
    }
  }

  mod static_tagging {
    use super::*;

    #[test]
    fn returns_configured_tags() {
      let tagging = StaticTagging::new(Tags::from([("env".to_string(), "dev".to_string())]));
      let tags = tagging.add_tags(&Tags::new()).unwrap();
      assert_eq!(tags.get("env").map(String::as_str), Some("dev"));
    }

    #[test]
    fn blank_key_is_rejected() {
      let tagging = StaticTagging::new(Tags::from([(" ".to_string(), "x".to_string())]));
      assert!(matches!(
        tagging.add_tags(&Tags::new()),
        Err(StrategyError::InvalidTagKey(_))
      ));
    }
  }
}
