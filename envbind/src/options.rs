//! Parser configuration

use serde::Deserialize;

/// Separator used when a declaration does not name one
pub const DEFAULT_SEPARATOR: &str = ",";

/// What the parser does when a member fails to bind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// Log the failure, leave the member untouched and continue.
    #[default]
    Silent,
    /// Abort the whole parse with the first failure.
    Strict,
}

/// Options fixed for the lifetime of an [`EnvParser`](crate::EnvParser).
///
/// Deserializable so host applications can embed it in their own
/// configuration:
///
/// ```
/// use envbind::{ParserOptions, Policy};
///
/// let options: ParserOptions = serde_json::from_str(r#"{ "policy": "strict" }"#).unwrap();
/// assert_eq!(options.policy, Policy::Strict);
/// assert_eq!(options.default_separator, ",");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParserOptions {
    pub policy: Policy,
    pub default_separator: String,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            policy: Policy::default(),
            default_separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

impl ParserOptions {
    pub fn strict() -> Self {
        Self {
            policy: Policy::Strict,
            ..Self::default()
        }
    }

    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_default_separator(mut self, separator: impl Into<String>) -> Self {
        self.default_separator = separator.into();
        self
    }
}
