//! Immutable snapshot of environment variables

use std::collections::HashMap;
use std::env;
use std::sync::Arc;

/// Variable name to raw value mapping, captured once and never mutated.
///
/// Cloning is cheap; clones share the same captured table.
#[derive(Debug, Clone, Default)]
pub struct EnvSnapshot {
    vars: Arc<HashMap<String, String>>,
}

impl EnvSnapshot {
    /// Capture the current process environment.
    ///
    /// Entries whose name or value is not valid UTF-8 are skipped.
    pub fn from_process() -> Self {
        let mut vars = HashMap::new();
        for (name, value) in env::vars_os() {
            match (name.into_string(), value.into_string()) {
                (Ok(name), Ok(value)) => {
                    vars.insert(name, value);
                }
                (Ok(name), Err(_)) => {
                    tracing::debug!(
                        name = %name,
                        "skipping environment variable with non UTF-8 value"
                    );
                }
                (Err(name), _) => {
                    tracing::debug!(
                        name = ?name,
                        "skipping environment variable with non UTF-8 name"
                    );
                }
            }
        }
        Self::from_map(vars)
    }

    /// Build a snapshot from `(name, value)` pairs.
    ///
    /// Intended for tests and for callers that assemble their own environment.
    pub fn from_vars<K, V>(vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::from_map(
            vars.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }

    fn from_map(vars: HashMap<String, String>) -> Self {
        Self {
            vars: Arc::new(vars),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvSnapshot {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_vars(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_from_vars() {
        let snapshot = EnvSnapshot::from_vars([("DB_USER", "alice"), ("EMPTY", "")]);
        assert_eq!(snapshot.get("DB_USER"), Some("alice"));
        assert_eq!(snapshot.get("EMPTY"), Some(""));
        assert_eq!(snapshot.get("MISSING"), None);
        assert_eq!(snapshot.len(), 2);
    }

    #[test]
    #[serial]
    fn test_from_process_is_a_snapshot() {
        env::set_var("ENVBIND_SNAPSHOT_TEST", "before");
        let snapshot = EnvSnapshot::from_process();
        env::set_var("ENVBIND_SNAPSHOT_TEST", "after");

        assert_eq!(snapshot.get("ENVBIND_SNAPSHOT_TEST"), Some("before"));

        env::remove_var("ENVBIND_SNAPSHOT_TEST");
    }

    #[test]
    fn test_clones_share_table() {
        let snapshot: EnvSnapshot = [("A", "1")].into_iter().collect();
        let clone = snapshot.clone();
        assert!(Arc::ptr_eq(&snapshot.vars, &clone.vars));
        assert!(clone.contains("A"));
    }
}
