//! Environment variable abstraction for testability.
//!
//! Production code reads through [`Env::real()`]; tests build an
//! [`Env::mock()`] from explicit pairs so credential resolution can be
//! exercised without touching the process environment.

use std::collections::HashMap;

/// Environment variable reader.
#[derive(Clone, Debug)]
pub struct Env {
    overrides: Option<HashMap<String, String>>,
}

impl Env {
    /// Create an `Env` that reads from the real process environment.
    pub fn real() -> Self {
        Self { overrides: None }
    }

    /// Create an `Env` backed by explicit key-value pairs.
    pub fn mock(vars: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>) -> Self {
        Self {
            overrides: Some(
                vars.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// An `Env` with nothing set.
    pub fn empty() -> Self {
        Self::mock(Vec::<(String, String)>::new())
    }

    /// Look up a variable, treating blank values as unset.
    pub fn var(&self, name: &str) -> Option<String> {
        let value = match &self.overrides {
            Some(map) => map.get(name).cloned(),
            None => std::env::var(name).ok(),
        }?;
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    }

    /// Return the first non-blank value among `names`, in order.
    pub fn first_of(&self, names: &[&str]) -> Option<String> {
        names.iter().find_map(|name| self.var(name))
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::real()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_env_reads_cargo_manifest_dir() {
        assert!(Env::real().var("CARGO_MANIFEST_DIR").is_some());
    }

    #[test]
    fn mock_env_returns_set_values() {
        let env = Env::mock([("DIFFSCRIBE_MODEL", "gpt-4o")]);
        assert_eq!(env.var("DIFFSCRIBE_MODEL").as_deref(), Some("gpt-4o"));
        assert!(env.var("DIFFSCRIBE_API_KEY").is_none());
    }

    #[test]
    fn blank_values_count_as_unset() {
        let env = Env::mock([("OPENAI_API_KEY", "   ")]);
        assert!(env.var("OPENAI_API_KEY").is_none());
    }

    #[test]
    fn first_of_respects_order() {
        let env = Env::mock([("B", "second"), ("A", "first")]);
        assert_eq!(env.first_of(&["A", "B"]).as_deref(), Some("first"));
        assert_eq!(env.first_of(&["MISSING", "B"]).as_deref(), Some("second"));
        assert!(env.first_of(&["MISSING"]).is_none());
    }
}
