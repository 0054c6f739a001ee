use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use databot_core::{FieldMap, FieldSpec, PostBuildFn, Value};

use crate::errors::Result;

/// Options applied when a builder is created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildOptions {
    /// Seed for the default random source; entropy-seeded when absent.
    pub seed: Option<u64>,
    /// Treat a reference to an undefined trait as an error instead of a warning.
    pub strict_traits: bool,
}

impl BuildOptions {
    /// Parses options from a TOML document.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }
}

/// Trait selection for one build call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TraitSelection {
    #[default]
    None,
    One(String),
    Many(Vec<String>),
}

impl TraitSelection {
    /// Ordered trait names: a single name becomes a singleton list.
    pub fn names(&self) -> Vec<&str> {
        match self {
            TraitSelection::None => Vec::new(),
            TraitSelection::One(name) => vec![name.as_str()],
            TraitSelection::Many(names) => names.iter().map(String::as_str).collect(),
        }
    }
}

impl From<&str> for TraitSelection {
    fn from(name: &str) -> Self {
        TraitSelection::One(name.to_string())
    }
}

impl From<String> for TraitSelection {
    fn from(name: String) -> Self {
        TraitSelection::One(name)
    }
}

impl<S: Into<String>> From<Vec<S>> for TraitSelection {
    fn from(names: Vec<S>) -> Self {
        TraitSelection::Many(names.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for TraitSelection {
    fn from(names: [S; N]) -> Self {
        TraitSelection::Many(names.into_iter().map(Into::into).collect())
    }
}

/// Per-call configuration: overrides, traits and a final map.
#[derive(Clone, Default)]
pub struct BuildTimeConfig {
    pub(crate) overrides: FieldMap,
    pub(crate) traits: TraitSelection,
    pub(crate) map: Option<PostBuildFn>,
}

impl BuildTimeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the spec of `key` for this call only.
    pub fn with_override(mut self, key: impl Into<String>, spec: impl Into<FieldSpec>) -> Self {
        self.overrides.insert(key.into(), spec.into());
        self
    }

    pub fn with_traits(mut self, traits: impl Into<TraitSelection>) -> Self {
        self.traits = traits.into();
        self
    }

    /// Final transform, applied after every post-build step.
    pub fn with_map<F>(mut self, f: F) -> Self
    where
        F: Fn(Value) -> Value + 'static,
    {
        self.map = Some(Rc::new(f));
        self
    }

    pub fn overrides(&self) -> &FieldMap {
        &self.overrides
    }

    pub fn traits(&self) -> &TraitSelection {
        &self.traits
    }
}

impl fmt::Debug for BuildTimeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildTimeConfig")
            .field("overrides", &self.overrides)
            .field("traits", &self.traits)
            .field("map", &self.map.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::BuildError;

    #[test]
    fn options_parse_from_toml() {
        let options = BuildOptions::from_toml_str("seed = 42\nstrict_traits = true\n")
            .expect("parse options");
        assert_eq!(
            options,
            BuildOptions {
                seed: Some(42),
                strict_traits: true
            }
        );
        assert_eq!(
            BuildOptions::from_toml_str("").expect("empty options"),
            BuildOptions::default()
        );
    }

    #[test]
    fn options_reject_unknown_keys() {
        let err = BuildOptions::from_toml_str("sead = 1").expect_err("typo");
        assert!(matches!(err, BuildError::Options(_)));
    }

    #[test]
    fn trait_selection_normalizes_to_list() {
        assert!(TraitSelection::None.names().is_empty());
        assert_eq!(TraitSelection::from("admin").names(), vec!["admin"]);
        assert_eq!(
            TraitSelection::from(["alice", "bob"]).names(),
            vec!["alice", "bob"]
        );
    }
}
