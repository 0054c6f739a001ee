use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::error::Result;
use crate::spec::{FieldMap, FieldSpec};
use crate::value::Value;

/// Transform applied to a fully expanded object.
pub type PostBuildFn = Rc<dyn Fn(Value) -> Value>;

/// Named variant: partial overrides plus an optional post-build step.
#[derive(Clone, Default)]
pub struct TraitSpec {
    overrides: FieldMap,
    post_build: Option<PostBuildFn>,
}

impl TraitSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_override(mut self, key: impl Into<String>, spec: impl Into<FieldSpec>) -> Self {
        self.overrides.insert(key.into(), spec.into());
        self
    }

    pub fn with_post_build<F>(mut self, f: F) -> Self
    where
        F: Fn(Value) -> Value + 'static,
    {
        self.post_build = Some(Rc::new(f));
        self
    }

    pub fn overrides(&self) -> &FieldMap {
        &self.overrides
    }

    pub fn post_build(&self) -> Option<&PostBuildFn> {
        self.post_build.as_ref()
    }
}

impl fmt::Debug for TraitSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TraitSpec")
            .field("overrides", &self.overrides)
            .field("post_build", &self.post_build.is_some())
            .finish()
    }
}

/// Declarative description of a factory: base fields, traits and the
/// configuration-level post-build step.
///
/// Assembled once with the `with_*` methods and then handed to a builder,
/// which only ever reads it.
#[derive(Clone, Default)]
pub struct BuildConfiguration {
    name: Option<String>,
    fields: FieldMap,
    traits: IndexMap<String, TraitSpec>,
    post_build: Option<PostBuildFn>,
}

impl BuildConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Factory name, only used to label diagnostics.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn field(mut self, key: impl Into<String>, spec: impl Into<FieldSpec>) -> Self {
        self.fields.insert(key.into(), spec.into());
        self
    }

    pub fn with_trait(mut self, name: impl Into<String>, spec: TraitSpec) -> Self {
        self.traits.insert(name.into(), spec);
        self
    }

    pub fn with_post_build<F>(mut self, f: F) -> Self
    where
        F: Fn(Value) -> Value + 'static,
    {
        self.post_build = Some(Rc::new(f));
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    pub fn traits(&self) -> &IndexMap<String, TraitSpec> {
        &self.traits
    }

    pub fn trait_spec(&self, name: &str) -> Option<&TraitSpec> {
        self.traits.get(name)
    }

    pub fn post_build(&self) -> Option<&PostBuildFn> {
        self.post_build.as_ref()
    }

    /// Validates base fields and every trait's overrides.
    pub fn validate(&self) -> Result<()> {
        for (key, spec) in &self.fields {
            spec.validate(key)?;
        }
        for (trait_name, spec) in &self.traits {
            for (key, override_spec) in spec.overrides() {
                override_spec.validate(&format!("traits.{trait_name}.{key}"))?;
            }
        }
        Ok(())
    }

    pub(crate) fn from_parts(
        name: Option<String>,
        fields: FieldMap,
        traits: IndexMap<String, TraitSpec>,
    ) -> Self {
        Self {
            name,
            fields,
            traits,
            post_build: None,
        }
    }
}

impl fmt::Debug for BuildConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildConfiguration")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .field("traits", &self.traits)
            .field("post_build", &self.post_build.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SpecError;
    use crate::spec::{one_of, sequence};

    #[test]
    fn fields_keep_declaration_order() {
        let config = BuildConfiguration::new()
            .field("z", sequence())
            .field("a", "x")
            .field("m", 1);
        let keys: Vec<&str> = config.fields().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn validate_checks_trait_overrides() {
        let config = BuildConfiguration::new().field("colour", "red").with_trait(
            "broken",
            TraitSpec::new().with_override("colour", one_of(Vec::<&str>::new())),
        );
        let err = config.validate().expect_err("empty options in trait");
        assert!(matches!(err, SpecError::InvalidSpecification(message)
            if message.contains("traits.broken.colour")));
    }
}
