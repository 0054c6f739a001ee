use std::cell::{Cell, RefCell};

use indexmap::IndexMap;
use tracing::{debug, warn};

use databot_core::random::pick_index;
use databot_core::{
    BuildConfiguration, FieldMap, FieldSpec, Generator, PostBuildFn, RandomSource, SpecError,
    TraitSpec, Value, ValueMap,
};

use crate::errors::{BuildError, Result};

/// Active traits of one build call, merged left to right.
#[derive(Debug, Default)]
pub struct ResolvedTraits<'a> {
    specs: Vec<&'a TraitSpec>,
    overrides: IndexMap<&'a str, &'a FieldSpec>,
}

impl<'a> ResolvedTraits<'a> {
    /// Merged override for `key`; later traits win.
    pub fn override_for(&self, key: &str) -> Option<&'a FieldSpec> {
        self.overrides.get(key).copied()
    }

    pub fn overrides(&self) -> impl Iterator<Item = (&'a str, &'a FieldSpec)> + '_ {
        self.overrides.iter().map(|(key, spec)| (*key, *spec))
    }

    /// Post-build steps in trait order. Traits without one are skipped,
    /// which is the same as applying identity.
    pub fn post_builds(&self) -> impl Iterator<Item = &'a PostBuildFn> + '_ {
        self.specs.iter().copied().filter_map(TraitSpec::post_build)
    }
}

/// Expands field specs against one builder's counter and random source.
///
/// The sequence counter is shared by every sequence generator of the builder
/// and is advanced in field declaration order.
pub struct Expander<'a> {
    config: &'a BuildConfiguration,
    sequence: &'a Cell<u64>,
    random: &'a RefCell<Box<dyn RandomSource>>,
    strict_traits: bool,
}

impl<'a> Expander<'a> {
    pub fn new(
        config: &'a BuildConfiguration,
        sequence: &'a Cell<u64>,
        random: &'a RefCell<Box<dyn RandomSource>>,
        strict_traits: bool,
    ) -> Self {
        Self {
            config,
            sequence,
            random,
            strict_traits,
        }
    }

    /// Looks up the named traits and folds their overrides. Unknown names are
    /// reported and contribute nothing unless strict mode is on.
    pub fn resolve_traits(&self, names: &[&str]) -> Result<ResolvedTraits<'a>> {
        let config: &'a BuildConfiguration = self.config;
        let mut resolved = ResolvedTraits::default();
        for name in names {
            let Some(spec) = config.trait_spec(name) else {
                if self.strict_traits {
                    return Err(BuildError::UnknownTrait(name.to_string()));
                }
                warn!(trait_name = %name, "Warning: trait '{name}' not found.");
                continue;
            };
            for (key, override_spec) in spec.overrides() {
                resolved.overrides.insert(key.as_str(), override_spec);
            }
            resolved.specs.push(spec);
        }
        Ok(resolved)
    }

    /// Expands every base field. The effective spec of a key is the call-time
    /// override, else the merged trait override, else the base spec.
    pub fn expand_fields(
        &self,
        overrides: &FieldMap,
        traits: &ResolvedTraits<'a>,
    ) -> Result<ValueMap> {
        let fields = self.config.fields();
        let mut result = ValueMap::with_capacity(fields.len());
        for (key, base) in fields {
            let spec = overrides
                .get(key)
                .or_else(|| traits.override_for(key))
                .unwrap_or(base);
            result.insert(key.clone(), self.expand_field(spec)?);
        }

        for key in overrides.keys() {
            if !fields.contains_key(key) && traits.override_for(key).is_none() {
                debug!(field = %key, "override ignored: no such field");
            }
        }

        Ok(result)
    }

    /// Adds fields that active traits define but the base fields do not.
    pub fn inject_trait_fields(
        &self,
        result: &mut ValueMap,
        overrides: &FieldMap,
        traits: &ResolvedTraits<'a>,
    ) -> Result<()> {
        let fields = self.config.fields();
        for (key, trait_spec) in traits.overrides() {
            if fields.contains_key(key) {
                continue;
            }
            let spec = overrides.get(key).unwrap_or(trait_spec);
            result.insert(key.to_string(), self.expand_field(spec)?);
        }
        Ok(())
    }

    /// Resolves one spec to a concrete value.
    ///
    /// Literals (including null, undefined and dates) come back unchanged;
    /// generator results are never expanded again.
    pub fn expand_field(&self, spec: &FieldSpec) -> Result<Value> {
        match spec {
            FieldSpec::Generator(generator) => self.run_generator(generator),
            FieldSpec::List(items) => items
                .iter()
                .map(|item| self.expand_field(item))
                .collect::<Result<Vec<_>>>()
                .map(Value::List),
            FieldSpec::Literal(value) => Ok(value.clone()),
            FieldSpec::Nested(members) => self.expand_members(members).map(Value::Object),
        }
    }

    fn expand_members(&self, members: &FieldMap) -> Result<ValueMap> {
        members
            .iter()
            .map(|(key, spec)| -> Result<(String, Value)> {
                Ok((key.clone(), self.expand_field(spec)?))
            })
            .collect()
    }

    fn run_generator(&self, generator: &Generator) -> Result<Value> {
        match generator {
            Generator::Sequence(map) => {
                let counter = self.sequence.get() + 1;
                self.sequence.set(counter);
                Ok(match map {
                    Some(map) => map(counter),
                    None => Value::from(counter),
                })
            }
            Generator::OneOf(options) => {
                if options.is_empty() {
                    return Err(SpecError::InvalidSpecification(
                        "oneOf requires at least one option".to_string(),
                    )
                    .into());
                }
                let unit = self.random.borrow_mut().next_unit();
                Ok(options[pick_index(unit, options.len())].clone())
            }
            Generator::PerBuild(produce) => Ok(produce()),
            Generator::Fake(produce) => {
                let mut random = self.random.borrow_mut();
                Ok(produce(random.rng()))
            }
        }
    }
}
