use std::cell::{Cell, RefCell};
use std::fmt;

use serde::de::DeserializeOwned;
use tracing::debug;

use databot_core::{BuildConfiguration, RandomSource, SeededRandom, Value};

use crate::engine::Expander;
use crate::errors::Result;
use crate::model::{BuildOptions, BuildTimeConfig};

const ANONYMOUS_FACTORY: &str = "anonymous";

/// Reusable fixture factory.
///
/// Owns the configuration, a sequence counter shared by all of its sequence
/// generators and the random source used by `oneOf` and fake-data
/// generators. The counter lives in a [`Cell`], so a builder is neither
/// `Send` nor `Sync`: parallel tests must each create their own.
pub struct Builder {
    config: BuildConfiguration,
    options: BuildOptions,
    sequence: Cell<u64>,
    random: RefCell<Box<dyn RandomSource>>,
}

impl Builder {
    pub fn new(config: BuildConfiguration) -> Result<Self> {
        Self::with_options(config, BuildOptions::default())
    }

    /// Validates `config` (every `oneOf` needs options) and applies `options`.
    pub fn with_options(config: BuildConfiguration, options: BuildOptions) -> Result<Self> {
        config.validate()?;
        let random = match options.seed {
            Some(seed) => SeededRandom::new(seed),
            None => SeededRandom::from_entropy(),
        };
        Ok(Self {
            config,
            options,
            sequence: Cell::new(0),
            random: RefCell::new(Box::new(random)),
        })
    }

    /// Replaces the random source.
    pub fn with_random(self, random: impl RandomSource + 'static) -> Self {
        Self {
            random: RefCell::new(Box::new(random)),
            ..self
        }
    }

    pub fn config(&self) -> &BuildConfiguration {
        &self.config
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Last emitted sequence value; 0 before the first build or after a reset.
    pub fn sequence_value(&self) -> u64 {
        self.sequence.get()
    }

    pub fn build(&self) -> Result<Value> {
        self.build_with(&BuildTimeConfig::default())
    }

    /// Builds one object.
    ///
    /// Stages: base fields with overrides and traits resolved, trait-only
    /// fields, trait post-builds in trait order, the configuration's
    /// post-build, then the call-time map. Any failing field aborts the
    /// whole build.
    pub fn build_with(&self, build: &BuildTimeConfig) -> Result<Value> {
        for (key, spec) in build.overrides() {
            spec.validate(key)?;
        }

        let trait_names = build.traits().names();
        let expander = Expander::new(
            &self.config,
            &self.sequence,
            &self.random,
            self.options.strict_traits,
        );
        let traits = expander.resolve_traits(&trait_names)?;

        let mut fields = expander.expand_fields(build.overrides(), &traits)?;
        expander.inject_trait_fields(&mut fields, build.overrides(), &traits)?;

        let after_traits = traits
            .post_builds()
            .fold(Value::Object(fields), |value, post_build| post_build(value));
        let after_post_build = match self.config.post_build() {
            Some(post_build) => post_build(after_traits),
            None => after_traits,
        };
        let result = match &build.map {
            Some(map) => map(after_post_build),
            None => after_post_build,
        };

        debug!(
            factory = self.config.name().unwrap_or(ANONYMOUS_FACTORY),
            traits = ?trait_names,
            sequence = self.sequence.get(),
            "fixture built"
        );
        Ok(result)
    }

    /// Builds and deserializes into `T` through its JSON form.
    pub fn build_as<T: DeserializeOwned>(&self, build: &BuildTimeConfig) -> Result<T> {
        let value = self.build_with(build)?;
        Ok(serde_json::from_value(value.to_json())?)
    }

    /// Builds `count` independent objects; each build advances the sequence.
    pub fn many(&self, count: usize, build: &BuildTimeConfig) -> Result<Vec<Value>> {
        (0..count).map(|_| self.build_with(build)).collect()
    }

    /// Restarts the sequence so the next build emits 1 again.
    pub fn reset(&self) {
        self.sequence.set(0);
    }
}

impl fmt::Debug for Builder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder")
            .field("config", &self.config)
            .field("options", &self.options)
            .field("sequence", &self.sequence.get())
            .finish_non_exhaustive()
    }
}
