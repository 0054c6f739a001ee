//! Fixture builder for test suites.
//!
//! A [`Builder`] wraps a [`BuildConfiguration`] and, on every call, expands
//! its field specifications into a fresh [`Value`] tree, applying call-time
//! overrides, traits, post-build steps and the call-time map.

pub mod builder;
pub mod engine;
pub mod errors;
pub mod model;

pub use builder::Builder;
pub use engine::{Expander, ResolvedTraits};
pub use errors::{BuildError, Result};
pub use model::{BuildOptions, BuildTimeConfig, TraitSelection};

pub use databot_core::{
    BuildConfiguration, FieldMap, FieldSpec, FixedRandom, Generator, RandomSource, SeededRandom,
    SpecError, TraitSpec, Value, ValueMap, boolean, fake, faker, faker_in, list, nested, one_of,
    per_build, sequence, sequence_with,
};
