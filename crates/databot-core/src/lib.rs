//! Core contracts for databot.
//!
//! This crate defines the field specification model, the concrete value tree
//! produced by expansion, the injectable randomness source and the fake-data
//! catalog shared by the builder and the declarative loader.

pub mod config;
pub mod declarative;
pub mod error;
pub mod faker;
pub mod random;
pub mod spec;
pub mod value;

pub use config::{BuildConfiguration, PostBuildFn, TraitSpec};
pub use error::{Result, SpecError};
pub use faker::{FakerCatalog, LocaleKey};
pub use random::{FixedRandom, RandomSource, SeededRandom};
pub use spec::{
    FieldMap, FieldSpec, Generator, boolean, fake, faker, faker_in, list, nested, one_of, per_build,
    sequence, sequence_with,
};
pub use value::{Value, ValueMap};
