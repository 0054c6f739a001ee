//! Field specification model.
//!
//! A [`FieldSpec`] describes how one field's value is produced: a literal, a
//! [`Generator`] evaluated at expansion time, or a nested list/object of
//! further specs.

use std::fmt;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use rand::RngCore;

use crate::error::{Result, SpecError};
use crate::faker::FakerCatalog;
use crate::value::{Value, ValueMap};

/// Ordered field name → spec mapping.
pub type FieldMap = IndexMap<String, FieldSpec>;

pub type SequenceFn = Rc<dyn Fn(u64) -> Value>;
pub type PerBuildFn = Rc<dyn Fn() -> Value>;
pub type FakeFn = Rc<dyn Fn(&mut dyn RngCore) -> Value>;

/// Generator kinds evaluated on every expansion.
#[derive(Clone)]
pub enum Generator {
    /// Reads the builder's pre-incremented counter; `None` yields the counter.
    Sequence(Option<SequenceFn>),
    /// Uniform pick from a fixed list of options.
    OneOf(Vec<Value>),
    /// Fresh value from a zero-argument function.
    PerBuild(PerBuildFn),
    /// Fresh value from a closure handed the builder's fake-data generator.
    Fake(FakeFn),
}

impl Generator {
    pub fn kind(&self) -> &'static str {
        match self {
            Generator::Sequence(_) => "sequence",
            Generator::OneOf(_) => "oneOf",
            Generator::PerBuild(_) => "perBuild",
            Generator::Fake(_) => "fake",
        }
    }
}

impl fmt::Debug for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Generator::OneOf(options) => f.debug_tuple("OneOf").field(options).finish(),
            other => write!(f, "{}(..)", other.kind()),
        }
    }
}

#[derive(Debug, Clone)]
pub enum FieldSpec {
    Literal(Value),
    Generator(Generator),
    List(Vec<FieldSpec>),
    Nested(FieldMap),
}

impl FieldSpec {
    pub fn is_generator(&self) -> bool {
        matches!(self, FieldSpec::Generator(_))
    }

    /// Checks every `oneOf` in the tree has at least one option.
    pub fn validate(&self, path: &str) -> Result<()> {
        match self {
            FieldSpec::Generator(Generator::OneOf(options)) if options.is_empty() => {
                Err(SpecError::InvalidSpecification(format!(
                    "{path}: oneOf requires at least one option"
                )))
            }
            FieldSpec::Literal(_) | FieldSpec::Generator(_) => Ok(()),
            FieldSpec::List(items) => items
                .iter()
                .enumerate()
                .try_for_each(|(index, item)| item.validate(&format!("{path}[{index}]"))),
            FieldSpec::Nested(members) => members
                .iter()
                .try_for_each(|(key, member)| member.validate(&format!("{path}.{key}"))),
        }
    }
}

impl From<Value> for FieldSpec {
    fn from(value: Value) -> Self {
        FieldSpec::Literal(value)
    }
}

impl From<Generator> for FieldSpec {
    fn from(generator: Generator) -> Self {
        FieldSpec::Generator(generator)
    }
}

impl From<FieldMap> for FieldSpec {
    fn from(members: FieldMap) -> Self {
        FieldSpec::Nested(members)
    }
}

impl From<Vec<FieldSpec>> for FieldSpec {
    fn from(items: Vec<FieldSpec>) -> Self {
        FieldSpec::List(items)
    }
}

impl From<ValueMap> for FieldSpec {
    fn from(members: ValueMap) -> Self {
        FieldSpec::Literal(Value::Object(members))
    }
}

macro_rules! literal_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FieldSpec {
                fn from(value: $ty) -> Self {
                    FieldSpec::Literal(Value::from(value))
                }
            }
        )*
    };
}

literal_from!(
    i8, i16, i32, i64, u8, u16, u32, u64, usize, f32, f64, bool, &str, String, &String,
    DateTime<Utc>
);

impl<T: Into<Value>> From<Option<T>> for FieldSpec {
    fn from(value: Option<T>) -> Self {
        FieldSpec::Literal(value.into())
    }
}

/// Sequence generator emitting the counter itself.
pub fn sequence() -> FieldSpec {
    FieldSpec::Generator(Generator::Sequence(None))
}

/// Sequence generator mapping the counter through `f`.
pub fn sequence_with<F, V>(f: F) -> FieldSpec
where
    F: Fn(u64) -> V + 'static,
    V: Into<Value>,
{
    FieldSpec::Generator(Generator::Sequence(Some(Rc::new(move |counter| {
        f(counter).into()
    }))))
}

/// Picks one of `options` on every expansion. An empty list is rejected when
/// the owning builder is created or, for call-time overrides, when expanded.
pub fn one_of<I, V>(options: I) -> FieldSpec
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    FieldSpec::Generator(Generator::OneOf(
        options.into_iter().map(Into::into).collect(),
    ))
}

/// Shortcut for `one_of([true, false])`.
pub fn boolean() -> FieldSpec {
    one_of([true, false])
}

pub fn per_build<F, V>(f: F) -> FieldSpec
where
    F: Fn() -> V + 'static,
    V: Into<Value>,
{
    FieldSpec::Generator(Generator::PerBuild(Rc::new(move || f().into())))
}

/// Fake-data generator; `f` receives the builder's RNG, ready for
/// `fake::Fake::fake_with_rng`.
pub fn fake<F, V>(f: F) -> FieldSpec
where
    F: Fn(&mut dyn RngCore) -> V + 'static,
    V: Into<Value>,
{
    FieldSpec::Generator(Generator::Fake(Rc::new(move |rng| f(rng).into())))
}

/// Fake-data generator backed by a catalog id such as `name.first_name`.
pub fn faker(id: &str) -> Result<FieldSpec> {
    faker_in(id, None)
}

pub fn faker_in(id: &str, locale: Option<&str>) -> Result<FieldSpec> {
    let faker = FakerCatalog::resolve(id, locale)?;
    Ok(FieldSpec::Generator(Generator::Fake(Rc::new(move |rng| {
        faker.generate(rng)
    }))))
}

pub fn list<I, S>(items: I) -> FieldSpec
where
    I: IntoIterator<Item = S>,
    S: Into<FieldSpec>,
{
    FieldSpec::List(items.into_iter().map(Into::into).collect())
}

pub fn nested<I, K, S>(entries: I) -> FieldSpec
where
    I: IntoIterator<Item = (K, S)>,
    K: Into<String>,
    S: Into<FieldSpec>,
{
    FieldSpec::Nested(
        entries
            .into_iter()
            .map(|(key, spec)| (key.into(), spec.into()))
            .collect(),
    )
}
