//! Loading field specifications from JSON documents.
//!
//! Plain JSON becomes literal/list/nested specs. Two reserved object shapes
//! carry extra meaning:
//!
//! - `{"$date": "2020-01-01T00:00:00Z"}` is a date literal.
//! - `{"$generator": "<kind>", ...}` is a generator: `sequence` (optional
//!   `template`, `{n}` is replaced by the counter), `oneOf` (`options`),
//!   `bool`, `perBuild` (`value`, copied fresh per build) and `fake`
//!   (`faker`, optional `locale`).

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Value as Json};

use crate::config::{BuildConfiguration, TraitSpec};
use crate::error::{Result, SpecError};
use crate::spec::{
    FieldMap, FieldSpec, boolean, faker_in, one_of, per_build, sequence, sequence_with,
};
use crate::value::Value;

const GENERATOR_KEY: &str = "$generator";
const DATE_KEY: &str = "$date";
const SEQUENCE_PLACEHOLDER: &str = "{n}";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigDocument {
    #[serde(default)]
    name: Option<String>,
    fields: Map<String, Json>,
    #[serde(default)]
    traits: IndexMap<String, TraitDocument>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TraitDocument {
    #[serde(default)]
    overrides: Map<String, Json>,
}

impl FieldSpec {
    /// Parses a JSON field specification.
    pub fn from_json(value: &Json) -> Result<FieldSpec> {
        parse_spec(value, "$")
    }
}

impl BuildConfiguration {
    /// Parses a configuration document:
    /// `{"name"?, "fields": {...}, "traits"?: {"<trait>": {"overrides": {...}}}}`.
    ///
    /// Post-build steps cannot be expressed in JSON; attach them afterwards
    /// with [`BuildConfiguration::with_post_build`].
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let document: Json = serde_json::from_str(raw)?;
        Self::from_json(&document)
    }

    pub fn from_json(value: &Json) -> Result<Self> {
        let document = ConfigDocument::deserialize(value)?;
        let fields = parse_members(&document.fields, "fields")?;

        let mut traits = IndexMap::new();
        for (trait_name, trait_document) in document.traits {
            let overrides =
                parse_members(&trait_document.overrides, &format!("traits.{trait_name}"))?;
            let spec = overrides
                .into_iter()
                .fold(TraitSpec::new(), |spec, (key, field)| {
                    spec.with_override(key, field)
                });
            traits.insert(trait_name, spec);
        }

        let config = BuildConfiguration::from_parts(document.name, fields, traits);
        config.validate()?;
        Ok(config)
    }
}

fn parse_members(members: &Map<String, Json>, path: &str) -> Result<FieldMap> {
    members
        .iter()
        .map(|(key, value)| -> Result<(String, FieldSpec)> {
            Ok((key.clone(), parse_spec(value, &format!("{path}.{key}"))?))
        })
        .collect()
}

fn parse_spec(value: &Json, path: &str) -> Result<FieldSpec> {
    match value {
        Json::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| parse_spec(item, &format!("{path}[{index}]")))
            .collect::<Result<Vec<_>>>()
            .map(FieldSpec::List),
        Json::Object(object) => {
            if let Some(tag) = object.get(GENERATOR_KEY) {
                let tag = tag
                    .as_str()
                    .ok_or_else(|| invalid(path, "generator tag must be a string"))?;
                return parse_generator(tag, object, path);
            }
            if object.contains_key(DATE_KEY) {
                return parse_date(object, path).map(|date| FieldSpec::Literal(Value::Date(date)));
            }
            parse_members(object, path).map(FieldSpec::Nested)
        }
        scalar => Ok(FieldSpec::Literal(Value::from(scalar.clone()))),
    }
}

fn parse_generator(tag: &str, object: &Map<String, Json>, path: &str) -> Result<FieldSpec> {
    match tag {
        "sequence" => {
            expect_keys(object, &["template"], path)?;
            match object.get("template") {
                None => Ok(sequence()),
                Some(Json::String(template)) => {
                    let template = template.clone();
                    Ok(sequence_with(move |counter| {
                        template.replace(SEQUENCE_PLACEHOLDER, &counter.to_string())
                    }))
                }
                Some(_) => Err(invalid(path, "sequence template must be a string")),
            }
        }
        "oneOf" => {
            expect_keys(object, &["options"], path)?;
            let options = object
                .get("options")
                .and_then(Json::as_array)
                .ok_or_else(|| invalid(path, "oneOf requires an options array"))?;
            if options.is_empty() {
                return Err(invalid(path, "oneOf requires at least one option"));
            }
            let options = options
                .iter()
                .map(|option| parse_literal(option, path))
                .collect::<Result<Vec<_>>>()?;
            Ok(one_of(options))
        }
        "bool" => {
            expect_keys(object, &[], path)?;
            Ok(boolean())
        }
        "perBuild" => {
            expect_keys(object, &["value"], path)?;
            let template = match object.get("value") {
                Some(value) => parse_literal(value, path)?,
                None => Value::Undefined,
            };
            Ok(per_build(move || template.clone()))
        }
        "fake" => {
            expect_keys(object, &["faker", "locale"], path)?;
            let id = object
                .get("faker")
                .and_then(Json::as_str)
                .ok_or_else(|| invalid(path, "fake requires a faker id"))?;
            let locale = match object.get("locale") {
                None => None,
                Some(Json::String(locale)) => Some(locale.as_str()),
                Some(_) => return Err(invalid(path, "fake locale must be a string")),
            };
            faker_in(id, locale)
        }
        other => Err(SpecError::UnsupportedGeneratorKind(other.to_string())),
    }
}

/// Converts JSON to a plain value, honouring `$date` objects.
fn parse_literal(value: &Json, path: &str) -> Result<Value> {
    match value {
        Json::Array(items) => items
            .iter()
            .map(|item| parse_literal(item, path))
            .collect::<Result<Vec<_>>>()
            .map(Value::List),
        Json::Object(object) if object.contains_key(DATE_KEY) => {
            parse_date(object, path).map(Value::Date)
        }
        Json::Object(object) => object
            .iter()
            .map(|(key, member)| -> Result<(String, Value)> {
                Ok((key.clone(), parse_literal(member, path)?))
            })
            .collect::<Result<IndexMap<_, _>>>()
            .map(Value::Object),
        scalar => Ok(Value::from(scalar.clone())),
    }
}

fn parse_date(object: &Map<String, Json>, path: &str) -> Result<DateTime<Utc>> {
    if object.len() != 1 {
        return Err(invalid(path, "$date objects take no other keys"));
    }
    let raw = object
        .get(DATE_KEY)
        .and_then(Json::as_str)
        .ok_or_else(|| invalid(path, "$date must be a string"))?;
    DateTime::parse_from_rfc3339(raw)
        .map(|date| date.with_timezone(&Utc))
        .map_err(|err| invalid(path, &format!("invalid $date '{raw}': {err}")))
}

fn expect_keys(object: &Map<String, Json>, allowed: &[&str], path: &str) -> Result<()> {
    match object
        .keys()
        .find(|key| key.as_str() != GENERATOR_KEY && !allowed.contains(&key.as_str()))
    {
        Some(key) => Err(invalid(path, &format!("unexpected generator key '{key}'"))),
        None => Ok(()),
    }
}

fn invalid(path: &str, message: &str) -> SpecError {
    SpecError::InvalidSpecification(format!("{path}: {message}"))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::spec::Generator;

    #[test]
    fn scalars_become_literals() {
        let spec = FieldSpec::from_json(&json!(null)).expect("parse");
        assert!(matches!(spec, FieldSpec::Literal(Value::Null)));
        let spec = FieldSpec::from_json(&json!(1.5)).expect("parse");
        assert!(matches!(spec, FieldSpec::Literal(Value::Float(v)) if v == 1.5));
    }

    #[test]
    fn unknown_generator_tag_is_unsupported() {
        let err = FieldSpec::from_json(&json!({"$generator": "uuid"})).expect_err("unknown tag");
        assert!(matches!(err, SpecError::UnsupportedGeneratorKind(tag) if tag == "uuid"));
    }

    #[test]
    fn unexpected_generator_keys_are_rejected() {
        let err = FieldSpec::from_json(&json!({"$generator": "sequence", "step": 2}))
            .expect_err("unknown key");
        assert!(matches!(err, SpecError::InvalidSpecification(_)));
    }

    #[test]
    fn date_objects_become_date_literals() {
        let spec = FieldSpec::from_json(&json!({"$date": "2020-01-01T10:00:00+02:00"}))
            .expect("parse");
        match spec {
            FieldSpec::Literal(Value::Date(date)) => {
                assert_eq!(date.to_rfc3339(), "2020-01-01T08:00:00+00:00");
            }
            other => panic!("unexpected spec {other:?}"),
        }
    }

    #[test]
    fn one_of_options_keep_their_order() {
        let spec = FieldSpec::from_json(&json!({"$generator": "oneOf", "options": ["a", 1, true]}))
            .expect("parse");
        match spec {
            FieldSpec::Generator(Generator::OneOf(options)) => assert_eq!(
                options,
                vec![Value::from("a"), Value::Int(1), Value::Bool(true)]
            ),
            other => panic!("unexpected spec {other:?}"),
        }
    }
}
