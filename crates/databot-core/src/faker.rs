//! Catalog of `fake` fakers addressable by string id.
//!
//! Used by [`crate::spec::faker`] and by declarative `{"$generator": "fake"}`
//! specs, where a closure cannot be written.

use std::fmt;

use fake::Fake;
use fake::faker::address::raw::{CityName, CountryName, StreetName, ZipCode};
use fake::faker::chrono::raw::DateTime as FakeDateTime;
use fake::faker::company::raw::CompanyName;
use fake::faker::internet::raw::{FreeEmail, SafeEmail, Username};
use fake::faker::lorem::raw::{Sentence, Word};
use fake::faker::name::raw::{FirstName, LastName, Name};
use fake::faker::phone_number::raw::PhoneNumber;
use fake::locales::{EN, PT_BR};
use rand::RngCore;

use crate::error::{Result, SpecError};
use crate::value::Value;

const DEFAULT_LOCALE: LocaleKey = LocaleKey::EnUs;

/// Sorted list of supported faker ids.
const FAKER_IDS: &[&str] = &[
    "address.city",
    "address.country",
    "address.street",
    "address.zip",
    "chrono.date_time",
    "company.name",
    "internet.free_email",
    "internet.safe_email",
    "internet.username",
    "lorem.sentence",
    "lorem.word",
    "name.first_name",
    "name.last_name",
    "name.name",
    "phone.number",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocaleKey {
    EnUs,
    PtBr,
}

impl LocaleKey {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "en_US" | "en" => Some(Self::EnUs),
            "pt_BR" | "pt" => Some(Self::PtBr),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::EnUs => "en_US",
            Self::PtBr => "pt_BR",
        }
    }
}

impl fmt::Display for LocaleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated catalog entry bound to a locale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FakerRef {
    id: &'static str,
    locale: LocaleKey,
}

impl FakerRef {
    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn locale(&self) -> LocaleKey {
        self.locale
    }

    pub fn generate(&self, rng: &mut dyn RngCore) -> Value {
        generate_value(self.id, self.locale, rng)
    }
}

pub struct FakerCatalog;

impl FakerCatalog {
    pub fn ids() -> &'static [&'static str] {
        FAKER_IDS
    }

    pub fn contains(id: &str) -> bool {
        FAKER_IDS.binary_search(&id).is_ok()
    }

    /// Validates `id` and `locale` (default `en_US`).
    pub fn resolve(id: &str, locale: Option<&str>) -> Result<FakerRef> {
        let id = FAKER_IDS
            .binary_search(&id)
            .map(|index| FAKER_IDS[index])
            .map_err(|_| SpecError::InvalidSpecification(format!("unsupported faker id '{id}'")))?;

        let locale = match locale {
            Some(raw) => LocaleKey::parse(raw).ok_or_else(|| {
                SpecError::InvalidSpecification(format!("unsupported faker locale '{raw}'"))
            })?,
            None => DEFAULT_LOCALE,
        };

        Ok(FakerRef { id, locale })
    }
}

macro_rules! fake_in {
    ($locale:expr, $rng:expr, $ty:ty, $faker:ident $(, $arg:expr)*) => {
        match $locale {
            LocaleKey::EnUs => {
                let value: $ty = $faker(EN $(, $arg)*).fake_with_rng($rng);
                value
            }
            LocaleKey::PtBr => {
                let value: $ty = $faker(PT_BR $(, $arg)*).fake_with_rng($rng);
                value
            }
        }
    };
}

fn generate_value(id: &str, locale: LocaleKey, rng: &mut dyn RngCore) -> Value {
    match id {
        "address.city" => Value::Text(fake_in!(locale, rng, String, CityName)),
        "address.country" => Value::Text(fake_in!(locale, rng, String, CountryName)),
        "address.street" => Value::Text(fake_in!(locale, rng, String, StreetName)),
        "address.zip" => Value::Text(fake_in!(locale, rng, String, ZipCode)),
        "chrono.date_time" => Value::Date(fake_in!(
            locale,
            rng,
            chrono::DateTime<chrono::Utc>,
            FakeDateTime
        )),
        "company.name" => Value::Text(fake_in!(locale, rng, String, CompanyName)),
        "internet.free_email" => Value::Text(fake_in!(locale, rng, String, FreeEmail)),
        "internet.safe_email" => Value::Text(fake_in!(locale, rng, String, SafeEmail)),
        "internet.username" => Value::Text(fake_in!(locale, rng, String, Username)),
        "lorem.sentence" => Value::Text(fake_in!(locale, rng, String, Sentence, 3..8)),
        "lorem.word" => Value::Text(fake_in!(locale, rng, String, Word)),
        "name.first_name" => Value::Text(fake_in!(locale, rng, String, FirstName)),
        "name.last_name" => Value::Text(fake_in!(locale, rng, String, LastName)),
        "name.name" => Value::Text(fake_in!(locale, rng, String, Name)),
        "phone.number" => Value::Text(fake_in!(locale, rng, String, PhoneNumber)),
        // ids only reach here through `FakerCatalog::resolve`
        _ => Value::Undefined,
    }
}
