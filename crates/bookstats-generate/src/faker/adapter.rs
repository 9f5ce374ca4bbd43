use std::fmt;
use std::str::FromStr;

use fake::Fake;
use fake::faker::address::{en as address_en, pt_br as address_pt_br};
use fake::faker::lorem::{en as lorem_en, pt_br as lorem_pt_br};
use fake::faker::name::{en as name_en, pt_br as name_pt_br};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::GenerationError;

/// Faker locales the corpus can draw from. Serialized as `en_US` / `pt_BR`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocaleKey {
    #[default]
    #[serde(rename = "en_US")]
    EnUs,
    #[serde(rename = "pt_BR")]
    PtBr,
}

impl LocaleKey {
    pub const ALL: [LocaleKey; 2] = [LocaleKey::EnUs, LocaleKey::PtBr];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::EnUs => "en_US",
            Self::PtBr => "pt_BR",
        }
    }
}

impl FromStr for LocaleKey {
    type Err = GenerationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|locale| locale.as_str() == value)
            .ok_or_else(|| {
                GenerationError::Configuration(format!("unsupported faker locale '{value}'"))
            })
    }
}

impl fmt::Display for LocaleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name, place and lorem corpus backed by the `fake` crate.
#[derive(Clone, Copy, Debug)]
pub struct FakerCorpus {
    locale: LocaleKey,
}

impl FakerCorpus {
    pub fn new(locale: LocaleKey) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> LocaleKey {
        self.locale
    }

    pub fn first_name<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        match self.locale {
            LocaleKey::EnUs => name_en::FirstName().fake_with_rng(rng),
            LocaleKey::PtBr => name_pt_br::FirstName().fake_with_rng(rng),
        }
    }

    pub fn last_name<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        match self.locale {
            LocaleKey::EnUs => name_en::LastName().fake_with_rng(rng),
            LocaleKey::PtBr => name_pt_br::LastName().fake_with_rng(rng),
        }
    }

    pub fn city<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        match self.locale {
            LocaleKey::EnUs => address_en::CityName().fake_with_rng(rng),
            LocaleKey::PtBr => address_pt_br::CityName().fake_with_rng(rng),
        }
    }

    pub fn word<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        match self.locale {
            LocaleKey::EnUs => lorem_en::Word().fake_with_rng(rng),
            LocaleKey::PtBr => lorem_pt_br::Word().fake_with_rng(rng),
        }
    }
}
