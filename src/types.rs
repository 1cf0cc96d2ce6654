//! Types shared by every service

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Identity of a marketplace user
pub type UserId = i64;

/// Identity of a classified listing
pub type ClassifiedId = i64;

/// Currencies the marketplace can display prices in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[serde(rename = "USD", alias = "usd")]
    #[default]
    Usd,
    #[serde(rename = "EUR", alias = "eur")]
    Eur,
    #[serde(rename = "UAH", alias = "uah")]
    Uah,
}

impl Currency {
    /// ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Uah => "UAH",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Uah => "₴",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "UAH" => Ok(Currency::Uah),
            other => Err(Error::validation(format!("Unknown currency: {}", other))),
        }
    }
}

/// Interface languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Uk,
}

impl Language {
    /// Value for the `Accept-Language` header
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Uk => "uk",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "uk" | "ua" => Ok(Language::Uk),
            other => Err(Error::validation(format!("Unknown language: {}", other))),
        }
    }
}

/// One page of a paginated endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    /// Items on this page
    pub results: Vec<T>,

    /// Whether the server has more items after this page
    pub has_more: bool,
}

impl<T> Page<T> {
    pub fn new(results: Vec<T>, has_more: bool) -> Self {
        Self { results, has_more }
    }

    /// A page that ends the stream
    pub fn last(results: Vec<T>) -> Self {
        Self::new(results, false)
    }
}

/// Wire shape of a paginated response. Either an explicit `has_more` flag or
/// a `next` link is accepted.
#[derive(Deserialize)]
struct RawPage<T> {
    results: Vec<T>,
    #[serde(default)]
    has_more: Option<bool>,
    #[serde(default)]
    next: Option<String>,
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Page<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawPage::<T>::deserialize(deserializer)?;
        let has_more = raw.has_more.unwrap_or(raw.next.is_some());
        Ok(Page {
            results: raw.results,
            has_more,
        })
    }
}
