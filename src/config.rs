//! Configuration options for the classifieds client

use std::time::Duration;
use url::Url;

use crate::error::{Error, Result};
use crate::types::{Currency, Language};

/// Base URL of the marketplace REST API
pub const API_URL_VAR: &str = "CLASSIFIEDS_API_URL";
/// Optional page size override for listing pages
pub const PAGE_SIZE_VAR: &str = "CLASSIFIEDS_PAGE_SIZE";
/// Base URL of the third-party geo lookup service
pub const GEO_URL_VAR: &str = "GEO_API_URL";
/// Credential for the geo lookup service
pub const GEO_KEY_VAR: &str = "GEO_API_KEY";

/// Items per listing page unless configured otherwise
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Configuration options for the classifieds client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// The request timeout
    pub request_timeout: Option<Duration>,

    /// Items per page on infinite-scroll listings
    pub page_size: u32,

    /// Value of the `X-Client-Info` header
    pub client_info: String,

    /// Language used until a profile says otherwise
    pub default_language: Language,

    /// Currency used until a profile says otherwise
    pub default_currency: Currency,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            request_timeout: Some(Duration::from_secs(30)),
            page_size: DEFAULT_PAGE_SIZE,
            client_info: format!("classifieds-rust/{}", env!("CARGO_PKG_VERSION")),
            default_language: Language::default(),
            default_currency: Currency::default(),
        }
    }
}

impl ClientOptions {
    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the listing page size. Zero is raised to one.
    pub fn with_page_size(mut self, value: u32) -> Self {
        self.page_size = value.max(1);
        self
    }

    /// Set the `X-Client-Info` header value
    pub fn with_client_info(mut self, value: &str) -> Self {
        self.client_info = value.to_string();
        self
    }

    /// Set the fallback language
    pub fn with_default_language(mut self, value: Language) -> Self {
        self.default_language = value;
        self
    }

    /// Set the fallback currency
    pub fn with_default_currency(mut self, value: Currency) -> Self {
        self.default_currency = value;
        self
    }
}

/// Where the API lives and how to talk to it
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: Url,
    pub options: ClientOptions,
}

impl ClientConfig {
    /// Creates a configuration, validating the URL.
    pub fn new(api_url: &str, options: ClientOptions) -> Result<Self> {
        let api_url = Url::parse(api_url)?;
        if api_url.cannot_be_a_base() {
            return Err(Error::config(format!("{} is not a base URL", api_url)));
        }
        Ok(Self { api_url, options })
    }

    /// Reads `CLASSIFIEDS_API_URL` and `CLASSIFIEDS_PAGE_SIZE`, loading `.env`
    /// first if present.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup(API_URL_VAR)
            .ok_or_else(|| Error::config(format!("{} environment variable not found", API_URL_VAR)))?;

        let mut options = ClientOptions::default();
        if let Some(raw) = lookup(PAGE_SIZE_VAR) {
            let page_size = raw.trim().parse::<u32>().map_err(|_| {
                Error::config(format!("{} must be a positive integer, got {:?}", PAGE_SIZE_VAR, raw))
            })?;
            options = options.with_page_size(page_size);
        }

        Self::new(&api_url, options)
    }
}

/// Credentials for the third-party geo lookup service
#[derive(Debug, Clone)]
pub struct GeoConfig {
    pub base_url: Url,
    pub api_key: String,
}

impl GeoConfig {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(Error::config(format!("{} cannot be empty", GEO_KEY_VAR)));
        }
        Ok(Self {
            base_url: Url::parse(base_url)?,
            api_key: api_key.to_string(),
        })
    }

    /// Reads `GEO_API_URL` and `GEO_API_KEY`. Both are required; there is no
    /// fallback geo provider.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(GEO_URL_VAR)
            .ok_or_else(|| Error::config(format!("{} environment variable not found", GEO_URL_VAR)))?;
        let api_key = lookup(GEO_KEY_VAR)
            .ok_or_else(|| Error::config(format!("{} environment variable not found", GEO_KEY_VAR)))?;
        Self::new(&base_url, &api_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_client_config_requires_api_url() {
        let err = ClientConfig::from_lookup(vars(&[])).unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains(API_URL_VAR)));
    }

    #[test]
    fn test_client_config_reads_page_size() {
        let config = ClientConfig::from_lookup(vars(&[
            (API_URL_VAR, "https://api.example.com/api/v1/"),
            (PAGE_SIZE_VAR, "24"),
        ]))
        .unwrap();
        assert_eq!(config.options.page_size, 24);
        assert_eq!(config.api_url.as_str(), "https://api.example.com/api/v1/");
    }

    #[test]
    fn test_client_config_rejects_bad_page_size() {
        let result = ClientConfig::from_lookup(vars(&[
            (API_URL_VAR, "https://api.example.com"),
            (PAGE_SIZE_VAR, "many"),
        ]));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_geo_config_missing_key_is_fatal() {
        let result = GeoConfig::from_lookup(vars(&[(GEO_URL_VAR, "https://geo.example.com")]));
        assert!(matches!(result, Err(Error::Config(msg)) if msg.contains(GEO_KEY_VAR)));

        let result = GeoConfig::from_lookup(vars(&[
            (GEO_URL_VAR, "https://geo.example.com"),
            (GEO_KEY_VAR, "  "),
        ]));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_options_builder() {
        let options = ClientOptions::default()
            .with_page_size(0)
            .with_default_currency(Currency::Eur)
            .with_request_timeout(None);
        assert_eq!(options.page_size, 1);
        assert_eq!(options.default_currency, Currency::Eur);
        assert!(options.request_timeout.is_none());
    }
}
