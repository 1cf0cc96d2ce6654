//! City lookup against the third-party geo service

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::GeoConfig;
use crate::error::Result;
use crate::fetch::Fetch;

/// A city suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,

    #[serde(default, alias = "state")]
    pub region: Option<String>,

    #[serde(default)]
    pub country: Option<String>,
}

impl City {
    /// `Name, Region` for display
    pub fn label(&self) -> String {
        match &self.region {
            Some(region) if !region.is_empty() => format!("{}, {}", self.name, region),
            _ => self.name.clone(),
        }
    }
}

/// Client for the geo lookup service. It has its own base URL and key, and
/// does not share the marketplace session.
#[derive(Clone)]
pub struct GeoClient {
    config: GeoConfig,
    client: Client,
}

impl GeoClient {
    pub fn new(config: GeoConfig, client: Client) -> Self {
        Self { config, client }
    }

    /// Reads `GEO_API_URL` and `GEO_API_KEY`
    pub fn from_env(client: Client) -> Result<Self> {
        Ok(Self::new(GeoConfig::from_env()?, client))
    }

    /// Cities matching `query`. A blank query matches nothing.
    pub async fn lookup_city(&self, query: &str) -> Result<Vec<City>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/cities", self.config.base_url.as_str().trim_end_matches('/'));
        Fetch::get(&self.client, &url)
            .query([("q", query), ("key", self.config.api_key.as_str())])
            .execute()
            .await
    }
}
