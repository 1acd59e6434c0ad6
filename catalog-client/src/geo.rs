//! Geography lookup client
//!
//! Wraps the external country/state/city HTTP API. Lookup data is
//! decorative for the supplier form, so every transport or HTTP failure
//! degrades to an empty list and is never propagated.

use reqwest::Client;
use serde::de::DeserializeOwned;

use shared::models::{City, Country, CountryState};

use crate::ClientConfig;

/// Header carrying the lookup API key
const API_KEY_HEADER: &str = "X-CSCAPI-KEY";

/// Client for the geography lookup API
#[derive(Debug, Clone)]
pub struct GeoClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GeoClient {
    /// Create a new lookup client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.geo_base_url.trim_end_matches('/').to_string(),
            api_key: config.geo_api_key.clone(),
        }
    }

    /// Get a list of all countries
    pub async fn countries(&self) -> Vec<Country> {
        self.fetch_soft(&self.base_url).await
    }

    /// Get a list of states within a country
    pub async fn country_states(&self, country_iso2: &str) -> Vec<CountryState> {
        if country_iso2.is_empty() {
            return Vec::new();
        }

        let url = format!("{}/{}/states", self.base_url, country_iso2);
        self.fetch_soft(&url).await
    }

    /// Get a list of cities within a country and state
    pub async fn state_cities(&self, country_iso2: &str, state_iso2: &str) -> Vec<City> {
        if country_iso2.is_empty() || state_iso2.is_empty() {
            return Vec::new();
        }

        let url = format!("{}/{}/states/{}/cities", self.base_url, country_iso2, state_iso2);
        self.fetch_soft(&url).await
    }

    /// Fetch a JSON array, swallowing every failure into an empty list
    async fn fetch_soft<T: DeserializeOwned>(&self, url: &str) -> Vec<T> {
        let request = self.client.get(url).header(API_KEY_HEADER, &self.api_key);

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(url = %url, error = %err, "Geography lookup request failed");
                return Vec::new();
            }
        };

        if !response.status().is_success() {
            tracing::warn!(url = %url, status = %response.status(), "Geography lookup rejected");
            return Vec::new();
        }

        match response.json().await {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(url = %url, error = %err, "Geography lookup payload malformed");
                Vec::new()
            }
        }
    }
}
