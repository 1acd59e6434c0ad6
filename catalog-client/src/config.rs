//! Client configuration

/// Client configuration for connecting to the catalog service and the
/// geography lookup API
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Catalog service base URL (e.g., "http://localhost:8080")
    pub base_url: String,

    /// Bearer token for authentication
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Geography lookup API base URL
    pub geo_base_url: String,

    /// Geography lookup API key, sent as X-CSCAPI-KEY
    pub geo_api_key: String,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: 30,
            geo_base_url: "https://api.countrystatecity.in/v1/countries".to_string(),
            geo_api_key: String::new(),
        }
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the geography lookup base URL
    pub fn with_geo_base_url(mut self, url: impl Into<String>) -> Self {
        self.geo_base_url = url.into();
        self
    }

    /// Set the geography lookup API key
    pub fn with_geo_api_key(mut self, key: impl Into<String>) -> Self {
        self.geo_api_key = key.into();
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> super::HttpClient {
        super::HttpClient::new(self)
    }

    /// Create a geography lookup client from this configuration
    pub fn build_geo_client(&self) -> super::GeoClient {
        super::GeoClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}
