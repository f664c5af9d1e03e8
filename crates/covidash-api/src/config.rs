use std::time::Duration;

/// Default base URL of the disease statistics API.
pub const DEFAULT_DISEASE_BASE_URL: &str = "https://disease.sh/v3/covid-19";
/// Default base URL of the country geodata API.
pub const DEFAULT_GEO_BASE_URL: &str = "https://restcountries.com/v3.1";

/// Endpoints and transport settings for [`HttpClient`](crate::HttpClient).
///
/// ```rust,ignore
/// let config = ApiConfig::default()
///     .with_disease_base_url("http://localhost:8080/covid")
///     .with_timeout(Duration::from_secs(5));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base of `GET {base}/countries/{country}`.
    pub disease_base_url: String,
    /// Base of `GET {base}/name/{country}?fullText=true`.
    pub geo_base_url: String,
    /// Per-request timeout; `None` leaves reqwest's default (no timeout).
    pub timeout: Option<Duration>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            disease_base_url: DEFAULT_DISEASE_BASE_URL.to_string(),
            geo_base_url: DEFAULT_GEO_BASE_URL.to_string(),
            timeout: Some(Duration::from_secs(10)),
        }
    }
}

impl ApiConfig {
    /// Point the statistics client at another server.
    pub fn with_disease_base_url(mut self, url: impl Into<String>) -> Self {
        self.disease_base_url = url.into();
        self
    }

    /// Point the geodata client at another server.
    pub fn with_geo_base_url(mut self, url: impl Into<String>) -> Self {
        self.geo_base_url = url.into();
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
