use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Google Maps Platform key shared by geocoding, places, and photos.
    /// `None` when the variable is unset or blank.
    pub google_maps_api_key: Option<String>,
    pub cors_allowed_origins: Vec<String>,
    pub places_connect_timeout_secs: u64,
    pub places_request_timeout_secs: u64,
    pub target_unique_places: usize,
    pub min_rating: f64,
    pub max_total_queries: u32,
}

impl AppConfig {
    /// Whether the deterministic mock Google path may be used when no API
    /// key is configured. Only the development environment qualifies; in
    /// test and production a missing key is a hard per-request failure.
    #[must_use]
    pub fn mock_google_allowed(&self) -> bool {
        matches!(self.env, Environment::Development)
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field(
                "google_maps_api_key",
                &self.google_maps_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field(
                "places_connect_timeout_secs",
                &self.places_connect_timeout_secs,
            )
            .field(
                "places_request_timeout_secs",
                &self.places_request_timeout_secs,
            )
            .field("target_unique_places", &self.target_unique_places)
            .field("min_rating", &self.min_rating)
            .field("max_total_queries", &self.max_total_queries)
            .finish()
    }
}
