use thiserror::Error;

/// Errors returned by the Google Maps Platform client.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// Network, TLS, or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Google returned a non-2xx HTTP status; the body is kept verbatim
    /// because Places v1 puts the useful diagnostics there.
    #[error("Google Maps API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The geocoder answered with `ZERO_RESULTS`: the address is unknown,
    /// not the service broken.
    #[error("no geocoding results for that address")]
    NoGeocodeResults,

    /// The geocoder answered with a non-OK status other than `ZERO_RESULTS`.
    #[error("geocoding returned status {status}: {message}")]
    GeocodeStatus { status: String, message: String },

    /// A 2xx photo-media response without the requested `photoUri` field.
    #[error("photo lookup did not return a photoUri")]
    MissingPhotoUri,

    /// A custom base URL that does not parse (test/mock configuration).
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
