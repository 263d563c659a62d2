use thiserror::Error;

/// Everything that can go wrong while turning a request into a weather report.
///
/// The HTTP layer maps each variant to a status code; the payloads here are for
/// the operational log only and are never echoed to the caller.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error(
        "expected exactly one latitude and one longitude parameter, found {latitude} and {longitude}"
    )]
    InvalidCoordinates { latitude: usize, longitude: usize },

    #[error("failed to send request to OpenWeather: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("OpenWeather rejected the request with status {status}")]
    Rejected { status: u16 },

    #[error("failed to read OpenWeather response body: {0}")]
    ReadBody(#[source] reqwest::Error),

    #[error("failed to parse OpenWeather JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Startup configuration failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("You must set the OPENWEATHER_API_KEY environment variable")]
    MissingApiKey,

    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseFile {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}
