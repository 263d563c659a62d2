use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::{config::Config, coords::CoordinatePair, error::WeatherError};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_key.clone())
    }

    pub fn with_base_url(api_key: String, base_url: &str) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Coordinates go in as-is; OpenWeather rejects anything it can't use.
    fn current_url(&self, coords: &CoordinatePair) -> String {
        format!(
            "{}/data/2.5/weather?lat={}&lon={}&appid={}",
            self.base_url, coords.latitude, coords.longitude, self.api_key
        )
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn fetch_current(&self, coords: &CoordinatePair) -> Result<Vec<u8>, WeatherError> {
        let res = self
            .http
            .get(self.current_url(coords))
            .send()
            .await
            .map_err(WeatherError::Transport)?;

        let status = res.status();
        debug!(status = status.as_u16(), "OpenWeather response status code");

        if status.as_u16() >= 400 {
            if let Ok(body) = res.text().await {
                debug!(body = %truncate_body(&body), "OpenWeather error body");
            }
            return Err(WeatherError::Rejected {
                status: status.as_u16(),
            });
        }

        let body = res.bytes().await.map_err(WeatherError::ReadBody)?;
        Ok(body.to_vec())
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn sends_coordinates_and_key_as_query_params() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("lat", "51.5"))
            .and(query_param("lon", "-0.12"))
            .and(query_param("appid", "TEST_KEY"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"name":"London"}"#))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = OpenWeatherProvider::with_base_url("TEST_KEY".into(), &mock_server.uri());
        let body = provider
            .fetch_current(&CoordinatePair::new("51.5", "-0.12"))
            .await
            .unwrap();

        assert_eq!(body, br#"{"name":"London"}"#);
    }

    #[tokio::test]
    async fn error_status_is_rejected_without_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(401).set_body_string(r#"{"cod":401}"#))
            .mount(&mock_server)
            .await;

        let provider = OpenWeatherProvider::with_base_url("BAD".into(), &mock_server.uri());
        let err = provider
            .fetch_current(&CoordinatePair::new("1", "2"))
            .await
            .unwrap_err();

        assert!(matches!(err, WeatherError::Rejected { status: 401 }));
        assert!(!err.to_string().contains("cod"));
    }

    #[tokio::test]
    async fn unreachable_provider_is_a_transport_error() {
        let provider = OpenWeatherProvider::with_base_url("KEY".into(), "http://127.0.0.1:1");
        let err = provider
            .fetch_current(&CoordinatePair::new("1", "2"))
            .await
            .unwrap_err();

        assert!(matches!(err, WeatherError::Transport(_)));
    }

    #[test]
    fn url_embeds_tokens_unescaped() {
        let provider = OpenWeatherProvider::new("K".into());
        let url = provider.current_url(&CoordinatePair::new("1.5", "-2"));
        assert_eq!(
            url,
            "https://api.openweathermap.org/data/2.5/weather?lat=1.5&lon=-2&appid=K"
        );
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "é".repeat(250);
        let short = truncate_body(&long);
        assert!(short.ends_with("..."));
        assert_eq!(short.chars().count(), 203);
        assert_eq!(truncate_body("short"), "short");
    }
}
