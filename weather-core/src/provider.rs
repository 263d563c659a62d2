use async_trait::async_trait;
use std::fmt::Debug;

use crate::{coords::CoordinatePair, error::WeatherError};

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// Source of current-conditions payloads.
///
/// Implementations return the provider's body untouched; decoding happens in
/// [`crate::model::WeatherReport::from_slice`].
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_current(&self, coords: &CoordinatePair) -> Result<Vec<u8>, WeatherError>;
}
