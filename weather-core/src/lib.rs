//! Core library for the `weather-server` relay.
//!
//! This crate defines:
//! - Startup configuration (API key, listen port)
//! - Coordinate extraction from query parameters
//! - The OpenWeather client behind the `WeatherProvider` trait
//! - Decoding of provider payloads and the one-sentence summary
//!
//! It is used by `weather-server`, but has no HTTP-server dependencies of its own.

pub mod config;
pub mod coords;
pub mod error;
pub mod model;
pub mod provider;
pub mod report;

pub use config::{Config, ConfigFile, ProviderConfig};
pub use coords::{CoordinatePair, QueryParams};
pub use error::{ConfigError, WeatherError};
pub use model::{ConditionEntry, WeatherReport};
pub use provider::{OpenWeatherProvider, WeatherProvider};
pub use report::{TemperatureBucket, render};
