use serde::{Deserialize, Deserializer};

use crate::error::WeatherError;

/// One weather phenomenon reported for a location.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct ConditionEntry {
    #[serde(rename = "main", deserialize_with = "null_as_default")]
    pub main_category: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct Readings {
    /// Kelvin.
    #[serde(deserialize_with = "null_as_default")]
    pub temp: f64,
}

/// Current conditions for one location, decoded from the provider payload.
///
/// Unknown fields are ignored; known fields that are absent or `null` decode to
/// their zero value. Field names are matched case-sensitively.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct WeatherReport {
    #[serde(rename = "name", deserialize_with = "null_as_default")]
    pub location: String,

    #[serde(rename = "main", deserialize_with = "null_as_default")]
    pub readings: Readings,

    /// Provider order is kept; rendering depends on it.
    #[serde(rename = "weather", deserialize_with = "null_as_default")]
    pub conditions: Vec<ConditionEntry>,
}

impl WeatherReport {
    pub fn from_slice(body: &[u8]) -> Result<Self, WeatherError> {
        Ok(serde_json::from_slice(body)?)
    }

    pub fn temperature_kelvin(&self) -> f64 {
        self.readings.temp
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
