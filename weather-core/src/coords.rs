use std::collections::HashMap;

use url::form_urlencoded;

use crate::error::WeatherError;

/// Query string decoded into name -> values, values in order of appearance.
pub type QueryParams = HashMap<String, Vec<String>>;

/// Accepted latitude spellings, checked in this order.
pub const LATITUDE_NAMES: &[&str] = &[
    "lat",
    "LAT",
    "lattitude",
    "Lattitude",
    "LAttitude",
    "LATTITUDE",
];

/// Accepted longitude spellings, checked in this order.
pub const LONGITUDE_NAMES: &[&str] = &[
    "lon",
    "long",
    "longitude",
    "Longitude",
    "LOngitude",
    "LONGITUDE",
];

/// Raw latitude/longitude tokens exactly as the caller sent them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinatePair {
    pub latitude: String,
    pub longitude: String,
}

impl CoordinatePair {
    pub fn new(latitude: impl Into<String>, longitude: impl Into<String>) -> Self {
        Self {
            latitude: latitude.into(),
            longitude: longitude.into(),
        }
    }

    /// Requires exactly one value on each axis. Nothing is parsed as a number.
    pub fn from_params(params: &QueryParams) -> Result<Self, WeatherError> {
        let lat = match_param(params, LATITUDE_NAMES);
        let lon = match_param(params, LONGITUDE_NAMES);

        match (lat, lon) {
            ([lat], [lon]) => Ok(Self::new(lat.as_str(), lon.as_str())),
            _ => Err(WeatherError::InvalidCoordinates {
                latitude: lat.len(),
                longitude: lon.len(),
            }),
        }
    }
}

/// Decode a raw (already separated from the path) query string.
pub fn parse_query(raw: &str) -> QueryParams {
    let mut params = QueryParams::new();
    for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
        params
            .entry(key.into_owned())
            .or_default()
            .push(value.into_owned());
    }
    params
}

/// Values of the first name in `names` that is present; later names are never
/// consulted. Empty when none match.
pub fn match_param<'a>(params: &'a QueryParams, names: &[&str]) -> &'a [String] {
    names
        .iter()
        .find_map(|name| params.get(*name))
        .map(Vec::as_slice)
        .unwrap_or(&[])
}
