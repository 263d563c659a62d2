use std::fmt;

use crate::model::WeatherReport;

pub const KELVIN_OFFSET: f64 = 273.15;

/// Coarse temperature band used in the summary sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureBucket {
    Cold,
    Moderate,
    Hot,
}

impl TemperatureBucket {
    /// Lower bounds are inclusive: 10.0 is moderate, 20.0 is hot.
    pub fn from_celsius(celsius: f64) -> Self {
        if celsius < 10.0 {
            TemperatureBucket::Cold
        } else if celsius < 20.0 {
            TemperatureBucket::Moderate
        } else {
            TemperatureBucket::Hot
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureBucket::Cold => "cold",
            TemperatureBucket::Moderate => "moderate",
            TemperatureBucket::Hot => "hot",
        }
    }
}

impl fmt::Display for TemperatureBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl WeatherReport {
    pub fn celsius(&self) -> f64 {
        self.temperature_kelvin() - KELVIN_OFFSET
    }

    pub fn bucket(&self) -> TemperatureBucket {
        TemperatureBucket::from_celsius(self.celsius())
    }
}

/// Render the one-sentence summary.
///
/// Every description is followed by ", " and the last of two or more gets an
/// "and " prefix, so the template's own "and" follows a trailing comma. Existing
/// clients match on this exact text.
pub fn render(report: &WeatherReport) -> String {
    let count = report.conditions.len();
    let mut conditions = String::new();
    for (idx, condition) in report.conditions.iter().enumerate() {
        if count > 1 && idx == count - 1 {
            conditions.push_str("and ");
        }
        conditions.push_str(&condition.description);
        conditions.push_str(", ");
    }

    format!(
        "The weather in {} is {}and the temperature is {}.",
        report.location,
        conditions,
        report.bucket()
    )
}
