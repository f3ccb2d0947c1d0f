use serde::{Deserialize, Serialize};

use crate::location::LocationConfig;
use crate::scoring::QuizConfig;

pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const DEFAULT_AIR_QUALITY_URL: &str = "https://air-quality-api.open-meteo.com/v1/air-quality";

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Fixed location; London is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationConfig>,

    #[serde(default)]
    pub weather: WeatherConfig,

    #[serde(default)]
    pub quiz: QuizConfig,

    #[serde(default)]
    pub theme: ThemeMode,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct WeatherConfig {
    pub forecast_url: String,
    pub air_quality_url: String,

    /// Relative humidity shown on the dashboard. The forecast request does not
    /// ask for humidity, so this is a fixed display value.
    pub humidity_placeholder: f64,

    /// How often the dashboard refetches, e.g. "10m" or "1h"
    pub refresh_interval: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
            air_quality_url: DEFAULT_AIR_QUALITY_URL.to_string(),
            humidity_placeholder: 76.0,
            refresh_interval: "10m".to_string(),
        }
    }
}

impl WeatherConfig {
    /// Parsed refresh interval. Callers validate the config first; an
    /// unparseable value falls back to ten minutes.
    pub fn refresh_duration(&self) -> std::time::Duration {
        humantime::parse_duration(&self.refresh_interval)
            .unwrap_or(std::time::Duration::from_secs(600))
    }
}

/// TUI palette selection
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Detect from the terminal background
    #[default]
    Auto,
    Dark,
    Light,
}
