use crate::config::WeatherConfig;
use crate::location::Location;
use crate::weather::{fetch_air_quality, fetch_weather, AirQuality, WeatherReport};

/// Result of one dashboard refresh. Either half may be missing; the other is
/// still shown.
#[derive(Debug, Clone, Default)]
pub struct DashboardData {
    pub weather: Option<WeatherReport>,
    pub air_quality: Option<AirQuality>,
    pub errors: Vec<String>,
}

impl DashboardData {
    pub fn all_failed(&self) -> bool {
        self.weather.is_none() && self.air_quality.is_none()
    }
}

/// Fetch weather and air quality concurrently.
///
/// Called from main.rs for the one-shot `weather` command and from the TUI
/// event loop for initial load and refreshes.
pub async fn fetch_dashboard(
    client: &reqwest::Client,
    weather_config: &WeatherConfig,
    location: &Location,
) -> DashboardData {
    let (weather, air_quality) = tokio::join!(
        fetch_weather(client, &weather_config.forecast_url, location),
        fetch_air_quality(client, &weather_config.air_quality_url, location),
    );

    let mut data = DashboardData::default();

    match weather {
        Ok(report) => {
            tracing::debug!("Forecast has {} days", report.rain.len());
            data.weather = Some(report);
        }
        Err(e) => {
            tracing::warn!("{:#}", e);
            data.errors.push(format!("{:#}", e));
        }
    }

    match air_quality {
        Ok(air) => data.air_quality = Some(air),
        Err(e) => {
            tracing::warn!("{:#}", e);
            data.errors.push(format!("{:#}", e));
        }
    }

    data
}
