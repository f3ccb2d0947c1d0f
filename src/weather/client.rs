use anyhow::{anyhow, Context, Result};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio_retry::{strategy::ExponentialBackoff, Retry};

use super::types::{AirQuality, AirQualityResponse, ForecastResponse, WeatherReport};
use crate::location::Location;

/// Create the HTTP client shared by both fetches
pub fn create_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!("eco-dash/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(15))
        .build()
        .context("Failed to create HTTP client")
}

pub fn forecast_url(base: &str, location: &Location) -> String {
    format!(
        "{}?latitude={}&longitude={}&current_weather=true&daily=precipitation_probability_mean&timezone=auto",
        base, location.latitude, location.longitude
    )
}

pub fn air_quality_url(base: &str, location: &Location) -> String {
    format!(
        "{}?latitude={}&longitude={}&current=pm10,pm2_5,nitrogen_dioxide,ozone&timezone=auto",
        base, location.latitude, location.longitude
    )
}

/// Retry strategy: exponential backoff with 3 attempts
#[cfg(not(test))]
fn retry_strategy() -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(100)
        .max_delay(Duration::from_secs(5))
        .take(3)
}

// Same shape, millisecond delays
#[cfg(test)]
fn retry_strategy() -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(2)
        .max_delay(Duration::from_millis(10))
        .take(3)
}

/// GET a JSON document, retrying transient failures
async fn get_json<T: DeserializeOwned>(client: &reqwest::Client, url: &str) -> Result<T> {
    let response = Retry::spawn(retry_strategy(), || async {
        let resp = client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                anyhow!("Request timed out")
            } else if e.is_connect() {
                anyhow!("Could not connect. Check your network connection.")
            } else {
                anyhow!("HTTP error: {}", e)
            }
        })?;
        resp.error_for_status()
            .map_err(|e| anyhow!("Server returned an error: {}", e))
    })
    .await?;

    response
        .json::<T>()
        .await
        .context("Failed to decode response body")
}

/// Current weather plus the daily rain outlook
pub async fn fetch_weather(
    client: &reqwest::Client,
    base_url: &str,
    location: &Location,
) -> Result<WeatherReport> {
    let url = forecast_url(base_url, location);
    tracing::debug!("Fetching forecast: {}", url);
    let resp: ForecastResponse = get_json(client, &url)
        .await
        .context("Weather fetch failed")?;
    Ok(resp.into())
}

/// Current pollutant levels
pub async fn fetch_air_quality(
    client: &reqwest::Client,
    base_url: &str,
    location: &Location,
) -> Result<AirQuality> {
    let url = air_quality_url(base_url, location);
    tracing::debug!("Fetching air quality: {}", url);
    let resp: AirQualityResponse = get_json(client, &url)
        .await
        .context("Air Quality fetch failed")?;
    Ok(resp.into())
}
