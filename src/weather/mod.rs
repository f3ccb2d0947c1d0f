pub mod client;
pub mod types;

pub use client::{create_client, fetch_air_quality, fetch_weather};
pub use types::{AirQuality, RainPoint, WeatherReport};
