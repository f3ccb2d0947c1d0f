use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Open-Meteo forecast response (only the fields we request)
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    pub current_weather: CurrentWeather,
    pub daily: DailyForecast,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentWeather {
    pub temperature: f64, // °C
    pub windspeed: f64,   // km/h
}

#[derive(Debug, Clone, Deserialize)]
pub struct DailyForecast {
    pub time: Vec<String>, // ISO dates, "2024-05-01"
    pub precipitation_probability_mean: Vec<Option<f64>>,
}

/// Open-Meteo air quality response
#[derive(Debug, Clone, Deserialize)]
pub struct AirQualityResponse {
    pub current: AirQualityCurrent,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AirQualityCurrent {
    pub pm10: Option<f64>,
    pub pm2_5: Option<f64>,
    pub nitrogen_dioxide: Option<f64>,
    pub ozone: Option<f64>,
}

/// One day of the rain chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RainPoint {
    pub label: String,            // short weekday, e.g. "Mon"
    pub probability: Option<f64>, // percent; None when the API has no value
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    pub temperature_c: f64,
    pub wind_kmh: f64,
    pub rain: Vec<RainPoint>,
}

/// Current pollutant levels in µg/m³
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AirQuality {
    pub pm10: Option<f64>,
    pub pm2_5: Option<f64>,
    pub no2: Option<f64>,
    pub ozone: Option<f64>,
}

impl AirQuality {
    /// (label, value) pairs in chart order
    pub fn series(&self) -> [(&'static str, Option<f64>); 4] {
        [
            ("PM10", self.pm10),
            ("PM2.5", self.pm2_5),
            ("NO2", self.no2),
            ("Ozone", self.ozone),
        ]
    }
}

impl From<AirQualityResponse> for AirQuality {
    fn from(resp: AirQualityResponse) -> Self {
        let c = resp.current;
        Self {
            pm10: c.pm10,
            pm2_5: c.pm2_5,
            no2: c.nitrogen_dioxide,
            ozone: c.ozone,
        }
    }
}

impl From<ForecastResponse> for WeatherReport {
    fn from(resp: ForecastResponse) -> Self {
        let daily = resp.daily;
        let rain = daily
            .time
            .iter()
            .zip(
                daily
                    .precipitation_probability_mean
                    .iter()
                    .copied()
                    .chain(std::iter::repeat(None)),
            )
            .map(|(date, probability)| RainPoint {
                label: weekday_label(date),
                probability,
            })
            .collect();

        Self {
            temperature_c: resp.current_weather.temperature,
            wind_kmh: resp.current_weather.windspeed,
            rain,
        }
    }
}

/// "2024-05-06" -> "Mon". Anything that isn't an ISO date is returned as-is.
pub fn weekday_label(date: &str) -> String {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d.format("%a").to_string())
        .unwrap_or_else(|_| date.to_string())
}
