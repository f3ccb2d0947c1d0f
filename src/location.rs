use serde::{Deserialize, Serialize};

/// Fallback used when no location was given (central London)
pub const DEFAULT_LATITUDE: f64 = 51.50;
pub const DEFAULT_LONGITUDE: f64 = -0.12;

/// Coordinates as written in the config file.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LocationConfig {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationSource {
    /// From `--lat/--lon` or the config file
    Configured,
    /// Nothing configured; using London
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub source: LocationSource,
}

impl Location {
    pub fn default_london() -> Self {
        Self {
            latitude: DEFAULT_LATITUDE,
            longitude: DEFAULT_LONGITUDE,
            source: LocationSource::Default,
        }
    }

    /// Pick a location: command line first, then config, then London.
    /// A half-specified command line pair (only one of lat/lon) is ignored.
    pub fn resolve(
        cli_lat: Option<f64>,
        cli_lon: Option<f64>,
        configured: Option<&LocationConfig>,
    ) -> Self {
        if let (Some(latitude), Some(longitude)) = (cli_lat, cli_lon) {
            return Self {
                latitude,
                longitude,
                source: LocationSource::Configured,
            };
        }
        match configured {
            Some(c) => Self {
                latitude: c.latitude,
                longitude: c.longitude,
                source: LocationSource::Configured,
            },
            None => Self::default_london(),
        }
    }

    /// One-line description for the dashboard header
    pub fn display_line(&self) -> String {
        match self.source {
            LocationSource::Configured => {
                format!("Lat: {:.2}, Lon: {:.2}", self.latitude, self.longitude)
            }
            LocationSource::Default => "Using Default Location (London)".to_string(),
        }
    }
}

/// Range check shared by config validation and the CLI.
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), String> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(format!("latitude {} is outside -90..90", latitude));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(format!("longitude {} is outside -180..180", longitude));
    }
    Ok(())
}
