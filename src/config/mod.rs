pub mod init;
mod schema;

pub use schema::{
    Config, ThemeMode, WeatherConfig, DEFAULT_AIR_QUALITY_URL, DEFAULT_FORECAST_URL,
};

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::location::validate_coordinates;
use crate::scoring::validate_quiz;

/// Get the config directory path (~/.config/eco-dash/)
pub fn get_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("eco-dash")
}

/// Get the default config file path (~/.config/eco-dash/config.yaml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yaml")
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path and
///   falls back to built-in defaults when that file does not exist.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let explicit = path.is_some();
    let config_path = path.unwrap_or_else(get_config_path);

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        tracing::debug!(
            "No config at {}, using built-in defaults",
            config_path.display()
        );
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content).with_context(|| {
        format!(
            "Failed to parse config: invalid YAML in {}",
            config_path.display()
        )
    })?;

    tracing::debug!("Loaded config from {}", config_path.display());
    Ok(config)
}

/// Validate the whole config at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(ref loc) = config.location {
        if let Err(e) = validate_coordinates(loc.latitude, loc.longitude) {
            errors.push(format!("location: {}", e));
        }
    }

    let weather = &config.weather;
    for (field, url) in [
        ("forecast_url", &weather.forecast_url),
        ("air_quality_url", &weather.air_quality_url),
    ] {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            errors.push(format!(
                "weather.{}: '{}' must be an http(s) URL",
                field, url
            ));
        }
    }

    if !(0.0..=100.0).contains(&weather.humidity_placeholder) {
        errors.push(format!(
            "weather.humidity_placeholder: {} must be between 0 and 100",
            weather.humidity_placeholder
        ));
    }

    match humantime::parse_duration(&weather.refresh_interval) {
        Ok(d) if d.is_zero() => {
            errors.push("weather.refresh_interval: must be greater than zero".to_string())
        }
        Ok(_) => {}
        Err(e) => errors.push(format!(
            "weather.refresh_interval: invalid '{}' - {}",
            weather.refresh_interval, e
        )),
    }

    if let Err(quiz_errors) = validate_quiz(&config.quiz) {
        errors.extend(quiz_errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::LocationConfig;
    use std::io::Write;

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.yaml");
        let err = load_config(Some(path)).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "location:\n  latitude: 40.71\n  longitude: -74.0\nquiz:\n  max_score: 100\n  groups: []"
        )
        .unwrap();

        let config = load_config(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.location.unwrap().latitude, 40.71);
        assert_eq!(config.quiz.max_score, 100);
        assert!(config.quiz.groups.is_empty());
    }

    #[test]
    fn test_load_invalid_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "quiz: [unclosed").unwrap();
        let err = load_config(Some(file.path().to_path_buf())).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_reports_every_section() {
        let mut config = Config::default();
        config.location = Some(LocationConfig {
            latitude: 123.0,
            longitude: 0.0,
        });
        config.weather.forecast_url = "ftp://example.com".to_string();
        config.weather.humidity_placeholder = 120.0;
        config.weather.refresh_interval = "whenever".to_string();
        config.quiz.max_score = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert!(errors[0].starts_with("location:"));
        assert!(errors.iter().any(|e| e.starts_with("weather.forecast_url")));
        assert!(errors.iter().any(|e| e.starts_with("weather.humidity_placeholder")));
        assert!(errors.iter().any(|e| e.starts_with("weather.refresh_interval")));
        assert!(errors.iter().any(|e| e.starts_with("quiz.max_score")));
    }

    #[test]
    fn test_zero_refresh_interval() {
        let mut config = Config::default();
        config.weather.refresh_interval = "0s".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].contains("greater than zero"));
    }
}
