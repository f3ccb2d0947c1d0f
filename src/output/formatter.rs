use owo_colors::OwoColorize;
use serde::Serialize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::calculators::{CarbonInputs, Plant};
use crate::fetch::DashboardData;
use crate::location::Location;
use crate::scoring::{FootprintResult, Tier};

const MISSING: &str = "--";

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// "9.1 µg/m³", or "--" when the API gave no value
pub fn format_measure(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{} {}", v, unit),
        None => MISSING.to_string(),
    }
}

/// Score line as shown under the quiz, e.g. "35 / 90"
pub fn format_score(total_score: u32, max_score: u32) -> String {
    format!("{} / {}", total_score, max_score)
}

/// Horizontal bar for a 0-100 percentage
pub fn percent_bar(percent: f64, width: usize) -> String {
    let ratio = (percent / 100.0).clamp(0.0, 1.0);
    let filled = (ratio * width as f64).round() as usize;
    format!(
        "{}{}",
        "█".repeat(filled),
        "░".repeat(width.saturating_sub(filled))
    )
}

fn paint_tier(text: &str, tier: Tier, use_colors: bool) -> String {
    if !use_colors {
        return text.to_string();
    }
    match tier {
        Tier::Eco => text.green().to_string(),
        Tier::Moderate => text.yellow().to_string(),
        Tier::High => text.red().to_string(),
    }
}

/// Multi-line quiz result: score, tier headline, tips.
pub fn format_footprint(result: &FootprintResult, max_score: u32, use_colors: bool) -> String {
    let score = format_score(result.total_score, max_score);
    let mut lines = vec![
        if use_colors {
            format!("Your impact score: {}", score.bold())
        } else {
            format!("Your impact score: {}", score)
        },
        paint_tier(result.tier.message(), result.tier, use_colors),
        String::new(),
        "Tips:".to_string(),
    ];
    lines.extend(result.tips.iter().map(|tip| format!("  - {}", tip)));
    lines.join("\n")
}

/// Per-question breakdown for verbose mode
pub fn format_contributions(result: &FootprintResult) -> String {
    result
        .contributions
        .iter()
        .map(|c| format!("  {:<10} {:<28} {:>3}", c.group, c.answer, c.score))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Serialize)]
struct FootprintJson<'a> {
    score: u32,
    max_score: u32,
    tier: Tier,
    message: &'static str,
    tips: &'a [String],
    contributions: &'a [crate::scoring::Contribution],
}

pub fn format_footprint_json(result: &FootprintResult, max_score: u32) -> anyhow::Result<String> {
    let json = FootprintJson {
        score: result.total_score,
        max_score,
        tier: result.tier,
        message: result.tier.message(),
        tips: &result.tips,
        contributions: &result.contributions,
    };
    Ok(serde_json::to_string_pretty(&json)?)
}

/// Plain-text weather and air quality report for the `weather` command.
pub fn format_weather(
    location: &Location,
    data: &DashboardData,
    humidity_placeholder: f64,
    use_colors: bool,
) -> String {
    let heading = |s: &str| {
        if use_colors {
            s.bold().to_string()
        } else {
            s.to_string()
        }
    };

    let mut lines = vec![location.display_line(), String::new()];

    lines.push(heading("Weather"));
    match &data.weather {
        Some(w) => {
            lines.push(format!("  Temperature: {}°C", w.temperature_c));
            lines.push(format!("  Wind:        {} km/h", w.wind_kmh));
            lines.push(format!("  Humidity:    {}%", humidity_placeholder));

            // Bar width: leave room for "  Mon  ", " 100%"
            let bar_width = get_terminal_width()
                .map(|w| w.saturating_sub(16).clamp(10, 40))
                .unwrap_or(30);
            lines.push(String::new());
            lines.push(heading("Rain probability"));
            for point in &w.rain {
                let row = match point.probability {
                    Some(p) => format!(
                        "  {:<4} {} {:>3.0}%",
                        point.label,
                        percent_bar(p, bar_width),
                        p
                    ),
                    None => format!("  {:<4} {}", point.label, MISSING),
                };
                lines.push(if use_colors {
                    row.blue().to_string()
                } else {
                    row
                });
            }
        }
        None => lines.push(format!("  {}", MISSING)),
    }

    lines.push(String::new());
    lines.push(heading("Air quality"));
    match &data.air_quality {
        Some(air) => {
            for (label, value) in air.series() {
                lines.push(format!("  {:<6} {}", label, format_measure(value, "µg/m³")));
            }
        }
        None => lines.push(format!("  {}", MISSING)),
    }

    lines.join("\n")
}

pub fn format_carbon(inputs: &CarbonInputs, use_colors: bool) -> String {
    let estimate = inputs.estimate().to_string();
    let estimate = if use_colors {
        estimate.green().bold().to_string()
    } else {
        estimate
    };
    format!(
        "Trees: {}\nSoil:  {} m²\nEstimated sequestration: {} tonnes CO₂/year",
        inputs.trees, inputs.soil_m2, estimate
    )
}

pub fn format_plant(plant: Plant, use_colors: bool) -> String {
    let stats = plant.stats();
    let name = if use_colors {
        plant.name().green().bold().to_string()
    } else {
        plant.name().to_string()
    };
    format!(
        "{}\n  CO₂ absorption: {}\n  Oxygen output:  {}\n  Best room:      {}",
        name, stats.co2_absorption, stats.oxygen_output, stats.best_room
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{Contribution, FALLBACK_TIP};
    use crate::weather::{AirQuality, RainPoint, WeatherReport};

    fn sample_result(total_score: u32, tips: Vec<&str>) -> FootprintResult {
        FootprintResult {
            total_score,
            tier: Tier::classify(total_score),
            tips: tips.into_iter().map(str::to_string).collect(),
            contributions: vec![Contribution {
                group: "commute".to_string(),
                answer: "Drive alone".to_string(),
                score: total_score,
            }],
        }
    }

    fn sample_data() -> DashboardData {
        DashboardData {
            weather: Some(WeatherReport {
                temperature_c: 14.2,
                wind_kmh: 11.5,
                rain: vec![
                    RainPoint {
                        label: "Mon".to_string(),
                        probability: Some(40.0),
                    },
                    RainPoint {
                        label: "Tue".to_string(),
                        probability: None,
                    },
                ],
            }),
            air_quality: Some(AirQuality {
                pm10: Some(18.4),
                pm2_5: Some(9.1),
                no2: None,
                ozone: Some(60.0),
            }),
            errors: vec![],
        }
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(35, 90), "35 / 90");
    }

    #[test]
    fn test_format_measure() {
        assert_eq!(format_measure(Some(9.1), "µg/m³"), "9.1 µg/m³");
        assert_eq!(format_measure(None, "µg/m³"), "--");
    }

    #[test]
    fn test_percent_bar() {
        assert_eq!(percent_bar(50.0, 10), "█████░░░░░");
        assert_eq!(percent_bar(0.0, 4), "░░░░");
        assert_eq!(percent_bar(150.0, 4), "████");
    }

    #[test]
    fn test_format_footprint_plain() {
        let result = sample_result(35, vec!["Cycle more."]);
        let text = format_footprint(&result, 90, false);
        assert!(text.contains("Your impact score: 35 / 90"));
        assert!(text.contains("⚠️ Moderate. Good start, but room to improve."));
        assert!(text.contains("  - Cycle more."));
    }

    #[test]
    fn test_format_footprint_fallback() {
        let result = sample_result(0, vec![FALLBACK_TIP]);
        let text = format_footprint(&result, 90, false);
        assert!(text.contains("Eco-Warrior"));
        assert!(text.ends_with(&format!("  - {}", FALLBACK_TIP)));
    }

    #[test]
    fn test_format_footprint_json() {
        let result = sample_result(60, vec!["a", "b"]);
        let json = format_footprint_json(&result, 90).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["score"], 60);
        assert_eq!(value["max_score"], 90);
        assert_eq!(value["tier"], "high");
        assert_eq!(value["tips"].as_array().unwrap().len(), 2);
        assert_eq!(value["contributions"][0]["group"], "commute");
    }

    #[test]
    fn test_format_contributions() {
        let result = sample_result(20, vec![]);
        let text = format_contributions(&result);
        assert!(text.contains("commute"));
        assert!(text.contains("Drive alone"));
        assert!(text.trim_end().ends_with("20"));
    }

    #[test]
    fn test_format_weather_full() {
        let text = format_weather(&Location::default_london(), &sample_data(), 76.0, false);
        assert!(text.starts_with("Using Default Location (London)"));
        assert!(text.contains("Temperature: 14.2°C"));
        assert!(text.contains("Wind:        11.5 km/h"));
        assert!(text.contains("Humidity:    76%"));
        assert!(text.contains("Mon"));
        assert!(text.contains(" 40%"));
        assert!(text.contains("  Tue  --"));
        assert!(text.contains("PM2.5  9.1 µg/m³"));
        assert!(text.contains("NO2    --"));
    }

    #[test]
    fn test_format_weather_missing_halves() {
        let data = DashboardData {
            weather: None,
            air_quality: None,
            errors: vec!["boom".to_string()],
        };
        let text = format_weather(&Location::default_london(), &data, 76.0, false);
        assert_eq!(text.matches("  --").count(), 2);
    }

    #[test]
    fn test_format_carbon() {
        let inputs = CarbonInputs {
            trees: 10,
            soil_m2: 500,
        };
        let text = format_carbon(&inputs, false);
        assert!(text.contains("Trees: 10"));
        assert!(text.contains("Soil:  500 m²"));
        assert!(text.contains("0.420 tonnes"));
    }

    #[test]
    fn test_format_plant() {
        let text = format_plant(Plant::Spider, false);
        assert!(text.starts_with("Spider Plant"));
        assert!(text.contains("CO₂ absorption: 0.01 g/hr"));
        assert!(text.contains("Best room:      Workspace"));
    }
}
