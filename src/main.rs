use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use eco_dash::calculators::carbon::{MAX_SOIL_M2, MAX_TREES};
use eco_dash::calculators::{CarbonInputs, Plant};
use eco_dash::config::{Config, WeatherConfig};
use eco_dash::location::{validate_coordinates, Location};
use eco_dash::scoring::{compute_footprint, OptionGroupController, QuizConfig, QuizEvent};

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 1;
const EXIT_NETWORK: i32 = 2;
const EXIT_CONFIG: i32 = 4;
const EXIT_INCOMPLETE: i32 = 5;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive dashboard (default if no subcommand)
    Dash,
    /// Print current weather and air quality once
    Weather,
    /// Take the pollution footprint quiz
    Quiz {
        /// Answer as GROUP=OPTION (e.g. commute=car); repeat for each question.
        /// Without answers the questions are asked interactively.
        #[arg(short, long = "answer", value_name = "GROUP=OPTION")]
        answers: Vec<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Estimate yearly carbon sequestration
    Carbon {
        /// Number of trees
        #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u32).range(..=MAX_TREES as i64))]
        trees: u32,

        /// Soil area in square metres
        #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u32).range(..=MAX_SOIL_M2 as i64))]
        soil: u32,
    },
    /// Show air-purifying stats for a houseplant
    Plant {
        #[arg(value_enum)]
        kind: Plant,
    },
    /// Write the default config file
    Init {
        /// Overwrite an existing file without asking
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "eco-dash")]
#[command(about = "Local weather, air quality and your pollution footprint", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/eco-dash/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Latitude override (requires --lon)
    #[arg(long, global = true, allow_negative_numbers = true, requires = "lon")]
    lat: Option<f64>,

    /// Longitude override (requires --lat)
    #[arg(long, global = true, allow_negative_numbers = true, requires = "lat")]
    lon: Option<f64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for rustls 0.23+)
    let _ = rustls::crypto::ring::default_provider().install_default();

    let cli = Cli::parse();
    eco_dash::logging::init(cli.verbose);
    let command = cli.command.unwrap_or(Commands::Dash);
    let config_path = cli.config.map(PathBuf::from);

    // `init` must work even when the existing config is broken
    if let Commands::Init { force } = command {
        let stdin = io::stdin();
        let outcome = eco_dash::config::init::write_default_config(
            &mut stdin.lock(),
            &mut io::stdout(),
            config_path,
            force,
        );
        match outcome {
            Ok(eco_dash::config::init::InitOutcome::Written(path)) => {
                println!("Wrote default config to {}", path.display());
            }
            Ok(eco_dash::config::init::InitOutcome::Aborted) => println!("Left config unchanged."),
            Err(e) => {
                eprintln!("Init failed: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
        }
        std::process::exit(EXIT_SUCCESS);
    }

    // Load config
    let config = match eco_dash::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate config at startup
    if let Err(errors) = eco_dash::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    if let (Some(lat), Some(lon)) = (cli.lat, cli.lon) {
        if let Err(e) = validate_coordinates(lat, lon) {
            eprintln!("Invalid --lat/--lon: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    }

    let location = Location::resolve(cli.lat, cli.lon, config.location.as_ref());
    tracing::debug!("Location: {}", location.display_line());

    let use_colors = eco_dash::output::should_use_colors();

    let code = match command {
        Commands::Dash => run_dashboard(config, location).await,
        Commands::Weather => run_weather(&config.weather, &location, use_colors).await,
        Commands::Quiz { answers, json } => run_quiz(&config.quiz, &answers, json, cli.verbose, use_colors),
        Commands::Carbon { trees, soil } => {
            let inputs = CarbonInputs {
                trees,
                soil_m2: soil,
            };
            println!("{}", eco_dash::output::format_carbon(&inputs, use_colors));
            EXIT_SUCCESS
        }
        Commands::Plant { kind } => {
            println!("{}", eco_dash::output::format_plant(kind, use_colors));
            EXIT_SUCCESS
        }
        Commands::Init { .. } => EXIT_SUCCESS,
    };

    std::process::exit(code);
}

fn http_client() -> Option<reqwest::Client> {
    match eco_dash::weather::create_client() {
        Ok(c) => Some(c),
        Err(e) => {
            eprintln!("{:#}", e);
            None
        }
    }
}

async fn run_dashboard(config: Config, location: Location) -> i32 {
    let Some(client) = http_client() else {
        return EXIT_NETWORK;
    };

    // Theme detection talks to the terminal, so it runs before the TUI starts
    let theme = eco_dash::tui::resolve_theme(config.theme);
    let app = eco_dash::tui::App::new(config, location, theme);

    match eco_dash::tui::run_tui(app, client).await {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("TUI error: {:#}", e);
            EXIT_ERROR
        }
    }
}

async fn run_weather(weather: &WeatherConfig, location: &Location, use_colors: bool) -> i32 {
    let Some(client) = http_client() else {
        return EXIT_NETWORK;
    };

    let data = eco_dash::fetch::fetch_dashboard(&client, weather, location).await;
    if data.all_failed() {
        eprintln!("Weather and air quality are both unavailable. Check your network connection.");
        return EXIT_NETWORK;
    }

    println!(
        "{}",
        eco_dash::output::format_weather(location, &data, weather.humidity_placeholder, use_colors)
    );
    EXIT_SUCCESS
}

fn run_quiz(quiz: &QuizConfig, answers: &[String], json: bool, verbose: bool, use_colors: bool) -> i32 {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();
    // Keep stdout pure JSON; the questions go to stderr instead
    if json {
        take_quiz(quiz, answers, json, verbose, use_colors, &mut input, &mut io::stderr(), &mut stdout)
    } else {
        let mut prompts = io::stdout();
        take_quiz(quiz, answers, json, verbose, use_colors, &mut input, &mut prompts, &mut stdout)
    }
}

/// Collect answers (from `answers` or interactively), then write the result to `out`.
#[allow(clippy::too_many_arguments)]
fn take_quiz<R: BufRead, P: Write, O: Write>(
    quiz: &QuizConfig,
    answers: &[String],
    json: bool,
    verbose: bool,
    use_colors: bool,
    input: &mut R,
    prompts: &mut P,
    out: &mut O,
) -> i32 {
    let mut controller = OptionGroupController::new(quiz);

    if answers.is_empty() {
        if let Err(e) = eco_dash::prompt::ask_quiz(input, prompts, quiz, &mut controller) {
            eprintln!("{:#}", e);
            return EXIT_ERROR;
        }
        let _ = writeln!(prompts);
    } else {
        for answer in answers {
            match parse_answer(quiz, answer) {
                Ok(option) => controller.dispatch(QuizEvent::Select(option)),
                Err(msg) => {
                    eprintln!("{}", msg);
                    return EXIT_CONFIG;
                }
            }
        }
    }

    let result = match compute_footprint(quiz, controller.selections(), quiz.required_group_count()) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{}", e);
            return EXIT_INCOMPLETE;
        }
    };

    let rendered = if json {
        match eco_dash::output::format_footprint_json(&result, quiz.max_score) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("{:#}", e);
                return EXIT_ERROR;
            }
        }
    } else {
        let mut text = eco_dash::output::format_footprint(&result, quiz.max_score, use_colors);
        if verbose {
            text.push_str("\n\n");
            text.push_str(&eco_dash::output::format_contributions(&result));
        }
        text
    };

    if let Err(e) = writeln!(out, "{}", rendered) {
        eprintln!("Failed to write result: {}", e);
        return EXIT_ERROR;
    }

    EXIT_SUCCESS
}

/// Parse `GROUP=OPTION` against the quiz ids
fn parse_answer(quiz: &QuizConfig, answer: &str) -> Result<eco_dash::scoring::OptionRef, String> {
    let (group, option) = answer
        .split_once('=')
        .ok_or_else(|| format!("Invalid answer '{}': expected GROUP=OPTION", answer))?;
    let (group, option) = (group.trim(), option.trim());

    let Some(g) = quiz.groups.iter().find(|g| g.id == group) else {
        let ids: Vec<&str> = quiz.groups.iter().map(|g| g.id.as_str()).collect();
        return Err(format!(
            "Unknown question '{}'. Expected one of: {}",
            group,
            ids.join(", ")
        ));
    };

    quiz.find_option(group, option).ok_or_else(|| {
        let ids: Vec<&str> = g.options.iter().map(|o| o.id.as_str()).collect();
        format!(
            "Unknown answer '{}' for '{}'. Expected one of: {}",
            option,
            group,
            ids.join(", ")
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_answer() {
        let quiz = QuizConfig::default();
        let option = parse_answer(&quiz, "diet = meat").unwrap();
        assert_eq!(option.group(), 1);
        assert_eq!(option.option(), 2);
    }

    #[test]
    fn test_parse_answer_errors() {
        let quiz = QuizConfig::default();
        assert!(parse_answer(&quiz, "diet").unwrap_err().contains("GROUP=OPTION"));
        assert!(parse_answer(&quiz, "boat=sail").unwrap_err().contains("commute, diet, energy"));
        assert!(parse_answer(&quiz, "diet=fish").unwrap_err().contains("plant, mixed, meat"));
    }

    #[test]
    fn test_cli_parses_negative_longitude() {
        let cli = Cli::try_parse_from(["eco-dash", "--lat", "51.5", "--lon", "-0.12", "weather"]).unwrap();
        assert_eq!(cli.lon, Some(-0.12));
        assert!(matches!(cli.command, Some(Commands::Weather)));
    }

    #[test]
    fn test_cli_lat_requires_lon() {
        assert!(Cli::try_parse_from(["eco-dash", "--lat", "51.5"]).is_err());
    }

    #[test]
    fn test_cli_quiz_answers() {
        let cli = Cli::try_parse_from([
            "eco-dash", "quiz", "-a", "commute=car", "--answer", "diet=meat", "--json",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Quiz { answers, json }) => {
                assert_eq!(answers, vec!["commute=car", "diet=meat"]);
                assert!(json);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_cli_carbon_range() {
        assert!(Cli::try_parse_from(["eco-dash", "carbon", "--trees", "1001"]).is_err());
        assert!(Cli::try_parse_from(["eco-dash", "carbon", "--trees", "3", "--soil", "200"]).is_ok());
    }

    #[test]
    fn test_interactive_json_keeps_stdout_parseable() {
        let quiz = QuizConfig::default();
        let mut input = std::io::Cursor::new("1\n1\n1\n");
        let mut prompts = Vec::new();
        let mut out = Vec::new();

        let code = take_quiz(&quiz, &[], true, false, false, &mut input, &mut prompts, &mut out);
        assert_eq!(code, EXIT_SUCCESS);

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["score"], 0);
        assert_eq!(value["tier"], "eco");
        assert!(String::from_utf8(prompts).unwrap().contains("1. How do you usually get to work"));
    }

    #[test]
    fn test_answers_from_flags_incomplete() {
        let quiz = QuizConfig::default();
        let answers = vec!["commute=car".to_string()];
        let mut input = std::io::Cursor::new("");
        let (mut prompts, mut out) = (Vec::new(), Vec::new());

        let code = take_quiz(&quiz, &answers, false, false, false, &mut input, &mut prompts, &mut out);
        assert_eq!(code, EXIT_INCOMPLETE);
        assert!(out.is_empty());
        assert!(prompts.is_empty());
    }
}
