pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::App;
pub use theme::{resolve_theme, ThemeColors};

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::{Event, EventHandler};
use tokio::task::JoinHandle;
use tokio::time::error::Elapsed;

use crate::fetch::{fetch_dashboard, DashboardData};

const TICK_RATE: Duration = Duration::from_millis(250);
const FETCH_TIMEOUT: Duration = Duration::from_secs(20);

type FetchHandle = JoinHandle<Result<DashboardData, Elapsed>>;

fn spawn_fetch(app: &App, client: &reqwest::Client) -> FetchHandle {
    let client = client.clone();
    let weather_config = app.config.weather.clone();
    let location = app.location;
    tokio::spawn(async move {
        tokio::time::timeout(
            FETCH_TIMEOUT,
            fetch_dashboard(&client, &weather_config, &location),
        )
        .await
    })
}

pub async fn run_tui(mut app: App, client: reqwest::Client) -> anyhow::Result<()> {
    // Buffer stderr while TUI is active to prevent output corrupting the display
    crate::stderr_buffer::activate();

    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();

    let mut events = EventHandler::new(TICK_RATE, app.config.weather.refresh_duration());

    let mut pending_fetch: Option<FetchHandle> = Some(spawn_fetch(&app, &client));
    app.is_loading = true;

    let result = loop {
        if let Err(e) = terminal.draw(|frame| ui::draw(frame, &app)) {
            break Err(e.into());
        }

        match events.next().await {
            Event::Key(key) => handle_key_event(&mut app, key),
            Event::Tick => {
                app.update_flash();
                app.advance_spinner();
            }
            Event::Refresh => app.needs_refresh = true,
        }

        // Check if background fetch has completed
        if let Some(handle) = pending_fetch.take_if(|h| h.is_finished()) {
            match handle.await {
                Ok(Ok(data)) => app.update_data(data),
                Ok(Err(_elapsed)) => {
                    tracing::warn!("Dashboard refresh timed out");
                    app.show_flash(
                        "Refresh timed out (20s). Will retry on next refresh.".to_string(),
                    );
                }
                Err(e) => app.show_flash(format!("Refresh task panicked: {}", e)),
            }
            app.is_loading = false;
        }

        // Start a new refresh once the previous one is done
        if app.needs_refresh && pending_fetch.is_none() {
            app.needs_refresh = false;
            pending_fetch = Some(spawn_fetch(&app, &client));
            app.is_loading = true;
        }

        if app.should_quit {
            break Ok(());
        }
    };

    if let Some(handle) = pending_fetch {
        handle.abort();
    }

    // Restore terminal
    ratatui::restore();

    // Flush buffered stderr messages now that the terminal is restored
    for msg in crate::stderr_buffer::drain() {
        eprint!("{}", msg);
    }

    result
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    if app.input_mode == app::InputMode::Help {
        // Any key exits help
        app.dismiss_help();
        return;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true
        }

        KeyCode::Tab => app.focus_next(),
        KeyCode::Char('?') => app.show_help(),
        KeyCode::Char('r') => {
            app.needs_refresh = true;
            app.show_flash("Refreshing...".to_string());
        }

        _ => match app.focus {
            app::Panel::Quiz => handle_quiz_key(app, key.code),
            app::Panel::Carbon => handle_carbon_key(app, key.code),
            app::Panel::Plants => handle_plant_key(app, key.code),
        },
    }
}

fn handle_quiz_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('j') | KeyCode::Down => app.quiz_move_group(1),
        KeyCode::Char('k') | KeyCode::Up => app.quiz_move_group(-1),
        KeyCode::Char('l') | KeyCode::Right => app.quiz_move_option(1),
        KeyCode::Char('h') | KeyCode::Left => app.quiz_move_option(-1),
        KeyCode::Enter | KeyCode::Char(' ') => app.quiz_select_cursor(),
        KeyCode::Char(c @ '1'..='9') => {
            if let Some(n) = c.to_digit(10) {
                app.quiz_select(n as usize - 1);
            }
        }
        KeyCode::Char('c') => app.quiz_calculate(),
        KeyCode::Char('x') => app.quiz_reset(),
        _ => {}
    }
}

fn handle_carbon_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('k') | KeyCode::Up => app.carbon_trees(1),
        KeyCode::Char('j') | KeyCode::Down => app.carbon_trees(-1),
        KeyCode::Char('l') | KeyCode::Right => app.carbon_soil(1),
        KeyCode::Char('h') | KeyCode::Left => app.carbon_soil(-1),
        _ => {}
    }
}

fn handle_plant_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('l') | KeyCode::Right => app.next_plant(),
        KeyCode::Char('h') | KeyCode::Left => app.previous_plant(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculators::Plant;
    use crate::config::Config;
    use crate::location::Location;
    use crate::scoring::Tier;

    fn app() -> App {
        App::new(
            Config::default(),
            Location::default_london(),
            ThemeColors::dark(),
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_quit_keys() {
        let mut a = app();
        press(&mut a, KeyCode::Char('q'));
        assert!(a.should_quit);

        let mut b = app();
        handle_key_event(
            &mut b,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(b.should_quit);
    }

    #[test]
    fn test_plain_c_calculates_instead_of_quitting() {
        let mut app = app();
        press(&mut app, KeyCode::Char('c'));
        assert!(!app.should_quit);
        assert!(app.flash_message.is_some());
    }

    #[test]
    fn test_quiz_flow_with_number_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('c'));

        let result = app.footprint.as_ref().unwrap();
        assert_eq!(result.total_score, 10);
        assert_eq!(result.tier, Tier::Eco);
    }

    #[test]
    fn test_quiz_cursor_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.quiz.selections().selected(0).unwrap().option(), 2);

        press(&mut app, KeyCode::Char('x'));
        assert!(app.quiz.selections().is_empty());
    }

    #[test]
    fn test_keys_route_to_focused_panel() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.carbon.trees, 2);
        assert_eq!(app.carbon.soil_m2, 50);
        assert!(app.quiz.selections().is_empty());

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.plant, Plant::Areca);
    }

    #[test]
    fn test_help_swallows_next_key() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.input_mode, app::InputMode::Help);

        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.input_mode, app::InputMode::Normal);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_refresh_key() {
        let mut app = app();
        press(&mut app, KeyCode::Char('r'));
        assert!(app.needs_refresh);
    }
}
