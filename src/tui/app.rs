use std::time::Instant;

use crate::calculators::{CarbonInputs, Plant};
use crate::config::Config;
use crate::fetch::DashboardData;
use crate::location::Location;
use crate::scoring::{
    compute_footprint, FootprintResult, OptionGroupController, QuizEvent,
};
use crate::tui::theme::ThemeColors;

/// Trees added or removed per key press
pub const TREE_STEP: i64 = 1;
/// Soil square metres added or removed per key press
pub const SOIL_STEP: i64 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Quiz,
    Carbon,
    Plants,
}

impl Panel {
    pub fn next(self) -> Self {
        match self {
            Panel::Quiz => Panel::Carbon,
            Panel::Carbon => Panel::Plants,
            Panel::Plants => Panel::Quiz,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    Help,
}

pub struct App {
    pub config: Config,
    pub location: Location,
    pub theme: ThemeColors,

    // Weather and air quality
    pub data: DashboardData,
    pub is_loading: bool,
    pub last_refresh: Option<Instant>,
    pub needs_refresh: bool,
    pub spinner_frame: usize,

    // Calculators
    pub carbon: CarbonInputs,
    pub plant: Plant,

    // Footprint quiz
    pub quiz: OptionGroupController,
    pub quiz_group: usize,  // group under the cursor
    pub quiz_option: usize, // option under the cursor within that group
    pub footprint: Option<FootprintResult>,

    pub focus: Panel,
    pub input_mode: InputMode,
    pub flash_message: Option<(String, Instant)>,
    pub should_quit: bool,
}

impl App {
    /// New app with no data yet; the caller starts the first fetch
    pub fn new(config: Config, location: Location, theme: ThemeColors) -> Self {
        let quiz = OptionGroupController::new(&config.quiz);
        Self {
            config,
            location,
            theme,
            data: DashboardData::default(),
            is_loading: true,
            last_refresh: None,
            needs_refresh: false,
            spinner_frame: 0,
            carbon: CarbonInputs::default(),
            plant: Plant::Snake,
            quiz,
            quiz_group: 0,
            quiz_option: 0,
            footprint: None,
            focus: Panel::Quiz,
            input_mode: InputMode::Normal,
            flash_message: None,
            should_quit: false,
        }
    }

    pub fn update_flash(&mut self) {
        if let Some((_, timestamp)) = self.flash_message {
            if timestamp.elapsed().as_secs() >= 3 {
                self.flash_message = None;
            }
        }
    }

    pub fn show_flash(&mut self, msg: String) {
        self.flash_message = Some((msg, Instant::now()));
    }

    /// Advance the loading spinner animation frame
    pub fn advance_spinner(&mut self) {
        self.spinner_frame = self.spinner_frame.wrapping_add(1);
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    /// Merge a fresh fetch. A panel whose fetch failed keeps its last good data.
    pub fn update_data(&mut self, data: DashboardData) {
        let msg = match (data.weather.is_some(), data.air_quality.is_some()) {
            (true, true) => "Refreshed weather and air quality".to_string(),
            (true, false) => "Refreshed weather (air quality unavailable)".to_string(),
            (false, true) => "Refreshed air quality (weather unavailable)".to_string(),
            (false, false) => format!(
                "Refresh failed: {}",
                data.errors.first().map(String::as_str).unwrap_or("no data")
            ),
        };
        if !data.all_failed() {
            self.last_refresh = Some(Instant::now());
        }
        if let Some(weather) = data.weather {
            self.data.weather = Some(weather);
        }
        if let Some(air_quality) = data.air_quality {
            self.data.air_quality = Some(air_quality);
        }
        self.data.errors = data.errors;
        self.show_flash(msg);
    }

    // --- Quiz ---

    fn quiz_group_len(&self) -> usize {
        self.config
            .quiz
            .groups
            .get(self.quiz_group)
            .map(|g| g.options.len())
            .unwrap_or(0)
    }

    /// Move the cursor to another question, landing on its current answer
    pub fn quiz_move_group(&mut self, delta: isize) {
        let count = self.config.quiz.groups.len();
        if count == 0 {
            return;
        }
        self.quiz_group = wrap(self.quiz_group, delta, count);
        self.quiz_option = self
            .quiz
            .selections()
            .selected(self.quiz_group)
            .map(|o| o.option())
            .unwrap_or(0);
    }

    pub fn quiz_move_option(&mut self, delta: isize) {
        let count = self.quiz_group_len();
        if count == 0 {
            return;
        }
        self.quiz_option = wrap(self.quiz_option, delta, count);
    }

    /// Select the option under the cursor
    pub fn quiz_select_cursor(&mut self) {
        self.quiz_select(self.quiz_option);
    }

    /// Select option `index` of the focused question (number keys)
    pub fn quiz_select(&mut self, index: usize) {
        if let Some(option) = self.config.quiz.option_ref(self.quiz_group, index) {
            self.quiz.dispatch(QuizEvent::Select(option));
            self.quiz_option = index;
        }
    }

    /// Compute the footprint from the current answers.
    /// On missing answers the previous result stays hidden and a prompt is shown.
    pub fn quiz_calculate(&mut self) {
        match compute_footprint(
            &self.config.quiz,
            self.quiz.selections(),
            self.config.quiz.required_group_count(),
        ) {
            Ok(result) => {
                tracing::debug!(
                    "Footprint {} ({})",
                    result.total_score,
                    result.tier.label()
                );
                self.footprint = Some(result);
            }
            Err(e) => {
                self.footprint = None;
                self.show_flash(e.to_string());
            }
        }
    }

    pub fn quiz_reset(&mut self) {
        self.quiz.dispatch(QuizEvent::Reset);
        self.footprint = None;
        self.quiz_group = 0;
        self.quiz_option = 0;
    }

    // --- Calculators ---

    pub fn carbon_trees(&mut self, steps: i64) {
        self.carbon.step_trees(steps * TREE_STEP);
    }

    pub fn carbon_soil(&mut self, steps: i64) {
        self.carbon.step_soil(steps * SOIL_STEP);
    }

    pub fn next_plant(&mut self) {
        self.plant = self.plant.next();
    }

    pub fn previous_plant(&mut self) {
        self.plant = self.plant.previous();
    }

    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    pub fn dismiss_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }
}

fn wrap(current: usize, delta: isize, len: usize) -> usize {
    (current as isize + delta).rem_euclid(len as isize) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{Tier, FALLBACK_TIP};
    use crate::weather::AirQuality;

    fn app() -> App {
        App::new(
            Config::default(),
            Location::default_london(),
            ThemeColors::dark(),
        )
    }

    #[test]
    fn test_new_app_is_loading() {
        let app = app();
        assert!(app.is_loading);
        assert!(app.footprint.is_none());
        assert!(app.quiz.selections().is_empty());
        assert_eq!(app.focus, Panel::Quiz);
    }

    #[test]
    fn test_calculate_incomplete_shows_prompt() {
        let mut app = app();
        app.quiz_select(2);
        app.quiz_calculate();

        assert!(app.footprint.is_none());
        let (msg, _) = app.flash_message.clone().unwrap();
        assert!(msg.contains("answer all 3 questions"));
    }

    #[test]
    fn test_answer_all_and_calculate() {
        let mut app = app();
        app.quiz_select(2); // commute: car, 20
        app.quiz_move_group(1);
        app.quiz_select(1); // diet: mixed, 15
        app.quiz_move_group(1);
        app.quiz_select(0); // energy: renewable, 0
        app.quiz_calculate();

        let result = app.footprint.as_ref().unwrap();
        assert_eq!(result.total_score, 35);
        assert_eq!(result.tier, Tier::Moderate);
    }

    #[test]
    fn test_cursor_select_and_reselect() {
        let mut app = app();
        app.quiz_move_option(1);
        app.quiz_select_cursor();
        app.quiz_move_option(1);
        app.quiz_select_cursor();

        let selected = app.quiz.selections().selected(0).unwrap();
        assert_eq!(selected.option(), 2);
        assert_eq!(app.quiz.selections().len(), 1);
    }

    #[test]
    fn test_move_group_restores_cursor_to_answer() {
        let mut app = app();
        app.quiz_select(1);
        app.quiz_move_group(1);
        assert_eq!(app.quiz_option, 0);
        app.quiz_move_group(-1);
        assert_eq!(app.quiz_group, 0);
        assert_eq!(app.quiz_option, 1);
    }

    #[test]
    fn test_cursor_wraps() {
        let mut app = app();
        app.quiz_move_group(-1);
        assert_eq!(app.quiz_group, 2);
        app.quiz_move_option(-1);
        assert_eq!(app.quiz_option, 2);
    }

    #[test]
    fn test_out_of_range_number_key_ignored() {
        let mut app = app();
        app.quiz_select(8);
        assert!(app.quiz.selections().is_empty());
    }

    #[test]
    fn test_reset_clears_result() {
        let mut app = app();
        for _ in 0..3 {
            app.quiz_select(0);
            app.quiz_move_group(1);
        }
        app.quiz_calculate();
        assert_eq!(app.footprint.as_ref().unwrap().tips, vec![FALLBACK_TIP]);

        app.quiz_reset();
        assert!(app.footprint.is_none());
        assert!(app.quiz.selections().is_empty());
    }

    #[test]
    fn test_carbon_steps() {
        let mut app = app();
        app.carbon_trees(3);
        app.carbon_soil(2);
        app.carbon_soil(-5);
        assert_eq!(app.carbon.trees, 3);
        assert_eq!(app.carbon.soil_m2, 0);
    }

    #[test]
    fn test_plant_cycle() {
        let mut app = app();
        app.previous_plant();
        assert_eq!(app.plant, Plant::Peace);
        app.next_plant();
        app.next_plant();
        assert_eq!(app.plant, Plant::Areca);
    }

    #[test]
    fn test_focus_cycles() {
        let mut app = app();
        app.focus_next();
        app.focus_next();
        assert_eq!(app.focus, Panel::Plants);
        app.focus_next();
        assert_eq!(app.focus, Panel::Quiz);
    }

    #[test]
    fn test_update_data_partial() {
        let mut app = app();
        app.update_data(DashboardData {
            weather: None,
            air_quality: Some(AirQuality {
                pm10: Some(1.0),
                pm2_5: None,
                no2: None,
                ozone: None,
            }),
            errors: vec!["Weather fetch failed: timeout".to_string()],
        });

        assert!(app.last_refresh.is_some());
        let (msg, _) = app.flash_message.clone().unwrap();
        assert!(msg.contains("weather unavailable"));
    }

    #[test]
    fn test_update_data_all_failed() {
        let mut app = app();
        app.update_data(DashboardData {
            weather: None,
            air_quality: None,
            errors: vec!["Weather fetch failed: timeout".to_string()],
        });
        let (msg, _) = app.flash_message.clone().unwrap();
        assert_eq!(msg, "Refresh failed: Weather fetch failed: timeout");
    }

    #[test]
    fn test_failed_refresh_keeps_previous_data() {
        let mut app = app();
        let air = AirQuality {
            pm10: Some(12.0),
            pm2_5: Some(6.0),
            no2: None,
            ozone: None,
        };
        app.update_data(DashboardData {
            weather: None,
            air_quality: Some(air),
            errors: vec![],
        });
        let first_refresh = app.last_refresh;

        app.update_data(DashboardData {
            weather: None,
            air_quality: None,
            errors: vec!["Air Quality fetch failed: timeout".to_string()],
        });

        assert_eq!(app.data.air_quality, Some(air));
        assert_eq!(app.last_refresh, first_refresh);
        assert_eq!(app.data.errors.len(), 1);
    }
}
