pub mod config;
pub mod engine;
pub mod selection;
pub mod tier;
pub mod validation;

pub use config::*;
pub use engine::{compute_footprint, Contribution, FootprintResult, IncompleteSelectionError, FALLBACK_TIP};
pub use selection::{OptionGroupController, OptionRef, QuizEvent, SelectionSet};
pub use tier::Tier;
pub use validation::validate_quiz;
