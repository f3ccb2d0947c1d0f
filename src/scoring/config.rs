use serde::{Deserialize, Serialize};

/// Pollution footprint quiz table.
///
/// Each group is one question; exactly one of its options can be chosen. The
/// table is data only: scores and tips can be edited without touching the
/// engine.
///
/// Example YAML:
/// ```yaml
/// quiz:
///   max_score: 90
///   groups:
///     - id: commute
///       prompt: "How do you usually get to work or school?"
///       options:
///         - { id: walk, label: "Walk or cycle", score: 0 }
///         - { id: car, label: "Drive alone", score: 20, tip: "Try car-pooling." }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct QuizConfig {
    /// Denominator shown next to the score ("35 / 90"). Display only.
    #[serde(default = "default_max_score")]
    pub max_score: u32,

    /// Question groups, in presentation order
    pub groups: Vec<QuestionGroup>,
}

fn default_max_score() -> u32 {
    90
}

/// One quiz question and its mutually exclusive answers.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct QuestionGroup {
    pub id: String,
    pub prompt: String,
    pub options: Vec<QuizOption>,
}

/// A selectable answer.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct QuizOption {
    pub id: String,
    pub label: String,
    pub score: u32,

    /// Remediation tip, only set on the higher impact answers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
}

impl QuizOption {
    fn new(id: &str, label: &str, score: u32, tip: Option<&str>) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            score,
            tip: tip.map(str::to_string),
        }
    }
}

impl QuizConfig {
    /// Number of groups that must be answered before a result can be computed
    pub fn required_group_count(&self) -> usize {
        self.groups.len()
    }

    /// Highest score reachable by picking the worst option in every group
    pub fn worst_case_score(&self) -> u32 {
        self.groups
            .iter()
            .map(|g| g.options.iter().map(|o| o.score).max().unwrap_or(0))
            .fold(0u32, u32::saturating_add)
    }
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            max_score: default_max_score(),
            groups: vec![
                QuestionGroup {
                    id: "commute".to_string(),
                    prompt: "How do you usually get to work or school?".to_string(),
                    options: vec![
                        QuizOption::new("walk", "Walk or cycle", 0, None),
                        QuizOption::new("transit", "Public transport", 10, None),
                        QuizOption::new(
                            "car",
                            "Drive alone",
                            20,
                            Some("Try car-pooling, public transport or cycling a few days a week."),
                        ),
                    ],
                },
                QuestionGroup {
                    id: "diet".to_string(),
                    prompt: "How would you describe your diet?".to_string(),
                    options: vec![
                        QuizOption::new("plant", "Mostly plant-based", 0, None),
                        QuizOption::new("mixed", "Mixed", 15, None),
                        QuizOption::new(
                            "meat",
                            "Meat with most meals",
                            30,
                            Some("Swap in a few meat-free days each week to cut food emissions."),
                        ),
                    ],
                },
                QuestionGroup {
                    id: "energy".to_string(),
                    prompt: "How do you power and heat your home?".to_string(),
                    options: vec![
                        QuizOption::new("renewable", "Renewable tariff or solar", 0, None),
                        QuizOption::new("mixed", "Standard grid mix", 10, None),
                        QuizOption::new(
                            "fossil",
                            "Gas, oil or coal heating",
                            40,
                            Some("Switch to a renewable tariff and lower the thermostat by 1°C."),
                        ),
                    ],
                },
            ],
        }
    }
}
