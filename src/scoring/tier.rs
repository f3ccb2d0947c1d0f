use serde::Serialize;

/// Highest score still classified as [`Tier::Eco`]
pub const ECO_MAX: u32 = 20;

/// Highest score still classified as [`Tier::Moderate`]
pub const MODERATE_MAX: u32 = 50;

/// Qualitative footprint classification. Lower scores are better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Eco,
    Moderate,
    High,
}

impl Tier {
    /// Classify a total score. Both edges are inclusive on the lower tier:
    /// 20 is Eco, 50 is Moderate.
    pub fn classify(total_score: u32) -> Self {
        if total_score <= ECO_MAX {
            Tier::Eco
        } else if total_score <= MODERATE_MAX {
            Tier::Moderate
        } else {
            Tier::High
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tier::Eco => "Eco",
            Tier::Moderate => "Moderate",
            Tier::High => "High",
        }
    }

    /// Headline shown above the tips
    pub fn message(&self) -> &'static str {
        match self {
            Tier::Eco => "🌱 Excellent! You are an Eco-Warrior.",
            Tier::Moderate => "⚠️ Moderate. Good start, but room to improve.",
            Tier::High => "🛑 High Impact. Please consider the tips below.",
        }
    }
}
