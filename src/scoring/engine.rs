use serde::Serialize;
use thiserror::Error;

use super::config::QuizConfig;
use super::selection::SelectionSet;
use super::tier::Tier;

/// Shown when none of the chosen answers carries a tip
pub const FALLBACK_TIP: &str = "Keep up the amazing work! Spread the message to your friends.";

/// Returned when a footprint is requested before every question is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Please answer all {required} questions to calculate your footprint ({selected} answered).")]
pub struct IncompleteSelectionError {
    pub selected: usize,
    pub required: usize,
}

/// One answered question's share of the total
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contribution {
    pub group: String,  // group id, e.g. "commute"
    pub answer: String, // option label, e.g. "Drive alone"
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FootprintResult {
    pub total_score: u32,
    pub tier: Tier,
    pub tips: Vec<String>,
    pub contributions: Vec<Contribution>,
}

/// Aggregate the current selections into a footprint.
///
/// Fails without computing anything when fewer than `required_group_count`
/// groups have an answer that exists in `quiz`. Tips keep group order; if no
/// chosen option has a tip, the result carries [`FALLBACK_TIP`] alone.
pub fn compute_footprint(
    quiz: &QuizConfig,
    selections: &SelectionSet,
    required_group_count: usize,
) -> Result<FootprintResult, IncompleteSelectionError> {
    // Only answers that resolve against this table count as answered
    let answered: Vec<_> = selections
        .iter()
        .filter_map(|option_ref| {
            let group = quiz.groups.get(option_ref.group())?;
            let option = quiz.resolve(option_ref)?;
            Some((group, option))
        })
        .collect();

    let selected = answered.len();
    if selected < required_group_count {
        return Err(IncompleteSelectionError {
            selected,
            required: required_group_count,
        });
    }

    let mut total_score: u32 = 0;
    let mut tips = Vec::new();
    let mut contributions = Vec::with_capacity(selected);

    for (group, option) in answered {
        total_score = total_score.saturating_add(option.score);
        if let Some(tip) = &option.tip {
            tips.push(tip.clone());
        }
        contributions.push(Contribution {
            group: group.id.clone(),
            answer: option.label.clone(),
            score: option.score,
        });
    }

    if tips.is_empty() {
        tips.push(FALLBACK_TIP.to_string());
    }

    Ok(FootprintResult {
        total_score,
        tier: Tier::classify(total_score),
        tips,
        contributions,
    })
}
