use std::collections::HashSet;

use super::config::QuizConfig;

/// Validate the quiz table at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_quiz(config: &QuizConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.max_score == 0 {
        errors.push("quiz.max_score: must be greater than zero".to_string());
    } else if config.max_score < config.worst_case_score() {
        errors.push(format!(
            "quiz.max_score: {} is below the highest reachable score {}",
            config.max_score,
            config.worst_case_score()
        ));
    }

    if config.groups.is_empty() {
        errors.push("quiz.groups: at least one question is required".to_string());
    }

    let mut group_ids = HashSet::new();
    for (i, group) in config.groups.iter().enumerate() {
        if group.id.trim().is_empty() {
            errors.push(format!("quiz.groups[{}].id: must not be empty", i));
        } else if !group_ids.insert(group.id.as_str()) {
            errors.push(format!("quiz.groups[{}].id: duplicate id '{}'", i, group.id));
        }

        if group.options.is_empty() {
            errors.push(format!(
                "quiz.groups[{}].options: at least one option is required",
                i
            ));
        }

        let mut option_ids = HashSet::new();
        for (j, option) in group.options.iter().enumerate() {
            if option.id.trim().is_empty() {
                errors.push(format!("quiz.groups[{}].options[{}].id: must not be empty", i, j));
            } else if !option_ids.insert(option.id.as_str()) {
                errors.push(format!(
                    "quiz.groups[{}].options[{}].id: duplicate id '{}'",
                    i, j, option.id
                ));
            }

            if let Some(ref tip) = option.tip {
                if tip.trim().is_empty() {
                    errors.push(format!(
                        "quiz.groups[{}].options[{}].tip: must not be blank (omit it instead)",
                        i, j
                    ));
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
