use super::config::{QuizConfig, QuizOption};

/// Handle to one option of the quiz table.
///
/// Only obtainable from a [`QuizConfig`], so any `OptionRef` names an option
/// that exists in the table it was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OptionRef {
    group: usize,
    option: usize,
}

impl OptionRef {
    pub fn group(&self) -> usize {
        self.group
    }

    pub fn option(&self) -> usize {
        self.option
    }
}

impl QuizConfig {
    /// Reference to the option at `option` in group `group`, by position
    pub fn option_ref(&self, group: usize, option: usize) -> Option<OptionRef> {
        self.groups
            .get(group)
            .and_then(|g| g.options.get(option))
            .map(|_| OptionRef { group, option })
    }

    /// Reference to an option by group id and option id
    pub fn find_option(&self, group_id: &str, option_id: &str) -> Option<OptionRef> {
        let group = self.groups.iter().position(|g| g.id == group_id)?;
        let option = self.groups[group]
            .options
            .iter()
            .position(|o| o.id == option_id)?;
        Some(OptionRef { group, option })
    }

    /// All option references of one group, in table order
    pub fn group_options(&self, group: usize) -> Vec<OptionRef> {
        self.groups
            .get(group)
            .map(|g| {
                (0..g.options.len())
                    .map(|option| OptionRef { group, option })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Resolve a reference back into the option it names
    pub fn resolve(&self, option: OptionRef) -> Option<&QuizOption> {
        self.groups
            .get(option.group)
            .and_then(|g| g.options.get(option.option))
    }
}

/// The currently chosen option of every group (at most one each).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSet {
    slots: Vec<Option<usize>>,
}

impl SelectionSet {
    /// Empty selection for `group_count` groups
    pub fn new(group_count: usize) -> Self {
        Self {
            slots: vec![None; group_count],
        }
    }

    /// Number of groups that currently have a selection
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn group_count(&self) -> usize {
        self.slots.len()
    }

    /// The selected option in `group`, if any
    pub fn selected(&self, group: usize) -> Option<OptionRef> {
        self.slots
            .get(group)
            .copied()
            .flatten()
            .map(|option| OptionRef { group, option })
    }

    pub fn is_selected(&self, option: OptionRef) -> bool {
        self.selected(option.group) == Some(option)
    }

    /// Selected options in group order
    pub fn iter(&self) -> impl Iterator<Item = OptionRef> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(group, slot)| slot.map(|option| OptionRef { group, option }))
    }
}

/// Input to the [`OptionGroupController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizEvent {
    /// User picked an option; replaces the previous pick in its group
    Select(OptionRef),
    /// Forget every selection
    Reset,
}

/// Owns the [`SelectionSet`] and applies selection events to it.
#[derive(Debug, Clone)]
pub struct OptionGroupController {
    selections: SelectionSet,
}

impl OptionGroupController {
    pub fn new(quiz: &QuizConfig) -> Self {
        Self {
            selections: SelectionSet::new(quiz.groups.len()),
        }
    }

    pub fn dispatch(&mut self, event: QuizEvent) {
        match event {
            QuizEvent::Select(option) => self.select(option),
            QuizEvent::Reset => {
                self.selections = SelectionSet::new(self.selections.group_count());
            }
        }
    }

    /// Select `option`, clearing whatever else was selected in its group.
    /// Other groups are untouched.
    pub fn select(&mut self, option: OptionRef) {
        if let Some(slot) = self.selections.slots.get_mut(option.group) {
            *slot = Some(option.option);
        }
    }

    pub fn selections(&self) -> &SelectionSet {
        &self.selections
    }
}
