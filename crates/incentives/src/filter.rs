use crate::categories::{all_category_names, categories_present, incentive_in_categories};
use crate::model::Incentive;

pub const NO_FILTER_WARNING: &str =
    "Select at least one filter type to see available incentives.";
pub const NO_MATCH_MESSAGE: &str = "No incentives match the selected filters.";

/// Category multi-select for the incentive list.
///
/// Options come from the categories present in the loaded incentives, or
/// every known category when none of the items classify. All options start
/// selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryFilter {
    options: Vec<&'static str>,
    selected: Vec<&'static str>,
}

impl CategoryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_incentives(incentives: &[Incentive]) -> Self {
        let present = categories_present(incentives);
        let options: Vec<&'static str> = if present.is_empty() {
            all_category_names()
        } else {
            present.into_iter().collect()
        };
        Self {
            selected: options.clone(),
            options,
        }
    }

    pub fn options(&self) -> &[&'static str] {
        &self.options
    }

    pub fn selected(&self) -> &[&'static str] {
        &self.selected
    }

    pub fn is_selected(&self, option: &str) -> bool {
        self.selected.contains(&option)
    }

    /// Flip one option. Unknown options are ignored.
    ///
    /// Returns `true` if the selection changed.
    pub fn toggle(&mut self, option: &str) -> bool {
        let Some(known) = self.options.iter().copied().find(|o| *o == option) else {
            return false;
        };
        if let Some(pos) = self.selected.iter().position(|s| *s == known) {
            self.selected.remove(pos);
        } else {
            self.selected.push(known);
        }
        true
    }

    pub fn select_all(&mut self) {
        self.selected = self.options.clone();
    }

    pub fn clear_all(&mut self) {
        self.selected.clear();
    }

    /// Replace the selection; entries that are not options are dropped.
    pub fn set_selected<'a>(&mut self, selected: impl IntoIterator<Item = &'a str>) {
        let mut next: Vec<&'static str> = Vec::new();
        for s in selected {
            if let Some(known) = self.options.iter().copied().find(|o| *o == s)
                && !next.contains(&known)
            {
                next.push(known);
            }
        }
        self.selected = next;
    }

    pub fn summary_label(&self) -> String {
        match self.selected.len() {
            0 => "Select options".to_string(),
            1 => "1 option selected".to_string(),
            n => format!("{n} options selected"),
        }
    }

    pub fn warning(&self) -> Option<&'static str> {
        self.selected.is_empty().then_some(NO_FILTER_WARNING)
    }

    /// Incentives with at least one item in a selected category.
    pub fn apply<'a>(&self, incentives: &'a [Incentive]) -> Vec<&'a Incentive> {
        if self.selected.is_empty() {
            return Vec::new();
        }
        incentives
            .iter()
            .filter(|i| incentive_in_categories(i, &self.selected))
            .collect()
    }
}
