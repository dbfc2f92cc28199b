use std::collections::BTreeSet;

use serde::Serialize;

use super::model::Weekday;

/// Selection state of the "copy times to" dialog.
///
/// Collects target weekdays for a copy of one source day's slots. It owns no
/// schedule data; the editor session forwards the selection on apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyDialog {
    source_day: Weekday,
    selected: BTreeSet<Weekday>,
}

impl CopyDialog {
    pub fn new(source_day: Weekday) -> Self {
        Self {
            source_day,
            selected: BTreeSet::new(),
        }
    }

    pub fn source_day(&self) -> Weekday {
        self.source_day
    }

    pub fn selected(&self) -> &BTreeSet<Weekday> {
        &self.selected
    }

    /// True iff all seven days are selected.
    pub fn select_all(&self) -> bool {
        self.selected.len() == 7
    }

    pub fn toggle_day_selection(&mut self, day: Weekday) {
        if !self.selected.remove(&day) {
            self.selected.insert(day);
        }
    }

    pub fn toggle_select_all(&mut self, checked: bool) {
        if checked {
            self.selected = Weekday::all().collect();
        } else {
            self.selected.clear();
        }
    }

    /// Hands the selection over and leaves the dialog empty.
    pub fn take_selection(&mut self) -> BTreeSet<Weekday> {
        std::mem::take(&mut self.selected)
    }

    pub fn snapshot(&self) -> CopyDialogSnapshot {
        CopyDialogSnapshot {
            source_day: self.source_day,
            selected_days: self.selected.iter().copied().collect(),
            select_all: self.select_all(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CopyDialogSnapshot {
    pub source_day: Weekday,
    pub selected_days: Vec<Weekday>,
    pub select_all: bool,
}
