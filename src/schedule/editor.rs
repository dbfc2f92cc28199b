//! Schedule editor session.
//!
//! Opening the editor clones the caller's day schedules into an
//! [`EditSession`]; every operation mutates only that working copy. `save`
//! hands the result back and closes, `cancel` drops the copy. Caller state is
//! never touched until save.

use std::collections::BTreeSet;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use super::{
    copy_dialog::{CopyDialog, CopyDialogSnapshot},
    lint::{lint, ScheduleWarning},
    model::{DaySchedule, SlotPatch, TimeSlot, Weekday},
    summary::{configured_days, summary_lines},
    time::TimeOfDay,
    validity::{RangeSelection, ValidityPeriod},
};
use crate::{log_debug, log_info, log_warn};

const ENABLE_LOGS: bool = true;

/// Slot created when a day is switched on for the first time.
const FIRST_SLOT: (TimeOfDay, TimeOfDay) = (hm(6, 0), hm(8, 0));
/// Slot appended to a day that has no slots.
const EMPTY_DAY_SLOT: (TimeOfDay, TimeOfDay) = (hm(6, 0), hm(7, 0));

const fn hm(hour: u8, minute: u8) -> TimeOfDay {
    TimeOfDay::from_parts(hour, minute)
}

/// What the editor hands back on save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleOutput {
    pub day_schedules: Vec<DaySchedule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validity_period: Option<ValidityPeriod>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    day_schedules: Vec<DaySchedule>,
    validity: RangeSelection,
    copy_dialog: Option<CopyDialog>,
}

impl EditSession {
    /// Duplicate weekday entries keep their first occurrence.
    pub fn new(day_schedules: Vec<DaySchedule>, validity: RangeSelection) -> Self {
        let mut seen = BTreeSet::new();
        let mut unique = Vec::with_capacity(day_schedules.len());
        for day in day_schedules {
            if seen.insert(day.day_of_week) {
                unique.push(day);
            } else {
                log_warn!(
                    "Dropping duplicate schedule entry for {}",
                    day.day_of_week.label()
                );
            }
        }

        Self {
            day_schedules: unique,
            validity,
            copy_dialog: None,
        }
    }

    /// Stored entries, in the order they were first created.
    pub fn day_schedules(&self) -> &[DaySchedule] {
        &self.day_schedules
    }

    /// The day's schedule, or a disabled empty one when nothing is stored.
    pub fn day_schedule(&self, day: Weekday) -> DaySchedule {
        self.find(day)
            .cloned()
            .unwrap_or_else(|| DaySchedule::disabled(day))
    }

    /// Flips `enabled`. A day seen for the first time is created enabled with
    /// one `06:00-08:00` slot. Returns the new enabled state.
    pub fn toggle_day(&mut self, day: Weekday) -> bool {
        if let Some(existing) = self.find_mut(day) {
            existing.enabled = !existing.enabled;
            log_debug!("{} enabled={}", day.label(), existing.enabled);
            return existing.enabled;
        }

        self.day_schedules.push(DaySchedule {
            day_of_week: day,
            enabled: true,
            time_slots: vec![TimeSlot::new(FIRST_SLOT.0, FIRST_SLOT.1)],
        });
        log_debug!("{} enabled with default slot", day.label());
        true
    }

    /// Appends a slot one hour after the last slot's end hour, lasting one
    /// hour, keeping the last end minute. Hours wrap past 23 to 0. A day with
    /// no slots gets `06:00-07:00`. Days with no stored entry are left alone.
    pub fn add_time_slot(&mut self, day: Weekday) -> Option<&TimeSlot> {
        let schedule = self.find_mut(day)?;

        let slot = match schedule.time_slots.last() {
            None => TimeSlot::new(EMPTY_DAY_SLOT.0, EMPTY_DAY_SLOT.1),
            Some(last) => {
                let start = last.end_time.add_hours_wrapping(1);
                TimeSlot::new(start, start.add_hours_wrapping(1))
            }
        };

        log_debug!("{}: added slot {}", day.label(), slot);
        schedule.time_slots.push(slot);
        schedule.time_slots.last()
    }

    /// Returns whether a slot was removed.
    pub fn remove_time_slot(&mut self, day: Weekday, slot_id: &str) -> bool {
        let Some(schedule) = self.find_mut(day) else {
            return false;
        };
        let before = schedule.time_slots.len();
        schedule.time_slots.retain(|slot| slot.id != slot_id);
        before != schedule.time_slots.len()
    }

    /// Merges `patch` into one slot. Returns whether the slot was found.
    pub fn update_time_slot(&mut self, day: Weekday, slot_id: &str, patch: &SlotPatch) -> bool {
        let Some(slot) = self
            .find_mut(day)
            .and_then(|schedule| schedule.time_slots.iter_mut().find(|s| s.id == slot_id))
        else {
            return false;
        };
        slot.apply(patch);
        true
    }

    /// Replaces each target day with an enabled copy of the source day's
    /// slots. Copies get fresh ids so later edits stay independent. Returns
    /// the number of days written; 0 when the source has no stored entry.
    pub fn copy_times_to_days(&mut self, source: Weekday, targets: &BTreeSet<Weekday>) -> usize {
        let Some(source_slots) = self.find(source).map(|d| d.time_slots.clone()) else {
            log_warn!("Copy requested from {} which has no schedule", source.label());
            return 0;
        };

        for &target in targets {
            let copy = DaySchedule {
                day_of_week: target,
                enabled: true,
                time_slots: source_slots.iter().map(TimeSlot::duplicate).collect(),
            };
            match self.find_mut(target) {
                Some(existing) => *existing = copy,
                None => self.day_schedules.push(copy),
            }
        }

        log_info!(
            "Copied {} slot(s) from {} to {} day(s)",
            source_slots.len(),
            source.label(),
            targets.len()
        );
        targets.len()
    }

    pub fn validity(&self) -> &RangeSelection {
        &self.validity
    }

    pub fn set_validity_range(
        &mut self,
        from: Option<chrono::NaiveDate>,
        to: Option<chrono::NaiveDate>,
    ) {
        self.validity.set_range(from, to);
    }

    pub fn open_copy_dialog(&mut self, source: Weekday) -> &mut CopyDialog {
        self.copy_dialog.insert(CopyDialog::new(source))
    }

    pub fn copy_dialog(&self) -> Option<&CopyDialog> {
        self.copy_dialog.as_ref()
    }

    pub fn copy_dialog_mut(&mut self) -> Result<&mut CopyDialog> {
        self.copy_dialog
            .as_mut()
            .ok_or_else(|| anyhow!("copy dialog is not open"))
    }

    /// Copies to the selected days, then clears and closes the dialog.
    pub fn apply_copy_dialog(&mut self) -> Result<usize> {
        let mut dialog = self
            .copy_dialog
            .take()
            .ok_or_else(|| anyhow!("copy dialog is not open"))?;
        let targets = dialog.take_selection();
        Ok(self.copy_times_to_days(dialog.source_day(), &targets))
    }

    /// Returns whether a dialog was open.
    pub fn cancel_copy_dialog(&mut self) -> bool {
        self.copy_dialog.take().is_some()
    }

    pub fn lint(&self) -> Vec<ScheduleWarning> {
        lint(&self.day_schedules)
    }

    pub fn output(&self) -> ScheduleOutput {
        ScheduleOutput {
            day_schedules: self.day_schedules.clone(),
            validity_period: self.validity.committed(),
        }
    }

    fn find(&self, day: Weekday) -> Option<&DaySchedule> {
        self.day_schedules.iter().find(|d| d.day_of_week == day)
    }

    fn find_mut(&mut self, day: Weekday) -> Option<&mut DaySchedule> {
        self.day_schedules.iter_mut().find(|d| d.day_of_week == day)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditorState {
    #[default]
    Closed,
    Open(EditSession),
}

/// Open/closed wrapper around at most one [`EditSession`].
#[derive(Debug, Clone, Default)]
pub struct ScheduleEditor {
    state: EditorState,
}

impl ScheduleEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, EditorState::Open(_))
    }

    /// Starts a session on a clone of `day_schedules`, replacing any session
    /// already open.
    pub fn open(&mut self, day_schedules: &[DaySchedule], validity: RangeSelection) {
        if self.is_open() {
            log_warn!("Schedule editor reopened; discarding previous session");
        }
        self.state = EditorState::Open(EditSession::new(day_schedules.to_vec(), validity));
        log_info!("Schedule editor opened with {} day(s)", day_schedules.len());
    }

    pub fn session(&self) -> Result<&EditSession> {
        match &self.state {
            EditorState::Open(session) => Ok(session),
            EditorState::Closed => Err(anyhow!("schedule editor is not open")),
        }
    }

    pub fn session_mut(&mut self) -> Result<&mut EditSession> {
        match &mut self.state {
            EditorState::Open(session) => Ok(session),
            EditorState::Closed => Err(anyhow!("schedule editor is not open")),
        }
    }

    /// Emits the edited schedule and closes.
    pub fn save(&mut self) -> Result<ScheduleOutput> {
        let output = self.session()?.output();
        self.state = EditorState::Closed;
        log_info!(
            "Schedule editor saved {} day(s), validity={}",
            output.day_schedules.len(),
            output.validity_period.is_some()
        );
        Ok(output)
    }

    /// Discards the working copy. Returns whether a session was open.
    pub fn cancel(&mut self) -> bool {
        let was_open = self.is_open();
        self.state = EditorState::Closed;
        if was_open {
            log_info!("Schedule editor cancelled");
        }
        was_open
    }

    pub fn snapshot(&self) -> EditorSnapshot {
        match &self.state {
            EditorState::Closed => EditorSnapshot {
                open: false,
                days: Vec::new(),
                validity: RangeSelection::default(),
                copy_dialog: None,
                warnings: Vec::new(),
                summary: Vec::new(),
                configured_days: 0,
            },
            EditorState::Open(session) => EditorSnapshot {
                open: true,
                days: Weekday::all().map(|day| session.day_schedule(day)).collect(),
                validity: *session.validity(),
                copy_dialog: session.copy_dialog().map(CopyDialog::snapshot),
                warnings: session.lint(),
                summary: summary_lines(session.day_schedules()),
                configured_days: configured_days(session.day_schedules()),
            },
        }
    }
}

/// Render model: seven rows Sunday first, plus dialog state, lint output
/// and the collapsed summary.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorSnapshot {
    pub open: bool,
    pub days: Vec<DaySchedule>,
    pub validity: RangeSelection,
    pub copy_dialog: Option<CopyDialogSnapshot>,
    pub warnings: Vec<ScheduleWarning>,
    /// One line per enabled day, e.g. `Mon: 06:00-08:00`.
    pub summary: Vec<String>,
    pub configured_days: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn t(raw: &str) -> TimeOfDay {
        raw.parse().unwrap()
    }

    fn times(day: &DaySchedule) -> Vec<(String, String)> {
        day.time_slots
            .iter()
            .map(|s| (s.start_time.to_string(), s.end_time.to_string()))
            .collect()
    }

    fn session() -> EditSession {
        EditSession::new(Vec::new(), RangeSelection::default())
    }

    #[test]
    fn untouched_days_read_as_disabled_and_empty() {
        let session = session();
        for day in Weekday::all() {
            let schedule = session.day_schedule(day);
            assert_eq!(schedule.day_of_week, day);
            assert!(!schedule.enabled);
            assert!(schedule.time_slots.is_empty());
        }
    }

    #[test]
    fn first_toggle_creates_default_slot() {
        let mut session = session();
        assert!(session.toggle_day(Weekday::MONDAY));

        let monday = session.day_schedule(Weekday::MONDAY);
        assert!(monday.enabled);
        assert_eq!(times(&monday), vec![("06:00".into(), "08:00".into())]);
    }

    #[test]
    fn double_toggle_restores_enabled_and_keeps_slots() {
        let mut session = session();
        session.toggle_day(Weekday::TUESDAY);
        let before = session.day_schedule(Weekday::TUESDAY);

        session.toggle_day(Weekday::TUESDAY);
        session.toggle_day(Weekday::TUESDAY);

        assert_eq!(session.day_schedule(Weekday::TUESDAY), before);
    }

    #[test]
    fn add_to_empty_day_uses_six_to_seven() {
        let mut session = EditSession::new(
            vec![DaySchedule {
                day_of_week: Weekday::SUNDAY,
                enabled: true,
                time_slots: Vec::new(),
            }],
            RangeSelection::default(),
        );
        session.add_time_slot(Weekday::SUNDAY);

        let sunday = session.day_schedule(Weekday::SUNDAY);
        assert_eq!(times(&sunday), vec![("06:00".into(), "07:00".into())]);
    }

    #[test]
    fn add_after_late_slot_wraps_hour_and_keeps_minute() {
        let mut session = EditSession::new(
            vec![DaySchedule {
                day_of_week: Weekday::FRIDAY,
                enabled: true,
                time_slots: vec![TimeSlot::new(t("21:30"), t("23:30"))],
            }],
            RangeSelection::default(),
        );
        let added = session.add_time_slot(Weekday::FRIDAY).unwrap().clone();
        assert_eq!(added.start_time, t("00:30"));
        assert_eq!(added.end_time, t("01:30"));
    }

    #[test]
    fn add_after_slot_ending_at_23_starts_at_midnight() {
        let mut session = EditSession::new(
            vec![DaySchedule {
                day_of_week: Weekday::FRIDAY,
                enabled: true,
                time_slots: vec![TimeSlot::new(t("20:00"), t("23:00"))],
            }],
            RangeSelection::default(),
        );
        let added = session.add_time_slot(Weekday::FRIDAY).unwrap().clone();
        assert_eq!(added.to_string(), "00:00-01:00");
    }

    #[test]
    fn add_to_unknown_day_is_a_no_op() {
        let mut session = session();
        assert!(session.add_time_slot(Weekday::THURSDAY).is_none());
        assert!(session.day_schedules().is_empty());
    }

    #[test]
    fn remove_drops_one_slot_and_leaves_other_days_alone() {
        let mut session = session();
        session.toggle_day(Weekday::MONDAY);
        session.add_time_slot(Weekday::MONDAY);
        session.toggle_day(Weekday::WEDNESDAY);
        let wednesday = session.day_schedule(Weekday::WEDNESDAY);

        let victim = session.day_schedule(Weekday::MONDAY).time_slots[1].id.clone();
        assert!(session.remove_time_slot(Weekday::MONDAY, &victim));

        assert_eq!(session.day_schedule(Weekday::MONDAY).time_slots.len(), 1);
        assert_eq!(session.day_schedule(Weekday::WEDNESDAY), wednesday);
        assert!(!session.remove_time_slot(Weekday::MONDAY, "missing"));
    }

    #[test]
    fn update_merges_partial_fields_into_one_slot() {
        let mut session = session();
        session.toggle_day(Weekday::MONDAY);
        session.add_time_slot(Weekday::MONDAY);
        let slots = session.day_schedule(Weekday::MONDAY).time_slots;

        let patch = SlotPatch {
            start_time: Some(t("05:15")),
            end_time: None,
        };
        assert!(session.update_time_slot(Weekday::MONDAY, &slots[0].id, &patch));

        let after = session.day_schedule(Weekday::MONDAY).time_slots;
        assert_eq!(after[0].to_string(), "05:15-08:00");
        assert_eq!(after[1], slots[1]);
    }

    #[test]
    fn update_with_unknown_id_changes_nothing() {
        let mut session = session();
        session.toggle_day(Weekday::MONDAY);
        let before = session.day_schedules().to_vec();

        let patch = SlotPatch {
            start_time: Some(t("11:00")),
            end_time: Some(t("12:00")),
        };
        assert!(!session.update_time_slot(Weekday::MONDAY, "no-such-slot", &patch));
        assert!(!session.update_time_slot(Weekday::SUNDAY, "no-such-slot", &patch));
        assert_eq!(session.day_schedules(), before.as_slice());
    }

    #[test]
    fn copy_onto_source_day_regenerates_ids() {
        let mut session = session();
        session.toggle_day(Weekday::MONDAY);
        session.add_time_slot(Weekday::MONDAY);
        let before = session.day_schedule(Weekday::MONDAY);

        let targets: BTreeSet<Weekday> = [Weekday::MONDAY].into();
        assert_eq!(session.copy_times_to_days(Weekday::MONDAY, &targets), 1);

        let after = session.day_schedule(Weekday::MONDAY);
        assert!(after.enabled);
        assert_eq!(times(&after), times(&before));
        assert!(after
            .time_slots
            .iter()
            .all(|slot| before.time_slots.iter().all(|old| old.id != slot.id)));
        assert_eq!(session.day_schedules().len(), 1);
    }

    #[test]
    fn copy_duplicates_times_with_fresh_ids() {
        let mut session = session();
        session.toggle_day(Weekday::MONDAY);
        session.add_time_slot(Weekday::MONDAY);
        session.toggle_day(Weekday::FRIDAY);
        session.add_time_slot(Weekday::FRIDAY);
        session.add_time_slot(Weekday::FRIDAY);

        let targets: BTreeSet<Weekday> = [Weekday::WEDNESDAY, Weekday::FRIDAY].into();
        assert_eq!(session.copy_times_to_days(Weekday::MONDAY, &targets), 2);

        let source = session.day_schedule(Weekday::MONDAY);
        let source_ids: BTreeSet<&str> = source.time_slots.iter().map(|s| s.id.as_str()).collect();
        for target in targets {
            let copy = session.day_schedule(target);
            assert!(copy.enabled);
            assert_eq!(times(&copy), times(&source));
            assert!(copy.time_slots.iter().all(|s| !source_ids.contains(s.id.as_str())));
        }
    }

    #[test]
    fn copy_re_enables_a_disabled_target() {
        let mut session = session();
        session.toggle_day(Weekday::MONDAY);
        session.toggle_day(Weekday::SUNDAY);
        session.toggle_day(Weekday::SUNDAY);
        assert!(!session.day_schedule(Weekday::SUNDAY).enabled);

        session.copy_times_to_days(Weekday::MONDAY, &[Weekday::SUNDAY].into());
        assert!(session.day_schedule(Weekday::SUNDAY).enabled);
    }

    #[test]
    fn copy_from_missing_source_changes_nothing() {
        let mut session = session();
        session.toggle_day(Weekday::MONDAY);
        let before = session.clone();

        assert_eq!(
            session.copy_times_to_days(Weekday::SATURDAY, &[Weekday::MONDAY].into()),
            0
        );
        assert_eq!(session, before);
    }

    #[test]
    fn copy_dialog_apply_forwards_selection_and_closes() {
        let mut session = session();
        session.toggle_day(Weekday::MONDAY);

        let dialog = session.open_copy_dialog(Weekday::MONDAY);
        dialog.toggle_day_selection(Weekday::TUESDAY);
        dialog.toggle_day_selection(Weekday::THURSDAY);

        assert_eq!(session.apply_copy_dialog().unwrap(), 2);
        assert!(session.copy_dialog().is_none());
        assert!(session.day_schedule(Weekday::TUESDAY).enabled);
        assert!(session.day_schedule(Weekday::THURSDAY).enabled);
        assert!(session.apply_copy_dialog().is_err());
    }

    #[test]
    fn copy_dialog_cancel_has_no_side_effects() {
        let mut session = session();
        session.toggle_day(Weekday::MONDAY);
        let before = session.day_schedules().to_vec();

        session
            .open_copy_dialog(Weekday::MONDAY)
            .toggle_select_all(true);
        assert!(session.cancel_copy_dialog());

        assert_eq!(session.day_schedules(), before.as_slice());
        assert!(!session.cancel_copy_dialog());
    }

    #[test]
    fn duplicate_weekday_entries_keep_the_first() {
        let session = EditSession::new(
            vec![
                DaySchedule {
                    day_of_week: Weekday::MONDAY,
                    enabled: true,
                    time_slots: Vec::new(),
                },
                DaySchedule::disabled(Weekday::MONDAY),
            ],
            RangeSelection::default(),
        );
        assert_eq!(session.day_schedules().len(), 1);
        assert!(session.day_schedule(Weekday::MONDAY).enabled);
    }

    #[test]
    fn operations_fail_on_closed_editor() {
        let mut editor = ScheduleEditor::new();
        assert!(editor.session_mut().is_err());
        assert!(editor.save().is_err());
        assert!(!editor.cancel());
        assert!(!editor.snapshot().open);
    }

    #[test]
    fn reopening_discards_the_previous_session() {
        let mut editor = ScheduleEditor::new();
        editor.open(&[], RangeSelection::default());
        editor.session_mut().unwrap().toggle_day(Weekday::MONDAY);

        let fresh = vec![DaySchedule::disabled(Weekday::FRIDAY)];
        editor.open(&fresh, RangeSelection::default());
        assert!(editor.session().unwrap().copy_dialog().is_none());

        let output = editor.save().unwrap();
        assert_eq!(output.day_schedules, fresh);
    }

    #[test]
    fn save_without_edits_returns_input_unchanged() {
        let input = vec![
            DaySchedule {
                day_of_week: Weekday::SATURDAY,
                enabled: true,
                time_slots: vec![
                    TimeSlot::new(t("10:00"), t("12:00")),
                    TimeSlot::new(t("18:00"), t("17:00")),
                ],
            },
            DaySchedule::disabled(Weekday::SUNDAY),
        ];

        let mut editor = ScheduleEditor::new();
        editor.open(&input, RangeSelection::default());
        let output = editor.save().unwrap();

        assert_eq!(output.day_schedules, input);
        assert_eq!(output.validity_period, None);
        assert!(!editor.is_open());
    }

    #[test]
    fn cancel_leaves_caller_schedule_untouched() {
        let input = vec![DaySchedule::disabled(Weekday::MONDAY)];
        let mut editor = ScheduleEditor::new();
        editor.open(&input, RangeSelection::default());
        editor.session_mut().unwrap().toggle_day(Weekday::MONDAY);

        assert!(editor.cancel());
        assert_eq!(input, vec![DaySchedule::disabled(Weekday::MONDAY)]);
        assert!(editor.session().is_err());
    }

    #[test]
    fn save_emits_only_committed_validity() {
        let from = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2025, 4, 30).unwrap();

        let mut editor = ScheduleEditor::new();
        editor.open(&[], RangeSelection::default());
        editor.session_mut().unwrap().set_validity_range(Some(from), None);
        assert_eq!(editor.save().unwrap().validity_period, None);

        editor.open(&[], RangeSelection::default());
        editor
            .session_mut()
            .unwrap()
            .set_validity_range(Some(from), Some(to));
        assert_eq!(
            editor.save().unwrap().validity_period,
            Some(ValidityPeriod { from, to })
        );
    }

    #[test]
    fn snapshot_renders_seven_rows() {
        let mut editor = ScheduleEditor::new();
        editor.open(&[], RangeSelection::default());
        editor.session_mut().unwrap().toggle_day(Weekday::THURSDAY);

        let snapshot = editor.snapshot();
        assert!(snapshot.open);
        assert_eq!(snapshot.days.len(), 7);
        assert!(snapshot.days[4].enabled);
        assert!(snapshot.warnings.is_empty());
        assert_eq!(snapshot.summary, vec!["Thu: 06:00-08:00"]);
        assert_eq!(snapshot.configured_days, 1);
    }
}
