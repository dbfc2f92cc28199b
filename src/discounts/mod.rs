//! Glue between stored offers and the schedule editor.

#[cfg(feature = "desktop")]
pub mod commands;

use chrono::NaiveDate;

use crate::{
    db::models::DiscountKind,
    schedule::{DaySchedule, RangeSelection, ValidityPeriod},
    settings::SchedulingDefaults,
};

/// Range the validity overlay starts with: the stored period when there is
/// one, otherwise `today` plus the configured default length.
pub fn initial_selection(
    stored: Option<ValidityPeriod>,
    today: NaiveDate,
    defaults: SchedulingDefaults,
) -> RangeSelection {
    RangeSelection::from_period(
        stored.unwrap_or_else(|| ValidityPeriod::starting(today, defaults.validity_days)),
    )
}

/// Editor input for an existing offer.
pub fn editor_opening(
    kind: &DiscountKind,
    today: NaiveDate,
    defaults: SchedulingDefaults,
) -> (Vec<DaySchedule>, RangeSelection) {
    let (day_schedules, stored) = kind.editor_input();
    (day_schedules, initial_selection(stored, today, defaults))
}
