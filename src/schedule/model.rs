//! Weekly availability data model.
//!
//! A recurring schedule is a set of [`DaySchedule`]s keyed by [`Weekday`],
//! each holding an ordered list of [`TimeSlot`]s. Insertion order of slots is
//! display order, not chronological order.

use std::fmt;

use anyhow::{bail, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use super::{time::TimeOfDay, validity::ValidityPeriod};

const LABELS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Day of the week, 0 = Sunday through 6 = Saturday.
///
/// The numeric key is the only identity used to match days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Weekday(u8);

impl Weekday {
    pub const SUNDAY: Weekday = Weekday(0);
    pub const MONDAY: Weekday = Weekday(1);
    pub const TUESDAY: Weekday = Weekday(2);
    pub const WEDNESDAY: Weekday = Weekday(3);
    pub const THURSDAY: Weekday = Weekday(4);
    pub const FRIDAY: Weekday = Weekday(5);
    pub const SATURDAY: Weekday = Weekday(6);

    pub fn new(day: u8) -> Result<Self> {
        if day > 6 {
            bail!("day of week {day} is out of range 0-6");
        }
        Ok(Self(day))
    }

    /// All seven days in display order (Sunday first).
    pub fn all() -> impl Iterator<Item = Weekday> {
        (0..7).map(Weekday)
    }

    pub fn index(&self) -> u8 {
        self.0
    }

    pub fn label(&self) -> &'static str {
        LABELS[usize::from(self.0)]
    }

    pub fn short_label(&self) -> &'static str {
        &LABELS[usize::from(self.0)][..3]
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Weekday {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.0)
    }
}

impl<'de> Deserialize<'de> for Weekday {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = u8::deserialize(deserializer)?;
        Weekday::new(raw).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub id: String,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

impl TimeSlot {
    /// Creates a slot with a freshly generated id.
    pub fn new(start_time: TimeOfDay, end_time: TimeOfDay) -> Self {
        Self {
            id: new_slot_id(),
            start_time,
            end_time,
        }
    }

    /// Same times, new identity.
    pub fn duplicate(&self) -> Self {
        Self::new(self.start_time, self.end_time)
    }

    /// End before start: the window runs past midnight.
    pub fn crosses_midnight(&self) -> bool {
        self.end_time < self.start_time
    }

    pub fn apply(&mut self, patch: &SlotPatch) {
        if let Some(start) = patch.start_time {
            self.start_time = start;
        }
        if let Some(end) = patch.end_time {
            self.end_time = end;
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start_time, self.end_time)
    }
}

pub fn new_slot_id() -> String {
    Uuid::new_v4().to_string()
}

/// Partial slot update; absent fields are left untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotPatch {
    #[serde(default)]
    pub start_time: Option<TimeOfDay>,
    #[serde(default)]
    pub end_time: Option<TimeOfDay>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    pub day_of_week: Weekday,
    pub enabled: bool,
    #[serde(default)]
    pub time_slots: Vec<TimeSlot>,
}

impl DaySchedule {
    /// What a day with no stored schedule reads as.
    pub fn disabled(day_of_week: Weekday) -> Self {
        Self {
            day_of_week,
            enabled: false,
            time_slots: Vec::new(),
        }
    }
}

/// Top-level availability shape of an offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiscountSchedule {
    Always,
    #[serde(rename_all = "camelCase")]
    DateRange { validity_period: ValidityPeriod },
    #[serde(rename_all = "camelCase")]
    Recurring {
        day_schedules: Vec<DaySchedule>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        validity_period: Option<ValidityPeriod>,
    },
}

impl DiscountSchedule {
    pub fn day_schedules(&self) -> &[DaySchedule] {
        match self {
            DiscountSchedule::Recurring { day_schedules, .. } => day_schedules,
            DiscountSchedule::Always | DiscountSchedule::DateRange { .. } => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekday_rejects_out_of_range() {
        assert!(Weekday::new(7).is_err());
        assert_eq!(Weekday::new(0).unwrap(), Weekday::SUNDAY);
        assert_eq!(Weekday::all().count(), 7);
    }

    #[test]
    fn weekday_labels() {
        assert_eq!(Weekday::WEDNESDAY.label(), "Wednesday");
        assert_eq!(Weekday::SATURDAY.short_label(), "Sat");
    }

    #[test]
    fn day_schedule_uses_camel_case_on_the_wire() {
        let json = r#"{
            "dayOfWeek": 1,
            "enabled": true,
            "timeSlots": [{ "id": "a", "startTime": "07:00", "endTime": "10:00" }]
        }"#;
        let day: DaySchedule = serde_json::from_str(json).unwrap();
        assert_eq!(day.day_of_week, Weekday::MONDAY);
        assert_eq!(day.time_slots[0].to_string(), "07:00-10:00");

        let value = serde_json::to_value(&day).unwrap();
        assert_eq!(value["timeSlots"][0]["startTime"], "07:00");
    }

    #[test]
    fn out_of_range_day_fails_to_deserialize() {
        let json = r#"{ "dayOfWeek": 9, "enabled": false, "timeSlots": [] }"#;
        assert!(serde_json::from_str::<DaySchedule>(json).is_err());
    }

    #[test]
    fn patch_merges_only_present_fields() {
        let mut slot = TimeSlot::new(
            TimeOfDay::new(6, 0).unwrap(),
            TimeOfDay::new(8, 0).unwrap(),
        );
        let id = slot.id.clone();
        slot.apply(&SlotPatch {
            start_time: None,
            end_time: Some(TimeOfDay::new(9, 15).unwrap()),
        });
        assert_eq!(slot.id, id);
        assert_eq!(slot.to_string(), "06:00-09:15");
    }

    #[test]
    fn schedule_is_tagged_by_type() {
        let schedule = DiscountSchedule::Recurring {
            day_schedules: vec![DaySchedule::disabled(Weekday::FRIDAY)],
            validity_period: None,
        };
        let value = serde_json::to_value(&schedule).unwrap();
        assert_eq!(value["type"], "recurring");
        assert_eq!(value["daySchedules"][0]["dayOfWeek"], 5);
        assert!(value.get("validityPeriod").is_none());

        let always: DiscountSchedule = serde_json::from_str(r#"{ "type": "always" }"#).unwrap();
        assert_eq!(always, DiscountSchedule::Always);
        assert!(always.day_schedules().is_empty());
    }
}
