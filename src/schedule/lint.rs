//! Non-blocking checks over a weekly schedule.
//!
//! Nothing here rejects a schedule. Slots whose end is before their start are
//! accepted as windows running past midnight and reported so the UI can flag
//! them; saving is never blocked.

use serde::Serialize;

use super::model::{DaySchedule, TimeSlot, Weekday};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScheduleWarning {
    #[serde(rename_all = "camelCase")]
    OvernightSlot { day_of_week: Weekday, slot_id: String },
    #[serde(rename_all = "camelCase")]
    EmptySlot { day_of_week: Weekday, slot_id: String },
    #[serde(rename_all = "camelCase")]
    EnabledDayWithoutSlots { day_of_week: Weekday },
    #[serde(rename_all = "camelCase")]
    OverlappingSlots {
        day_of_week: Weekday,
        first_slot_id: String,
        second_slot_id: String,
    },
}

/// Disabled days contribute no availability and are skipped.
pub fn lint(day_schedules: &[DaySchedule]) -> Vec<ScheduleWarning> {
    let mut warnings = Vec::new();

    for day in day_schedules.iter().filter(|d| d.enabled) {
        if day.time_slots.is_empty() {
            warnings.push(ScheduleWarning::EnabledDayWithoutSlots {
                day_of_week: day.day_of_week,
            });
            continue;
        }

        for slot in &day.time_slots {
            if slot.start_time == slot.end_time {
                warnings.push(ScheduleWarning::EmptySlot {
                    day_of_week: day.day_of_week,
                    slot_id: slot.id.clone(),
                });
            } else if slot.crosses_midnight() {
                warnings.push(ScheduleWarning::OvernightSlot {
                    day_of_week: day.day_of_week,
                    slot_id: slot.id.clone(),
                });
            }
        }

        let same_day: Vec<&TimeSlot> = day
            .time_slots
            .iter()
            .filter(|s| s.start_time < s.end_time)
            .collect();
        for (i, first) in same_day.iter().enumerate() {
            for second in &same_day[i + 1..] {
                if first.start_time < second.end_time && second.start_time < first.end_time {
                    warnings.push(ScheduleWarning::OverlappingSlots {
                        day_of_week: day.day_of_week,
                        first_slot_id: first.id.clone(),
                        second_slot_id: second.id.clone(),
                    });
                }
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::time::TimeOfDay;

    fn slot(id: &str, start: &str, end: &str) -> TimeSlot {
        TimeSlot {
            id: id.into(),
            start_time: start.parse::<TimeOfDay>().unwrap(),
            end_time: end.parse::<TimeOfDay>().unwrap(),
        }
    }

    fn day(day: Weekday, enabled: bool, slots: Vec<TimeSlot>) -> DaySchedule {
        DaySchedule {
            day_of_week: day,
            enabled,
            time_slots: slots,
        }
    }

    #[test]
    fn clean_schedule_has_no_warnings() {
        let schedule = vec![day(
            Weekday::MONDAY,
            true,
            vec![slot("a", "06:00", "08:00"), slot("b", "09:00", "10:00")],
        )];
        assert!(lint(&schedule).is_empty());
    }

    #[test]
    fn flags_overnight_and_empty_slots() {
        let schedule = vec![day(
            Weekday::FRIDAY,
            true,
            vec![slot("late", "22:00", "02:00"), slot("zero", "12:00", "12:00")],
        )];
        let warnings = lint(&schedule);
        assert_eq!(
            warnings,
            vec![
                ScheduleWarning::OvernightSlot {
                    day_of_week: Weekday::FRIDAY,
                    slot_id: "late".into()
                },
                ScheduleWarning::EmptySlot {
                    day_of_week: Weekday::FRIDAY,
                    slot_id: "zero".into()
                },
            ]
        );
    }

    #[test]
    fn flags_enabled_day_without_slots_but_ignores_disabled_days() {
        let schedule = vec![
            day(Weekday::SUNDAY, true, vec![]),
            day(Weekday::MONDAY, false, vec![slot("x", "10:00", "09:00")]),
        ];
        assert_eq!(
            lint(&schedule),
            vec![ScheduleWarning::EnabledDayWithoutSlots {
                day_of_week: Weekday::SUNDAY
            }]
        );
    }

    #[test]
    fn flags_overlapping_slots_but_not_touching_ones() {
        let schedule = vec![day(
            Weekday::SATURDAY,
            true,
            vec![
                slot("a", "10:00", "12:00"),
                slot("b", "11:30", "13:00"),
                slot("c", "13:00", "14:00"),
            ],
        )];
        assert_eq!(
            lint(&schedule),
            vec![ScheduleWarning::OverlappingSlots {
                day_of_week: Weekday::SATURDAY,
                first_slot_id: "a".into(),
                second_slot_id: "b".into(),
            }]
        );
    }

    #[test]
    fn warning_serializes_with_kind_tag() {
        let warning = ScheduleWarning::EnabledDayWithoutSlots {
            day_of_week: Weekday::TUESDAY,
        };
        let value = serde_json::to_value(&warning).unwrap();
        assert_eq!(value["kind"], "enabled_day_without_slots");
        assert_eq!(value["dayOfWeek"], 2);
    }
}
