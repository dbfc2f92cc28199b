use super::model::DaySchedule;

/// One line per enabled day in week order, e.g. `Mon: 06:00-08:00, 09:00-10:00`.
pub fn summary_lines(day_schedules: &[DaySchedule]) -> Vec<String> {
    let mut enabled: Vec<&DaySchedule> = day_schedules.iter().filter(|d| d.enabled).collect();
    enabled.sort_by_key(|d| d.day_of_week);

    enabled
        .into_iter()
        .map(|day| {
            let slots: Vec<String> = day.time_slots.iter().map(|slot| slot.to_string()).collect();
            format!("{}: {}", day.day_of_week.short_label(), slots.join(", "))
        })
        .collect()
}

pub fn configured_days(day_schedules: &[DaySchedule]) -> usize {
    day_schedules.iter().filter(|d| d.enabled).count()
}
