use std::collections::BTreeSet;

use chrono::{Local, NaiveDate};
use tauri::State;

use crate::{
    discounts::initial_selection,
    schedule::{
        DaySchedule, EditorSnapshot, ScheduleEditorController, ScheduleOutput, ScheduleWarning,
        SlotPatch, ValidityPeriod, Weekday,
    },
    AppState,
};

fn controller_from_state(state: &State<'_, AppState>) -> ScheduleEditorController {
    state.editor.clone()
}

fn weekday(day: u8) -> Result<Weekday, String> {
    Weekday::new(day).map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn open_schedule_editor(
    state: State<'_, AppState>,
    day_schedules: Vec<DaySchedule>,
    validity_period: Option<ValidityPeriod>,
) -> Result<EditorSnapshot, String> {
    let selection = initial_selection(
        validity_period,
        Local::now().date_naive(),
        state.settings.scheduling(),
    );
    controller_from_state(&state)
        .update(move |editor| {
            editor.open(&day_schedules, selection);
            Ok(())
        })
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn get_schedule_editor(state: State<'_, AppState>) -> Result<EditorSnapshot, String> {
    Ok(controller_from_state(&state).snapshot().await)
}

#[tauri::command]
pub async fn toggle_schedule_day(
    state: State<'_, AppState>,
    day: u8,
) -> Result<EditorSnapshot, String> {
    let day = weekday(day)?;
    controller_from_state(&state)
        .update(move |editor| {
            editor.session_mut()?.toggle_day(day);
            Ok(())
        })
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn add_time_slot(state: State<'_, AppState>, day: u8) -> Result<EditorSnapshot, String> {
    let day = weekday(day)?;
    controller_from_state(&state)
        .update(move |editor| {
            editor.session_mut()?.add_time_slot(day);
            Ok(())
        })
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn remove_time_slot(
    state: State<'_, AppState>,
    day: u8,
    slot_id: String,
) -> Result<EditorSnapshot, String> {
    let day = weekday(day)?;
    controller_from_state(&state)
        .update(move |editor| {
            editor.session_mut()?.remove_time_slot(day, &slot_id);
            Ok(())
        })
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn update_time_slot(
    state: State<'_, AppState>,
    day: u8,
    slot_id: String,
    patch: SlotPatch,
) -> Result<EditorSnapshot, String> {
    let day = weekday(day)?;
    controller_from_state(&state)
        .update(move |editor| {
            editor
                .session_mut()?
                .update_time_slot(day, &slot_id, &patch);
            Ok(())
        })
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn copy_times_to_days(
    state: State<'_, AppState>,
    source_day: u8,
    target_days: Vec<u8>,
) -> Result<EditorSnapshot, String> {
    let source = weekday(source_day)?;
    let targets: BTreeSet<Weekday> = target_days
        .into_iter()
        .map(weekday)
        .collect::<Result<_, _>>()?;
    controller_from_state(&state)
        .update(move |editor| {
            editor.session_mut()?.copy_times_to_days(source, &targets);
            Ok(())
        })
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn open_copy_dialog(
    state: State<'_, AppState>,
    source_day: u8,
) -> Result<EditorSnapshot, String> {
    let source = weekday(source_day)?;
    controller_from_state(&state)
        .update(move |editor| {
            editor.session_mut()?.open_copy_dialog(source);
            Ok(())
        })
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn toggle_copy_day(
    state: State<'_, AppState>,
    day: u8,
) -> Result<EditorSnapshot, String> {
    let day = weekday(day)?;
    controller_from_state(&state)
        .update(move |editor| {
            editor
                .session_mut()?
                .copy_dialog_mut()?
                .toggle_day_selection(day);
            Ok(())
        })
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn toggle_copy_select_all(
    state: State<'_, AppState>,
    checked: bool,
) -> Result<EditorSnapshot, String> {
    controller_from_state(&state)
        .update(move |editor| {
            editor
                .session_mut()?
                .copy_dialog_mut()?
                .toggle_select_all(checked);
            Ok(())
        })
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn apply_copy_dialog(state: State<'_, AppState>) -> Result<EditorSnapshot, String> {
    controller_from_state(&state)
        .update(|editor| editor.session_mut()?.apply_copy_dialog().map(|_| ()))
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn cancel_copy_dialog(state: State<'_, AppState>) -> Result<EditorSnapshot, String> {
    controller_from_state(&state)
        .update(|editor| {
            editor.session_mut()?.cancel_copy_dialog();
            Ok(())
        })
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn set_validity_range(
    state: State<'_, AppState>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<EditorSnapshot, String> {
    controller_from_state(&state)
        .update(move |editor| {
            editor.session_mut()?.set_validity_range(from, to);
            Ok(())
        })
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn save_schedule_editor(state: State<'_, AppState>) -> Result<ScheduleOutput, String> {
    controller_from_state(&state)
        .mutate(|editor| editor.save())
        .await
        .map(|(output, _)| output)
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn cancel_schedule_editor(state: State<'_, AppState>) -> Result<EditorSnapshot, String> {
    controller_from_state(&state)
        .update(|editor| {
            editor.cancel();
            Ok(())
        })
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn lint_schedule(
    day_schedules: Vec<DaySchedule>,
) -> Result<Vec<ScheduleWarning>, String> {
    Ok(crate::schedule::lint::lint(&day_schedules))
}
