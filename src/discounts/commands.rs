use chrono::Local;
use tauri::State;

use crate::{
    db::models::{
        Discount, DiscountInput, DiscountKind, DiscountKindTag, DiscountLimit, DiscountLimitInput,
    },
    schedule::{EditorSnapshot, ScheduleOutput},
    settings::SchedulingDefaults,
    AppState,
};

use super::editor_opening;

#[tauri::command]
pub async fn list_discounts(state: State<'_, AppState>) -> Result<Vec<Discount>, String> {
    state.db.list_discounts().await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn create_discount(
    state: State<'_, AppState>,
    input: DiscountInput,
) -> Result<Discount, String> {
    state
        .db
        .create_discount(input)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn update_discount(
    state: State<'_, AppState>,
    discount_id: i64,
    input: DiscountInput,
) -> Result<Discount, String> {
    state
        .db
        .update_discount(discount_id, input)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn delete_discount(state: State<'_, AppState>, discount_id: i64) -> Result<(), String> {
    state
        .db
        .delete_discount(discount_id)
        .await
        .map_err(|e| e.to_string())
}

/// Default payload for a newly picked offer type.
#[tauri::command]
pub fn seed_discount_kind(state: State<'_, AppState>, tag: DiscountKindTag) -> DiscountKind {
    let today = Local::now().date_naive();
    DiscountKind::seeded(tag, today, state.settings.scheduling().validity_days)
}

/// Opens the schedule editor on a stored offer's current availability.
#[tauri::command]
pub async fn open_discount_schedule(
    state: State<'_, AppState>,
    discount_id: i64,
) -> Result<EditorSnapshot, String> {
    let discount = state
        .db
        .get_discount(discount_id)
        .await
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("Offer {discount_id} not found"))?;

    let (day_schedules, selection) = editor_opening(
        &discount.kind,
        Local::now().date_naive(),
        state.settings.scheduling(),
    );

    state
        .editor
        .update(move |editor| {
            editor.open(&day_schedules, selection);
            Ok(())
        })
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn apply_schedule_to_discount(
    state: State<'_, AppState>,
    discount_id: i64,
    output: ScheduleOutput,
) -> Result<Discount, String> {
    state
        .db
        .set_discount_kind(discount_id, DiscountKind::from_schedule_output(output))
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn list_role_limits(state: State<'_, AppState>) -> Result<Vec<DiscountLimit>, String> {
    state.db.list_role_limits().await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn save_role_limit(
    state: State<'_, AppState>,
    input: DiscountLimitInput,
) -> Result<DiscountLimit, String> {
    state
        .db
        .save_role_limit(input)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn delete_role_limit(state: State<'_, AppState>, role_id: i64) -> Result<(), String> {
    state
        .db
        .delete_role_limit(role_id)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub fn get_scheduling_defaults(state: State<'_, AppState>) -> SchedulingDefaults {
    state.settings.scheduling()
}

#[tauri::command]
pub fn set_scheduling_defaults(
    state: State<'_, AppState>,
    defaults: SchedulingDefaults,
) -> Result<SchedulingDefaults, String> {
    state
        .settings
        .update_scheduling(defaults)
        .map_err(|e| e.to_string())?;
    Ok(state.settings.scheduling())
}
