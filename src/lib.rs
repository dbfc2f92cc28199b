pub mod db;
pub mod discounts;
pub mod schedule;
pub mod select;
pub mod settings;
pub mod utils;


#[cfg(feature = "desktop")]
pub use desktop::run;

#[cfg(feature = "desktop")]
pub(crate) use desktop::AppState;

#[cfg(feature = "desktop")]
mod desktop {
    use std::sync::Arc;

    use tauri::Manager;

    use crate::{
        db::Database,
        discounts::commands::{
            apply_schedule_to_discount, create_discount, delete_discount, delete_role_limit,
            get_scheduling_defaults, list_discounts, list_role_limits, open_discount_schedule,
            save_role_limit, seed_discount_kind, set_scheduling_defaults, update_discount,
        },
        schedule::{
            commands::{
                add_time_slot, apply_copy_dialog, cancel_copy_dialog, cancel_schedule_editor,
                copy_times_to_days, get_schedule_editor, lint_schedule, open_copy_dialog,
                open_schedule_editor, remove_time_slot, save_schedule_editor, set_validity_range,
                toggle_copy_day, toggle_copy_select_all, toggle_schedule_day, update_time_slot,
            },
            ScheduleEditorController,
        },
        settings::SettingsStore,
        utils::logging,
    };

    pub(crate) struct AppState {
        pub(crate) db: Database,
        pub(crate) editor: ScheduleEditorController,
        pub(crate) settings: SettingsStore,
    }

    #[cfg_attr(mobile, tauri::mobile_entry_point)]
    pub fn run() {
        logging::init();

        log::info!("Tablewise starting up...");

        tauri::Builder::default()
            .plugin(tauri_plugin_opener::init())
            .setup(|app| {
                let result = (|| -> anyhow::Result<()> {
                    let app_data_dir = app
                        .path()
                        .app_data_dir()
                        .map_err(|err| anyhow::anyhow!(err))?;
                    std::fs::create_dir_all(&app_data_dir)?;

                    let database = Database::new(app_data_dir.join("tablewise.sqlite3"))?;
                    let settings = SettingsStore::new(app_data_dir.join("settings.json"))?;
                    let editor = ScheduleEditorController::new(Arc::new(app.handle().clone()));

                    app.manage(AppState {
                        db: database,
                        editor,
                        settings,
                    });

                    Ok(())
                })();

                result.map_err(|err| err.into())
            })
            .invoke_handler(tauri::generate_handler![
                open_schedule_editor,
                get_schedule_editor,
                toggle_schedule_day,
                add_time_slot,
                remove_time_slot,
                update_time_slot,
                copy_times_to_days,
                open_copy_dialog,
                toggle_copy_day,
                toggle_copy_select_all,
                apply_copy_dialog,
                cancel_copy_dialog,
                set_validity_range,
                save_schedule_editor,
                cancel_schedule_editor,
                lint_schedule,
                list_discounts,
                create_discount,
                update_discount,
                delete_discount,
                seed_discount_kind,
                open_discount_schedule,
                apply_schedule_to_discount,
                list_role_limits,
                save_role_limit,
                delete_role_limit,
                get_scheduling_defaults,
                set_scheduling_defaults,
            ])
            .run(tauri::generate_context!())
            .expect("error while running tauri application");
    }
}
