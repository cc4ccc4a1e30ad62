// Sonar Lipi - Taal notation notebook
// Module declarations

pub mod config;
pub mod editor;
pub mod export;
pub mod grid;
pub mod state;
pub mod taals;

#[cfg(feature = "app")]
mod commands;

#[cfg(feature = "app")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use std::sync::Arc;
    use tauri::Manager;

    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .setup(|app| {
            let defaults = config::AppConfig::default();
            let config_path = state::storage::get_app_data_dir(&defaults)?.join("config.json");
            let config = config::AppConfig::load(&config_path)?;

            app.handle().plugin(
                tauri_plugin_log::Builder::default()
                    .level(config.log_level_filter())
                    .build(),
            )?;

            let catalog = Arc::new(taals::TaalCatalog::builtin().map_err(|e| {
                log::error!("Invalid taal catalog: {}", e);
                e
            })?);

            let db = state::init_db(&config).map_err(|e| {
                log::error!("Failed to initialize database: {}", e);
                e
            })?;

            let store = state::CompositionStore::new(db, Arc::clone(&catalog), &config);
            app.manage(commands::AppState {
                config,
                catalog,
                store,
            });

            log::info!("Sonar Lipi initialized successfully");
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::list_taals,
            commands::get_taal,
            commands::vibhag_boundaries,
            commands::list_compositions,
            commands::get_composition,
            commands::create_composition,
            commands::save_composition,
            commands::delete_composition,
            commands::edit_composition,
            commands::export_composition,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
