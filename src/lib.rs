// EndoLaudo - report editor for ENT video-endoscopy exams
//
// The webview hosts the form, camera preview, recorder and speech
// recognition. This crate owns the report state and everything that
// decides, stores, encodes or renders it.

// Performance logging macros - exported for use by other modules
#[macro_use]
pub mod macros;

pub mod capture;
pub mod database;
pub mod dictation;
pub mod export;
pub mod llm_engine;
pub mod media;
pub mod publish;
pub mod report;
pub mod state;

use database::{EditorSettings, Setting};
use tauri::Manager;

/// Setting keys the editor understands
const KNOWN_SETTINGS: &[&str] = &[
    "doctor_name",
    "doctor_crm",
    "doctor_rqe",
    "clinic_name",
    "clinic_address",
    "clinic_phone",
    "dictation_locale",
    "media_folder",
    "llm_model",
    "gemini_api_key",
];

// ============== Settings Commands ==============

#[tauri::command]
async fn settings_get(state: tauri::State<'_, state::AppState>) -> Result<EditorSettings, String> {
    Ok(state.settings.read().await.clone())
}

#[tauri::command]
async fn settings_list(state: tauri::State<'_, state::AppState>) -> Result<Vec<Setting>, String> {
    let db = state.db().await?;
    db.get_visible_settings_list().map_err(|e| e.to_string())
}

/// Persist one setting and apply the reloaded settings. An empty value
/// removes the stored entry so the default applies again.
#[tauri::command]
async fn settings_set(
    key: String,
    value: String,
    state: tauri::State<'_, state::AppState>,
) -> Result<EditorSettings, String> {
    if !KNOWN_SETTINGS.contains(&key.as_str()) {
        return Err(format!("Unknown setting: {}", key));
    }

    let settings = {
        let db = state.db().await?;
        if value.trim().is_empty() {
            db.delete_setting(&key).map_err(|e| e.to_string())?;
        } else {
            db.set_setting(&key, value.trim(), "string").map_err(|e| e.to_string())?;
        }
        db.load_editor_settings().map_err(|e| e.to_string())?
    };

    log::info!("Setting updated: {}", key);
    state.apply_settings(settings.clone()).await;
    Ok(settings)
}

/// Save the doctor and clinic profile shown in the report header
#[tauri::command]
async fn settings_save_doctor(
    doctor: report::DoctorInfo,
    state: tauri::State<'_, state::AppState>,
) -> Result<EditorSettings, String> {
    let settings = {
        let db = state.db().await?;
        db.save_doctor_profile(&doctor).map_err(|e| e.to_string())?;
        db.load_editor_settings().map_err(|e| e.to_string())?
    };

    log::info!("Doctor profile saved");
    state.apply_settings(settings.clone()).await;
    Ok(settings)
}

/// Reload settings from the database
#[tauri::command]
async fn settings_load(state: tauri::State<'_, state::AppState>) -> Result<EditorSettings, String> {
    let settings = {
        let db = state.db().await?;
        db.load_editor_settings().map_err(|e| e.to_string())?
    };
    state.apply_settings(settings.clone()).await;
    Ok(settings)
}

// ============== Main App Entry ==============

pub fn run() {
    // Initialize env_logger to output to stderr (reads RUST_LOG env var)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    tauri::Builder::default()
        .manage(state::AppState::new())
        .setup(|app| {
            log::info!("EndoLaudo setup starting...");

            let db = match database::DatabaseManager::init_with_app_handle(app.handle()) {
                Ok(db) => {
                    log::info!("Database initialized successfully");
                    db
                }
                Err(e) => {
                    log::error!("Failed to initialize database: {}", e);
                    return Err(Box::new(std::io::Error::new(
                        std::io::ErrorKind::Other,
                        format!("Database initialization failed: {}", e),
                    )));
                }
            };

            let app_state: tauri::State<state::AppState> = app.state();
            tauri::async_runtime::block_on(async {
                if let Err(e) = app_state.init_database(db).await {
                    log::error!("Failed to load settings, using defaults: {:#}", e);
                }
            });

            log::info!("EndoLaudo setup complete");
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Settings
            settings_get,
            settings_list,
            settings_set,
            settings_save_doctor,
            settings_load,
            // Report editing
            report::commands::report_get,
            report::commands::report_list_exam_types,
            report::commands::report_select_exam_type,
            report::commands::report_update_patient,
            report::commands::report_update_exam,
            // Media library
            media::commands::media_list,
            media::commands::media_delete,
            // Camera capture and recording
            capture::commands::capture_get_state,
            capture::commands::capture_camera_ready,
            capture::commands::capture_camera_failed,
            capture::commands::capture_snapshot,
            capture::commands::capture_start_recording,
            capture::commands::capture_toggle_pause,
            capture::commands::capture_push_chunk,
            capture::commands::capture_stop_recording,
            capture::commands::capture_key_down,
            capture::commands::capture_key_up,
            // Dictation
            dictation::commands::dictation_toggle,
            dictation::commands::dictation_results,
            dictation::commands::dictation_ended,
            dictation::commands::dictation_error,
            dictation::commands::dictation_status,
            // AI refinement
            llm_engine::commands::llm_is_ready,
            llm_engine::commands::llm_refine_findings,
            // Video link
            publish::commands::publish_video_link,
            publish::commands::publish_get_link,
            // Print / export
            export::commands::report_render_html,
            export::commands::report_export_html,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
