#[cfg(feature = "desktop")]
mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use config::ServiceConfig;
pub use error::{AppError, ServiceError};
pub use models::sentiment_types::{
    AnalysisResult, BulkAnalysisOutcome, ClassifiedItem, DistributionEntry, SentimentLabel,
    SingleAnalysisOutcome,
};
pub use models::session_types::{AnalysisMode, SelectedFile, SessionView};
pub use services::session::{AnalysisSession, ModeStateMachine, SubmissionStatus};

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sentiment_lens_lib=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = ServiceConfig::from_env();
    tracing::info!(base_url = %config.base_url, "using sentiment service");

    let session = match AnalysisSession::from_config(config) {
        Ok(session) => session,
        Err(e) => {
            tracing::error!(error = %e, "failed to create sentiment service client");
            return;
        }
    };

    let result = tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_window_state::Builder::default().build())
        .manage(session)
        .invoke_handler(tauri::generate_handler![
            commands::analysis::get_session,
            commands::analysis::set_mode,
            commands::analysis::set_review_text,
            commands::analysis::select_file,
            commands::analysis::clear_file,
            commands::analysis::submit_single,
            commands::analysis::submit_bulk,
        ])
        .run(tauri::generate_context!());

    if let Err(e) = result {
        tracing::error!(error = %e, "error while running tauri application");
    }
}
