use crate::error::AppError;
use crate::models::session_types::{AnalysisMode, SelectedFile, SessionView};
use crate::services::session::{AnalysisSession, SubmissionStatus};
use tauri::State;

#[tauri::command]
pub fn get_session(session: State<'_, AnalysisSession>) -> SessionView {
    session.view()
}

#[tauri::command]
pub fn set_mode(session: State<'_, AnalysisSession>, mode: AnalysisMode) -> SessionView {
    session.set_mode(mode);
    session.view()
}

#[tauri::command]
pub fn set_review_text(session: State<'_, AnalysisSession>, text: String) -> SessionView {
    session.set_review_text(text);
    session.view()
}

#[tauri::command]
pub async fn select_file(session: State<'_, AnalysisSession>, path: String) -> Result<SessionView, AppError> {
    let file = SelectedFile::from_path(&path).await?;
    session.select_file(file);
    Ok(session.view())
}

#[tauri::command]
pub fn clear_file(session: State<'_, AnalysisSession>) -> SessionView {
    session.clear_file();
    session.view()
}

// Failures leave the previous result on screen; they only show up in the log.
#[tauri::command]
pub async fn submit_single(session: State<'_, AnalysisSession>) -> Result<SessionView, AppError> {
    let session = session.inner().clone();
    log_status("single", session.submit_single().await);
    Ok(session.view())
}

#[tauri::command]
pub async fn submit_bulk(session: State<'_, AnalysisSession>) -> Result<SessionView, AppError> {
    let session = session.inner().clone();
    log_status("bulk", session.submit_bulk().await);
    Ok(session.view())
}

fn log_status(kind: &str, status: SubmissionStatus) {
    match status {
        SubmissionStatus::Completed => tracing::debug!(kind, "submission completed"),
        SubmissionStatus::Rejected => tracing::debug!(kind, "submission rejected before sending"),
        SubmissionStatus::Discarded => tracing::debug!(kind, "stale response discarded"),
        SubmissionStatus::Failed(message) => tracing::debug!(kind, %message, "submission failed"),
    }
}
