//! Tauri commands for report editing

use tauri::State;

use super::types::{ExamFieldsUpdate, ExamType, ExamTypeOption, PatientUpdate};
use super::ReportSession;
use crate::state::AppState;

/// Get the full report state
#[tauri::command]
pub async fn report_get(state: State<'_, AppState>) -> Result<ReportSession, String> {
    let report = state.report.read().await;
    Ok(report.clone())
}

/// List exam types for the selector
#[tauri::command]
pub async fn report_list_exam_types() -> Result<Vec<ExamTypeOption>, String> {
    Ok(ExamType::all().into_iter().map(ExamTypeOption::from).collect())
}

/// Switch exam type; the four text fields are reset to the template
#[tauri::command]
pub async fn report_select_exam_type(
    state: State<'_, AppState>,
    exam_type: String,
) -> Result<ReportSession, String> {
    let exam_type = ExamType::parse(&exam_type)
        .ok_or_else(|| format!("Tipo de exame desconhecido: {}", exam_type))?;

    let mut report = state.report.write().await;
    report.select_exam_type(exam_type);
    Ok(report.clone())
}

#[tauri::command]
pub async fn report_update_patient(
    state: State<'_, AppState>,
    update: PatientUpdate,
) -> Result<ReportSession, String> {
    let mut report = state.report.write().await;
    report.update_patient(update);
    Ok(report.clone())
}

#[tauri::command]
pub async fn report_update_exam(
    state: State<'_, AppState>,
    update: ExamFieldsUpdate,
) -> Result<ReportSession, String> {
    let mut report = state.report.write().await;
    report.update_exam_fields(update);
    Ok(report.clone())
}
