//! Axum route handlers for the upload form and the analysis endpoints.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    response::Html,
    Json,
};
use bytes::Bytes;
use tracing::info;

use crate::analysis::pipeline::AnalysisReport;
use crate::errors::AppError;
use crate::state::AppState;

const RESUME_FIELD: &str = "resume";
const JOB_DESCRIPTION_FIELD: &str = "job_description";

/// The two form inputs of an analysis request.
#[derive(Debug)]
pub struct Submission {
    pub file_name: String,
    pub resume: Bytes,
    pub job_description: String,
}

/// Reads the multipart form. Either input being absent or empty is a `MissingInput`,
/// as is a body that is not multipart at all.
pub async fn read_submission(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Submission, AppError> {
    let mut multipart = multipart.map_err(|_| AppError::MissingInput)?;

    let mut resume: Option<(String, Bytes)> = None;
    let mut job_description: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            RESUME_FIELD => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read resume: {e}")))?;
                resume = Some((file_name, data));
            }
            JOB_DESCRIPTION_FIELD => {
                let text = field.text().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read job description: {e}"))
                })?;
                job_description = Some(text);
            }
            _ => {}
        }
    }

    match (resume, job_description) {
        (Some((file_name, resume)), Some(job_description))
            if !file_name.is_empty() && !resume.is_empty() && !job_description.is_empty() =>
        {
            Ok(Submission {
                file_name,
                resume,
                job_description,
            })
        }
        _ => Err(AppError::MissingInput),
    }
}

async fn run_analysis(
    state: &AppState,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<AnalysisReport, AppError> {
    let submission = read_submission(multipart).await?;
    let path = state
        .uploads
        .save(&submission.file_name, &submission.resume)
        .await?;

    info!(
        "Analyzing {} ({} bytes) against a {}-character job description",
        path.display(),
        submission.resume.len(),
        submission.job_description.len()
    );

    state
        .analyzer
        .analyze_file(path, &submission.job_description)
        .await
}

/// GET /
pub async fn handle_index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    Ok(Html(state.templates.render_index()?))
}

/// POST /analyze
///
/// Multipart `resume` (PDF) + `job_description`; responds with the rendered results page.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Html<String>, AppError> {
    let report = run_analysis(&state, multipart).await?;
    Ok(Html(state.templates.render_result(&report)?))
}

/// POST /api/v1/analyze
///
/// Same inputs as `/analyze`; responds with the report as JSON.
pub async fn handle_analyze_json(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalysisReport>, AppError> {
    Ok(Json(run_analysis(&state, multipart).await?))
}
