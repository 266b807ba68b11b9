//! Axum handler for the `analyzeJobFit` RPC.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use tracing::{info, Instrument};
use uuid::Uuid;

use crate::analysis::analyzer::analyze_job_fit;
use crate::errors::AppError;
use crate::state::AppState;
use crate::validation::require_non_blank;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeJobFitRequest {
    /// Base64-encoded job description document.
    pub job_description: String,
    /// Base64-encoded CV document.
    pub cv: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeJobFitResponse {
    pub analysis: String,
}

/// POST /analyzeJobFit
///
/// Decodes both documents, extracts their text, and returns the fit analysis.
/// If the caller disconnects, the in-flight AI calls are dropped with the
/// handler future; an extraction already running on the blocking pool
/// finishes and its output is discarded.
pub async fn handle_analyze_job_fit(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeJobFitRequest>, JsonRejection>,
) -> Result<Json<AnalyzeJobFitResponse>, AppError> {
    let Json(request) = payload?;

    let job_description = decode_document(&request.job_description, "jobDescription")?;
    let cv = decode_document(&request.cv, "cv")?;

    let span = tracing::info_span!("analyze_job_fit", request_id = %Uuid::new_v4());
    async move {
        info!(
            "Analyzing job fit: job description {} bytes, CV {} bytes",
            job_description.len(),
            cv.len()
        );

        let job_description_text = state.extractor.extract(job_description).await?;
        let cv_text = state.extractor.extract(cv).await?;

        let analysis =
            analyze_job_fit(&job_description_text, &cv_text, state.generator.as_ref()).await?;

        info!("Analysis complete ({} chars)", analysis.len());
        Ok::<_, AppError>(Json(AnalyzeJobFitResponse { analysis }))
    }
    .instrument(span)
    .await
}

/// Base64 → bytes. Blank, undecodable, or empty payloads are rejected here
/// so nothing downstream sees them.
fn decode_document(encoded: &str, field_name: &str) -> Result<Vec<u8>, AppError> {
    require_non_blank(Some(encoded), field_name)?;

    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|e| AppError::Validation(format!("{field_name} is not valid base64: {e}")))?;

    if bytes.is_empty() {
        return Err(AppError::Validation(format!("{field_name} is required")));
    }
    Ok(bytes)
}
