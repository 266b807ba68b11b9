//! Fit analysis: sanitizes both documents, then compares them.
//!
//! Flow: validate → (sanitize CV ‖ sanitize job description) → analyze job fit.
//! The two sanitization calls are independent and run concurrently; the
//! comparison waits for both. Any failure ends the analysis with that error.

use tracing::{info, warn};

use crate::ai_client::{Content, GenerateContentRequest, TextGenerator};
use crate::analysis::prompts::{
    analyze_fit_prompt, sanitize_cv_prompt, sanitize_job_description_prompt, SANITIZE_CV_SYSTEM,
    SANITIZE_JOB_DESCRIPTION_SYSTEM,
};
use crate::errors::AppError;
use crate::validation::require_non_blank;

const STAGE_SANITIZE_CV: &str = "sanitize CV";
const STAGE_SANITIZE_JOB_DESCRIPTION: &str = "sanitize job description";
const STAGE_ANALYZE_JOB_FIT: &str = "analyze job fit";

/// Runs the full analysis and returns the comparison call's text unchanged.
pub async fn analyze_job_fit(
    job_description: &str,
    cv: &str,
    generator: &dyn TextGenerator,
) -> Result<String, AppError> {
    require_non_blank(Some(job_description), "Job description")?;
    require_non_blank(Some(cv), "CV")?;

    let (sanitized_cv, sanitized_job_description) = tokio::try_join!(
        sanitize_cv(cv, generator),
        sanitize_job_description(job_description, generator),
    )?;

    info!(
        "Sanitized CV ({} chars) and job description ({} chars)",
        sanitized_cv.len(),
        sanitized_job_description.len()
    );

    let request = GenerateContentRequest::new(vec![Content::user(analyze_fit_prompt(
        &sanitized_job_description,
        &sanitized_cv,
    ))]);

    generator
        .generate(request)
        .await
        .map_err(at_stage(STAGE_ANALYZE_JOB_FIT))
}

pub async fn sanitize_cv(cv: &str, generator: &dyn TextGenerator) -> Result<String, AppError> {
    require_non_blank(Some(cv), "CV content")?;

    let request = GenerateContentRequest::new(vec![Content::user(sanitize_cv_prompt(cv))])
        .with_system_instruction(Content::model(SANITIZE_CV_SYSTEM));

    generator
        .generate(request)
        .await
        .map_err(at_stage(STAGE_SANITIZE_CV))
}

pub async fn sanitize_job_description(
    job_description: &str,
    generator: &dyn TextGenerator,
) -> Result<String, AppError> {
    require_non_blank(Some(job_description), "Job description content")?;

    let request = GenerateContentRequest::new(vec![Content::user(
        sanitize_job_description_prompt(job_description),
    )])
    .with_system_instruction(Content::model(SANITIZE_JOB_DESCRIPTION_SYSTEM));

    generator
        .generate(request)
        .await
        .map_err(at_stage(STAGE_SANITIZE_JOB_DESCRIPTION))
}

/// Errors from the generator are already classified; record the stage and
/// pass them through unchanged.
fn at_stage(stage: &'static str) -> impl Fn(AppError) -> AppError {
    move |err| {
        warn!("Error during {stage}: {err}");
        err
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::analysis::prompts::{
        ANALYZE_FIT_INSTRUCTION, SANITIZE_CV_INSTRUCTION, SANITIZE_JOB_DESCRIPTION_INSTRUCTION,
    };

    /// Generator that answers from the request's instruction text and records
    /// every request it receives.
    #[derive(Default)]
    pub(crate) struct ScriptedGenerator {
        pub requests: Mutex<Vec<GenerateContentRequest>>,
        pub fail_on: Option<&'static str>,
        in_flight: AtomicUsize,
        pub max_in_flight: AtomicUsize,
    }

    impl ScriptedGenerator {
        pub fn failing_on(instruction: &'static str) -> Self {
            Self {
                fail_on: Some(instruction),
                ..Self::default()
            }
        }

        pub fn calls(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(&self, request: GenerateContentRequest) -> Result<String, AppError> {
            let prompt = request.contents[0].parts[0].text.clone();
            self.requests.lock().unwrap().push(request);

            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            tokio::task::yield_now().await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if self.fail_on.is_some_and(|i| prompt.starts_with(i)) {
                return Err(AppError::Unauthorized);
            }
            if prompt.starts_with(SANITIZE_CV_INSTRUCTION) {
                Ok("clean cv".to_string())
            } else if prompt.starts_with(SANITIZE_JOB_DESCRIPTION_INSTRUCTION) {
                Ok("clean jd".to_string())
            } else {
                Ok("## Fit\nStrong match".to_string())
            }
        }
    }

    #[tokio::test]
    async fn test_three_calls_and_comparison_result_returned() {
        let generator = ScriptedGenerator::default();

        let analysis = analyze_job_fit("Rust engineer wanted", "I write Rust", &generator)
            .await
            .unwrap();

        assert_eq!(analysis, "## Fit\nStrong match");
        assert_eq!(generator.calls(), 3);

        let requests = generator.requests.lock().unwrap();
        let last = requests.last().unwrap();
        assert!(last.system_instruction.is_none());
        let prompt = &last.contents[0].parts[0].text;
        assert!(prompt.starts_with(ANALYZE_FIT_INSTRUCTION));
        assert!(prompt.contains("Job Description:\nclean jd"));
        assert!(prompt.contains("CV:\nclean cv"));
        assert!(requests[..2].iter().all(|r| r.system_instruction.is_some()));
    }

    #[tokio::test]
    async fn test_sanitization_calls_overlap() {
        let generator = ScriptedGenerator::default();
        analyze_job_fit("Rust engineer wanted", "I write Rust", &generator)
            .await
            .unwrap();
        assert_eq!(generator.max_in_flight.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_blank_inputs_fail_before_any_call() {
        let generator = ScriptedGenerator::default();
        for (jd, cv) in [("", "cv"), ("jd", "   "), ("\n", "\t")] {
            let err = analyze_job_fit(jd, cv, &generator).await.unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }
        assert_eq!(generator.calls(), 0);

        let err = analyze_job_fit("  ", "cv", &generator).await.unwrap_err();
        assert_eq!(err.to_string(), "Job description is required");
        let err = analyze_job_fit("jd", "", &generator).await.unwrap_err();
        assert_eq!(err.to_string(), "CV is required");
    }

    #[tokio::test]
    async fn test_stage_failure_propagates_unchanged() {
        let generator = ScriptedGenerator::failing_on(SANITIZE_CV_INSTRUCTION);
        let err = analyze_job_fit("jd", "cv", &generator).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
        assert!(generator
            .requests
            .lock()
            .unwrap()
            .iter()
            .all(|r| !r.contents[0].parts[0].text.starts_with(ANALYZE_FIT_INSTRUCTION)));
    }

    #[tokio::test]
    async fn test_repeated_analysis_is_identical() {
        let generator = ScriptedGenerator::default();
        let first = analyze_job_fit("jd", "cv", &generator).await.unwrap();
        let second = analyze_job_fit("jd", "cv", &generator).await.unwrap();
        assert_eq!(first, second);
    }
}
