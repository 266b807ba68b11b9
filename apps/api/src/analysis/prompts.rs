// Prompt texts for the job-fit pipeline.
// Document text is spliced in with format! so user content is never rescanned
// for placeholders.

pub const SANITIZE_CV_SYSTEM: &str = "You are a helpful assistant that sanitizes CV by \
    removing sensitive, irrelevant, unnecessary or redundant information while preserving \
    key details.";

pub const SANITIZE_CV_INSTRUCTION: &str = "Sanitize this CV by removing sensitive, irrelevant, \
    unnecessary or redundant information while preserving key details about skills, \
    experience, and education.";

pub const SANITIZE_JOB_DESCRIPTION_SYSTEM: &str = "You are a helpful assistant that sanitizes \
    job descriptions by removing unnecessary or redundant information while preserving key \
    details.";

pub const SANITIZE_JOB_DESCRIPTION_INSTRUCTION: &str = "Sanitize this job description by \
    removing unnecessary or redundant information while preserving key details about the \
    role, requirements, and responsibilities.";

pub const ANALYZE_FIT_INSTRUCTION: &str = "Analyze this job description and CV. Identify the \
    candidate's key strengths and weaknesses relative to the role, and evaluate overall fit.";

pub fn sanitize_cv_prompt(cv: &str) -> String {
    format!("{SANITIZE_CV_INSTRUCTION}\n\nCV:\n{cv}")
}

pub fn sanitize_job_description_prompt(job_description: &str) -> String {
    format!("{SANITIZE_JOB_DESCRIPTION_INSTRUCTION}\n\nJob Description:\n{job_description}")
}

pub fn analyze_fit_prompt(job_description: &str, cv: &str) -> String {
    format!("{ANALYZE_FIT_INSTRUCTION}\n\nJob Description:\n{job_description}\n\nCV:\n{cv}")
}
