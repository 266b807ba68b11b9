//! Command-line client for the `analyzeJobFit` endpoint.
//!
//! Reads two documents, sends them base64-encoded, and writes the returned
//! analysis to a markdown file.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use clap::Parser;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Parser)]
#[command(name = "jobfit-client", about = "Analyze how well a CV fits a job description")]
struct Cli {
    /// Job description document (PDF)
    #[arg(long = "job")]
    job_description: PathBuf,

    /// Candidate CV document (PDF)
    #[arg(long)]
    cv: PathBuf,

    /// Where to write the analysis
    #[arg(short, long, default_value = "analysis.md")]
    output: PathBuf,

    /// Base URL of the jobfit server
    #[arg(long, env = "JOBFIT_URL", default_value = "http://localhost:3000")]
    server: String,
}

#[derive(Debug, Deserialize)]
struct AnalysisResponse {
    analysis: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (job_description, cv) = tokio::try_join!(
        read_base64(&cli.job_description),
        read_base64(&cli.cv)
    )?;

    let url = format!("{}/analyzeJobFit", cli.server.trim_end_matches('/'));
    let response = reqwest::Client::new()
        .post(&url)
        .json(&json!({ "jobDescription": job_description, "cv": cv }))
        .send()
        .await
        .with_context(|| format!("Failed to reach {url}"))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        bail!("Analysis failed ({status}): {body}");
    }

    let AnalysisResponse { analysis } = response
        .json()
        .await
        .context("Server returned a malformed response")?;

    tokio::fs::write(&cli.output, &analysis)
        .await
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;

    println!("Analysis result:\n{analysis}");
    Ok(())
}

async fn read_base64(path: &Path) -> Result<String> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(STANDARD.encode(bytes))
}
