//! risk-index - Score every assessment in a directory and print the result as JSON.
//!
//! Usage: `risk-index [DIR]`. Without `DIR`, reads `input.directory` from
//! configuration (`RISK_INDEX__INPUT__DIRECTORY`).

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use risk_index::adapters::FileAssessmentReader;
use risk_index::application::{AnalyzeRiskCommand, AnalyzeRiskHandler};
use risk_index::config::AppConfig;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    config.logging.init();

    let directory = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| config.input.directory.clone());

    tracing::info!(directory = %directory.display(), "Starting risk analysis");

    let reader = Arc::new(FileAssessmentReader::new(&directory));
    let handler = AnalyzeRiskHandler::new(reader);
    let result = handler
        .handle(AnalyzeRiskCommand::all(config.engine.to_options()))
        .await?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
