//! Summarize command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use anyhow::Result;

/// Run the summarize command.
pub async fn run_summarize(url: &str, settings: Settings) -> Result<()> {
    // Pre-flight checks
    if let Err(e) = preflight::check(Operation::Summarize, &settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'precis doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let orchestrator = Orchestrator::new(&settings)?;

    let spinner = Output::spinner("Processing...");

    match orchestrator.run(url).await {
        Ok(state) => {
            spinner.finish_and_clear();
            Output::summary(&state.url, &state.summary);
        }
        Err(e) => {
            spinner.finish_and_clear();
            if e.is_warning() {
                Output::warning(&e.to_string());
            } else {
                Output::error(&e.to_string());
            }
            return Err(e.into());
        }
    }

    Ok(())
}
