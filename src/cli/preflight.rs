//! Pre-flight checks before expensive operations.
//!
//! Validates that the configuration needed for a run is present before any
//! network call is made.

use crate::config::Settings;
use crate::error::{PrecisError, Result};

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Summarizing requires an API key and a usable chunking setup.
    Summarize,
    /// Serving only needs the config to parse; the key is checked per run.
    Serve,
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation, settings: &Settings) -> Result<()> {
    match operation {
        Operation::Summarize => {
            check_api_key(settings)?;
            check_chunking(settings)?;
        }
        Operation::Serve => {
            check_chunking(settings)?;
        }
    }
    Ok(())
}

/// Check that an LLM API key is configured.
fn check_api_key(settings: &Settings) -> Result<()> {
    match settings.llm.resolve_api_key() {
        Some(_) => Ok(()),
        None => Err(PrecisError::Configuration(format!(
            "{} Set it with: export {}='...'",
            crate::error::MISSING_INPUT_MESSAGE,
            settings.llm.api_key_env
        ))),
    }
}

fn check_chunking(settings: &Settings) -> Result<()> {
    crate::chunking::ChunkingConfig::try_from(&settings.chunking).map(|_| ())
}
