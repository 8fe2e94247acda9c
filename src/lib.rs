//! Precis - YouTube video summaries
//!
//! Takes a YouTube URL, fetches the video's captions, and condenses them into a
//! single summary with a two-stage (map, then combine) LLM pipeline.
//!
//! # Architecture
//!
//! - `source` - URL classification and transcript retrieval
//! - `chunking` - Overlapping fixed-size text chunks
//! - `summarize` - Map-reduce summarization over a language model
//! - `session` - The last summary shown to the user
//! - `orchestrator` - Runs the pipeline and owns the session
//! - `cli` - Commands, including the web UI server
//!
//! # Example
//!
//! ```rust,no_run
//! use precis::config::Settings;
//! use precis::orchestrator::Orchestrator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let orchestrator = Orchestrator::new(&settings)?;
//!
//!     let state = orchestrator.run("https://youtu.be/dQw4w9WgXcQ").await?;
//!     println!("{}", state.summary);
//!
//!     Ok(())
//! }
//! ```

pub mod chunking;
pub mod cli;
pub mod config;
pub mod error;
pub mod openai;
pub mod orchestrator;
pub mod session;
pub mod source;
pub mod summarize;

#[cfg(test)]
mod test_support;

pub use error::{PrecisError, Result};
