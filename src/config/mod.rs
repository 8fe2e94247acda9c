//! Configuration module for Precis.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{Prompts, SummaryPrompts};
pub use settings::{
    ChunkingSettings, LlmSettings, PromptSettings, ServerSettings, Settings, SummarizeSettings,
    TranscriptSettings,
};
