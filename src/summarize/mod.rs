//! Map-reduce summarization of transcript chunks.
//!
//! Every chunk is summarized on its own (map), then the partial summaries are
//! joined and summarized once more (combine). When the joined partials exceed
//! the combine budget they are collapsed group by group first.

mod openai;

pub use openai::ChatModel;

use crate::chunking::Chunk;
use crate::config::{Prompts, SummarizeSettings};
use crate::error::{PipelineResult, PrecisError, Result};
use async_trait::async_trait;
use futures::stream::{self, StreamExt, TryStreamExt};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Separator placed between partial summaries.
const SUMMARY_SEPARATOR: &str = "\n\n";

/// Trait for text completion backends.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Send a prompt and return the completion text.
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Two-stage summarizer over a [`LanguageModel`].
pub struct Summarizer {
    model: Arc<dyn LanguageModel>,
    prompts: Prompts,
    map_concurrency: usize,
    combine_max_chars: usize,
    max_collapse_depth: usize,
}

impl Summarizer {
    /// Create a summarizer with default prompts and settings.
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self::with_settings(model, Prompts::default(), &SummarizeSettings::default())
    }

    /// Create a summarizer with custom prompts and settings.
    pub fn with_settings(
        model: Arc<dyn LanguageModel>,
        prompts: Prompts,
        settings: &SummarizeSettings,
    ) -> Self {
        Self {
            model,
            prompts,
            map_concurrency: settings.map_concurrency.max(1),
            combine_max_chars: settings.combine_max_chars,
            max_collapse_depth: settings.max_collapse_depth,
        }
    }

    /// Summarize chunks into a single final summary.
    ///
    /// Fails with [`PrecisError::SummarizationFailed`] if any model call fails;
    /// no partial result is returned.
    #[instrument(skip_all, fields(chunks = chunks.len()))]
    pub async fn summarize(&self, chunks: &[Chunk]) -> PipelineResult<String> {
        if chunks.is_empty() {
            return Err(PrecisError::SummarizationFailed(
                "nothing to summarize".to_string(),
            ));
        }

        info!("Summarizing {} chunks", chunks.len());
        let partials = self.map(chunks).await?;
        self.combine(partials).await
    }

    /// Summarize every chunk, keeping chunk order.
    async fn map(&self, chunks: &[Chunk]) -> Result<Vec<String>> {
        let prompts: Vec<(usize, String)> = chunks
            .iter()
            .map(|chunk| (chunk.index, self.prompts.map_prompt(&chunk.text)))
            .collect();

        stream::iter(prompts)
            .map(|(index, prompt)| {
                let model = Arc::clone(&self.model);
                async move {
                    debug!("Map call for chunk {}", index);
                    invoke_model(model, prompt).await
                }
            })
            .buffered(self.map_concurrency)
            .try_collect()
            .await
    }

    /// Collapse partial summaries until they fit, then combine them.
    async fn combine(&self, mut summaries: Vec<String>) -> Result<String> {
        let mut depth = 0;

        while summaries.len() > 1 && joined_len(&summaries) > self.combine_max_chars {
            if depth >= self.max_collapse_depth {
                return Err(PrecisError::SummarizationFailed(format!(
                    "partial summaries still exceed {} characters after {} collapse rounds",
                    self.combine_max_chars, depth
                )));
            }
            depth += 1;

            let groups = group_for_collapse(&summaries, self.combine_max_chars);
            info!(
                "Collapsing {} partial summaries into {} (round {})",
                summaries.len(),
                groups.len(),
                depth
            );

            let mut collapsed = Vec::with_capacity(groups.len());
            for group in groups {
                let prompt = self.prompts.combine_prompt(&group.join(SUMMARY_SEPARATOR));
                collapsed.push(invoke_model(Arc::clone(&self.model), prompt).await?);
            }
            summaries = collapsed;
        }

        let prompt = self.prompts.combine_prompt(&summaries.join(SUMMARY_SEPARATOR));
        invoke_model(Arc::clone(&self.model), prompt).await
    }
}

/// Run one completion, treating any failure or blank answer as a failed summary.
async fn invoke_model(model: Arc<dyn LanguageModel>, prompt: String) -> Result<String> {
    let completion = model.complete(&prompt).await.map_err(|e| match e {
        PrecisError::SummarizationFailed(_) => e,
        other => PrecisError::SummarizationFailed(other.to_string()),
    })?;

    let completion = completion.trim();
    if completion.is_empty() {
        return Err(PrecisError::SummarizationFailed(
            "Empty response from LLM".to_string(),
        ));
    }
    Ok(completion.to_string())
}

/// Length in characters of the summaries once joined.
fn joined_len(summaries: &[String]) -> usize {
    let text: usize = summaries.iter().map(|s| s.chars().count()).sum();
    text + SUMMARY_SEPARATOR.len() * summaries.len().saturating_sub(1)
}

/// Split summaries into consecutive groups that fit the budget.
///
/// Groups hold at least two summaries whenever there are two or more, so
/// every collapse round strictly reduces the count.
fn group_for_collapse(summaries: &[String], max_chars: usize) -> Vec<&[String]> {
    let mut groups: Vec<&[String]> = Vec::new();
    let mut start = 0;

    for end in 1..=summaries.len() {
        if end - start > 2 && joined_len(&summaries[start..end]) > max_chars {
            groups.push(&summaries[start..end - 1]);
            start = end - 1;
        }
    }
    if start < summaries.len() {
        groups.push(&summaries[start..]);
    }

    // A trailing singleton joins the previous group.
    if groups.len() > 1 && groups.last().is_some_and(|g| g.len() == 1) {
        groups.pop();
        if let Some(prev) = groups.pop() {
            let prev_start = summaries.len() - 1 - prev.len();
            groups.push(&summaries[prev_start..]);
        }
    }

    groups
}
