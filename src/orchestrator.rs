//! Pipeline orchestrator for Precis.
//!
//! Coordinates one run from URL to recorded summary, and owns the session state.

use crate::chunking::{split_documents, ChunkingConfig};
use crate::config::{Prompts, Settings};
use crate::error::{PrecisError, Result};
use crate::session::{SessionState, SessionStore};
use crate::source::{classify, fetch_document, TranscriptSource, YoutubeCaptions};
use crate::summarize::{ChatModel, LanguageModel, Summarizer};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

/// The main orchestrator for the Precis pipeline.
pub struct Orchestrator {
    source: Arc<dyn TranscriptSource>,
    /// None when no API key is configured.
    summarizer: Option<Summarizer>,
    chunking: ChunkingConfig,
    session: SessionStore,
    run_lock: Mutex<()>,
}

impl Orchestrator {
    /// Create an orchestrator from settings, using YouTube captions and the configured LLM.
    ///
    /// A missing API key is not an error here; every run reports it instead.
    pub fn new(settings: &Settings) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        let model: Option<Arc<dyn LanguageModel>> = match settings.llm.resolve_api_key() {
            Some(key) => {
                info!("Using {} at {}", settings.llm.model, settings.llm.base_url);
                Some(Arc::new(ChatModel::new(&settings.llm, &key)?))
            }
            None => {
                warn!(
                    "No API key found in ${} or the config file",
                    settings.llm.api_key_env
                );
                None
            }
        };

        let source = Arc::new(YoutubeCaptions::new(&settings.transcript)?);

        Self::with_components(settings, prompts, source, model)
    }

    /// Create an orchestrator with custom components.
    pub fn with_components(
        settings: &Settings,
        prompts: Prompts,
        source: Arc<dyn TranscriptSource>,
        model: Option<Arc<dyn LanguageModel>>,
    ) -> Result<Self> {
        let chunking = ChunkingConfig::try_from(&settings.chunking)?;
        let summarizer =
            model.map(|m| Summarizer::with_settings(m, prompts, &settings.summarize));

        Ok(Self {
            source,
            summarizer,
            chunking,
            session: SessionStore::new(),
            run_lock: Mutex::new(()),
        })
    }

    /// Summarize the video at `url` and record the result in the session.
    ///
    /// On failure the session is left exactly as it was. A run started while
    /// another is in flight fails with [`PrecisError::Busy`].
    #[instrument(skip(self), fields(url = %url))]
    pub async fn run(&self, url: &str) -> Result<SessionState> {
        let _guard = self.run_lock.try_lock().map_err(|_| PrecisError::Busy)?;

        let url = url.trim();
        let summarizer = match &self.summarizer {
            Some(s) if !url.is_empty() => s,
            _ => return Err(PrecisError::missing_input()),
        };

        let video = classify(url)?;

        info!("Fetching transcript for {}", video);
        let document = fetch_document(self.source.as_ref(), &video, url).await?;

        let chunks = split_documents(std::slice::from_ref(&document), &self.chunking);
        info!("Split transcript into {} chunks", chunks.len());

        let summary = summarizer.summarize(&chunks).await?;
        info!("Summary ready ({} chars)", summary.len());

        Ok(self.session.record(url, &summary).await)
    }

    /// Reset the session.
    pub async fn clear(&self) -> SessionState {
        self.session.clear().await
    }

    /// Current session state.
    pub async fn state(&self) -> SessionState {
        self.session.snapshot().await
    }

    /// Whether an API key is available.
    pub fn is_configured(&self) -> bool {
        self.summarizer.is_some()
    }
}
