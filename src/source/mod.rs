//! Video source abstraction for Precis.
//!
//! Classifies submitted URLs and retrieves transcripts through a trait-based interface.

mod youtube;

pub use youtube::YoutubeCaptions;

use crate::error::{ClassifyResult, FetchResult, PrecisError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use url::{Host, Url};

const PRIMARY_DOMAIN: &str = "youtube.com";
const SHORT_DOMAIN: &str = "youtu.be";

/// Type of transcript source.
///
/// Only video platforms are supported; generic web pages are not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    YouTube,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::YouTube => write!(f, "youtube"),
        }
    }
}

/// Identifier of a single video.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VideoId(String);

impl VideoId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Full transcript text of one video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Transcript text.
    pub text: String,
    /// URL the transcript was requested for.
    pub source: String,
}

impl Document {
    pub fn new(text: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: source.into(),
        }
    }
}

/// One piece of transcript text as returned by a source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    pub text: String,
}

impl Snippet {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Trait for transcript providers.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Get the source kind.
    fn kind(&self) -> SourceKind;

    /// Fetch the transcript snippets of a video, in playback order.
    async fn fetch(&self, video: &VideoId) -> FetchResult<Vec<Snippet>>;
}

/// Classify a URL and extract the video identifier.
///
/// `youtube.com` hosts use the `v` query parameter, falling back to the last path
/// segment (`/embed/ID`, `/shorts/ID`, ...). `youtu.be` hosts use the path.
pub fn classify(raw: &str) -> ClassifyResult<VideoId> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(PrecisError::missing_input());
    }

    let url = Url::parse(raw).map_err(|e| PrecisError::InvalidInput(format!("{} ({})", raw, e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(PrecisError::InvalidInput(format!(
            "{} (unsupported scheme '{}')",
            raw,
            url.scheme()
        )));
    }

    let host = match url.host() {
        Some(Host::Domain(domain)) if domain.contains('.') => domain.to_ascii_lowercase(),
        Some(Host::Domain(_)) | None => {
            return Err(PrecisError::InvalidInput(format!("{} (missing host)", raw)));
        }
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => {
            return Err(PrecisError::UnsupportedSource(raw.to_string()));
        }
    };

    let id = if matches_domain(&host, PRIMARY_DOMAIN) {
        url.query_pairs()
            .find(|(key, value)| key == "v" && !value.is_empty())
            .map(|(_, value)| value.into_owned())
            .or_else(|| {
                url.path_segments()
                    .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
                    .filter(|segment| *segment != "watch")
                    .map(str::to_string)
            })
    } else if matches_domain(&host, SHORT_DOMAIN) {
        Some(url.path().trim_matches('/').to_string()).filter(|id| !id.is_empty())
    } else {
        return Err(PrecisError::UnsupportedSource(raw.to_string()));
    };

    let id = id.ok_or_else(|| {
        PrecisError::UnsupportedSource(format!("{} (no video id found)", raw))
    })?;
    debug!("Classified {} as video {}", raw, id);

    Ok(VideoId(id))
}

fn matches_domain(host: &str, domain: &str) -> bool {
    host == domain
        || host
            .strip_suffix(domain)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

/// Fetch a transcript and join its snippets into a single document.
///
/// Fails with [`PrecisError::TranscriptUnavailable`] when the source fails or the text is blank.
#[instrument(skip(source), fields(kind = %source.kind(), video = %video))]
pub async fn fetch_document(
    source: &dyn TranscriptSource,
    video: &VideoId,
    url: &str,
) -> FetchResult<Document> {
    let snippets = source.fetch(video).await?;

    let text = snippets
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    if text.trim().is_empty() {
        return Err(PrecisError::TranscriptUnavailable(format!(
            "no transcript found for video {}",
            video
        )));
    }

    debug!("Fetched {} snippets ({} chars)", snippets.len(), text.chars().count());
    Ok(Document::new(text, url))
}
