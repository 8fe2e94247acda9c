//! Splitting transcripts into overlapping chunks that fit the model's context.
//!
//! Windows are measured in characters. Window `i` starts at `i * (size - overlap)`,
//! so every pair of neighbours shares exactly `overlap` characters and the text
//! can be rebuilt by dropping that prefix from every chunk but the first.

use crate::config::ChunkingSettings;
use crate::error::{PrecisError, Result};
use crate::source::Document;
use serde::{Deserialize, Serialize};

/// A chunk of a document's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Text content of this chunk.
    pub text: String,
    /// URL of the document this chunk came from.
    pub source: String,
    /// Order of this chunk within its document.
    pub index: usize,
}

/// Configuration for chunking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkingConfig {
    /// Maximum chunk length in characters.
    pub chunk_size: usize,
    /// Characters shared by neighbouring chunks.
    pub chunk_overlap: usize,
}

impl ChunkingConfig {
    /// Create a config, rejecting an overlap that is not smaller than the size.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        if chunk_size == 0 || chunk_overlap >= chunk_size {
            return Err(PrecisError::Configuration(format!(
                "chunk overlap ({}) must be smaller than chunk size ({})",
                chunk_overlap, chunk_size
            )));
        }
        Ok(Self {
            chunk_size,
            chunk_overlap,
        })
    }

    fn step(&self) -> usize {
        self.chunk_size - self.chunk_overlap
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 2000,
            chunk_overlap: 200,
        }
    }
}

impl TryFrom<&ChunkingSettings> for ChunkingConfig {
    type Error = PrecisError;

    fn try_from(settings: &ChunkingSettings) -> Result<Self> {
        Self::new(settings.chunk_size, settings.chunk_overlap)
    }
}

/// Lazy iterator over the chunk windows of a text.
///
/// Clone it before consuming to walk the same windows again.
#[derive(Debug, Clone)]
pub struct TextChunks<'a> {
    text: &'a str,
    /// Byte offset of every char boundary, plus the end of the text.
    boundaries: Vec<usize>,
    config: ChunkingConfig,
    next_start: Option<usize>,
}

impl<'a> Iterator for TextChunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.next_start?;
        let len = self.boundaries.len() - 1;
        let end = (start + self.config.chunk_size).min(len);

        self.next_start = if end < len {
            Some(start + self.config.step())
        } else {
            None
        };

        Some(&self.text[self.boundaries[start]..self.boundaries[end]])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self.next_start {
            None => 0,
            Some(start) => {
                let len = self.boundaries.len() - 1;
                expected_count(len - start.min(len), &self.config)
            }
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for TextChunks<'_> {}

/// Split a text into overlapping windows.
///
/// A text no longer than the chunk size (including the empty text) yields exactly one chunk.
pub fn split_text<'a>(text: &'a str, config: &ChunkingConfig) -> TextChunks<'a> {
    let boundaries = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();

    TextChunks {
        text,
        boundaries,
        config: *config,
        next_start: Some(0),
    }
}

/// Split documents into ordered chunks, keeping each chunk's source.
pub fn split_documents(documents: &[Document], config: &ChunkingConfig) -> Vec<Chunk> {
    documents
        .iter()
        .flat_map(|doc| {
            split_text(&doc.text, config)
                .enumerate()
                .map(move |(index, text)| Chunk {
                    text: text.to_string(),
                    source: doc.source.clone(),
                    index,
                })
        })
        .collect()
}

/// Number of chunks a text of `len` characters splits into.
pub fn expected_count(len: usize, config: &ChunkingConfig) -> usize {
    if len <= config.chunk_size {
        1
    } else {
        (len - config.chunk_overlap).div_ceil(config.step())
    }
}

/// Rebuild the original text from its chunks by dropping each repeated overlap.
pub fn merge_chunks<'a, I>(chunks: I, overlap: usize) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut merged = String::new();
    for (i, chunk) in chunks.into_iter().enumerate() {
        if i == 0 {
            merged.push_str(chunk);
        } else {
            merged.extend(chunk.chars().skip(overlap));
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(size: usize, overlap: usize) -> ChunkingConfig {
        ChunkingConfig::new(size, overlap).unwrap()
    }

    #[test]
    fn test_short_text_is_single_chunk() {
        let chunks: Vec<_> = split_text("hello world", &config(20, 5)).collect();
        assert_eq!(chunks, vec!["hello world"]);

        let chunks: Vec<_> = split_text("", &config(20, 5)).collect();
        assert_eq!(chunks, vec![""]);

        let exact = "a".repeat(20);
        assert_eq!(split_text(&exact, &config(20, 5)).count(), 1);
    }

    #[test]
    fn test_windows_overlap() {
        let chunks: Vec<_> = split_text("abcdefghij", &config(4, 1)).collect();
        assert_eq!(chunks, vec!["abcd", "defg", "ghij"]);

        let chunks: Vec<_> = split_text("abcdefghijk", &config(4, 1)).collect();
        assert_eq!(chunks, vec!["abcd", "defg", "ghij", "jk"]);
    }

    #[test]
    fn test_count_and_reconstruction() {
        let text: String = (0..5_321).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
        for (size, overlap) in [(2000, 200), (1500, 200), (100, 0), (7, 6)] {
            let cfg = config(size, overlap);
            let chunks: Vec<_> = split_text(&text, &cfg).collect();

            assert_eq!(chunks.len(), expected_count(text.len(), &cfg));
            assert!(chunks.iter().all(|c| c.chars().count() <= size));
            for pair in chunks.windows(2) {
                let tail: String = pair[0].chars().skip(pair[0].chars().count() - overlap).collect();
                let head: String = pair[1].chars().take(overlap).collect();
                assert_eq!(tail, head);
            }
            assert_eq!(merge_chunks(chunks.iter().copied(), overlap), text);
        }
    }

    #[test]
    fn test_multibyte_text_is_split_on_char_boundaries() {
        let text = "héllo wörld ünïcode ☕ text";
        let cfg = config(6, 2);
        let chunks: Vec<_> = split_text(text, &cfg).collect();

        assert!(chunks.iter().all(|c| c.chars().count() <= 6));
        assert_eq!(chunks.len(), expected_count(text.chars().count(), &cfg));
        assert_eq!(merge_chunks(chunks, 2), text);
    }

    #[test]
    fn test_iterator_is_restartable_and_sized() {
        let cfg = config(4, 1);
        let chunks = split_text("abcdefghij", &cfg);
        assert_eq!(chunks.len(), 3);

        let again = chunks.clone();
        assert_eq!(chunks.collect::<Vec<_>>(), again.collect::<Vec<_>>());
    }

    #[test]
    fn test_split_documents_keeps_order_and_source() {
        let docs = vec![
            Document::new("abcdefghij", "https://youtu.be/one"),
            Document::new("xyz", "https://youtu.be/two"),
        ];
        let chunks = split_documents(&docs, &config(4, 1));

        assert_eq!(chunks.len(), 4);
        assert_eq!(chunks[2].text, "ghij");
        assert_eq!(chunks[2].index, 2);
        assert_eq!(chunks[3].source, "https://youtu.be/two");
        assert_eq!(chunks[3].index, 0);
    }

    #[test]
    fn test_invalid_config() {
        assert!(ChunkingConfig::new(200, 200).is_err());
        assert!(ChunkingConfig::new(0, 0).is_err());
        assert!(ChunkingConfig::try_from(&ChunkingSettings::default()).is_ok());
    }
}
