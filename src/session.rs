//! In-memory state of the interactive session.

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// The last summarized URL and its summary.
///
/// Both fields are empty until a run completes, and again after [`SessionState::clear`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub url: String,
    pub summary: String,
}

impl SessionState {
    /// Replace both fields.
    pub fn record(&mut self, url: impl Into<String>, summary: impl Into<String>) {
        *self = Self {
            url: url.into(),
            summary: summary.into(),
        };
    }

    /// Reset both fields to empty.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.summary.is_empty()
    }
}

/// Shared handle to the session state.
#[derive(Debug, Default)]
pub struct SessionStore {
    state: RwLock<SessionState>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current state.
    pub async fn snapshot(&self) -> SessionState {
        self.state.read().await.clone()
    }

    /// Record a completed run, returning the new state.
    pub async fn record(&self, url: &str, summary: &str) -> SessionState {
        let mut state = self.state.write().await;
        state.record(url, summary);
        state.clone()
    }

    /// Clear the state, returning the now-empty state.
    pub async fn clear(&self) -> SessionState {
        let mut state = self.state.write().await;
        state.clear();
        state.clone()
    }
}
