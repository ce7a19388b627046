//! Client-side view of the backend: catalog, selection, history and the
//! current generation.

use crate::backend::{GenerateResponse, HistoryEntry, VoiceCatalog};

/// Lifecycle of a single synthesis request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GenerationState {
    #[default]
    Idle,
    InProgress,
    Complete,
    Failed,
}

/// Locators for a freshly generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playback {
    pub filename: String,
    /// Streaming locator, `/api/play/<filename>`.
    pub play_url: String,
    /// Attachment locator as returned by the server.
    pub download_url: String,
}

impl Playback {
    /// Playback locator for a generated file, with the filename encoded as
    /// a single path segment.
    pub fn play_url_for(filename: &str) -> String {
        format!("/api/play/{}", urlencoding::encode(filename))
    }
}

impl From<GenerateResponse> for Playback {
    fn from(response: GenerateResponse) -> Self {
        Self {
            play_url: Self::play_url_for(&response.filename),
            filename: response.filename,
            download_url: response.download_url,
        }
    }
}

/// Outcome of clearing the whole history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClearReport {
    /// Entries present when the clear started.
    pub attempted: usize,
    pub deleted: usize,
    /// Filename and reason for every entry that could not be deleted.
    pub failed: Vec<(String, String)>,
}

impl ClearReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Owned synchronization state.
///
/// Invariant: `selected`, when set, names a key of `voices`.
#[derive(Debug, Clone, Default)]
pub(crate) struct SyncState {
    pub voices: VoiceCatalog,
    pub selected: Option<String>,
    pub history: Vec<HistoryEntry>,
    pub generation: GenerationState,
    pub last_output: Option<Playback>,
}

impl SyncState {
    /// Adopt a catalog wholesale and repair the selection.
    pub fn replace_voices(&mut self, voices: VoiceCatalog) {
        self.voices = voices;
        self.reconcile_selection();
    }

    /// Keep the selection if it still exists, otherwise fall back to the
    /// first key (or nothing for an empty catalog).
    pub fn reconcile_selection(&mut self) {
        let still_valid = self
            .selected
            .as_ref()
            .is_some_and(|key| self.voices.contains_key(key));

        if !still_valid {
            self.selected = self.voices.keys().next().cloned();
        }
    }

    pub fn replace_history(&mut self, history: Vec<HistoryEntry>) {
        self.history = history;
    }

    pub fn snapshot(&self) -> SyncSnapshot {
        SyncSnapshot {
            voices: self.voices.clone(),
            selected: self.selected.clone(),
            history: self.history.clone(),
            generation: self.generation,
            last_output: self.last_output.clone(),
        }
    }
}

/// Read-only copy of the synchronization state.
#[derive(Debug, Clone, Default)]
pub struct SyncSnapshot {
    pub voices: VoiceCatalog,
    pub selected: Option<String>,
    pub history: Vec<HistoryEntry>,
    pub generation: GenerationState,
    pub last_output: Option<Playback>,
}

impl SyncSnapshot {
    pub fn history_count(&self) -> usize {
        self.history.len()
    }
}
