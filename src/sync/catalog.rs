//! Catalog and history synchronization.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use thiserror::Error;

use super::key::normalize_key;
use super::progress::{DEFAULT_TICK, ProgressTicker};
use super::state::{ClearReport, GenerationState, Playback, SyncSnapshot, SyncState};
use crate::backend::{
    Backend, BackendError, GenerateRequest, NewVoiceRequest, Settings, SettingsUpdate,
    VoiceCatalog,
};
use crate::present::{Notice, Presenter};

/// Errors returned by sync operations.
///
/// Each one has already been reported through the presenter by the time the
/// caller sees it.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("No text to synthesize")]
    EmptyText,

    #[error("No voice selected")]
    NoVoiceSelected,

    #[error("Unknown voice: {0}")]
    UnknownVoice(String),

    #[error("A synthesis request is already in progress")]
    GenerationInProgress,

    #[error("Action not confirmed")]
    Declined,

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
}

/// Keeps a local copy of the voice catalog and generation history in step
/// with the backend.
///
/// Collections are never merged: every successful fetch or mutation adopts
/// the server's collection wholesale. Operations take `&self` and may be
/// called from several threads; the state lock is never held across a
/// request, so responses are applied in completion order.
pub struct CatalogSync<B: Backend, P: Presenter> {
    backend: B,
    presenter: Arc<P>,
    state: Mutex<SyncState>,
    tick: Duration,
}

impl<B: Backend, P: Presenter + 'static> CatalogSync<B, P> {
    /// Create a sync component with empty local state.
    pub fn new(backend: B, presenter: Arc<P>) -> Self {
        Self {
            backend,
            presenter,
            state: Mutex::new(SyncState::default()),
            tick: DEFAULT_TICK,
        }
    }

    /// Set the simulated progress interval.
    pub fn with_tick_interval(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    fn state(&self) -> MutexGuard<'_, SyncState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn report(&self, notice: Notice) {
        self.presenter.notify(notice);
    }

    /// Report a backend failure with the server's message or `fallback`.
    fn reject(&self, error: BackendError, fallback: &str) -> SyncError {
        if error.is_transport() {
            tracing::warn!(%error, "backend unreachable or sent an unreadable reply");
        } else {
            tracing::debug!(%error, "backend rejected the request");
        }
        self.report(Notice::error(error.user_message(fallback)));
        SyncError::Backend(error)
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> SyncSnapshot {
        self.state().snapshot()
    }

    pub fn voices(&self) -> VoiceCatalog {
        self.state().voices.clone()
    }

    pub fn selected_voice(&self) -> Option<String> {
        self.state().selected.clone()
    }

    pub fn history_count(&self) -> usize {
        self.state().history.len()
    }

    pub fn generation_state(&self) -> GenerationState {
        self.state().generation
    }

    pub fn last_output(&self) -> Option<Playback> {
        self.state().last_output.clone()
    }

    /// Fetch the catalog and adopt it. An empty catalog is valid.
    ///
    /// # Returns
    /// Number of voices in the catalog
    pub fn load_voices(&self) -> Result<usize, SyncError> {
        let voices = self
            .backend
            .list_voices()
            .map_err(|e| self.reject(e, "Failed to load voices"))?;

        let mut state = self.state();
        state.replace_voices(voices);
        tracing::info!(
            count = state.voices.len(),
            selected = ?state.selected,
            "voice catalog loaded"
        );

        Ok(state.voices.len())
    }

    /// Select a voice from the current catalog.
    ///
    /// Selecting a key that is not in the catalog is rejected and leaves
    /// the selection untouched.
    pub fn select_voice(&self, key: &str) -> Result<(), SyncError> {
        let mut state = self.state();

        if !state.voices.contains_key(key) {
            drop(state);
            self.report(Notice::error(format!("Unknown voice: {key}")));
            return Err(SyncError::UnknownVoice(key.to_string()));
        }

        state.selected = Some(key.to_string());
        tracing::debug!(key, "voice selected");
        Ok(())
    }

    /// Add a custom voice and select it.
    ///
    /// # Returns
    /// The normalized key the voice was submitted under
    pub fn add_voice(
        &self,
        key: &str,
        name: &str,
        voice_id: &str,
        description: &str,
    ) -> Result<String, SyncError> {
        let request = NewVoiceRequest {
            key: normalize_key(key),
            name: name.to_string(),
            voice_id: voice_id.to_string(),
            description: description.to_string(),
        };

        let voices = self
            .backend
            .add_voice(&request)
            .map_err(|e| self.reject(e, "Failed to add voice"))?;

        {
            let mut state = self.state();
            state.replace_voices(voices);
            if state.voices.contains_key(&request.key) {
                state.selected = Some(request.key.clone());
            }
            tracing::info!(key = %request.key, count = state.voices.len(), "voice added");
        }

        self.report(Notice::success("Voice added successfully"));
        Ok(request.key)
    }

    /// Delete a voice after confirmation.
    ///
    /// Only custom voices are deletable; the server enforces this.
    pub fn delete_voice(&self, key: &str) -> Result<(), SyncError> {
        let label = self
            .state()
            .voices
            .get(key)
            .map(|voice| voice.name.clone())
            .unwrap_or_else(|| key.to_string());

        if !self.presenter.confirm(&format!("Delete voice \"{label}\"?")) {
            return Err(SyncError::Declined);
        }

        let voices = self
            .backend
            .delete_voice(key)
            .map_err(|e| self.reject(e, "Failed to delete voice"))?;

        {
            let mut state = self.state();
            state.replace_voices(voices);
            tracing::info!(key, selected = ?state.selected, "voice deleted");
        }

        self.report(Notice::success("Voice deleted"));
        Ok(())
    }

    /// Fetch the history list and adopt it.
    ///
    /// Failures are reported to the log only.
    ///
    /// # Returns
    /// Number of history entries
    pub fn load_history(&self) -> Result<usize, SyncError> {
        let history = self.backend.list_history().map_err(|e| {
            self.report(Notice::error(format!("Failed to load history: {e}")).log_only());
            SyncError::Backend(e)
        })?;

        let mut state = self.state();
        state.replace_history(history);
        tracing::debug!(count = state.history.len(), "history loaded");

        Ok(state.history.len())
    }

    /// Delete one history entry after confirmation, then refresh.
    pub fn delete_history_entry(&self, filename: &str) -> Result<(), SyncError> {
        if !self.presenter.confirm(&format!("Delete {filename}?")) {
            return Err(SyncError::Declined);
        }

        self.backend
            .delete_history(filename)
            .map_err(|e| self.reject(e, "Failed to delete file"))?;

        self.report(Notice::success("File deleted"));
        let _ = self.load_history();
        Ok(())
    }

    /// Delete every history entry after confirmation.
    ///
    /// The list is fetched once up front and entries are deleted one at a
    /// time in that order. Failed deletes are neither retried nor rolled
    /// back; they are collected into the report.
    pub fn clear_all_history(&self) -> Result<ClearReport, SyncError> {
        if !self
            .presenter
            .confirm("Delete all voice history? This cannot be undone.")
        {
            return Err(SyncError::Declined);
        }

        let entries = self
            .backend
            .list_history()
            .map_err(|e| self.reject(e, "Failed to clear history"))?;

        if entries.is_empty() {
            self.report(Notice::info("History is already empty"));
            let _ = self.load_history();
            return Ok(ClearReport::default());
        }

        let mut report = ClearReport {
            attempted: entries.len(),
            ..ClearReport::default()
        };

        for entry in &entries {
            match self.backend.delete_history(&entry.filename) {
                Ok(()) => report.deleted += 1,
                Err(e) => {
                    tracing::warn!(filename = %entry.filename, error = %e, "history delete failed");
                    report.failed.push((entry.filename.clone(), e.to_string()));
                }
            }
        }

        if report.is_complete() {
            self.report(Notice::success("All history cleared"));
        } else {
            self.report(Notice::warning(format!(
                "Cleared {} of {} history entries ({} failed)",
                report.deleted,
                report.attempted,
                report.failed.len()
            )));
        }

        let _ = self.load_history();
        Ok(report)
    }

    /// Synthesize `text` with the selected voice.
    ///
    /// Only one request may be in flight; a call made while another is in
    /// progress is rejected before anything is sent.
    pub fn generate_speech(&self, text: &str) -> Result<Playback, SyncError> {
        let text = text.trim();
        if text.is_empty() {
            self.report(Notice::error("Enter text to synthesize"));
            return Err(SyncError::EmptyText);
        }

        let voice = {
            let mut state = self.state();

            let Some(voice) = state.selected.clone() else {
                drop(state);
                self.report(Notice::error("Select a voice first"));
                return Err(SyncError::NoVoiceSelected);
            };

            if state.generation == GenerationState::InProgress {
                drop(state);
                self.report(Notice::warning("Synthesis already in progress"));
                return Err(SyncError::GenerationInProgress);
            }

            state.generation = GenerationState::InProgress;
            voice
        };

        tracing::info!(voice = %voice, chars = text.len(), "synthesis started");

        let ticker = ProgressTicker::start(self.presenter.clone(), self.tick);
        let result = self.backend.generate(&GenerateRequest::new(text, voice));
        ticker.stop();

        match result {
            Ok(response) => {
                self.presenter.progress(100);

                let playback = Playback::from(response);
                {
                    let mut state = self.state();
                    state.generation = GenerationState::Complete;
                    state.last_output = Some(playback.clone());
                }

                tracing::info!(filename = %playback.filename, "synthesis complete");
                self.report(Notice::success("Synthesis complete"));
                let _ = self.load_history();
                Ok(playback)
            }
            Err(e) => {
                self.state().generation = GenerationState::Failed;
                Err(self.reject(e, "Synthesis failed"))
            }
        }
    }

    /// Download the audio behind a playback or download locator.
    pub fn fetch_audio(&self, locator: &str) -> Result<Vec<u8>, SyncError> {
        self.backend
            .fetch(locator)
            .map_err(|e| self.reject(e, "Failed to download file"))
    }

    /// Read server-side settings.
    pub fn settings(&self) -> Result<Settings, SyncError> {
        self.backend
            .get_settings()
            .map_err(|e| self.reject(e, "Failed to load settings"))
    }

    /// Update server-side settings.
    pub fn save_settings(&self, update: &SettingsUpdate) -> Result<(), SyncError> {
        self.backend
            .save_settings(update)
            .map_err(|e| self.reject(e, "Failed to save settings"))?;

        self.report(Notice::success("Settings saved successfully"));
        Ok(())
    }

    /// Ask the server to purge expired files, then refresh history.
    pub fn cleanup_now(&self) -> Result<(), SyncError> {
        self.backend
            .cleanup_now()
            .map_err(|e| self.reject(e, "Cleanup failed"))?;

        self.report(Notice::success("Cleanup completed"));
        let _ = self.load_history();
        Ok(())
    }
}
