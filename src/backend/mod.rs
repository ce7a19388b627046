//! Backend communication with the text-to-speech web service.
//!
//! Provides the [`Backend`] trait and its HTTP implementation for the
//! `/api/*` JSON endpoints (voice catalog, synthesis, history, settings).

mod client;
mod types;

pub use client::{DEFAULT_BASE_URL, HttpBackend};
pub use types::{
    BackendError, GenerateRequest, GenerateResponse, HistoryEntry, HistoryResponse,
    MessageResponse, NewVoiceRequest, Settings, SettingsUpdate, Voice, VoiceCatalog,
    VoicesResponse,
};

/// Trait for backend communication.
///
/// This trait abstracts the HTTP communication with the web service,
/// allowing for mock implementations in tests.
#[cfg_attr(test, mockall::automock)]
pub trait Backend: Send + Sync {
    /// Fetch the full voice catalog.
    fn list_voices(&self) -> Result<VoiceCatalog, BackendError>;

    /// Add a custom voice.
    ///
    /// # Returns
    /// The complete catalog after the addition
    fn add_voice(&self, request: &NewVoiceRequest) -> Result<VoiceCatalog, BackendError>;

    /// Delete a voice by key.
    ///
    /// # Returns
    /// The complete catalog after the deletion
    fn delete_voice(&self, key: &str) -> Result<VoiceCatalog, BackendError>;

    /// List generated audio files.
    fn list_history(&self) -> Result<Vec<HistoryEntry>, BackendError>;

    /// Delete one generated audio file.
    fn delete_history(&self, filename: &str) -> Result<(), BackendError>;

    /// Synthesize speech from text.
    fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, BackendError>;

    /// Download the bytes behind a server-relative locator such as
    /// `/api/play/<file>` or a `download_url`.
    fn fetch(&self, path: &str) -> Result<Vec<u8>, BackendError>;

    /// Read server-side settings.
    fn get_settings(&self) -> Result<Settings, BackendError>;

    /// Update server-side settings.
    fn save_settings(&self, update: &SettingsUpdate) -> Result<(), BackendError>;

    /// Ask the server to purge expired audio files now.
    fn cleanup_now(&self) -> Result<(), BackendError>;
}

/// Create a backend for the given base URL.
pub fn create_backend(base_url: &str) -> HttpBackend {
    HttpBackend::new(base_url)
}
