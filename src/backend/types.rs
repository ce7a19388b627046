//! Backend request/response types.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when communicating with the backend.
///
/// `ConnectionFailed` and `InvalidResponse` are transport failures; `Rejected`
/// is a non-2xx answer from the server, optionally carrying its message.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BackendError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request rejected ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Rejected { status: u16, message: Option<String> },
}

impl BackendError {
    /// Message to show the user: the server's own text when it sent one,
    /// otherwise the caller's fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            BackendError::Rejected {
                message: Some(message),
                ..
            } if !message.is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }

    /// True for network and decode failures, false for server rejections.
    pub fn is_transport(&self) -> bool {
        !matches!(self, BackendError::Rejected { .. })
    }
}

/// A catalog entry as sent by the backend. The catalog key is not part of
/// the object; it is the map key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Voice {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub custom: bool,
}

/// Voice catalog keyed by voice key. Iteration order is the server's order.
pub type VoiceCatalog = IndexMap<String, Voice>;

/// Response of the voice add/delete endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoicesResponse {
    pub voices: VoiceCatalog,
}

/// Request body for adding a custom voice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewVoiceRequest {
    pub key: String,
    pub name: String,
    pub voice_id: String,
    pub description: String,
}

/// One previously generated audio file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryEntry {
    pub filename: String,
    /// Seconds since the Unix epoch.
    pub created: i64,
    /// Size in bytes.
    pub size: u64,
    pub download_url: String,
}

/// Response from the history listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub files: Vec<HistoryEntry>,
}

/// Request for speech synthesis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerateRequest {
    pub text: String,
    pub voice: String,
}

impl GenerateRequest {
    /// Create a new synthesis request for the given voice key.
    pub fn new(text: impl Into<String>, voice: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice: voice.into(),
        }
    }
}

/// Successful synthesis response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerateResponse {
    pub filename: String,
    pub download_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Server-side settings as reported by `GET /api/settings`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// Minutes after which generated files are removed.
    pub cleanup_interval: u32,
}

/// Partial settings update for `POST /api/settings`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleanup_interval: Option<u32>,
}

impl SettingsUpdate {
    /// True when the update would not change anything.
    pub fn is_empty(&self) -> bool {
        self.api_token.is_none() && self.cleanup_interval.is_none()
    }
}

/// Generic `{message}` acknowledgement.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Error body the backend sends alongside non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: Option<String>,
}
