//! HTTP client for backend communication.

use reqwest::Url;
use reqwest::blocking::Response;
use serde::de::DeserializeOwned;

use super::Backend;
use super::types::{
    BackendError, ErrorBody, GenerateRequest, GenerateResponse, HistoryEntry, HistoryResponse,
    MessageResponse, NewVoiceRequest, Settings, SettingsUpdate, VoiceCatalog, VoicesResponse,
};

/// Address of a locally running backend.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// HTTP-based backend client.
pub struct HttpBackend {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpBackend {
    /// Create a new HTTP backend client.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::blocking::Client::new(),
        }
    }

    /// Get the base URL for this backend.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build an endpoint URL, percent-encoding each path segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, BackendError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| BackendError::ConnectionFailed(format!("{}: {e}", self.base_url)))?;

        url.path_segments_mut()
            .map_err(|_| {
                BackendError::ConnectionFailed(format!("{} cannot be a base", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    /// Resolve a server-relative locator (`/api/play/x.mp3`) against the base
    /// URL. The locator is taken relative to the base path, so a backend
    /// mounted under a prefix keeps it.
    fn resolve(&self, path: &str) -> Result<Url, BackendError> {
        let base = Url::parse(&format!("{}/", self.base_url))
            .map_err(|e| BackendError::ConnectionFailed(format!("{}: {e}", self.base_url)))?;

        base.join(path.trim_start_matches('/'))
            .map_err(|e| BackendError::ConnectionFailed(format!("{path}: {e}")))
    }

    /// Turn non-2xx responses into `Rejected`, reading the `{error}` body if any.
    fn check(response: Response) -> Result<Response, BackendError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ErrorBody>()
            .ok()
            .and_then(|body| body.error);

        Err(BackendError::Rejected {
            status: status.as_u16(),
            message,
        })
    }

    fn decode<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
        Self::check(response)?
            .json()
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))
    }

    fn send(request: reqwest::blocking::RequestBuilder) -> Result<Response, BackendError> {
        request
            .send()
            .map_err(|e| BackendError::ConnectionFailed(e.to_string()))
    }
}

impl Backend for HttpBackend {
    fn list_voices(&self) -> Result<VoiceCatalog, BackendError> {
        let url = self.endpoint(&["api", "voices"])?;
        tracing::debug!(%url, "listing voices");

        Self::decode(Self::send(self.client.get(url))?)
    }

    fn add_voice(&self, request: &NewVoiceRequest) -> Result<VoiceCatalog, BackendError> {
        let url = self.endpoint(&["api", "voices"])?;
        tracing::debug!(%url, key = %request.key, "adding voice");

        let response: VoicesResponse = Self::decode(Self::send(self.client.post(url).json(request))?)?;
        Ok(response.voices)
    }

    fn delete_voice(&self, key: &str) -> Result<VoiceCatalog, BackendError> {
        let url = self.endpoint(&["api", "voices", key])?;
        tracing::debug!(%url, "deleting voice");

        let response: VoicesResponse = Self::decode(Self::send(self.client.delete(url))?)?;
        Ok(response.voices)
    }

    fn list_history(&self) -> Result<Vec<HistoryEntry>, BackendError> {
        let url = self.endpoint(&["api", "history"])?;
        tracing::debug!(%url, "listing history");

        let response: HistoryResponse = Self::decode(Self::send(self.client.get(url))?)?;
        Ok(response.files)
    }

    fn delete_history(&self, filename: &str) -> Result<(), BackendError> {
        let url = self.endpoint(&["api", "history", filename])?;
        tracing::debug!(%url, "deleting history entry");

        Self::check(Self::send(self.client.delete(url))?)?;
        Ok(())
    }

    fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, BackendError> {
        let url = self.endpoint(&["api", "generate"])?;
        tracing::debug!(%url, voice = %request.voice, chars = request.text.len(), "generating speech");

        Self::decode(Self::send(self.client.post(url).json(request))?)
    }

    fn fetch(&self, path: &str) -> Result<Vec<u8>, BackendError> {
        let url = self.resolve(path)?;
        tracing::debug!(%url, "fetching audio");

        Self::check(Self::send(self.client.get(url))?)?
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))
    }

    fn get_settings(&self) -> Result<Settings, BackendError> {
        let url = self.endpoint(&["api", "settings"])?;
        tracing::debug!(%url, "reading settings");

        Self::decode(Self::send(self.client.get(url))?)
    }

    fn save_settings(&self, update: &SettingsUpdate) -> Result<(), BackendError> {
        let url = self.endpoint(&["api", "settings"])?;
        tracing::debug!(%url, "saving settings");

        let _: MessageResponse = Self::decode(Self::send(self.client.post(url).json(update))?)?;
        Ok(())
    }

    fn cleanup_now(&self) -> Result<(), BackendError> {
        let url = self.endpoint(&["api", "cleanup-now"])?;
        tracing::debug!(%url, "requesting cleanup");

        let _: MessageResponse = Self::decode(Self::send(self.client.post(url))?)?;
        Ok(())
    }
}
