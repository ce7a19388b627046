//! User-facing reporting.
//!
//! Every outcome of a sync operation flows through one [`Presenter`]:
//! notices (with a severity and a visibility flag), confirmation prompts
//! for destructive actions, and synthesis progress.

mod console;

pub use console::ConsolePresenter;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Info,
    Warning,
    Error,
}

/// Who should see a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Shown to the user.
    User,
    /// Recorded in logs only.
    LogOnly,
}

/// A single report from a sync operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: Level,
    pub message: String,
    pub visibility: Visibility,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Level::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Level::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Level::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Level::Error, message)
    }

    fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            visibility: Visibility::User,
        }
    }

    /// Keep this notice out of the user's view.
    pub fn log_only(mut self) -> Self {
        self.visibility = Visibility::LogOnly;
        self
    }

    /// Emit the notice as a tracing event.
    pub fn trace(&self) {
        match self.level {
            Level::Success | Level::Info => tracing::info!(message = %self.message, "notice"),
            Level::Warning => tracing::warn!(message = %self.message, "notice"),
            Level::Error => tracing::error!(message = %self.message, "notice"),
        }
    }
}

/// Front end seam used by the sync component.
pub trait Presenter: Send + Sync {
    /// Report an outcome.
    fn notify(&self, notice: Notice);

    /// Ask the user to confirm a destructive action.
    fn confirm(&self, prompt: &str) -> bool;

    /// Report synthesis progress, 0 to 100.
    fn progress(&self, percent: u8);
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_defaults_to_user_visible() {
        let notice = Notice::error("Failed to load voices");
        assert_eq!(notice.level, Level::Error);
        assert_eq!(notice.visibility, Visibility::User);
    }

    #[test]
    fn test_notice_log_only() {
        let notice = Notice::error("Failed to load history").log_only();
        assert_eq!(notice.visibility, Visibility::LogOnly);
        assert_eq!(notice.message, "Failed to load history");
    }
}
