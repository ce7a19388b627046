//! Simulated synthesis progress.
//!
//! The backend reports no progress, so a ticker advances a fixed step on a
//! timer and parks just below completion until the response arrives.

use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::present::Presenter;

/// Percentage added per tick.
pub const PROGRESS_STEP: u8 = 5;

/// Highest value the ticker reports on its own.
pub const PROGRESS_CAP: u8 = 90;

/// Default tick interval.
pub const DEFAULT_TICK: Duration = Duration::from_millis(200);

/// Background thread reporting simulated progress to a presenter.
///
/// The thread is stopped and joined by [`ProgressTicker::stop`] or on drop.
pub struct ProgressTicker {
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl ProgressTicker {
    /// Start ticking from zero.
    pub fn start<P: Presenter + 'static>(presenter: Arc<P>, interval: Duration) -> Self {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let handle = thread::spawn(move || {
            let mut progress = 0u8;
            presenter.progress(progress);

            loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {
                        progress = next_progress(progress);
                        presenter.progress(progress);
                    }
                    // Stop requested or the ticker was dropped.
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
        });

        Self {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        }
    }

    /// Stop the ticker and wait for its thread to exit.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            tracing::warn!("progress ticker thread panicked");
        }
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Advance one step, never past [`PROGRESS_CAP`].
pub fn next_progress(current: u8) -> u8 {
    current.saturating_add(PROGRESS_STEP).min(PROGRESS_CAP)
}
