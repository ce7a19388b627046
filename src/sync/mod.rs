//! Voice catalog and generation history synchronization.
//!
//! [`CatalogSync`] owns the client's view of the backend and keeps it
//! consistent: wholesale replacement after every fetch or mutation, a
//! selected voice that always points into the catalog, and at most one
//! synthesis request in flight.

mod catalog;
mod key;
mod progress;
mod state;

pub use catalog::{CatalogSync, SyncError};
pub use key::normalize_key;
pub use progress::{DEFAULT_TICK, PROGRESS_CAP, PROGRESS_STEP, ProgressTicker, next_progress};
pub use state::{ClearReport, GenerationState, Playback, SyncSnapshot};
