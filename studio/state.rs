use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use serde::Serialize;

use knn_canvas::KnnClassifier;

// ---------------------------------------------------------------------------
// Request counters
// ---------------------------------------------------------------------------

/// Running totals reported by `GET /stats`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Counters {
    pub requests:    u64,
    pub predictions: u64,
    pub previews:    u64,
    /// Responses with a 4xx or 5xx status.
    pub errors:      u64,
}

// ---------------------------------------------------------------------------
// Main state struct
// ---------------------------------------------------------------------------

pub struct StudioState {
    /// Read-only after startup; queried concurrently by request threads.
    pub classifier: KnnClassifier,
    pub counters:   Mutex<Counters>,
    pub started:    Instant,
}

impl StudioState {
    pub fn new(classifier: KnnClassifier) -> Self {
        StudioState {
            classifier,
            counters: Mutex::new(Counters::default()),
            started:  Instant::now(),
        }
    }

    /// Locks the counters, recovering them if a handler thread panicked.
    pub fn counters(&self) -> MutexGuard<'_, Counters> {
        self.counters.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Shared state type — an `Arc<StudioState>` passed to every handler.
pub type SharedState = Arc<StudioState>;
