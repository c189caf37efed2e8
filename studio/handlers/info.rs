use serde_json::json;

use crate::routes::{json_response, HttpResponse};
use crate::state::SharedState;

// ---------------------------------------------------------------------------
// GET /health
// ---------------------------------------------------------------------------

pub fn handle_health(state: &SharedState) -> HttpResponse {
    json_response(&json!({
        "status":      "ok",
        "samples":     state.classifier.len(),
        "k":           state.classifier.k(),
        "uptime_secs": state.started.elapsed().as_secs(),
    }))
}

// ---------------------------------------------------------------------------
// GET /labels
// ---------------------------------------------------------------------------

/// Number of training samples per label.
pub fn handle_labels(state: &SharedState) -> HttpResponse {
    json_response(&state.classifier.label_counts())
}

// ---------------------------------------------------------------------------
// GET /stats
// ---------------------------------------------------------------------------

pub fn handle_stats(state: &SharedState) -> HttpResponse {
    let counters = state.counters().clone();
    json_response(&counters)
}
