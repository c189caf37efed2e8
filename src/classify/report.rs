use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// The result of classifying one test image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub path: PathBuf,
    /// Label taken from the file name; empty if the name carries none.
    pub expected: String,
    pub predicted: String,
}

impl Outcome {
    pub fn is_correct(&self) -> bool {
        self.expected == self.predicted
    }
}

/// Summary of one evaluation run over a test set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalReport {
    /// Neighbor count used for every prediction.
    pub k: usize,
    pub total: usize,
    pub mismatches: usize,
    /// `mismatches / total` in [0, 1]; `0.0` for an empty test set.
    pub error_rate: f64,
    /// Per-image results in test-set order.
    pub outcomes: Vec<Outcome>,
    /// Wall-clock duration of the whole run in milliseconds.
    pub elapsed_ms: u64,
}

impl EvalReport {
    pub fn from_outcomes(k: usize, outcomes: Vec<Outcome>, elapsed_ms: u64) -> Self {
        let total = outcomes.len();
        let mismatches = outcomes.iter().filter(|o| !o.is_correct()).count();
        let error_rate = if total > 0 { mismatches as f64 / total as f64 } else { 0.0 };
        EvalReport { k, total, mismatches, error_rate, outcomes, elapsed_ms }
    }

    /// Counts keyed by `(expected, predicted)`.
    pub fn confusion(&self) -> BTreeMap<(String, String), usize> {
        let mut counts = BTreeMap::new();
        for o in &self.outcomes {
            *counts.entry((o.expected.clone(), o.predicted.clone())).or_insert(0) += 1;
        }
        counts
    }

    /// Serializes the report to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }
}
