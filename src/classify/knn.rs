use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;

use log::{debug, info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::canvas::Canvas;
use crate::classify::config::{KnnConfig, LoadMode};
use crate::classify::distance::distance;
use crate::classify::error::{KnnError, KnnResult};
use crate::classify::label::label_from_path;
use crate::classify::report::{EvalReport, Outcome};
use crate::classify::sample::TrainingSample;
use crate::codec;
use crate::dataset::scan_directory;

/// A training sample's distance to a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    /// Position of the sample in the classifier's training set.
    pub index: usize,
    pub label: String,
    pub distance: f64,
}

impl Neighbor {
    /// Nearest first; equal distances fall back to training-set order.
    fn rank(a: &Neighbor, b: &Neighbor) -> Ordering {
        a.distance.total_cmp(&b.distance).then(a.index.cmp(&b.index))
    }
}

/// The winning label together with the neighbors that voted for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: String,
    /// The `k` nearest training samples, nearest first.
    pub neighbors: Vec<Neighbor>,
}

/// Exhaustive k-nearest-neighbor classifier over labeled canvases.
///
/// Every query is compared against every training sample; there is no index.
/// Classification only reads the training set, so one classifier can serve
/// concurrent queries.
#[derive(Debug, Clone)]
pub struct KnnClassifier {
    k: usize,
    samples: Vec<TrainingSample>,
}

impl KnnClassifier {
    /// Fails with `InvalidK` when `k` is zero.
    pub fn new(k: usize, samples: Vec<TrainingSample>) -> KnnResult<Self> {
        if k == 0 {
            return Err(KnnError::InvalidK);
        }
        Ok(KnnClassifier { k, samples })
    }

    /// Builds a classifier from every `.ppm` file under `dir`, labeled by file
    /// name. With `LoadMode::Eager` all images are decoded up front and the
    /// first unreadable one aborts construction.
    pub fn from_directory(dir: impl AsRef<Path>, config: &KnnConfig) -> KnnResult<Self> {
        let dir = dir.as_ref();
        let entries = scan_directory(dir)?;

        let samples = match config.load_mode {
            LoadMode::Eager => entries
                .into_par_iter()
                .map(|e| TrainingSample::load(e.path, e.label))
                .collect::<Result<Vec<_>, _>>()?,
            LoadMode::Lazy => entries
                .into_iter()
                .map(|e| TrainingSample::deferred(e.path, e.label))
                .collect(),
        };

        info!(
            "loaded {} training samples from {} ({:?}, k = {})",
            samples.len(),
            dir.display(),
            config.load_mode,
            config.k
        );
        KnnClassifier::new(config.k, samples)
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn samples(&self) -> &[TrainingSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// How many training samples carry each label.
    pub fn label_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for s in &self.samples {
            *counts.entry(s.label().to_owned()).or_insert(0) += 1;
        }
        counts
    }

    /// Most common label among the `k` training samples nearest to `query`.
    pub fn predict(&self, query: &Canvas) -> KnnResult<String> {
        Ok(self.predict_detailed(query)?.label)
    }

    /// Like `predict`, also returning the neighbors that voted.
    ///
    /// An empty training set predicts the empty label. Otherwise `k` may not
    /// exceed the number of samples. Ties are settled deterministically: equal
    /// distances by training-set order, equal vote counts in favor of the label
    /// whose best neighbor ranks nearest.
    pub fn predict_detailed(&self, query: &Canvas) -> KnnResult<Prediction> {
        if self.samples.is_empty() {
            return Ok(Prediction { label: String::new(), neighbors: Vec::new() });
        }
        if self.k > self.samples.len() {
            return Err(KnnError::NotEnoughSamples { k: self.k, available: self.samples.len() });
        }

        let mut neighbors = self
            .samples
            .par_iter()
            .enumerate()
            .map(|(index, sample)| -> KnnResult<Neighbor> {
                let image = sample.canvas()?;
                Ok(Neighbor {
                    index,
                    label: sample.label().to_owned(),
                    distance: distance(query, &image)?,
                })
            })
            .collect::<KnnResult<Vec<_>>>()?;

        // Partition so the k nearest come first, then order just those.
        neighbors.select_nth_unstable_by(self.k - 1, Neighbor::rank);
        neighbors.truncate(self.k);
        neighbors.sort_by(Neighbor::rank);

        let label = majority_label(&neighbors);
        debug!(
            "predicted {:?} from {:?}",
            label,
            neighbors.iter().map(|n| (n.label.as_str(), n.distance)).collect::<Vec<_>>()
        );
        Ok(Prediction { label, neighbors })
    }

    /// Fraction of `test_files` whose predicted label differs from the label in
    /// their file name. `0.0` for an empty list.
    pub fn classification_error<P: AsRef<Path>>(&self, test_files: &[P]) -> KnnResult<f64> {
        Ok(self.evaluate(test_files)?.error_rate)
    }

    /// Classifies every file in `test_files` and reports per-file outcomes.
    ///
    /// A wrong prediction is recorded, never raised; unreadable files abort
    /// the run.
    pub fn evaluate<P: AsRef<Path>>(&self, test_files: &[P]) -> KnnResult<EvalReport> {
        let started = Instant::now();
        let mut outcomes = Vec::with_capacity(test_files.len());

        for path in test_files {
            let path = path.as_ref();
            let expected = label_from_path(path);
            if expected.is_empty() {
                warn!("{} has no label in its name; it will count as a mismatch", path.display());
            }

            let query = codec::load(path)?;
            let predicted = self.predict(&query)?;
            debug!("{}: expected {:?}, predicted {:?}", path.display(), expected, predicted);

            outcomes.push(Outcome { path: path.to_path_buf(), expected, predicted });
        }

        let report =
            EvalReport::from_outcomes(self.k, outcomes, started.elapsed().as_millis() as u64);
        info!(
            "evaluated {} images: {} mismatches, error rate {:.4}",
            report.total, report.mismatches, report.error_rate
        );
        Ok(report)
    }
}

/// Tallies labels over `neighbors` (already in rank order) and returns the
/// most frequent one, preferring the label seen first on equal counts.
fn majority_label(neighbors: &[Neighbor]) -> String {
    // (label, count) in order of first appearance.
    let mut tally: Vec<(&str, usize)> = Vec::new();
    for n in neighbors {
        match tally.iter_mut().find(|(label, _)| *label == n.label) {
            Some((_, count)) => *count += 1,
            None => tally.push((n.label.as_str(), 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (label, count) in tally {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((label, count));
        }
    }
    best.map(|(label, _)| label.to_owned()).unwrap_or_default()
}
