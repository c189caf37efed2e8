use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::classify::label::{label_from_path, IMAGE_EXTENSION};
use crate::error::{CanvasError, Result};

/// An image file found on disk together with the label its name encodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledPath {
    pub path: PathBuf,
    /// Empty when the file name does not follow `<label>_<digits>.ppm`.
    pub label: String,
}

/// Recursively collects every regular `.ppm` file under `dir`.
///
/// Results are sorted by path so that scan order, and with it the classifier's
/// distance tie-breaking, does not depend on the filesystem.
pub fn scan_directory(dir: impl AsRef<Path>) -> Result<Vec<LabeledPath>> {
    let mut found = Vec::new();
    walk(dir.as_ref(), &mut found)?;
    found.sort_by(|a, b| a.path.cmp(&b.path));
    debug!("found {} image files under {}", found.len(), dir.as_ref().display());
    Ok(found)
}

/// Paths only, in the same order as `scan_directory`.
pub fn scan_paths(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    Ok(scan_directory(dir)?.into_iter().map(|entry| entry.path).collect())
}

/// Shuffles `items` with an RNG seeded from `seed`; the same seed always
/// gives the same order.
pub fn shuffle_seeded<T>(items: &mut [T], seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    items.shuffle(&mut rng);
}

fn walk(dir: &Path, found: &mut Vec<LabeledPath>) -> Result<()> {
    let io_err = |source| CanvasError::Io { path: dir.to_path_buf(), source };

    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let path = entry.path();
        // `metadata` follows symlinks, matching how files are later opened.
        let meta = fs::metadata(&path).map_err(|source| CanvasError::Io {
            path: path.clone(),
            source,
        })?;

        if meta.is_dir() {
            walk(&path, found)?;
        } else if meta.is_file() && has_image_extension(&path) {
            let label = label_from_path(&path);
            if label.is_empty() {
                warn!("{} does not follow <label>_<digits>.ppm; it will carry an empty label", path.display());
            }
            found.push(LabeledPath { path, label });
        }
    }
    Ok(())
}

fn has_image_extension(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(IMAGE_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_nested_images_sorted_and_labeled() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("b/deeper")).unwrap();
        for rel in ["b/deeper/lime_2.ppm", "a_1.ppm", "b/lime_1.ppm", "notes.txt", "odd.ppm"] {
            fs::write(dir.path().join(rel), "P3 1 1 255 0 0 0").unwrap();
        }

        let found = scan_directory(dir.path()).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|e| e.path.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            names,
            vec![
                PathBuf::from("a_1.ppm"),
                PathBuf::from("b/deeper/lime_2.ppm"),
                PathBuf::from("b/lime_1.ppm"),
                PathBuf::from("odd.ppm"),
            ]
        );
        let labels: Vec<_> = found.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["a", "lime", "lime", ""]);
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        assert!(matches!(
            scan_directory("no/such/dir"),
            Err(CanvasError::Io { .. })
        ));
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let mut a: Vec<u32> = (0..20).collect();
        let mut b = a.clone();
        shuffle_seeded(&mut a, 301);
        shuffle_seeded(&mut b, 301);
        assert_eq!(a, b);

        let mut sorted = a.clone();
        sorted.sort();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }
}
