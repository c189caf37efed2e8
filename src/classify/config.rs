use serde::{Deserialize, Serialize};

/// How training images are held between queries.
///
/// - `Eager` — decode every image once when the classifier is built.
/// - `Lazy`  — keep only paths and decode each image per query; slower, but
///             memory stays flat regardless of training-set size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadMode {
    #[default]
    Eager,
    Lazy,
}

/// Classifier settings that can be stored next to a dataset as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnnConfig {
    /// Number of nearest neighbors that vote.
    #[serde(default = "default_k")]
    pub k: usize,
    #[serde(default)]
    pub load_mode: LoadMode,
}

fn default_k() -> usize {
    3
}

impl Default for KnnConfig {
    fn default() -> Self {
        KnnConfig { k: default_k(), load_mode: LoadMode::default() }
    }
}

impl KnnConfig {
    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }

    /// Deserializes a config from a JSON file; missing fields take defaults.
    pub fn load_json(path: &str) -> std::io::Result<KnnConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg: KnnConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, KnnConfig::default());
        assert_eq!(cfg.k, 3);

        let cfg: KnnConfig = serde_json::from_str(r#"{"k": 5, "load_mode": "lazy"}"#).unwrap();
        assert_eq!(cfg.k, 5);
        assert_eq!(cfg.load_mode, LoadMode::Lazy);
    }

    #[test]
    fn json_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("knn.json");
        let path = path.to_str().unwrap();

        let cfg = KnnConfig { k: 7, load_mode: LoadMode::Lazy };
        cfg.save_json(path).unwrap();
        assert_eq!(KnnConfig::load_json(path).unwrap(), cfg);
    }
}
