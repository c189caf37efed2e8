pub mod config;
pub mod distance;
pub mod error;
pub mod knn;
pub mod label;
pub mod report;
pub mod sample;

pub use config::{KnnConfig, LoadMode};
pub use distance::distance;
pub use error::{KnnError, KnnResult};
pub use knn::{KnnClassifier, Neighbor, Prediction};
pub use label::label_from_path;
pub use report::{EvalReport, Outcome};
pub use sample::{SampleImage, TrainingSample};
