pub mod canvas;
pub mod classify;
pub mod codec;
pub mod dataset;
pub mod error;
pub mod raster;

// Convenience re-exports
pub use canvas::{colors, Canvas, Rgb, MAX_CHANNEL, MAX_DIM};
pub use classify::{
    distance, label_from_path, EvalReport, KnnClassifier, KnnConfig, KnnError, LoadMode,
    Prediction, TrainingSample,
};
pub use codec::{decode, encode, FORMAT_TAG};
pub use dataset::{scan_directory, LabeledPath};
pub use error::{Axis, CanvasError, Channel};
