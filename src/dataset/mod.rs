pub mod scan;

pub use scan::{scan_directory, scan_paths, shuffle_seeded, LabeledPath};
