use std::borrow::Cow;
use std::path::{Path, PathBuf};

use crate::canvas::Canvas;
use crate::codec;
use crate::error::Result;

/// Where a training sample's pixels live.
#[derive(Debug, Clone)]
pub enum SampleImage {
    /// Decoded once, kept in memory.
    Loaded(Canvas),
    /// Re-read from `TrainingSample::path` on every access.
    Deferred,
}

/// One labeled training image.
#[derive(Debug, Clone)]
pub struct TrainingSample {
    label: String,
    path: PathBuf,
    image: SampleImage,
}

impl TrainingSample {
    /// Decodes `path` immediately.
    pub fn load(path: impl Into<PathBuf>, label: impl Into<String>) -> Result<Self> {
        let path = path.into();
        let canvas = codec::load(&path)?;
        Ok(TrainingSample { label: label.into(), path, image: SampleImage::Loaded(canvas) })
    }

    /// Records `path` and decodes it each time the pixels are needed.
    pub fn deferred(path: impl Into<PathBuf>, label: impl Into<String>) -> Self {
        TrainingSample { label: label.into(), path: path.into(), image: SampleImage::Deferred }
    }

    /// Wraps an in-memory canvas that has no backing file.
    pub fn from_canvas(label: impl Into<String>, canvas: Canvas) -> Self {
        TrainingSample { label: label.into(), path: PathBuf::new(), image: SampleImage::Loaded(canvas) }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.image, SampleImage::Loaded(_))
    }

    /// Borrows the loaded canvas or decodes a fresh copy from disk.
    pub fn canvas(&self) -> Result<Cow<'_, Canvas>> {
        match &self.image {
            SampleImage::Loaded(canvas) => Ok(Cow::Borrowed(canvas)),
            SampleImage::Deferred => codec::load(&self.path).map(Cow::Owned),
        }
    }
}
