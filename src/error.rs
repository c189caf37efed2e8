use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which declared dimension a `Dimension` error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Width,
    Height,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Width => write!(f, "width"),
            Axis::Height => write!(f, "height"),
        }
    }
}

/// One of the three color channels of a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Red => write!(f, "red"),
            Channel::Green => write!(f, "green"),
            Channel::Blue => write!(f, "blue"),
        }
    }
}

/// Errors raised by the canvas, the P3 codec and the rasterizer.
///
/// The `found` fields carry the offending value as text so that missing and
/// non-numeric tokens read by the codec report the same kind as an
/// out-of-range number would.
#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("bad format tag: expected \"P3\", found {found:?}")]
    Format { found: String },

    #[error("{axis} out of bounds: {found} (allowed 0..=800)")]
    Dimension { axis: Axis, found: String },

    #[error("max color value must be 255, found {found:?}")]
    MaxColor { found: String },

    #[error("{channel} channel value invalid: {found} (allowed 0..=255)")]
    ColorRange { channel: Channel, found: String },

    #[error("point ({x}, {y}) out of bounds for a {width}x{height} canvas")]
    PointOutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },

    #[error("image conversion failed: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, CanvasError>;
