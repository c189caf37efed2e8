//! Conversion between a `Canvas` and the `image` crate's RGB buffers, so
//! canvases can be written to and read from PNG (or any other format the
//! `image` crate was built with).

use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageOutputFormat, RgbImage};

use crate::canvas::{colors, Canvas, MAX_DIM};
use crate::error::{Axis, CanvasError, Result};

/// Copies the visible area of `canvas` into an `RgbImage`.
pub fn to_rgb_image(canvas: &Canvas) -> Result<RgbImage> {
    if canvas.width() == 0 || canvas.height() == 0 {
        let axis = if canvas.width() == 0 { Axis::Width } else { Axis::Height };
        return Err(CanvasError::Dimension { axis, found: "0".to_owned() });
    }
    Ok(RgbImage::from_fn(canvas.width() as u32, canvas.height() as u32, |x, y| {
        image::Rgb(canvas.pixel(y as usize, x as usize).to_array())
    }))
}

/// Builds a canvas holding the pixels of `image`.
///
/// Fails with `Dimension` if either side exceeds `MAX_DIM`.
pub fn from_rgb_image(image: &RgbImage) -> Result<Canvas> {
    let (width, height) = image.dimensions();
    let width = checked_side(Axis::Width, width)?;
    let height = checked_side(Axis::Height, height)?;

    let mut canvas = Canvas::with_size(width, height)?;
    for (x, y, px) in image.enumerate_pixels() {
        canvas.set_pen(px.0.into());
        canvas.commit_pen(y as usize, x as usize);
    }
    canvas.set_pen(colors::BLACK);
    Ok(canvas)
}

/// Writes `canvas` to `path`; the format follows the file extension.
pub fn save_png(canvas: &Canvas, path: impl AsRef<Path>) -> Result<()> {
    to_rgb_image(canvas)?.save(path.as_ref())?;
    Ok(())
}

/// Encodes `canvas` as PNG bytes in memory.
pub fn encode_png(canvas: &Canvas) -> Result<Vec<u8>> {
    let image = DynamicImage::ImageRgb8(to_rgb_image(canvas)?);
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)?;
    Ok(bytes)
}

/// Opens any raster image the `image` crate understands as a canvas.
pub fn load_png(path: impl AsRef<Path>) -> Result<Canvas> {
    let image = image::open(path.as_ref())?.into_rgb8();
    from_rgb_image(&image)
}

fn checked_side(axis: Axis, side: u32) -> Result<i32> {
    if side as usize > MAX_DIM {
        return Err(CanvasError::Dimension { axis, found: side.to_string() });
    }
    Ok(side as i32)
}
