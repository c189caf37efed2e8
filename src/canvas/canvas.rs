use crate::canvas::color::{colors, Rgb};
use crate::error::{Axis, CanvasError, Channel, Result};

/// Largest width or height a canvas may declare.
pub const MAX_DIM: usize = 800;

/// The only max-channel value the P3 format accepts.
pub const MAX_CHANNEL: u8 = 255;

/// RGB pixel grid with a pen color and a declared logical size.
///
/// Storage is a row-major grid that only ever grows, up to `MAX_DIM` in each
/// axis. Shrinking the declared size keeps the pixels outside the new bounds;
/// they are unreachable through the checked API and reappear if the size is
/// grown back. Cells that were never allocated read as white.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    pen: Rgb,
    // Allocated columns per row and allocated rows. Always >= width/height.
    stride: usize,
    rows: usize,
    data: Vec<Rgb>,
}

impl Canvas {
    /// Creates an empty 0×0 canvas with a black pen.
    pub fn new() -> Self {
        Canvas {
            width: 0,
            height: 0,
            pen: colors::BLACK,
            stride: 0,
            rows: 0,
            data: Vec::new(),
        }
    }

    /// Creates an all-white canvas of the given size through the checked setters.
    pub fn with_size(width: i32, height: i32) -> Result<Self> {
        let mut canvas = Canvas::new();
        canvas.set_width(width)?;
        canvas.set_height(height)?;
        Ok(canvas)
    }

    // -----------------------------------------------------------------------
    // Size
    // -----------------------------------------------------------------------

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Sets the declared width. Fails if `width` is negative or above `MAX_DIM`.
    pub fn set_width(&mut self, width: i32) -> Result<()> {
        let width = checked_dim(Axis::Width, width)?;
        self.reserve(width, self.rows);
        self.width = width;
        Ok(())
    }

    /// Sets the declared height. Fails if `height` is negative or above `MAX_DIM`.
    pub fn set_height(&mut self, height: i32) -> Result<()> {
        let height = checked_dim(Axis::Height, height)?;
        self.reserve(self.stride, height);
        self.height = height;
        Ok(())
    }

    /// Whether `(x, y)` lies inside the declared `width × height` area.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Fails with `PointOutOfBounds` unless `(x, y)` is inside the canvas.
    pub fn check_point(&self, x: i32, y: i32) -> Result<()> {
        if self.contains(x, y) {
            Ok(())
        } else {
            Err(CanvasError::PointOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }

    // -----------------------------------------------------------------------
    // Pen
    // -----------------------------------------------------------------------

    pub fn pen(&self) -> Rgb {
        self.pen
    }

    pub fn pen_red(&self) -> u8 {
        self.pen.r
    }

    pub fn pen_green(&self) -> u8 {
        self.pen.g
    }

    pub fn pen_blue(&self) -> u8 {
        self.pen.b
    }

    pub fn set_pen_red(&mut self, value: i32) -> Result<()> {
        self.pen.r = checked_channel(Channel::Red, value)?;
        Ok(())
    }

    pub fn set_pen_green(&mut self, value: i32) -> Result<()> {
        self.pen.g = checked_channel(Channel::Green, value)?;
        Ok(())
    }

    pub fn set_pen_blue(&mut self, value: i32) -> Result<()> {
        self.pen.b = checked_channel(Channel::Blue, value)?;
        Ok(())
    }

    /// Sets all three pen channels. Nothing is committed unless every channel
    /// is in range; the first invalid channel (red, green, blue order) is
    /// reported.
    pub fn set_pen_color(&mut self, red: i32, green: i32, blue: i32) -> Result<()> {
        let r = checked_channel(Channel::Red, red)?;
        let g = checked_channel(Channel::Green, green)?;
        let b = checked_channel(Channel::Blue, blue)?;
        self.pen = Rgb { r, g, b };
        Ok(())
    }

    /// Sets the pen from an already valid color.
    pub fn set_pen(&mut self, color: Rgb) {
        self.pen = color;
    }

    // -----------------------------------------------------------------------
    // Pixels
    // -----------------------------------------------------------------------

    /// Writes the pen color at column `x`, row `y`.
    pub fn draw_pixel(&mut self, x: i32, y: i32) -> Result<()> {
        self.check_point(x, y)?;
        self.commit_pen(y as usize, x as usize);
        Ok(())
    }

    /// Unchecked read of the pixel at (`row`, `col`).
    ///
    /// Unlike `draw_pixel` this does not look at the declared size: it reads
    /// whatever the grid retains, and anything never allocated is white.
    pub fn pixel(&self, row: usize, col: usize) -> Rgb {
        if row < self.rows && col < self.stride {
            self.data[row * self.stride + col]
        } else {
            colors::WHITE
        }
    }

    /// Unchecked read of one channel; see [`Canvas::pixel`].
    pub fn channel(&self, row: usize, col: usize, channel: Channel) -> u8 {
        self.pixel(row, col).get(channel)
    }

    /// Iterates the visible rows, each as a slice of `width` pixels.
    pub fn rows(&self) -> impl Iterator<Item = &[Rgb]> + '_ {
        (0..self.height).map(move |row| {
            let start = row * self.stride;
            &self.data[start..start + self.width]
        })
    }

    /// Stores the pen at (`row`, `col`). Callers guarantee the cell is inside
    /// the declared area, which is always allocated.
    pub(crate) fn commit_pen(&mut self, row: usize, col: usize) {
        let index = row * self.stride + col;
        self.data[index] = self.pen;
    }

    /// Grows storage to at least `cols × rows`, keeping every retained pixel
    /// at its (row, col) position and filling new cells with white.
    fn reserve(&mut self, cols: usize, rows: usize) {
        let new_stride = self.stride.max(cols);
        let new_rows = self.rows.max(rows);
        if new_stride == self.stride && new_rows == self.rows {
            return;
        }

        let mut data = vec![colors::WHITE; new_stride * new_rows];
        for row in 0..self.rows {
            let old = &self.data[row * self.stride..(row + 1) * self.stride];
            data[row * new_stride..row * new_stride + self.stride].copy_from_slice(old);
        }

        self.stride = new_stride;
        self.rows = new_rows;
        self.data = data;
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Canvas::new()
    }
}

/// Two canvases are equal when they declare the same size and every visible
/// pixel matches. Pen state and retained off-canvas pixels are ignored.
impl PartialEq for Canvas {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.rows().zip(other.rows()).all(|(a, b)| a == b)
    }
}

impl Eq for Canvas {}

fn checked_dim(axis: Axis, value: i32) -> Result<usize> {
    if value < 0 || value as usize > MAX_DIM {
        return Err(CanvasError::Dimension {
            axis,
            found: value.to_string(),
        });
    }
    Ok(value as usize)
}

fn checked_channel(channel: Channel, value: i32) -> Result<u8> {
    u8::try_from(value).map_err(|_| CanvasError::ColorRange {
        channel,
        found: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_canvas_is_empty_white_with_black_pen() {
        let c = Canvas::new();
        assert_eq!(c.width(), 0);
        assert_eq!(c.height(), 0);
        assert_eq!(c.pen(), colors::BLACK);
        assert_eq!(c.pixel(0, 0), colors::WHITE);
        assert_eq!(c.pixel(799, 799), colors::WHITE);
    }

    #[test]
    fn dimension_setters_reject_out_of_range() {
        let mut c = Canvas::new();
        assert!(matches!(
            c.set_width(-1),
            Err(CanvasError::Dimension { axis: Axis::Width, .. })
        ));
        assert!(matches!(
            c.set_height(801),
            Err(CanvasError::Dimension { axis: Axis::Height, .. })
        ));
        c.set_width(800).unwrap();
        c.set_height(0).unwrap();
        assert_eq!(c.width(), 800);
        assert_eq!(c.height(), 0);
    }

    #[test]
    fn pen_channels_are_validated_independently() {
        let mut c = Canvas::new();
        c.set_pen_red(10).unwrap();
        assert!(matches!(
            c.set_pen_green(256),
            Err(CanvasError::ColorRange { channel: Channel::Green, .. })
        ));
        assert!(matches!(
            c.set_pen_blue(-3),
            Err(CanvasError::ColorRange { channel: Channel::Blue, .. })
        ));
        assert_eq!(c.pen(), Rgb::new(10, 0, 0));
    }

    #[test]
    fn set_pen_color_is_all_or_nothing() {
        let mut c = Canvas::new();
        c.set_pen_color(1, 2, 3).unwrap();
        assert!(c.set_pen_color(9, 9, 300).is_err());
        assert_eq!(c.pen(), Rgb::new(1, 2, 3));
    }

    #[test]
    fn draw_pixel_sets_exactly_one_cell() {
        let mut c = Canvas::with_size(3, 2).unwrap();
        c.set_pen_color(1, 2, 3).unwrap();
        c.draw_pixel(2, 1).unwrap();
        for row in 0..2 {
            for col in 0..3 {
                let expected = if (row, col) == (1, 2) { Rgb::new(1, 2, 3) } else { colors::WHITE };
                assert_eq!(c.pixel(row, col), expected);
            }
        }
    }

    #[test]
    fn draw_pixel_rejects_points_outside_declared_area() {
        let mut c = Canvas::with_size(3, 2).unwrap();
        for (x, y) in [(-1, 0), (0, -1), (3, 0), (0, 2), (3, 2)] {
            assert!(matches!(
                c.draw_pixel(x, y),
                Err(CanvasError::PointOutOfBounds { .. })
            ));
        }
    }

    #[test]
    fn shrinking_keeps_pixels_for_later_regrowth() {
        let mut c = Canvas::with_size(4, 4).unwrap();
        c.set_pen_color(7, 7, 7).unwrap();
        c.draw_pixel(3, 3).unwrap();

        c.set_width(2).unwrap();
        c.set_height(2).unwrap();
        assert!(c.draw_pixel(3, 3).is_err());
        assert_eq!(c.pixel(3, 3), Rgb::new(7, 7, 7));

        c.set_width(10).unwrap();
        c.set_height(10).unwrap();
        assert_eq!(c.pixel(3, 3), Rgb::new(7, 7, 7));
        assert_eq!(c.pixel(9, 9), colors::WHITE);
    }

    #[test]
    fn equality_ignores_pen_and_hidden_pixels() {
        let mut a = Canvas::with_size(2, 2).unwrap();
        let mut b = Canvas::with_size(3, 3).unwrap();
        b.set_pen_color(0, 0, 0).unwrap();
        b.draw_pixel(2, 2).unwrap();
        b.set_width(2).unwrap();
        b.set_height(2).unwrap();
        a.set_pen_color(5, 5, 5).unwrap();
        assert_eq!(a, b);

        a.draw_pixel(0, 0).unwrap();
        assert_ne!(a, b);
    }
}
