use crate::canvas::Canvas;
use crate::error::Result;

impl Canvas {
    /// Draws the segment from `(x1, y1)` to `(x2, y2)` with the pen color.
    ///
    /// Both endpoints are checked before anything is drawn. Non-vertical
    /// segments are walked one column at a time from the leftmost endpoint,
    /// with `y` taken from a floating-point slope and rounded to the nearest
    /// row, so steep segments leave gaps between columns.
    pub fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) -> Result<()> {
        self.check_point(x1, y1)?;
        self.check_point(x2, y2)?;

        if x1 == x2 && y1 == y2 {
            return self.draw_pixel(x1, y1);
        }

        if x1 == x2 {
            for y in y1.min(y2)..=y1.max(y2) {
                self.draw_pixel(x1, y)?;
            }
            return Ok(());
        }

        let ((left_x, left_y), (right_x, right_y)) = if x1 < x2 {
            ((x1, y1), (x2, y2))
        } else {
            ((x2, y2), (x1, y1))
        };
        let slope = (right_y - left_y) as f64 / (right_x - left_x) as f64;

        for x in left_x..=right_x {
            let y = left_y as f64 + slope * (x - left_x) as f64;
            self.draw_pixel(x, y.round() as i32)?;
        }
        Ok(())
    }
}
