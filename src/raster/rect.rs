use crate::canvas::Canvas;
use crate::error::Result;

impl Canvas {
    /// Outlines the axis-aligned rectangle whose diagonal runs from
    /// `(x1, y1)` to `(x2, y2)`. Equal corners draw a single point.
    pub fn draw_rectangle(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) -> Result<()> {
        self.check_point(x1, y1)?;
        self.check_point(x2, y2)?;

        // Corners in drawing order: start, across, opposite, down.
        let corners = [(x1, y1), (x2, y1), (x2, y2), (x1, y2)];
        for i in 0..corners.len() {
            let (ax, ay) = corners[i];
            let (bx, by) = corners[(i + 1) % corners.len()];
            self.draw_line(ax, ay, bx, by)?;
        }
        Ok(())
    }
}
