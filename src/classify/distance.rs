use crate::canvas::{Canvas, Rgb};
use crate::classify::error::{KnnError, KnnResult};

/// Sum of squared channel differences over every visible pixel.
///
/// Both canvases must declare the same width and height. The result is
/// symmetric, never negative, and zero exactly when the visible pixels match.
pub fn distance(a: &Canvas, b: &Canvas) -> KnnResult<f64> {
    if a.width() != b.width() || a.height() != b.height() {
        return Err(KnnError::SizeMismatch {
            expected: (a.width(), a.height()),
            found: (b.width(), b.height()),
        });
    }

    // 800 * 800 * 3 * 255^2 fits comfortably in a u64.
    let total: u64 = a
        .rows()
        .zip(b.rows())
        .flat_map(|(row_a, row_b)| row_a.iter().zip(row_b.iter()))
        .map(|(p, q)| pixel_distance(*p, *q))
        .sum();
    Ok(total as f64)
}

fn pixel_distance(p: Rgb, q: Rgb) -> u64 {
    p.to_array()
        .into_iter()
        .zip(q.to_array())
        .map(|(x, y)| {
            let d = x.abs_diff(y) as u64;
            d * d
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(width: i32, height: i32, color: Rgb) -> Canvas {
        let mut c = Canvas::with_size(width, height).unwrap();
        c.set_pen(color);
        for y in 0..height {
            c.draw_line(0, y, width - 1, y).unwrap();
        }
        c
    }

    #[test]
    fn identical_canvases_are_zero_apart() {
        let c = filled(3, 2, Rgb::new(9, 8, 7));
        assert_eq!(distance(&c, &c).unwrap(), 0.0);
    }

    #[test]
    fn distance_is_symmetric_and_additive_over_channels() {
        let a = filled(2, 2, Rgb::new(0, 0, 0));
        let b = filled(2, 2, Rgb::new(1, 2, 3));
        let per_pixel = (1 + 4 + 9) as f64;
        assert_eq!(distance(&a, &b).unwrap(), 4.0 * per_pixel);
        assert_eq!(distance(&b, &a).unwrap(), distance(&a, &b).unwrap());
    }

    #[test]
    fn size_mismatch_is_an_error() {
        let a = Canvas::with_size(2, 2).unwrap();
        let b = Canvas::with_size(2, 3).unwrap();
        assert!(matches!(
            distance(&a, &b),
            Err(KnnError::SizeMismatch { expected: (2, 2), found: (2, 3) })
        ));
    }
}
