#![allow(dead_code)]

use std::path::{Path, PathBuf};

use knn_canvas::{codec, Canvas, Rgb};

/// A `w`×`h` canvas filled with one gray level.
pub fn solid(w: i32, h: i32, level: u8) -> Canvas {
    let mut canvas = Canvas::with_size(w, h).unwrap();
    canvas.set_pen(Rgb::new(level, level, level));
    for y in 0..h {
        canvas.draw_line(0, y, w - 1, y).unwrap();
    }
    canvas
}

/// Saves `canvas` as `dir/name` and returns the full path.
pub fn write_ppm(dir: &Path, name: &str, canvas: &Canvas) -> PathBuf {
    let path = dir.join(name);
    codec::save(canvas, &path).unwrap();
    path
}
