use std::fs;
use std::path::Path;

use log::debug;

use crate::canvas::{colors, Canvas, MAX_CHANNEL};
use crate::codec::tokens::Tokens;
use crate::error::{Axis, CanvasError, Channel, Result};

/// Format tag that opens every P3 file.
pub const FORMAT_TAG: &str = "P3";

/// Decodes P3 text into a new canvas.
///
/// Validation is sequential and the first failing stage aborts decoding:
/// tag, width, height, max color, then `height × width` pixel triples in
/// row-major order. Each triple goes through the checked pen setter before it
/// is committed, so channel errors surface as `ColorRange`. Anything after the
/// last pixel is ignored. The returned canvas has a black pen.
pub fn decode(bytes: &[u8]) -> Result<Canvas> {
    let text = String::from_utf8_lossy(bytes);
    let mut tokens = Tokens::new(&text);
    let mut canvas = Canvas::new();

    // ── Tag ──────────────────────────────────────────────────────────────
    match tokens.next_token() {
        Some(FORMAT_TAG) => {}
        other => {
            return Err(CanvasError::Format {
                found: other.unwrap_or("end of input").to_owned(),
            })
        }
    }

    // ── Dimensions ───────────────────────────────────────────────────────
    let width = tokens
        .next_int()
        .map_err(|found| CanvasError::Dimension { axis: Axis::Width, found })?;
    canvas.set_width(width)?;

    let height = tokens
        .next_int()
        .map_err(|found| CanvasError::Dimension { axis: Axis::Height, found })?;
    canvas.set_height(height)?;

    // ── Max color ────────────────────────────────────────────────────────
    let max_color = tokens
        .next_int()
        .map_err(|found| CanvasError::MaxColor { found })?;
    if max_color != MAX_CHANNEL as i32 {
        return Err(CanvasError::MaxColor { found: max_color.to_string() });
    }

    // ── Pixels ───────────────────────────────────────────────────────────
    for row in 0..canvas.height() {
        for col in 0..canvas.width() {
            let [r, g, b] = read_triple(&mut tokens)?;
            canvas.set_pen_color(r, g, b)?;
            canvas.commit_pen(row, col);
        }
    }

    canvas.set_pen(colors::BLACK);
    debug!("decoded {}x{} canvas", canvas.width(), canvas.height());
    Ok(canvas)
}

/// Reads and decodes the P3 file at `path`.
pub fn load(path: impl AsRef<Path>) -> Result<Canvas> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| CanvasError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode(&bytes)
}

/// Encodes the visible area of `canvas` as P3 text.
///
/// Layout: the tag line, `width<TAB>height`, `255`, then one line per row
/// holding that row's `R G B` triples separated by tabs. Fails with
/// `Dimension` when either side is zero.
pub fn encode(canvas: &Canvas) -> Result<String> {
    if canvas.width() == 0 {
        return Err(CanvasError::Dimension { axis: Axis::Width, found: "0".to_owned() });
    }
    if canvas.height() == 0 {
        return Err(CanvasError::Dimension { axis: Axis::Height, found: "0".to_owned() });
    }

    // Worst case "255 255 255\t" per pixel.
    let mut out = String::with_capacity(32 + canvas.width() * canvas.height() * 12);
    out.push_str(FORMAT_TAG);
    out.push('\n');
    out.push_str(&format!("{}\t{}\n", canvas.width(), canvas.height()));
    out.push_str(&format!("{}\n", MAX_CHANNEL));

    for row in canvas.rows() {
        let line = row
            .iter()
            .map(|p| format!("{} {} {}", p.r, p.g, p.b))
            .collect::<Vec<_>>()
            .join("\t");
        out.push_str(&line);
        out.push('\n');
    }
    Ok(out)
}

/// Encodes `canvas` and writes it to `path`.
///
/// Encoding finishes before the file is created, so a zero-sized canvas never
/// leaves a truncated file behind.
pub fn save(canvas: &Canvas, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let text = encode(canvas)?;
    fs::write(path, text).map_err(|source| CanvasError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_triple(tokens: &mut Tokens<'_>) -> Result<[i32; 3]> {
    let mut triple = [0; 3];
    for (slot, channel) in triple.iter_mut().zip(Channel::ALL) {
        *slot = tokens
            .next_int()
            .map_err(|found| CanvasError::ColorRange { channel, found })?;
    }
    Ok(triple)
}

impl Canvas {
    /// Loads a canvas from a P3 file; see [`load`].
    pub fn load(path: impl AsRef<Path>) -> Result<Canvas> {
        load(path)
    }

    /// Saves the canvas as a P3 file; see [`save`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        save(self, path)
    }
}
