pub mod canvas;
pub mod color;

pub use canvas::{Canvas, MAX_CHANNEL, MAX_DIM};
pub use color::{colors, Rgb};
