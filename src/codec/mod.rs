pub mod png;
pub mod ppm;
pub mod tokens;

pub use png::{encode_png, from_rgb_image, load_png, save_png, to_rgb_image};
pub use ppm::{decode, encode, load, save, FORMAT_TAG};
