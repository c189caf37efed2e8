pub mod info;
pub mod predict;
pub mod preview;
