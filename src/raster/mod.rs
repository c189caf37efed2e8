//! Line and rectangle drawing. Both are inherent methods on `Canvas`
//! (`draw_line`, `draw_rectangle`) built only on its checked pixel API.

pub mod line;
pub mod rect;
