//! Ring (donut) slice geometry and colors.
//!
//! - `radial`  — slice angles, arc paths, midpoints, hit-testing
//! - `palette` — category colors and subcategory shading

pub mod radial;
pub mod palette;
