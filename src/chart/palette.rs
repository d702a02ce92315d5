//! Category colors.
//!
//! Top-level categories cycle through a fixed palette; subcategory slices
//! reuse the parent color lightened progressively so the inner ring reads
//! as shades of its category.

use eframe::egui::Color32;

const PALETTE: &[Color32] = &[
    Color32::from_rgb(66, 133, 244),
    Color32::from_rgb(219, 68, 55),
    Color32::from_rgb(244, 180, 0),
    Color32::from_rgb(15, 157, 88),
    Color32::from_rgb(171, 71, 188),
    Color32::from_rgb(0, 172, 193),
    Color32::from_rgb(255, 112, 67),
    Color32::from_rgb(158, 157, 36),
    Color32::from_rgb(92, 107, 192),
    Color32::from_rgb(240, 98, 146),
    Color32::from_rgb(0, 137, 123),
    Color32::from_rgb(121, 85, 72),
];

/// Color for the `index`-th top-level category.
pub fn category_color(index: usize) -> Color32 {
    PALETTE[index % PALETTE.len()]
}

/// Shade `index` of `count` for subcategories of a `base`-colored parent:
/// linear blend toward white, keeping the first shade close to the parent.
pub fn shade(base: Color32, index: usize, count: usize) -> Color32 {
    if count <= 1 {
        return base;
    }
    // Up to 60% toward white for the last sibling.
    let t = 0.6 * index as f32 / (count - 1) as f32;
    let lerp = |c: u8| (c as f32 + (255.0 - c as f32) * t).round() as u8;
    Color32::from_rgb(lerp(base.r()), lerp(base.g()), lerp(base.b()))
}
