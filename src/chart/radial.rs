//! Radial layout: an ordered list of values → one ring of annulus slices.
//!
//! Angles are in degrees, in screen coordinates (y down), increasing
//! clockwise, with 0° at 3 o'clock. The default start angle of −90° puts
//! the first slice boundary at 12 o'clock. Display order is input order —
//! slices are never sorted by magnitude.

use eframe::egui::{pos2, Color32, Pos2};

/// Slices below this share of the ring total get no percentage label.
pub const PERCENT_LABEL_MIN_FRACTION: f32 = 0.04;

/// Horizontal rail assignment for a slice's off-chart label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Side of the chart a mid-angle faces: `Right` iff `cos(mid) ≥ 0`.
    ///
    /// Decided on the angle itself (normalized to `[−180°, 180°)`) so the
    /// `cos = 0` boundary is deterministic: ±90° classify right.
    pub fn of_mid_angle(mid_deg: f32) -> Self {
        let a = (mid_deg + 180.0).rem_euclid(360.0) - 180.0;
        if (-90.0..=90.0).contains(&a) {
            Side::Right
        } else {
            Side::Left
        }
    }
}

/// One input item for a ring, in display order.
#[derive(Debug, Clone)]
pub struct RingItem {
    pub label: String,
    pub value: f64,
    pub color: Color32,
}

/// Placement of a ring on screen.
#[derive(Debug, Clone, Copy)]
pub struct RingGeometry {
    pub center: Pos2,
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub start_angle_deg: f32,
}

impl RingGeometry {
    pub fn new(center: Pos2, inner_radius: f32, outer_radius: f32) -> Self {
        Self {
            center,
            inner_radius,
            outer_radius,
            start_angle_deg: -90.0,
        }
    }

    /// Point at `angle_deg` on a circle of `radius` around the center.
    pub fn point_at(&self, angle_deg: f32, radius: f32) -> Pos2 {
        let rad = angle_deg.to_radians();
        pos2(
            self.center.x + radius * rad.cos(),
            self.center.y + radius * rad.sin(),
        )
    }

    fn mid_radius(&self) -> f32 {
        (self.inner_radius + self.outer_radius) * 0.5
    }
}

/// One computed slice of a ring.
#[derive(Debug, Clone)]
pub struct Slice {
    pub label: String,
    pub value: f64,
    pub fraction: f32,
    pub color: Color32,
    pub start_deg: f32,
    pub end_deg: f32,
    pub mid_deg: f32,
    /// Midpoint of the slice's annulus band, in screen space.
    pub mid: Pos2,
    pub side: Side,
}

impl Slice {
    pub fn sweep_deg(&self) -> f32 {
        self.end_deg - self.start_deg
    }

    /// Whether the slice is big enough to carry an on-chart percent label.
    pub fn shows_percent_label(&self) -> bool {
        self.fraction >= PERCENT_LABEL_MIN_FRACTION
    }
}

/// Lay out one ring: a single pass over `items` with a cumulative angle
/// cursor. Each item's sweep is `360° · value / total`, where negative
/// values count as zero and the total is floored at 1 so an all-zero ring
/// degenerates to zero-sweep slices instead of dividing by zero.
pub fn layout_ring(items: &[RingItem], geo: &RingGeometry) -> Vec<Slice> {
    let total: f64 = items
        .iter()
        .map(|it| it.value.max(0.0))
        .sum::<f64>()
        .max(1.0);

    let mut cursor = geo.start_angle_deg;
    items
        .iter()
        .map(|it| {
            let fraction = (it.value.max(0.0) / total) as f32;
            let sweep = 360.0 * fraction;
            let start_deg = cursor;
            let end_deg = cursor + sweep;
            let mid_deg = (start_deg + end_deg) * 0.5;
            cursor = end_deg;
            Slice {
                label: it.label.clone(),
                value: it.value,
                fraction,
                color: it.color,
                start_deg,
                end_deg,
                mid_deg,
                mid: geo.point_at(mid_deg, geo.mid_radius()),
                side: Side::of_mid_angle(mid_deg),
            }
        })
        .collect()
}

// ─── Arc geometry ─────────────────────────────────────────────────────────────

/// The four corner points of an annulus segment plus its arc flags.
///
/// The segment is bounded by two arcs (outer and inner radius, both drawn
/// in the increasing-angle direction) joined by two radial lines. This is
/// the resolution-independent description; [`annulus_points`] tessellates
/// it for the egui painter.
#[derive(Debug, Clone, Copy)]
pub struct ArcPath {
    pub outer_start: Pos2,
    pub outer_end: Pos2,
    pub inner_end: Pos2,
    pub inner_start: Pos2,
    /// True exactly when the sweep exceeds 180°.
    pub large_arc: bool,
}

pub fn arc_path(geo: &RingGeometry, start_deg: f32, end_deg: f32) -> ArcPath {
    ArcPath {
        outer_start: geo.point_at(start_deg, geo.outer_radius),
        outer_end: geo.point_at(end_deg, geo.outer_radius),
        inner_end: geo.point_at(end_deg, geo.inner_radius),
        inner_start: geo.point_at(start_deg, geo.inner_radius),
        large_arc: end_deg - start_deg > 180.0,
    }
}

/// Closed polygon approximating an annulus segment: the outer arc walked
/// in increasing angle, then the inner arc walked back. `max_step_deg`
/// bounds the tessellation error.
pub fn annulus_points(
    geo: &RingGeometry,
    start_deg: f32,
    end_deg: f32,
    max_step_deg: f32,
) -> Vec<Pos2> {
    let sweep = (end_deg - start_deg).max(0.0);
    let steps = (sweep / max_step_deg.max(0.1)).ceil().max(1.0) as usize;

    let mut points = Vec::with_capacity(2 * (steps + 1));
    for i in 0..=steps {
        let a = start_deg + sweep * i as f32 / steps as f32;
        points.push(geo.point_at(a, geo.outer_radius));
    }
    for i in (0..=steps).rev() {
        let a = start_deg + sweep * i as f32 / steps as f32;
        points.push(geo.point_at(a, geo.inner_radius));
    }
    points
}

// ─── Hit testing ──────────────────────────────────────────────────────────────

/// The slice under a pointer position, if the pointer is inside the ring's
/// annulus band. Used for hover and click on the chart surface.
pub fn slice_at<'a>(geo: &RingGeometry, slices: &'a [Slice], pos: Pos2) -> Option<&'a Slice> {
    let dx = pos.x - geo.center.x;
    let dy = pos.y - geo.center.y;
    let dist = (dx * dx + dy * dy).sqrt();
    if dist < geo.inner_radius || dist > geo.outer_radius {
        return None;
    }

    // Pointer angle as an offset from the ring's start angle, in [0, 360).
    let angle = dy.atan2(dx).to_degrees();
    let rel = (angle - geo.start_angle_deg).rem_euclid(360.0);

    slices.iter().find(|s| {
        let lo = s.start_deg - geo.start_angle_deg;
        let hi = s.end_deg - geo.start_angle_deg;
        rel >= lo && rel < hi
    })
}
