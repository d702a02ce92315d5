//! Two-phase label-rail routing.
//!
//! Phase 1 needs only slice geometry: partition slices into a left and a
//! right rail by their mid-angle side and fix each rail's top-to-bottom
//! display order. Phase 2 needs the rendered label boxes (known only after
//! the widget layer places them) and produces one 3-point connector per
//! measured label: anchor on the box's chart-facing edge, a short
//! horizontal elbow, then the slice midpoint. A label without a measured
//! box (mid-transition) is skipped, never an error.

use std::collections::HashMap;

use eframe::egui::{pos2, Pos2, Rect};
use log::debug;

use crate::chart::radial::{Side, Slice};

/// Horizontal distance from the label anchor to the elbow, toward the
/// chart. The elbow keeps connectors from cutting across neighbor labels.
pub const ELBOW_OFFSET: f32 = 16.0;

/// Display order for the two rails: indices into the slice list, each rail
/// sorted top-to-bottom by slice midpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RailPlan {
    pub left: Vec<usize>,
    pub right: Vec<usize>,
}

/// Phase 1: assign each slice to a rail and order the rails by midpoint y.
/// Pure geometry — no measurements involved.
pub fn plan_rails(slices: &[Slice]) -> RailPlan {
    let mut plan = RailPlan::default();
    for (i, s) in slices.iter().enumerate() {
        match s.side {
            Side::Left => plan.left.push(i),
            Side::Right => plan.right.push(i),
        }
    }
    let by_mid_y = |a: &usize, b: &usize| {
        slices[*a]
            .mid
            .y
            .partial_cmp(&slices[*b].mid.y)
            .unwrap_or(std::cmp::Ordering::Equal)
    };
    plan.left.sort_by(by_mid_y);
    plan.right.sort_by(by_mid_y);
    plan
}

/// Routed polyline from a rail label to its slice: anchor → elbow → target.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectorLine {
    pub label: String,
    pub anchor: Pos2,
    pub elbow: Pos2,
    pub target: Pos2,
}

/// Phase 2: one connector per slice whose label box was measured, all in
/// the shared screen space. The anchor sits on the box edge facing the
/// chart at vertical center; the elbow is [`ELBOW_OFFSET`] px toward the
/// chart; the target is the slice midpoint.
pub fn route_connectors(
    slices: &[Slice],
    measured: &HashMap<String, Rect>,
) -> Vec<ConnectorLine> {
    slices
        .iter()
        .filter_map(|slice| {
            let rect = match measured.get(&slice.label) {
                Some(r) => *r,
                None => {
                    debug!("no measurement for label '{}', skipping", slice.label);
                    return None;
                }
            };
            let (anchor, elbow) = match slice.side {
                // Right rail: the chart is to the label's left.
                Side::Right => {
                    let anchor = pos2(rect.min.x, rect.center().y);
                    (anchor, pos2(anchor.x - ELBOW_OFFSET, anchor.y))
                }
                Side::Left => {
                    let anchor = pos2(rect.max.x, rect.center().y);
                    (anchor, pos2(anchor.x + ELBOW_OFFSET, anchor.y))
                }
            };
            Some(ConnectorLine {
                label: slice.label.clone(),
                anchor,
                elbow,
                target: slice.mid,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::radial::{layout_ring, RingGeometry, RingItem};
    use eframe::egui::{vec2, Color32};

    fn ring(values: &[f64]) -> (RingGeometry, Vec<Slice>) {
        let items: Vec<RingItem> = values
            .iter()
            .enumerate()
            .map(|(i, &v)| RingItem {
                label: format!("s{}", i),
                value: v,
                color: Color32::GRAY,
            })
            .collect();
        let geo = RingGeometry::new(pos2(300.0, 300.0), 60.0, 120.0);
        let slices = layout_ring(&items, &geo);
        (geo, slices)
    }

    #[test]
    fn rails_partition_and_sort_by_mid_y() {
        // Four equal slices from −90°: mids at −45°, 45°, 135°, 225°.
        let (_, slices) = ring(&[1.0, 1.0, 1.0, 1.0]);
        let plan = plan_rails(&slices);
        assert_eq!(plan.right, vec![0, 1]); // −45° above 45°
        assert_eq!(plan.left, vec![3, 2]); // 225° above 135°
        for rail in [&plan.left, &plan.right] {
            for pair in rail.windows(2) {
                assert!(slices[pair[0]].mid.y <= slices[pair[1]].mid.y);
            }
        }
    }

    #[test]
    fn right_label_anchors_on_its_left_edge() {
        let (_, slices) = ring(&[1.0]); // single slice, mid 90°, Right rail
        let mut measured = HashMap::new();
        let rect = Rect::from_min_size(pos2(500.0, 290.0), vec2(90.0, 20.0));
        measured.insert("s0".to_string(), rect);

        let lines = route_connectors(&slices, &measured);
        assert_eq!(lines.len(), 1);
        let c = &lines[0];
        assert_eq!(c.anchor, pos2(500.0, 300.0));
        assert_eq!(c.elbow, pos2(500.0 - ELBOW_OFFSET, 300.0));
        assert_eq!(c.target, slices[0].mid);
    }

    #[test]
    fn left_label_anchors_on_its_right_edge() {
        let (_, slices) = ring(&[1.0, 1.0]); // slice 1 mid 180° → Left
        let mut measured = HashMap::new();
        measured.insert(
            "s1".to_string(),
            Rect::from_min_size(pos2(20.0, 290.0), vec2(90.0, 20.0)),
        );

        let lines = route_connectors(&slices, &measured);
        assert_eq!(lines.len(), 1);
        let c = &lines[0];
        assert_eq!(c.anchor, pos2(110.0, 300.0));
        assert_eq!(c.elbow, pos2(110.0 + ELBOW_OFFSET, 300.0));
    }

    #[test]
    fn unmeasured_labels_are_skipped() {
        let (_, slices) = ring(&[1.0, 1.0, 1.0]);
        let mut measured = HashMap::new();
        measured.insert(
            "s1".to_string(),
            Rect::from_min_size(pos2(0.0, 0.0), vec2(50.0, 16.0)),
        );
        let lines = route_connectors(&slices, &measured);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].label, "s1");
    }
}
