//! Ring and rail rendering for `TaxApp`.
//!
//! A ring view is three columns: the left label rail, the donut chart,
//! and the right label rail. Slice geometry is recomputed every frame
//! (it is cheap and pure); connector routing goes through the ring's
//! `RailState` so it only re-runs when the slice set, the viewport, or
//! the measured label boxes actually changed.

use eframe::egui;

use taxrings::chart::palette;
use taxrings::chart::radial::{
    annulus_points, layout_ring, slice_at, RingGeometry, RingItem, Slice,
};
use taxrings::engine::allocation::{allocate, Allocation};
use taxrings::rail::router::plan_rails;
use taxrings::state::drill::DrillLevel;

use super::{format_dollars, RingView, TaxApp};

/// Width reserved for each label rail.
const RAIL_WIDTH: f32 = 200.0;
/// Gap between a rail and the chart.
const RAIL_GAP: f32 = 12.0;
const CHART_MIN: f32 = 220.0;
const CHART_MAX: f32 = 380.0;
/// Tessellation step for annulus segments, degrees per quad.
const ARC_STEP_DEG: f32 = 3.0;
/// Estimated rail row height, used to vertically center the columns.
const RAIL_ROW_HEIGHT: f32 = 22.0;

/// Interaction hooks surfaced by a ring view, keyed by label string.
/// Hover is handled inside the view (it only moves the highlight).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RingEvent {
    SliceClicked(String),
    LabelClicked(String),
}

impl TaxApp {
    /// Render the allocation ring(s) for the current drill state.
    pub fn draw_rings(&mut self, ui: &mut egui::Ui) {
        let tax = self.dataset.schedule.compute_tax(self.drill.income());
        let categories = allocate(&self.top_nodes, tax);

        let items: Vec<RingItem> = categories
            .iter()
            .enumerate()
            .map(|(i, a)| RingItem {
                label: a.label.clone(),
                value: a.dollars,
                color: palette::category_color(i),
            })
            .collect();

        let selected_label = self
            .drill
            .selected_category()
            .and_then(|id| self.dataset.tree.by_id(id))
            .map(|c| c.node.label.clone());

        ui.heading("Where your tax goes");
        let center = format!("${}", format_dollars(tax));
        let events = ring_view(
            ui,
            &items,
            selected_label.as_deref(),
            Some(&center),
            &mut self.category_ring,
        );
        for event in events {
            let (RingEvent::SliceClicked(label) | RingEvent::LabelClicked(label)) = event;
            if let Some(id) = self.dataset.tree.by_label(&label).map(|c| c.id) {
                self.drill.select_category(id);
            }
        }

        if self.drill.view() == DrillLevel::Subcategories {
            self.draw_subcategory_ring(ui, &categories);
        }
    }

    fn draw_subcategory_ring(
        &mut self,
        ui: &mut egui::Ui,
        categories: &[Allocation],
    ) {
        let (label, citation, children, index) = {
            let id = match self.drill.selected_category() {
                Some(id) => id,
                None => return,
            };
            let index = match self.dataset.tree.categories.iter().position(|c| c.id == id) {
                Some(i) => i,
                None => return,
            };
            let cat = &self.dataset.tree.categories[index];
            (
                cat.node.label.clone(),
                cat.citation,
                cat.node.children.clone(),
                index,
            )
        };
        let dollars = match categories.iter().find(|a| a.label == label) {
            Some(a) => a.dollars,
            None => return,
        };

        let sub_alloc = allocate(&children, dollars);
        let base = palette::category_color(index);
        let items: Vec<RingItem> = sub_alloc
            .iter()
            .enumerate()
            .map(|(i, a)| RingItem {
                label: a.label.clone(),
                value: a.dollars,
                color: palette::shade(base, i, sub_alloc.len()),
            })
            .collect();

        ui.add_space(12.0);
        ui.heading(format!("{} — ${}", label, format_dollars(dollars)));
        ui.label(egui::RichText::new(citation).weak().small());

        let center = format!("${}", format_dollars(dollars));
        let events = ring_view(
            ui,
            &items,
            self.drill.selected_subcategory(),
            Some(&center),
            &mut self.subcategory_ring,
        );
        for event in events {
            let (RingEvent::SliceClicked(label) | RingEvent::LabelClicked(label)) = event;
            self.drill.select_subcategory(&label);
        }

        // Footer for the selected subcategory, with the cost split when
        // the dataset has one for that leaf.
        if let Some(sub) = self.drill.selected_subcategory() {
            if let Some(a) = sub_alloc.iter().find(|a| a.label == sub) {
                let mut line = format!(
                    "{}: ${} ({:.1}% of {})",
                    a.label,
                    format_dollars(a.dollars),
                    a.fraction * 100.0,
                    label
                );
                if let Some(split) = self.dataset.cost_splits.get(sub) {
                    line.push_str(&format!(
                        "  \u{2022}  \u{2248}{:.0}% personnel / {:.0}% other",
                        split.personnel * 100.0,
                        split.other * 100.0
                    ));
                }
                ui.add_space(4.0);
                ui.label(line);
            }
        }
    }
}

// ─── Ring view ────────────────────────────────────────────────────────────────

/// Draw one ring with its two label rails and routed connectors.
/// Returns click events; hover moves the ring's highlight in place.
pub fn ring_view(
    ui: &mut egui::Ui,
    items: &[RingItem],
    selected: Option<&str>,
    center_text: Option<&str>,
    ring: &mut RingView,
) -> Vec<RingEvent> {
    let mut events = Vec::new();
    let mut hovered: Option<String> = None;

    let chart_side =
        (ui.available_width() - 2.0 * (RAIL_WIDTH + RAIL_GAP)).clamp(CHART_MIN, CHART_MAX);

    // Rail order only depends on slice angles, so a provisional geometry
    // (placed anywhere) fixes it before the chart rect is known.
    let provisional = RingGeometry::new(egui::pos2(0.0, 0.0), 1.0, 2.0);
    let plan = plan_rails(&layout_ring(items, &provisional));

    let mut slices: Vec<Slice> = Vec::new();
    ui.horizontal(|ui| {
        ui.allocate_ui_with_layout(
            egui::vec2(RAIL_WIDTH, chart_side),
            egui::Layout::top_down(egui::Align::Max),
            |ui| {
                rail_column(ui, items, &plan.left, selected, chart_side, ring, &mut hovered, &mut events);
            },
        );
        ui.add_space(RAIL_GAP);

        let (response, painter) = ui.allocate_painter(
            egui::vec2(chart_side, chart_side),
            egui::Sense::click().union(egui::Sense::hover()),
        );
        let geo = RingGeometry::new(
            response.rect.center(),
            chart_side * 0.22,
            chart_side * 0.46,
        );
        slices = layout_ring(items, &geo);

        let hover_slice = response
            .hover_pos()
            .and_then(|pos| slice_at(&geo, &slices, pos))
            .map(|s| s.label.clone());
        if let Some(ref label) = hover_slice {
            hovered = Some(label.clone());
        }
        if response.clicked() {
            if let Some(label) = response
                .interact_pointer_pos()
                .and_then(|pos| slice_at(&geo, &slices, pos))
                .map(|s| s.label.clone())
            {
                events.push(RingEvent::SliceClicked(label));
            }
        }

        paint_ring(&painter, &geo, &slices, selected, ring.active.as_deref());
        if let Some(text) = center_text {
            painter.text(
                geo.center,
                egui::Align2::CENTER_CENTER,
                text,
                egui::FontId::proportional(16.0),
                ui.visuals().strong_text_color(),
            );
        }

        ui.add_space(RAIL_GAP);
        ui.allocate_ui_with_layout(
            egui::vec2(RAIL_WIDTH, chart_side),
            egui::Layout::top_down(egui::Align::Min),
            |ui| {
                rail_column(ui, items, &plan.right, selected, chart_side, ring, &mut hovered, &mut events);
            },
        );
    });

    // Phase 2: route against this frame's measurements and paint.
    ring.rail.retain_labels(&slices);
    let viewport = ui.ctx().screen_rect().size();
    let active = ring.active.clone();
    let weak = ui.visuals().weak_text_color();
    let strong = ui.visuals().strong_text_color();
    let painter = ui.painter().clone();
    for c in ring.rail.route_if_needed(&slices, viewport) {
        let stroke = if active.as_deref() == Some(c.label.as_str()) {
            egui::Stroke::new(2.0, strong)
        } else {
            egui::Stroke::new(1.0, weak)
        };
        painter.line_segment([c.anchor, c.elbow], stroke);
        painter.line_segment([c.elbow, c.target], stroke);
        painter.circle_filled(c.target, 2.0, stroke.color);
    }

    ring.active = hovered;
    events
}

/// Paint every slice as a fan of convex quads, with emphasis outlines for
/// the selected and the highlighted slice.
fn paint_ring(
    painter: &egui::Painter,
    geo: &RingGeometry,
    slices: &[Slice],
    selected: Option<&str>,
    active: Option<&str>,
) {
    for slice in slices {
        if slice.sweep_deg() <= 0.0 {
            continue;
        }
        let is_active = active == Some(slice.label.as_str());
        let fill = if is_active {
            palette::shade(slice.color, 1, 5)
        } else {
            slice.color
        };

        let points = annulus_points(geo, slice.start_deg, slice.end_deg, ARC_STEP_DEG);
        let outer = points.len() / 2;
        for i in 0..outer - 1 {
            let quad = vec![
                points[i],
                points[i + 1],
                points[points.len() - 2 - i],
                points[points.len() - 1 - i],
            ];
            painter.add(egui::Shape::convex_polygon(
                quad,
                fill,
                egui::Stroke::NONE,
            ));
        }

        if selected == Some(slice.label.as_str()) {
            painter.add(egui::Shape::closed_line(
                points,
                egui::Stroke::new(2.0, egui::Color32::WHITE),
            ));
        }

        if slice.shows_percent_label() {
            painter.text(
                slice.mid,
                egui::Align2::CENTER_CENTER,
                format!("{:.0}%", slice.fraction * 100.0),
                egui::FontId::proportional(12.0),
                egui::Color32::WHITE,
            );
        }
    }
}

/// One vertical rail of labels, in plan order, vertically centered on the
/// chart. Records each label's rendered box for the phase-2 router.
#[allow(clippy::too_many_arguments)]
fn rail_column(
    ui: &mut egui::Ui,
    items: &[RingItem],
    order: &[usize],
    selected: Option<&str>,
    chart_side: f32,
    ring: &mut RingView,
    hovered: &mut Option<String>,
    events: &mut Vec<RingEvent>,
) {
    let pad = (chart_side - order.len() as f32 * RAIL_ROW_HEIGHT).max(0.0) * 0.5;
    ui.add_space(pad);

    for &i in order {
        let item = &items[i];
        let is_active = ring.active.as_deref() == Some(item.label.as_str());
        let is_selected = selected == Some(item.label.as_str());

        let mut text = egui::RichText::new(format!(
            "{}  ${}",
            item.label,
            format_dollars(item.value)
        ))
        .size(13.0)
        .color(item.color);
        if is_active || is_selected {
            text = text.strong().underline();
        }

        let response = ui.add(
            egui::Label::new(text)
                .sense(egui::Sense::click())
                .truncate(),
        );
        ring.rail.record_measurement(&item.label, response.rect);

        if response.hovered() {
            *hovered = Some(item.label.clone());
        }
        if response.clicked() {
            events.push(RingEvent::LabelClicked(item.label.clone()));
        }
        response.on_hover_cursor(egui::CursorIcon::PointingHand);
    }
}
