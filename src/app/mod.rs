//! `TaxApp` — the top-level egui application state.
//!
//! This module declares the `TaxApp` struct and its `Default` impl.
//! All methods are split across the sibling sub-modules:
//!
//! - `panel` — breadcrumb navigation, income form, tax summary
//! - `chart` — ring painting, rail labels, connector routing, interaction

pub mod panel;
pub mod chart;

use eframe::egui;

use taxrings::data::Dataset;
use taxrings::engine::allocation::BudgetNode;
use taxrings::rail::RailState;
use taxrings::state::drill::{DrillLevel, DrillState};

// ─── Application state ───────────────────────────────────────────────────────

/// One visible ring's presentation state: its routing cache and which
/// label (if any) is highlighted. Hovering a slice or its rail label set
/// the same identity; geometry is never affected.
pub struct RingView {
    pub rail: RailState,
    pub active: Option<String>,
}

impl RingView {
    pub fn new() -> Self {
        Self {
            rail: RailState::new(),
            active: None,
        }
    }
}

pub struct TaxApp {
    pub income_input: String,
    pub drill: DrillState,
    pub dataset: Dataset,
    /// Top-level budget nodes, cloned out of the tree once so the
    /// allocation engine sees them as one sibling group.
    pub top_nodes: Vec<BudgetNode>,
    pub category_ring: RingView,
    pub subcategory_ring: RingView,
}

impl Default for TaxApp {
    fn default() -> Self {
        let dataset = Dataset::load();
        dataset.validate();
        let top_nodes = dataset
            .tree
            .categories
            .iter()
            .map(|c| c.node.clone())
            .collect();
        Self {
            income_input: String::new(),
            drill: DrillState::new(),
            dataset,
            top_nodes,
            category_ring: RingView::new(),
            subcategory_ring: RingView::new(),
        }
    }
}

impl eframe::App for TaxApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Resolve any selection left dangling by the previous frame's
        // interactions before anything renders.
        self.drill.reconcile(&self.dataset.tree);

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_breadcrumb(ui);
            ui.separator();
            self.draw_income_panel(ui);
            if self.drill.view() >= DrillLevel::Categories {
                ui.separator();
                self.draw_rings(ui);
            }
        });
    }
}

// ─── Text utilities ───────────────────────────────────────────────────────────

/// Format a dollar amount with thousands separators and cents:
/// `1507.234` → `"1,507.23"`.
pub fn format_dollars(v: f64) -> String {
    let cents = (v.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if v < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}{}.{:02}", sign, grouped, frac)
}
