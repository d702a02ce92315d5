//! Breadcrumb and income-form rendering for `TaxApp`.
//!
//! The breadcrumb exposes every unlocked level; the income form is the
//! only place the drill state's unlock level can start rising. Parsing is
//! forgiving: anything that is not a number counts as zero income.

use eframe::egui;

use taxrings::state::drill::DrillLevel;

use super::{format_dollars, TaxApp};

impl TaxApp {
    /// Render the breadcrumb strip: one crumb per unlocked level, the
    /// current view shown inert, the rest clickable.
    pub fn draw_breadcrumb(&mut self, ui: &mut egui::Ui) {
        let selected_label = self
            .drill
            .selected_category()
            .and_then(|id| self.dataset.tree.by_id(id))
            .map(|c| c.node.label.clone());

        let mut crumbs: Vec<(String, DrillLevel)> = vec![("Income".to_string(), DrillLevel::Income)];
        if self.drill.unlocked() >= DrillLevel::Tax {
            crumbs.push(("Tax".to_string(), DrillLevel::Tax));
        }
        if self.drill.unlocked() >= DrillLevel::Categories {
            crumbs.push(("Budget".to_string(), DrillLevel::Categories));
        }
        if self.drill.unlocked() >= DrillLevel::Subcategories {
            if let Some(label) = selected_label {
                crumbs.push((label, DrillLevel::Subcategories));
            }
        }

        let mut navigate_to = None;
        ui.horizontal(|ui| {
            for (i, (label, level)) in crumbs.iter().enumerate() {
                if i > 0 {
                    ui.label("\u{203A}");
                }
                if *level == self.drill.view() {
                    ui.strong(label.as_str());
                } else if ui.link(label.as_str()).clicked() {
                    navigate_to = Some(*level);
                }
            }
        });
        if let Some(level) = navigate_to {
            self.drill.navigate(level);
        }
    }

    /// Render the income form and, once unlocked, the tax summary.
    pub fn draw_income_panel(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Annual income  $");
            let response = ui.add_sized(
                [140.0, 24.0],
                egui::TextEdit::singleline(&mut self.income_input)
                    .hint_text("50,000")
                    .font(egui::TextStyle::Monospace),
            );
            let submitted =
                response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if submitted || ui.button("Estimate tax").clicked() {
                let income = self
                    .income_input
                    .trim()
                    .replace(',', "")
                    .parse::<f64>()
                    .unwrap_or(0.0);
                self.drill.set_income(income);
                self.drill.confirm_income();
            }
        });

        if self.drill.view() >= DrillLevel::Tax {
            let schedule = &self.dataset.schedule;
            let tax = schedule.compute_tax(self.drill.income());
            let taxable = (self.drill.income() - schedule.standard_deduction).max(0.0);

            ui.add_space(6.0);
            ui.heading(format!("Estimated city income tax: ${}", format_dollars(tax)));
            ui.label(
                egui::RichText::new(format!(
                    "Taxable income ${} after the ${} standard deduction",
                    format_dollars(taxable),
                    format_dollars(schedule.standard_deduction),
                ))
                .weak(),
            );

            if self.drill.unlocked() < DrillLevel::Categories
                && ui.button("See where it goes \u{2192}").clicked()
            {
                self.drill.reveal_allocation();
            }
        }
    }
}
