//! The drill-down state machine.
//!
//! Four levels of disclosure: income entry, the tax estimate, the
//! top-level allocation ring, and the subcategory ring for one selected
//! category. Editing income re-derives tax and allocation immediately, but
//! nothing new becomes visible until an explicit action raises the unlock
//! level: confirming income unlocks `Tax`, revealing the allocation
//! unlocks `Categories`, and selecting a category unlocks `Subcategories`.
//! The unlock level is a high-water mark — it never decreases except on a
//! full reset. Breadcrumb navigation moves the *view* within the unlocked
//! range without touching the mark.

use log::info;

use crate::data::CategoryTree;

/// Disclosure levels, in unlock order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DrillLevel {
    Income,
    Tax,
    Categories,
    Subcategories,
}

#[derive(Debug, Clone)]
pub struct DrillState {
    income: f64,
    unlocked: DrillLevel,
    view: DrillLevel,
    selected_category: Option<String>,
    selected_subcategory: Option<String>,
}

impl Default for DrillState {
    fn default() -> Self {
        Self {
            income: 0.0,
            unlocked: DrillLevel::Income,
            view: DrillLevel::Income,
            selected_category: None,
            selected_subcategory: None,
        }
    }
}

impl DrillState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn income(&self) -> f64 {
        self.income
    }

    pub fn unlocked(&self) -> DrillLevel {
        self.unlocked
    }

    /// The level currently in view. Always ≤ the unlocked level.
    pub fn view(&self) -> DrillLevel {
        self.view
    }

    pub fn selected_category(&self) -> Option<&str> {
        self.selected_category.as_deref()
    }

    pub fn selected_subcategory(&self) -> Option<&str> {
        self.selected_subcategory.as_deref()
    }

    /// Update the income value. Negative input clamps to zero. Derived
    /// values (tax, allocation) follow automatically; visibility does not.
    pub fn set_income(&mut self, income: f64) {
        self.income = income.max(0.0);
    }

    /// Explicit confirmation of the entered income: the tax becomes
    /// visible.
    pub fn confirm_income(&mut self) {
        self.unlock(DrillLevel::Tax);
        self.view = DrillLevel::Tax;
    }

    /// Explicit request to see the allocation ring.
    pub fn reveal_allocation(&mut self) {
        if self.unlocked >= DrillLevel::Tax {
            self.unlock(DrillLevel::Categories);
            self.view = DrillLevel::Categories;
        }
    }

    /// Select a top-level category (slice or rail-label click). Clears any
    /// subcategory selection — even a same-named label in the new category
    /// is a different selection — and force-unlocks the subcategory ring.
    pub fn select_category(&mut self, id: &str) {
        if self.selected_category.as_deref() != Some(id) {
            self.selected_subcategory = None;
        }
        self.selected_category = Some(id.to_string());
        self.unlock(DrillLevel::Subcategories);
        self.view = DrillLevel::Subcategories;
    }

    /// Select a subcategory by label. Only meaningful while a category is
    /// selected; otherwise ignored.
    pub fn select_subcategory(&mut self, label: &str) {
        if self.selected_category.is_some() {
            self.selected_subcategory = Some(label.to_string());
        }
    }

    pub fn clear_subcategory(&mut self) {
        self.selected_subcategory = None;
    }

    /// Breadcrumb navigation. Only already-unlocked levels are reachable.
    /// Navigating to `Income` is the full reset: the unlock mark drops to
    /// `Income` and both selections clear. Navigating to `Tax` or
    /// `Categories` keeps the mark and drops the selections that belong to
    /// deeper levels.
    pub fn navigate(&mut self, level: DrillLevel) {
        if level > self.unlocked {
            return;
        }
        match level {
            DrillLevel::Income => self.reset(),
            DrillLevel::Tax | DrillLevel::Categories => {
                self.selected_category = None;
                self.selected_subcategory = None;
                self.view = level;
            }
            DrillLevel::Subcategories => {
                if self.selected_category.is_some() {
                    self.view = level;
                }
            }
        }
    }

    /// Full reset: back to income entry, selections cleared. The one path
    /// on which the unlock mark decreases.
    pub fn reset(&mut self) {
        info!("drill state reset");
        self.unlocked = DrillLevel::Income;
        self.view = DrillLevel::Income;
        self.selected_category = None;
        self.selected_subcategory = None;
    }

    /// Resolve stale selections against the current tree: a category id
    /// that no longer exists, or a subcategory label absent from the
    /// selected category's children, becomes "nothing selected" rather
    /// than a dangling reference.
    pub fn reconcile(&mut self, tree: &CategoryTree) {
        let category = match self.selected_category.as_deref() {
            Some(id) => match tree.by_id(id) {
                Some(c) => c,
                None => {
                    self.selected_category = None;
                    self.selected_subcategory = None;
                    if self.view == DrillLevel::Subcategories {
                        self.view = DrillLevel::Categories;
                    }
                    return;
                }
            },
            None => {
                self.selected_subcategory = None;
                return;
            }
        };
        if let Some(sub) = self.selected_subcategory.as_deref() {
            if !category.node.children.iter().any(|c| c.label == sub) {
                self.selected_subcategory = None;
            }
        }
    }

    fn unlock(&mut self, level: DrillLevel) {
        if level > self.unlocked {
            info!("unlocked level {:?}", level);
            self.unlocked = level;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Dataset;

    #[test]
    fn income_edit_does_not_unlock() {
        let mut d = DrillState::new();
        d.set_income(50_000.0);
        assert_eq!(d.unlocked(), DrillLevel::Income);
        d.confirm_income();
        assert_eq!(d.unlocked(), DrillLevel::Tax);
    }

    #[test]
    fn negative_income_clamped() {
        let mut d = DrillState::new();
        d.set_income(-1.0);
        assert_eq!(d.income(), 0.0);
    }

    #[test]
    fn category_click_force_unlocks_subcategories() {
        let mut d = DrillState::new();
        d.confirm_income();
        d.reveal_allocation();
        d.select_category("education");
        assert_eq!(d.unlocked(), DrillLevel::Subcategories);
        assert_eq!(d.selected_category(), Some("education"));
    }

    #[test]
    fn unlock_is_monotonic_under_navigation() {
        let mut d = DrillState::new();
        d.confirm_income();
        d.reveal_allocation();
        d.select_category("police");
        d.navigate(DrillLevel::Tax);
        assert_eq!(d.view(), DrillLevel::Tax);
        assert_eq!(d.unlocked(), DrillLevel::Subcategories);
    }

    #[test]
    fn navigation_cannot_reach_locked_levels() {
        let mut d = DrillState::new();
        d.confirm_income();
        d.navigate(DrillLevel::Categories);
        assert_eq!(d.view(), DrillLevel::Tax);
    }

    #[test]
    fn switching_category_clears_subcategory() {
        let mut d = DrillState::new();
        d.select_category("education");
        d.select_subcategory("Administration");
        assert_eq!(d.selected_subcategory(), Some("Administration"));
        // The new category may well have an "Administration" child too;
        // the selection must still clear.
        d.select_category("police");
        assert_eq!(d.selected_subcategory(), None);
    }

    #[test]
    fn reselecting_same_category_keeps_subcategory() {
        let mut d = DrillState::new();
        d.select_category("education");
        d.select_subcategory("Classroom instruction");
        d.select_category("education");
        assert_eq!(d.selected_subcategory(), Some("Classroom instruction"));
    }

    #[test]
    fn subcategory_requires_category() {
        let mut d = DrillState::new();
        d.select_subcategory("orphan");
        assert_eq!(d.selected_subcategory(), None);
    }

    #[test]
    fn reset_clears_everything() {
        let mut d = DrillState::new();
        d.set_income(90_000.0);
        d.confirm_income();
        d.select_category("health");
        d.navigate(DrillLevel::Income);
        assert_eq!(d.unlocked(), DrillLevel::Income);
        assert_eq!(d.selected_category(), None);
        assert_eq!(d.selected_subcategory(), None);
    }

    #[test]
    fn reconcile_drops_unknown_ids() {
        let ds = Dataset::load();
        let mut d = DrillState::new();
        d.select_category("no-such-category");
        d.select_subcategory("whatever");
        d.reconcile(&ds.tree);
        assert_eq!(d.selected_category(), None);
        assert_eq!(d.selected_subcategory(), None);

        d.select_category("education");
        d.select_subcategory("Not a real program");
        d.reconcile(&ds.tree);
        assert_eq!(d.selected_category(), Some("education"));
        assert_eq!(d.selected_subcategory(), None);
    }
}
