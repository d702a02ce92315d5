//! The static reference dataset: a two-level city budget taxonomy with
//! citations, optional personnel/other cost splits for some leaves, and
//! the resident income-tax schedule.
//!
//! Weights are adopted-budget dollars in billions, but only sibling
//! ratios ever matter — the allocation engine normalizes each sibling
//! group independently. The tree is built once at startup and never
//! mutated. Figures follow the shape of the NYC adopted expense budget;
//! each category carries its citation string for display.

use std::collections::HashMap;

use log::warn;

use crate::engine::allocation::BudgetNode;
use crate::engine::tax::{Bracket, BracketSchedule};

/// One top-level budget category: a stable id (selection key, independent
/// of label text), display/citation metadata, and the weighted subtree.
#[derive(Debug, Clone)]
pub struct Category {
    pub id: &'static str,
    pub citation: &'static str,
    pub node: BudgetNode,
}

/// The ordered top-level categories.
#[derive(Debug, Clone)]
pub struct CategoryTree {
    pub categories: Vec<Category>,
}

impl CategoryTree {
    pub fn by_id(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn by_label(&self, label: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.node.label == label)
    }
}

/// Personnel/other split for one leaf, as fractions summing to 1.
#[derive(Debug, Clone, Copy)]
pub struct CostSplit {
    pub personnel: f64,
    pub other: f64,
}

/// Everything the app consumes: taxonomy, tax schedule, cost splits.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub tree: CategoryTree,
    pub schedule: BracketSchedule,
    pub cost_splits: HashMap<&'static str, CostSplit>,
}

// ─── Raw tables ───────────────────────────────────────────────────────────────

struct RawCategory {
    id: &'static str,
    label: &'static str,
    weight: f64,
    citation: &'static str,
    children: &'static [(&'static str, f64)],
}

const CATEGORIES: &[RawCategory] = &[
    RawCategory {
        id: "education",
        label: "Education",
        weight: 29.71,
        citation: "FY2024 Adopted Expense Budget, Department of Education",
        children: &[
            ("Classroom instruction", 14.62),
            ("School support services", 4.85),
            ("Special education", 3.91),
            ("Charter & contract schools", 2.77),
            ("School food & facilities", 2.10),
            ("Pupil transportation", 1.46),
        ],
    },
    RawCategory {
        id: "social-services",
        label: "Social Services",
        weight: 21.94,
        citation: "FY2024 Adopted Expense Budget, Dept. of Social Services & HRA",
        children: &[
            ("Medicaid & health subsidies", 6.33),
            ("Cash & rental assistance", 6.31),
            ("Homeless services", 4.02),
            ("Child welfare", 2.74),
            ("Adult & senior services", 2.54),
        ],
    },
    RawCategory {
        id: "pensions",
        label: "Pensions & Fringe Benefits",
        weight: 20.62,
        citation: "FY2024 Adopted Expense Budget, Miscellaneous Budget",
        children: &[
            ("Pension contributions", 9.40),
            ("Employee health insurance", 8.21),
            ("Other fringe benefits", 3.01),
        ],
    },
    RawCategory {
        id: "health",
        label: "Health & Hospitals",
        weight: 12.28,
        citation: "FY2024 Adopted Expense Budget, DOHMH and H+H subsidy",
        children: &[
            ("Public hospitals subsidy", 8.11),
            ("Public health programs", 2.29),
            ("Mental health & addiction", 1.88),
        ],
    },
    RawCategory {
        id: "police",
        label: "Police",
        weight: 10.87,
        citation: "FY2024 Adopted Expense Budget, Police Department",
        children: &[
            ("Patrol operations", 5.43),
            ("Investigations", 2.06),
            ("Administration", 1.51),
            ("School & transit safety", 1.23),
            ("Counterterrorism & intelligence", 0.64),
        ],
    },
    RawCategory {
        id: "debt-service",
        label: "Debt Service",
        weight: 7.58,
        citation: "FY2024 Adopted Expense Budget, Debt Service schedules",
        children: &[
            ("Bond principal", 3.94),
            ("Bond interest", 3.30),
            ("Lease & other financing", 0.34),
        ],
    },
    RawCategory {
        id: "general-government",
        label: "General Government",
        weight: 4.58,
        citation: "FY2024 Adopted Expense Budget, citywide agencies",
        children: &[
            ("Citywide administration", 1.87),
            ("Technology & facilities", 1.59),
            ("Courts & elections", 1.12),
        ],
    },
    RawCategory {
        id: "fire",
        label: "Fire & Emergency",
        weight: 4.31,
        citation: "FY2024 Adopted Expense Budget, Fire Department",
        children: &[
            ("Firefighting operations", 2.58),
            ("Emergency medical services", 1.31),
            ("Fire prevention & inspections", 0.42),
        ],
    },
    RawCategory {
        id: "sanitation",
        label: "Sanitation",
        weight: 3.76,
        citation: "FY2024 Adopted Expense Budget, Department of Sanitation",
        children: &[
            ("Collection & recycling", 2.14),
            ("Disposal & export", 1.02),
            ("Street cleaning & snow", 0.60),
        ],
    },
    RawCategory {
        id: "transportation",
        label: "Transportation & Infrastructure",
        weight: 3.40,
        citation: "FY2024 Adopted Expense Budget, Department of Transportation",
        children: &[
            ("Road & bridge maintenance", 1.42),
            ("Transit subsidies", 1.18),
            ("Traffic operations", 0.80),
        ],
    },
    RawCategory {
        id: "housing-parks",
        label: "Housing, Parks & Culture",
        weight: 3.34,
        citation: "FY2024 Adopted Expense Budget, HPD, Parks, and Cultural Affairs",
        children: &[
            ("Housing preservation", 1.49),
            ("Parks & recreation", 1.06),
            ("Libraries & cultural programs", 0.79),
        ],
    },
];

/// NYC resident rate schedule (single filer), published whole-dollar bases.
const STANDARD_DEDUCTION: f64 = 8_000.0;
const BRACKETS: &[(f64, f64, f64)] = &[
    (12_000.0, 0.0, 0.03078),
    (25_000.0, 369.0, 0.03762),
    (50_000.0, 858.0, 0.03819),
    (f64::INFINITY, 1_813.0, 0.03876),
];

/// Personnel share of spending for leaves where the split is published.
/// Leaves absent from this table simply have no split to show.
const COST_SPLITS: &[(&str, f64)] = &[
    ("Classroom instruction", 0.88),
    ("Patrol operations", 0.93),
    ("Firefighting operations", 0.91),
    ("Emergency medical services", 0.87),
    ("Collection & recycling", 0.78),
    ("Public health programs", 0.61),
    ("Road & bridge maintenance", 0.54),
];

// ─── Construction & validation ────────────────────────────────────────────────

impl Dataset {
    /// Build the owned dataset from the const tables. Infallible — the
    /// tables are compiled in; [`Dataset::validate`] reports any findings.
    pub fn load() -> Self {
        let categories = CATEGORIES
            .iter()
            .map(|raw| Category {
                id: raw.id,
                citation: raw.citation,
                node: BudgetNode::branch(
                    raw.label,
                    raw.weight,
                    raw.children
                        .iter()
                        .map(|&(label, weight)| BudgetNode::leaf(label, weight))
                        .collect(),
                ),
            })
            .collect();

        let schedule = BracketSchedule {
            standard_deduction: STANDARD_DEDUCTION,
            brackets: BRACKETS
                .iter()
                .map(|&(up_to, base, rate)| Bracket { up_to, base, rate })
                .collect(),
        };

        let cost_splits = COST_SPLITS
            .iter()
            .map(|&(label, personnel)| {
                (
                    label,
                    CostSplit {
                        personnel,
                        other: 1.0 - personnel,
                    },
                )
            })
            .collect();

        Self {
            tree: CategoryTree { categories },
            schedule,
            cost_splits,
        }
    }

    /// Human-readable findings: duplicate sibling labels, duplicate ids,
    /// negative weights, schedule problems. Logged but never fatal — the
    /// app still renders whatever the data supports.
    pub fn validate(&self) -> Vec<String> {
        let mut findings = Vec::new();

        let mut ids = Vec::new();
        let mut labels = Vec::new();
        for c in &self.tree.categories {
            if ids.contains(&c.id) {
                findings.push(format!("duplicate category id '{}'", c.id));
            }
            ids.push(c.id);
            if labels.contains(&c.node.label.as_str()) {
                findings.push(format!("duplicate category label '{}'", c.node.label));
            }
            labels.push(c.node.label.as_str());
            if c.node.weight < 0.0 {
                findings.push(format!("category '{}' has negative weight", c.node.label));
            }

            let mut child_labels = Vec::new();
            for child in &c.node.children {
                if child_labels.contains(&child.label.as_str()) {
                    findings.push(format!(
                        "duplicate label '{}' under '{}'",
                        child.label, c.node.label
                    ));
                }
                child_labels.push(child.label.as_str());
                if child.weight < 0.0 {
                    findings.push(format!("leaf '{}' has negative weight", child.label));
                }
            }
        }

        for (label, split) in &self.cost_splits {
            if (split.personnel + split.other - 1.0).abs() > 1e-9 {
                findings.push(format!("cost split for '{}' does not sum to 1", label));
            }
        }

        findings.extend(self.schedule.validate());

        for f in &findings {
            warn!("dataset: {}", f);
        }
        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_dataset_is_clean() {
        assert_eq!(Dataset::load().validate(), Vec::<String>::new());
    }

    #[test]
    fn lookup_by_id_and_label() {
        let ds = Dataset::load();
        let edu = ds.tree.by_id("education").expect("education exists");
        assert_eq!(edu.node.label, "Education");
        assert!((edu.node.weight - 29.71).abs() < 1e-9);
        assert!(ds.tree.by_label("Police").is_some());
        assert!(ds.tree.by_id("defense").is_none());
    }

    #[test]
    fn every_category_has_children_and_citation() {
        let ds = Dataset::load();
        for c in &ds.tree.categories {
            assert!(!c.node.children.is_empty(), "{} has no children", c.id);
            assert!(!c.citation.is_empty());
        }
    }

    #[test]
    fn cost_splits_sum_to_one() {
        let ds = Dataset::load();
        assert!(!ds.cost_splits.is_empty());
        for (_, split) in &ds.cost_splits {
            assert!((split.personnel + split.other - 1.0).abs() < 1e-9);
        }
    }
}
