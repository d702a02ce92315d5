//! Weighted budget tree and top-down dollar allocation.
//!
//! A `BudgetNode`'s weight is meaningful only relative to its siblings:
//! each sibling group is normalized independently, and a parent's dollars
//! are split among its children by those fractions. The allocation is a
//! parallel tree computed fresh from `(tree, dollars)` every time — cheap
//! enough that nothing is ever patched in place.

/// One node of the static budget taxonomy. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct BudgetNode {
    pub label: String,
    pub weight: f64,
    pub children: Vec<BudgetNode>,
}

impl BudgetNode {
    pub fn leaf(label: &str, weight: f64) -> Self {
        Self {
            label: label.to_string(),
            weight,
            children: Vec::new(),
        }
    }

    pub fn branch(label: &str, weight: f64, children: Vec<BudgetNode>) -> Self {
        Self {
            label: label.to_string(),
            weight,
            children,
        }
    }
}

/// Allocation of a dollar amount to one node, with its children allocated
/// recursively from this node's share. Derived data — never stored.
#[derive(Debug, Clone)]
pub struct Allocation {
    pub label: String,
    pub fraction: f64,
    pub dollars: f64,
    pub children: Vec<Allocation>,
}

/// Sibling-normalized fractions: `weight / Σ weights`, clamping negative
/// weights to zero. A zero-sum group yields all-zero fractions, never NaN.
pub fn normalize(siblings: &[BudgetNode]) -> Vec<f64> {
    let total: f64 = siblings.iter().map(|n| n.weight.max(0.0)).sum();
    if total <= 0.0 {
        return vec![0.0; siblings.len()];
    }
    siblings.iter().map(|n| n.weight.max(0.0) / total).collect()
}

/// Split `parent_dollars` across a sibling group and recurse into each
/// node's children with that node's share. Each group normalizes against
/// its own siblings only; weights are never compared across groups.
pub fn allocate(siblings: &[BudgetNode], parent_dollars: f64) -> Vec<Allocation> {
    let fractions = normalize(siblings);
    siblings
        .iter()
        .zip(fractions)
        .map(|(node, fraction)| {
            let dollars = parent_dollars * fraction;
            Allocation {
                label: node.label.clone(),
                fraction,
                dollars,
                children: allocate(&node.children, dollars),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn group() -> Vec<BudgetNode> {
        vec![
            BudgetNode::leaf("a", 3.0),
            BudgetNode::leaf("b", 1.0),
            BudgetNode::leaf("c", 0.0),
        ]
    }

    #[test]
    fn fractions_sum_to_one() {
        let f = normalize(&group());
        assert!((f.iter().sum::<f64>() - 1.0).abs() < EPS);
        assert!(f.iter().all(|&x| (0.0..=1.0).contains(&x)));
        assert!((f[0] - 0.75).abs() < EPS);
    }

    #[test]
    fn zero_sum_group_all_zero() {
        let nodes = vec![BudgetNode::leaf("a", 0.0), BudgetNode::leaf("b", 0.0)];
        let f = normalize(&nodes);
        assert_eq!(f, vec![0.0, 0.0]);
        // And allocation stays finite.
        let alloc = allocate(&nodes, 100.0);
        assert!(alloc.iter().all(|a| a.dollars == 0.0));
    }

    #[test]
    fn negative_weight_clamped() {
        let nodes = vec![BudgetNode::leaf("a", -5.0), BudgetNode::leaf("b", 5.0)];
        let f = normalize(&nodes);
        assert_eq!(f[0], 0.0);
        assert!((f[1] - 1.0).abs() < EPS);
    }

    #[test]
    fn children_conserve_parent_dollars() {
        let tree = vec![
            BudgetNode::branch(
                "parent",
                2.0,
                vec![
                    BudgetNode::leaf("x", 1.0),
                    BudgetNode::leaf("y", 2.0),
                    BudgetNode::leaf("z", 3.0),
                ],
            ),
            BudgetNode::leaf("other", 1.0),
        ];
        let alloc = allocate(&tree, 900.0);
        let top_sum: f64 = alloc.iter().map(|a| a.dollars).sum();
        assert!((top_sum - 900.0).abs() < EPS);

        let parent = &alloc[0];
        let child_sum: f64 = parent.children.iter().map(|c| c.dollars).sum();
        assert!((child_sum - parent.dollars).abs() < EPS);
    }

    #[test]
    fn fractions_are_sibling_relative() {
        // "x" has weight 1 in a group summing 2; the unrelated top-level
        // group's much larger weights must not dilute it.
        let tree = vec![
            BudgetNode::branch(
                "small",
                1.0,
                vec![BudgetNode::leaf("x", 1.0), BudgetNode::leaf("y", 1.0)],
            ),
            BudgetNode::leaf("huge", 999.0),
        ];
        let alloc = allocate(&tree, 1000.0);
        assert!((alloc[0].children[0].fraction - 0.5).abs() < EPS);
    }

    #[test]
    fn education_share_of_worked_example() {
        use crate::data::Dataset;

        let ds = Dataset::load();
        let tax = ds.schedule.compute_tax(50_000.0);
        let nodes: Vec<BudgetNode> =
            ds.tree.categories.iter().map(|c| c.node.clone()).collect();
        let total_weight: f64 = nodes.iter().map(|n| n.weight).sum();

        let alloc = allocate(&nodes, tax);
        let education = alloc
            .iter()
            .find(|a| a.label == "Education")
            .expect("dataset has an Education category");

        let expected = tax * 29.71 / total_weight;
        assert!((education.dollars - expected).abs() < 1e-6);

        let sum: f64 = alloc.iter().map(|a| a.dollars).sum();
        assert!((sum - tax).abs() < 1e-6);
    }
}
