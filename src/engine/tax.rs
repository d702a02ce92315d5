//! Piecewise-linear income-tax schedule.
//!
//! A schedule is an ordered list of brackets, each covering taxable income
//! up to `up_to` with a flat `base` owed at the bracket's lower bound plus
//! a marginal `rate` on the excess. Published tax tables round the base
//! amounts to whole dollars, so continuity across bracket boundaries holds
//! only within that rounding.

/// One bracket of the schedule. `up_to` is `f64::INFINITY` for the last.
#[derive(Debug, Clone, Copy)]
pub struct Bracket {
    pub up_to: f64,
    pub base: f64,
    pub rate: f64,
}

/// A complete tax schedule: standard deduction plus ordered brackets.
#[derive(Debug, Clone)]
pub struct BracketSchedule {
    pub standard_deduction: f64,
    pub brackets: Vec<Bracket>,
}

/// Allowed drift between a published base amount and the exact schedule
/// value at the bracket boundary (published tables round to whole dollars).
pub const CONTINUITY_TOLERANCE: f64 = 1.0;

impl BracketSchedule {
    /// Lower bound of bracket `i` (upper threshold of its predecessor).
    fn lower_bound(&self, i: usize) -> f64 {
        if i == 0 {
            0.0
        } else {
            self.brackets[i - 1].up_to
        }
    }

    /// Estimated tax for a gross income.
    ///
    /// Taxable income is `max(0, income − standard_deduction)`; the result
    /// is `base + rate · (taxable − lower_bound)` of the highest bracket
    /// whose lower bound does not exceed the taxable income. Clamping means
    /// there is no error path: any real input yields a tax ≥ 0.
    pub fn compute_tax(&self, income: f64) -> f64 {
        let taxable = (income - self.standard_deduction).max(0.0);

        let mut idx = 0;
        for i in 0..self.brackets.len() {
            if self.lower_bound(i) <= taxable {
                idx = i;
            } else {
                break;
            }
        }

        let b = &self.brackets[idx];
        b.base + b.rate * (taxable - self.lower_bound(idx))
    }

    /// Sanity findings for a schedule: non-increasing thresholds, negative
    /// rates, or a base amount drifting more than [`CONTINUITY_TOLERANCE`]
    /// from the exact value at the boundary. Findings are reported, never
    /// fatal — the schedule still evaluates.
    pub fn validate(&self) -> Vec<String> {
        let mut findings = Vec::new();

        if self.brackets.is_empty() {
            findings.push("schedule has no brackets".to_string());
            return findings;
        }

        for (i, b) in self.brackets.iter().enumerate() {
            if b.rate < 0.0 {
                findings.push(format!("bracket {} has negative rate {}", i, b.rate));
            }
            if i > 0 {
                let prev = &self.brackets[i - 1];
                if b.up_to <= prev.up_to {
                    findings.push(format!(
                        "bracket {} threshold {} not above predecessor {}",
                        i, b.up_to, prev.up_to
                    ));
                }
                // Exact schedule value at the boundary vs the published base.
                let at_boundary = prev.base + prev.rate * (prev.up_to - self.lower_bound(i - 1));
                if (at_boundary - b.base).abs() > CONTINUITY_TOLERANCE {
                    findings.push(format!(
                        "bracket {} base {} is discontinuous (schedule gives {:.2} at {})",
                        i, b.base, at_boundary, prev.up_to
                    ));
                }
            }
        }

        if self.brackets.last().map(|b| b.up_to) != Some(f64::INFINITY) {
            findings.push("last bracket is bounded".to_string());
        }

        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Dataset;

    fn schedule() -> BracketSchedule {
        Dataset::load().schedule
    }

    #[test]
    fn zero_at_or_below_deduction() {
        let s = schedule();
        assert_eq!(s.compute_tax(0.0), 0.0);
        assert_eq!(s.compute_tax(s.standard_deduction), 0.0);
        assert_eq!(s.compute_tax(s.standard_deduction - 1.0), 0.0);
    }

    #[test]
    fn negative_income_clamped() {
        let s = schedule();
        assert_eq!(s.compute_tax(-50_000.0), 0.0);
    }

    #[test]
    fn worked_example_50k() {
        // 50,000 income → 42,000 taxable → 858 + 3.819% of 17,000.
        let s = schedule();
        let tax = s.compute_tax(50_000.0);
        assert!((tax - 1_507.23).abs() < 0.01, "got {}", tax);
    }

    #[test]
    fn monotone_non_decreasing() {
        let s = schedule();
        let mut prev = 0.0;
        let mut income = 0.0;
        while income <= 250_000.0 {
            let t = s.compute_tax(income);
            assert!(t >= prev, "tax decreased at income {}", income);
            prev = t;
            income += 250.0;
        }
    }

    #[test]
    fn continuous_at_breakpoints() {
        let s = schedule();
        for b in &s.brackets {
            if !b.up_to.is_finite() {
                continue;
            }
            let income = b.up_to + s.standard_deduction;
            let below = s.compute_tax(income - 0.01);
            let above = s.compute_tax(income + 0.01);
            // Published bases are rounded to whole dollars.
            assert!(
                (above - below).abs() < CONTINUITY_TOLERANCE,
                "jump of {} at taxable {}",
                above - below,
                b.up_to
            );
        }
    }

    #[test]
    fn four_linear_segments() {
        let s = schedule();
        assert_eq!(s.brackets.len(), 4);
        // Within a bracket the slope equals the marginal rate.
        for (i, b) in s.brackets.iter().enumerate() {
            let lo = if i == 0 { 0.0 } else { s.brackets[i - 1].up_to };
            let hi = if b.up_to.is_finite() { b.up_to } else { lo + 50_000.0 };
            let x0 = lo + (hi - lo) * 0.25 + s.standard_deduction;
            let x1 = lo + (hi - lo) * 0.75 + s.standard_deduction;
            let slope = (s.compute_tax(x1) - s.compute_tax(x0)) / (x1 - x0);
            assert!((slope - b.rate).abs() < 1e-9, "bracket {} slope {}", i, slope);
        }
    }

    #[test]
    fn seeded_schedule_validates_clean() {
        assert!(schedule().validate().is_empty());
    }
}
