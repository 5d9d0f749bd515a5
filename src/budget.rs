//! Bill against the household's monthly budget.

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BudgetStatus {
    Exceeded { overage: f64 },
    WithinBudget { headroom: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetAnalysis {
    pub bill: f64,
    pub budget: f64,
    pub status: BudgetStatus,
    /// Share of the budget used, capped at 100.
    pub usage_pct: f64,
}

impl BudgetAnalysis {
    pub fn new(bill: f64, budget: f64) -> Self {
        let status = if bill > budget {
            BudgetStatus::Exceeded {
                overage: bill - budget,
            }
        } else {
            BudgetStatus::WithinBudget {
                headroom: budget - bill,
            }
        };

        let usage_pct = if budget > 0.0 {
            (bill / budget * 100.0).min(100.0)
        } else if bill > 0.0 {
            100.0
        } else {
            0.0
        };

        Self {
            bill,
            budget,
            status,
            usage_pct,
        }
    }

    pub fn is_exceeded(&self) -> bool {
        matches!(self.status, BudgetStatus::Exceeded { .. })
    }
}
