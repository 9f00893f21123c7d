//! Business model types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Money arithmetic that left the range `Decimal` can represent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FinancialsError {
    #[error("{0} exceeds the supported money range")]
    Overflow(&'static str),
}

/// Cost line in a breakdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostCategory {
    /// Units produced at own cost
    Production,
    /// Units bought from the operator by a franchisee
    FranchisePurchase,
    /// Hired helpers (owner model)
    Labor,
    /// Hired helper (employee model)
    HelperLabor,
    /// Wage of the employee running the stand
    OwnWage,
    /// Employee's share of revenue
    RevenueShare,
    Transport,
    Rental,
    Other,
}

impl CostCategory {
    /// snake_case name, as serialized
    pub fn as_str(&self) -> &'static str {
        match self {
            CostCategory::Production => "production",
            CostCategory::FranchisePurchase => "franchise_purchase",
            CostCategory::Labor => "labor",
            CostCategory::HelperLabor => "helper_labor",
            CostCategory::OwnWage => "own_wage",
            CostCategory::RevenueShare => "revenue_share",
            CostCategory::Transport => "transport",
            CostCategory::Rental => "rental",
            CostCategory::Other => "other",
        }
    }
}

/// Cost lines keyed by category
///
/// The total is always computed from the entries, so it cannot drift from
/// their sum.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CostBreakdown(BTreeMap<CostCategory, Decimal>);

impl CostBreakdown {
    /// Create an empty breakdown
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an amount to a category
    pub fn add(&mut self, category: CostCategory, amount: Decimal) -> Result<(), FinancialsError> {
        let entry = self.0.entry(category).or_insert(Decimal::ZERO);
        *entry = entry
            .checked_add(amount)
            .ok_or(FinancialsError::Overflow(category.as_str()))?;
        Ok(())
    }

    /// Amount recorded for a category
    pub fn get(&self, category: CostCategory) -> Option<Decimal> {
        self.0.get(&category).copied()
    }

    /// Sum of all entries
    pub fn total(&self) -> Result<Decimal, FinancialsError> {
        self.0
            .values()
            .try_fold(Decimal::ZERO, |acc, amount| acc.checked_add(*amount))
            .ok_or(FinancialsError::Overflow("total costs"))
    }

    /// Iterate entries in category order
    pub fn iter(&self) -> impl Iterator<Item = (CostCategory, Decimal)> + '_ {
        self.0.iter().map(|(category, amount)| (*category, *amount))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Who keeps what, per operating model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum ProfitAllocation {
    /// Operator keeps the whole profit
    Owner { operator_profit: Decimal },
    /// Fixed income only; the residual goes to the stand's owner
    Employee {
        operator_profit: Decimal,
        wage_income: Decimal,
    },
    /// Operator earns the markup on units sold to the franchisee
    Franchise {
        franchisee_profit: Decimal,
        operator_revenue: Decimal,
        operator_production_cost: Decimal,
        operator_profit: Decimal,
    },
}

impl ProfitAllocation {
    /// Profit that accrues to the operator using the tool
    pub fn operator_profit(&self) -> Decimal {
        match self {
            ProfitAllocation::Owner { operator_profit }
            | ProfitAllocation::Employee {
                operator_profit, ..
            }
            | ProfitAllocation::Franchise {
                operator_profit, ..
            } => *operator_profit,
        }
    }
}

/// Financial outcome for a predicted quantity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Financials {
    pub revenue: Decimal,
    pub cost_breakdown: CostBreakdown,
    pub total_costs: Decimal,
    pub profit: Decimal,
    /// Profit as percentage of revenue
    pub profit_margin: Decimal,
    /// None when each unit loses money
    pub break_even_units: Option<u64>,
    pub allocation: ProfitAllocation,
}
