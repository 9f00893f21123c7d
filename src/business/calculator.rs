//! Per-model cost and profit calculation
//!
//! All money arithmetic is checked; amounts that leave the `Decimal` range
//! surface as [`FinancialsError`] instead of panicking.

use super::{CostBreakdown, CostCategory, Financials, FinancialsError, ProfitAllocation};
use crate::config::BusinessConfig;
use crate::event::{BusinessModel, EventInput};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Computes financials for a predicted quantity under each operating model
#[derive(Debug, Clone)]
pub struct BusinessModelCalculator {
    config: BusinessConfig,
}

impl BusinessModelCalculator {
    /// Create a new calculator
    pub fn new(config: BusinessConfig) -> Self {
        Self { config }
    }

    /// Wage bill for `workers` people over `days` event days
    pub fn labor_cost(&self, workers: u32, days: u32) -> Result<Decimal, FinancialsError> {
        let per_day = mul(self.config.hourly_wage, self.config.hours_per_event_day, "labor")?;
        mul(mul(Decimal::from(workers), per_day, "labor")?, Decimal::from(days), "labor")
    }

    /// Round-trip transport cost for a one-way distance in kilometres
    pub fn transport_cost_for_distance(&self, km: Decimal) -> Result<Decimal, FinancialsError> {
        let round_trip = mul(dec!(2), km.max(Decimal::ZERO), "transport")?;
        Ok(mul(round_trip, self.config.transport_cost_per_km, "transport")?.round_dp(2))
    }

    /// Revenue, costs, profit and allocation for `units` sold at the event
    pub fn calculate(&self, units: u64, input: &EventInput) -> Result<Financials, FinancialsError> {
        let quantity = Decimal::from(units);
        let revenue = mul(quantity, input.price_per_unit, "revenue")?;
        let days = input.duration_days.max(1);

        let mut costs = CostBreakdown::new();
        let mut fixed = Decimal::ZERO;
        let mut variable_per_unit = Decimal::ZERO;

        match input.business_model {
            BusinessModel::Owner => {
                let labor = self.labor_cost(self.config.owner_helpers, days)?;
                costs.add(CostCategory::Production, mul(quantity, input.cost_per_unit, "production")?)?;
                costs.add(CostCategory::Labor, labor)?;
                fixed = add(fixed, labor, "fixed costs")?;
                variable_per_unit = add(variable_per_unit, input.cost_per_unit, "unit cost")?;
            }
            BusinessModel::Employee => {
                let helpers = self.labor_cost(self.config.employee_helpers, days)?;
                let own_wage = self.own_wage(days)?;
                let share_per_unit = percent_of(input.price_per_unit, self.config.employee_revenue_share_pct)?;

                costs.add(CostCategory::Production, mul(quantity, input.cost_per_unit, "production")?)?;
                costs.add(CostCategory::HelperLabor, helpers)?;
                costs.add(CostCategory::OwnWage, own_wage)?;
                costs.add(CostCategory::RevenueShare, self.revenue_share(revenue)?)?;
                fixed = add(add(fixed, helpers, "fixed costs")?, own_wage, "fixed costs")?;
                variable_per_unit = add(input.cost_per_unit, share_per_unit, "unit cost")?;
            }
            BusinessModel::Franchise => {
                let unit_price = self.config.franchise_unit_price;
                costs.add(CostCategory::FranchisePurchase, mul(quantity, unit_price, "franchise purchase")?)?;
                variable_per_unit = unit_price;
            }
        }

        // Shared fixed lines
        if input.transport_cost > Decimal::ZERO {
            costs.add(CostCategory::Transport, input.transport_cost)?;
            fixed = add(fixed, input.transport_cost, "fixed costs")?;
        }
        if input.other_fixed_costs > Decimal::ZERO {
            costs.add(CostCategory::Other, input.other_fixed_costs)?;
            fixed = add(fixed, input.other_fixed_costs, "fixed costs")?;
        }
        let rental = input
            .rental
            .cost(revenue)
            .ok_or(FinancialsError::Overflow("rental"))?;
        if rental > Decimal::ZERO {
            costs.add(CostCategory::Rental, rental)?;
        }
        fixed = add(fixed, input.rental.fixed_part(), "fixed costs")?;
        let rental_per_unit = percent_of(input.price_per_unit, input.rental.percent_of_revenue())?;
        variable_per_unit = add(variable_per_unit, rental_per_unit, "unit cost")?;

        let total_costs = costs.total()?;
        let profit = sub(revenue, total_costs, "profit")?;
        let profit_margin = if revenue > Decimal::ZERO {
            let ratio = profit
                .checked_div(revenue)
                .ok_or(FinancialsError::Overflow("profit margin"))?;
            mul(ratio, dec!(100), "profit margin")?.round_dp(2)
        } else {
            Decimal::ZERO
        };
        let contribution_margin = sub(input.price_per_unit, variable_per_unit, "contribution margin")?;
        let break_even_units = break_even(fixed, contribution_margin);

        let allocation = self.allocate(input, quantity, revenue, profit)?;
        tracing::debug!(
            model = ?input.business_model,
            units,
            %revenue,
            %total_costs,
            %profit,
            ?break_even_units,
            "Financials calculated"
        );

        Ok(Financials {
            revenue,
            cost_breakdown: costs,
            total_costs,
            profit,
            profit_margin,
            break_even_units,
            allocation,
        })
    }

    fn own_wage(&self, days: u32) -> Result<Decimal, FinancialsError> {
        self.labor_cost(1, days)
    }

    fn revenue_share(&self, revenue: Decimal) -> Result<Decimal, FinancialsError> {
        Ok(percent_of(revenue, self.config.employee_revenue_share_pct)?.round_dp(2))
    }

    fn allocate(
        &self,
        input: &EventInput,
        quantity: Decimal,
        revenue: Decimal,
        profit: Decimal,
    ) -> Result<ProfitAllocation, FinancialsError> {
        let allocation = match input.business_model {
            BusinessModel::Owner => ProfitAllocation::Owner {
                operator_profit: profit,
            },
            // The stand's residual profit belongs to its owner, not the employee
            BusinessModel::Employee => ProfitAllocation::Employee {
                operator_profit: Decimal::ZERO,
                wage_income: add(
                    self.own_wage(input.duration_days.max(1))?,
                    self.revenue_share(revenue)?,
                    "wage income",
                )?,
            },
            BusinessModel::Franchise => {
                let operator_revenue = mul(quantity, self.config.franchise_unit_price, "operator revenue")?;
                let operator_production_cost = mul(quantity, input.cost_per_unit, "operator production cost")?;
                ProfitAllocation::Franchise {
                    franchisee_profit: profit,
                    operator_revenue,
                    operator_production_cost,
                    operator_profit: sub(operator_revenue, operator_production_cost, "operator profit")?,
                }
            }
        };
        Ok(allocation)
    }
}

impl Default for BusinessModelCalculator {
    fn default() -> Self {
        Self::new(BusinessConfig::default())
    }
}

fn mul(a: Decimal, b: Decimal, what: &'static str) -> Result<Decimal, FinancialsError> {
    a.checked_mul(b).ok_or(FinancialsError::Overflow(what))
}

fn add(a: Decimal, b: Decimal, what: &'static str) -> Result<Decimal, FinancialsError> {
    a.checked_add(b).ok_or(FinancialsError::Overflow(what))
}

fn sub(a: Decimal, b: Decimal, what: &'static str) -> Result<Decimal, FinancialsError> {
    a.checked_sub(b).ok_or(FinancialsError::Overflow(what))
}

/// `percent` % of `amount`, unrounded
fn percent_of(amount: Decimal, percent: Decimal) -> Result<Decimal, FinancialsError> {
    Ok(mul(amount, percent, "percentage")? / dec!(100))
}

/// Units needed to cover fixed costs; none when each unit loses money
fn break_even(fixed: Decimal, contribution_margin: Decimal) -> Option<u64> {
    if contribution_margin <= Decimal::ZERO {
        return None;
    }
    fixed.checked_div(contribution_margin)?.ceil().to_u64()
}
