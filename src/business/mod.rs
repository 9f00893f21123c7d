//! Business model module
//!
//! Labor, rental and production costs, break-even and profit allocation
//! for the owner, employee and franchise operating models

mod calculator;
mod rental;
mod types;

pub use calculator::BusinessModelCalculator;
pub use rental::{RentalError, RentalTerms, MAX_RENTAL_PERCENT};
pub use types::{CostBreakdown, CostCategory, Financials, FinancialsError, ProfitAllocation};
