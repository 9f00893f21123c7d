//! Venue rental terms

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Highest share of revenue a venue may charge
pub const MAX_RENTAL_PERCENT: Decimal = dec!(50);

/// Rental terms errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RentalError {
    /// Percentage outside [0, 50]
    #[error("percentage of revenue must be between 0 and 50, got {0}")]
    PercentOutOfRange(Decimal),
    /// Fixed amount below zero
    #[error("fixed rental amount cannot be negative, got {0}")]
    NegativeAmount(Decimal),
}

/// Venue fee structure
///
/// Deserialization goes through the checked constructors, so terms read from
/// JSON or TOML are always in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case", try_from = "RawRentalTerms")]
pub enum RentalTerms {
    /// Flat fee
    Fixed { amount: Decimal },
    /// Share of revenue
    Percentage { percent_of_revenue: Decimal },
    /// Flat fee plus share of revenue
    Mixed {
        fixed_amount: Decimal,
        percent_of_revenue: Decimal,
    },
}

#[derive(Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
enum RawRentalTerms {
    Fixed {
        amount: Decimal,
    },
    Percentage {
        percent_of_revenue: Decimal,
    },
    Mixed {
        fixed_amount: Decimal,
        percent_of_revenue: Decimal,
    },
}

impl TryFrom<RawRentalTerms> for RentalTerms {
    type Error = RentalError;

    fn try_from(raw: RawRentalTerms) -> Result<Self, Self::Error> {
        match raw {
            RawRentalTerms::Fixed { amount } => Self::fixed(amount),
            RawRentalTerms::Percentage { percent_of_revenue } => Self::percentage(percent_of_revenue),
            RawRentalTerms::Mixed {
                fixed_amount,
                percent_of_revenue,
            } => Self::mixed(fixed_amount, percent_of_revenue),
        }
    }
}

impl Default for RentalTerms {
    fn default() -> Self {
        RentalTerms::Fixed {
            amount: Decimal::ZERO,
        }
    }
}

impl RentalTerms {
    /// Flat fee
    pub fn fixed(amount: Decimal) -> Result<Self, RentalError> {
        check_amount(amount)?;
        Ok(RentalTerms::Fixed { amount })
    }

    /// Share of revenue, 0-50 %
    pub fn percentage(percent_of_revenue: Decimal) -> Result<Self, RentalError> {
        check_percent(percent_of_revenue)?;
        Ok(RentalTerms::Percentage { percent_of_revenue })
    }

    /// Flat fee plus share of revenue
    pub fn mixed(fixed_amount: Decimal, percent_of_revenue: Decimal) -> Result<Self, RentalError> {
        check_amount(fixed_amount)?;
        check_percent(percent_of_revenue)?;
        Ok(RentalTerms::Mixed {
            fixed_amount,
            percent_of_revenue,
        })
    }

    /// Re-check terms that were built directly from the public variants
    pub fn validate(&self) -> Result<(), RentalError> {
        check_amount(self.fixed_part())?;
        check_percent(self.percent_of_revenue())
    }

    /// Part of the fee that does not scale with sales
    pub fn fixed_part(&self) -> Decimal {
        match self {
            RentalTerms::Fixed { amount } => *amount,
            RentalTerms::Percentage { .. } => Decimal::ZERO,
            RentalTerms::Mixed { fixed_amount, .. } => *fixed_amount,
        }
    }

    /// Revenue share in percent
    pub fn percent_of_revenue(&self) -> Decimal {
        match self {
            RentalTerms::Fixed { .. } => Decimal::ZERO,
            RentalTerms::Percentage { percent_of_revenue }
            | RentalTerms::Mixed {
                percent_of_revenue, ..
            } => *percent_of_revenue,
        }
    }

    /// Rental cost for the given revenue, rounded to cents
    ///
    /// None when the fee does not fit in a `Decimal`.
    pub fn cost(&self, revenue: Decimal) -> Option<Decimal> {
        let variable = revenue.checked_mul(self.percent_of_revenue())? / dec!(100);
        Some(self.fixed_part().checked_add(variable)?.round_dp(2))
    }
}

fn check_amount(amount: Decimal) -> Result<(), RentalError> {
    if amount < Decimal::ZERO {
        return Err(RentalError::NegativeAmount(amount));
    }
    Ok(())
}

fn check_percent(percent: Decimal) -> Result<(), RentalError> {
    if percent < Decimal::ZERO || percent > MAX_RENTAL_PERCENT {
        return Err(RentalError::PercentOutOfRange(percent));
    }
    Ok(())
}
