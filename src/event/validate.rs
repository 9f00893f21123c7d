//! Input validation

use super::EventInput;
use crate::business::RentalError;
use rust_decimal::Decimal;
use thiserror::Error;

/// A single violated input constraint
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationIssue {
    /// Expected attendance must be positive
    #[error("expected attendees must be greater than zero")]
    ZeroAttendance,
    /// Events last at least one day
    #[error("duration must be at least one day")]
    ZeroDuration,
    /// Selling price per unit must be positive
    #[error("price per unit must be positive, got {0}")]
    NonPositivePrice(Decimal),
    /// Production cost per unit must be positive
    #[error("cost per unit must be positive, got {0}")]
    NonPositiveCost(Decimal),
    /// Transport cost cannot be negative
    #[error("transport cost cannot be negative, got {0}")]
    NegativeTransportCost(Decimal),
    /// Other fixed costs cannot be negative
    #[error("other fixed costs cannot be negative, got {0}")]
    NegativeOtherCosts(Decimal),
    /// Rental terms out of range
    #[error("invalid rental terms: {0}")]
    InvalidRental(RentalError),
}

/// Every constraint an input violates, in field order
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid event input: {}", render(.0))]
pub struct ValidationError(pub Vec<ValidationIssue>);

impl ValidationError {
    /// Violated constraints
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.0
    }
}

fn render(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl EventInput {
    /// Check structural constraints, collecting one issue per violation
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();

        if self.expected_attendees == 0 {
            issues.push(ValidationIssue::ZeroAttendance);
        }
        if self.duration_days == 0 {
            issues.push(ValidationIssue::ZeroDuration);
        }
        if self.price_per_unit <= Decimal::ZERO {
            issues.push(ValidationIssue::NonPositivePrice(self.price_per_unit));
        }
        if self.cost_per_unit <= Decimal::ZERO {
            issues.push(ValidationIssue::NonPositiveCost(self.cost_per_unit));
        }
        if self.transport_cost < Decimal::ZERO {
            issues.push(ValidationIssue::NegativeTransportCost(self.transport_cost));
        }
        if self.other_fixed_costs < Decimal::ZERO {
            issues.push(ValidationIssue::NegativeOtherCosts(self.other_fixed_costs));
        }
        if let Err(e) = self.rental.validate() {
            issues.push(ValidationIssue::InvalidRental(e));
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError(issues))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::business::RentalTerms;
    use crate::event::{BusinessModel, Environment, EventCategory};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn valid_input() -> EventInput {
        EventInput {
            name: None,
            category: EventCategory::Cultural,
            expected_attendees: 1200,
            duration_days: 1,
            environment: Environment::Outdoor,
            location: "Brno".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 7, 5).unwrap(),
            time: None,
            business_model: BusinessModel::Owner,
            price_per_unit: dec!(110),
            cost_per_unit: dec!(32),
            transport_cost: dec!(500),
            other_fixed_costs: dec!(200),
            rental: RentalTerms::Fixed { amount: dec!(5000) },
        }
    }

    #[test]
    fn test_valid_input_passes() {
        assert!(valid_input().validate().is_ok());
    }

    #[test]
    fn test_collects_every_issue() {
        let mut input = valid_input();
        input.expected_attendees = 0;
        input.price_per_unit = dec!(0);
        input.cost_per_unit = dec!(-1);
        input.other_fixed_costs = dec!(-5);

        let err = input.validate().unwrap_err();
        assert_eq!(
            err.issues(),
            &[
                ValidationIssue::ZeroAttendance,
                ValidationIssue::NonPositivePrice(dec!(0)),
                ValidationIssue::NonPositiveCost(dec!(-1)),
                ValidationIssue::NegativeOtherCosts(dec!(-5)),
            ]
        );
    }

    #[test]
    fn test_zero_duration() {
        let mut input = valid_input();
        input.duration_days = 0;
        let err = input.validate().unwrap_err();
        assert_eq!(err.issues(), &[ValidationIssue::ZeroDuration]);
    }

    #[test]
    fn test_rental_rechecked() {
        // Fields are public, so terms built without the checked constructor are caught here
        let mut input = valid_input();
        input.rental = RentalTerms::Percentage {
            percent_of_revenue: dec!(75),
        };
        let err = input.validate().unwrap_err();
        assert!(matches!(
            err.issues(),
            [ValidationIssue::InvalidRental(RentalError::PercentOutOfRange(_))]
        ));
    }

    #[test]
    fn test_error_message_lists_issues() {
        let mut input = valid_input();
        input.expected_attendees = 0;
        input.duration_days = 0;
        let message = input.validate().unwrap_err().to_string();
        assert!(message.contains("expected attendees"));
        assert!(message.contains("at least one day"));
    }
}
