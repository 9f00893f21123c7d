//! Prediction engine integration tests

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use stand_forecast::business::{CostCategory, ProfitAllocation, RentalTerms};
use stand_forecast::config::{Config, ModelConfig};
use stand_forecast::engine::{DegradedInput, Forecaster, PredictionEngine, CONFIDENCE_MAX, CONFIDENCE_MIN};
use stand_forecast::event::{BusinessModel, Environment, EventCategory, EventInput};
use stand_forecast::history::{HistoricalEvent, HistoricalStore};
use stand_forecast::weather::{WeatherCondition, WeatherObservation, WEATHER_FACTOR_MAX, WEATHER_FACTOR_MIN};

fn event(category: EventCategory, attendees: u64, days: u32) -> EventInput {
    EventInput {
        name: None,
        category,
        expected_attendees: attendees,
        duration_days: days,
        environment: Environment::Outdoor,
        location: "Praha".to_string(),
        start_date: NaiveDate::from_ymd_opt(2025, 6, 12).unwrap(),
        time: None,
        business_model: BusinessModel::Owner,
        price_per_unit: dec!(45),
        cost_per_unit: dec!(18),
        transport_cost: dec!(500),
        other_fixed_costs: dec!(0),
        rental: RentalTerms::default(),
    }
}

fn history() -> HistoricalStore {
    HistoricalStore::with_events(
        ModelConfig::default(),
        vec![
            HistoricalEvent::new(EventCategory::FoodFestival, "Praha", 3000, 800, None),
            HistoricalEvent::new(EventCategory::FoodFestival, "Brno", 5000, 1000, None),
            HistoricalEvent::new(EventCategory::Concert, "Praha", 12_000, 500, None),
            HistoricalEvent::new(EventCategory::Cultural, "Olomouc", 900, 120, None),
        ],
    )
}

fn weathers() -> Vec<Option<WeatherObservation>> {
    let mut all = vec![None];
    for condition in [WeatherCondition::Clear, WeatherCondition::Rain, WeatherCondition::Thunderstorm] {
        for temperature_c in [-5.0, 18.0, 22.0, 35.0] {
            all.push(Some(WeatherObservation {
                temperature_c,
                condition,
                wind_speed_ms: 12.0,
            }));
        }
    }
    all
}

#[test]
fn test_food_festival_scenario() {
    let engine = PredictionEngine::default();
    let result = engine
        .predict(&event(EventCategory::FoodFestival, 4000, 2), &HistoricalStore::default(), None)
        .unwrap();

    assert_eq!(result.predicted_units, 1750);
    assert_eq!(result.revenue, dec!(78750));
    assert_eq!(result.cost_breakdown.get(CostCategory::Labor), Some(dec!(6000)));
    assert_eq!(result.cost_breakdown.get(CostCategory::Production), Some(dec!(31500)));
    assert_eq!(result.total_costs, dec!(38000));
    assert_eq!(result.profit, dec!(40750));
}

#[test]
fn test_thirty_attendees_hit_the_floor() {
    let engine = PredictionEngine::default();
    let result = engine
        .predict(&event(EventCategory::Other, 30, 1), &HistoricalStore::default(), None)
        .unwrap();
    assert_eq!(result.predicted_units, 50);
}

#[test]
fn test_invariants_hold_across_inputs() {
    let engine = PredictionEngine::default();
    let history = history();

    for category in EventCategory::ALL {
        for attendees in [1, 30, 400, 4000, 60_000] {
            for days in [1, 3, 9] {
                for weather in weathers() {
                    for environment in [Environment::Outdoor, Environment::Indoor, Environment::Mixed] {
                        let mut input = event(category, attendees, days);
                        input.environment = environment;
                        let result = engine.predict(&input, &history, weather.as_ref()).unwrap();

                        assert!(result.predicted_units >= 50);
                        assert!((CONFIDENCE_MIN..=CONFIDENCE_MAX).contains(&result.confidence));
                        assert!(
                            (WEATHER_FACTOR_MIN..=WEATHER_FACTOR_MAX).contains(&result.factor_trace.weather)
                        );
                        let sum: Decimal = result.cost_breakdown.iter().map(|(_, a)| a).sum();
                        assert_eq!(sum, result.total_costs);
                        assert_eq!(result.revenue - result.total_costs, result.profit);
                    }
                }
            }
        }
    }
}

#[test]
fn test_idempotent_through_trait_object() {
    let engine: Box<dyn Forecaster> = Box::new(PredictionEngine::default());
    let history = history();
    let weather = WeatherObservation {
        temperature_c: 21.0,
        condition: WeatherCondition::Clouds,
        wind_speed_ms: 4.0,
    };
    let input = event(EventCategory::FoodFestival, 3500, 3);

    let a = engine.predict(&input, &history, Some(&weather)).unwrap();
    let b = engine.predict(&input, &history, Some(&weather)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_franchise_reports_operator_profit_separately() {
    let engine = PredictionEngine::default();
    let mut input = event(EventCategory::FoodFestival, 4000, 2);
    input.business_model = BusinessModel::Franchise;
    input.price_per_unit = dec!(60);

    let result = engine.predict(&input, &HistoricalStore::default(), None).unwrap();
    match result.profit_allocation {
        ProfitAllocation::Franchise {
            operator_profit,
            franchisee_profit,
            ..
        } => {
            // (52 - 18) * 1750
            assert_eq!(operator_profit, dec!(59500));
            assert_eq!(franchisee_profit, result.profit);
        }
        other => panic!("unexpected allocation {other:?}"),
    }
}

#[test]
fn test_employee_operator_earns_wage_only() {
    let engine = PredictionEngine::default();
    let mut input = event(EventCategory::FoodFestival, 4000, 2);
    input.business_model = BusinessModel::Employee;

    let result = engine.predict(&input, &HistoricalStore::default(), None).unwrap();
    assert_eq!(result.profit_allocation.operator_profit(), dec!(0));
    match result.profit_allocation {
        ProfitAllocation::Employee { wage_income, .. } => {
            // 3000 own wage + 5 % of 78750
            assert_eq!(wage_income, dec!(6937.50));
        }
        other => panic!("unexpected allocation {other:?}"),
    }
}

#[test]
fn test_percentage_rental_tracks_revenue() {
    let engine = PredictionEngine::default();
    let mut input = event(EventCategory::FoodFestival, 4000, 2);
    input.rental = RentalTerms::percentage(dec!(10)).unwrap();

    let result = engine.predict(&input, &HistoricalStore::default(), None).unwrap();
    assert_eq!(result.cost_breakdown.get(CostCategory::Rental), Some(dec!(7875)));
}

#[test]
fn test_location_history_warning() {
    let engine = PredictionEngine::default();
    let mut input = event(EventCategory::FoodFestival, 4000, 2);
    input.location = "Jihlava".to_string();

    let result = engine.predict(&input, &history(), None).unwrap();
    assert!(result.warnings.contains(&DegradedInput::InsufficientLocationHistory));
    assert_eq!(result.factor_trace.location, 1.0);
}

#[test]
fn test_custom_minimum_order() {
    let mut config = Config::default();
    config.model.minimum_order_quantity = 120;
    let engine = PredictionEngine::new(config);

    let result = engine
        .predict(&event(EventCategory::Concert, 100, 1), &HistoricalStore::default(), None)
        .unwrap();
    assert_eq!(result.predicted_units, 120);
}
