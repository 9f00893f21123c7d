//! End-to-end integration tests

use stand_forecast::cli::{HistoryArgs, OutputFormat, PredictArgs};
use stand_forecast::config::Config;
use stand_forecast::engine::{DegradedInput, PredictionResult};
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

#[test]
fn test_config_example_loads() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config.toml.example");
    let config = Config::load(&path).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_config_roundtrips_through_toml() {
    let config = Config::default();
    let rendered = toml::to_string_pretty(&config).unwrap();
    let parsed: Config = toml::from_str(&rendered).unwrap();
    assert_eq!(parsed, config);
}

#[tokio::test]
async fn test_predict_with_history_and_weather() {
    let dir = TempDir::new().unwrap();
    let event = write(
        &dir,
        "event.json",
        r#"{
            "name": "Chocolate festival",
            "category": "chocolate_festival",
            "expected_attendees": 6000,
            "duration_days": 3,
            "environment": "mixed",
            "location": "Olomouc, Horní náměstí",
            "start_date": "2025-10-03",
            "time": "11:00",
            "business_model": "franchisee",
            "price_per_unit": 49,
            "cost_per_unit": 17.5,
            "other_fixed_costs": 800,
            "rental": {"model": "mixed", "fixed_amount": 2000, "percent_of_revenue": 8}
        }"#,
    );
    let history = write(
        &dir,
        "history.json",
        r#"[
            {"category": "chocolate_festival", "location": "Olomouc", "attendees": 5000, "actual_sales": 1600},
            {"category": "chocolate_festival", "location": "Olomouc", "attendees": 7000, "actual_sales": 2000},
            {"category": "food_festival", "location": "Brno", "attendees": 4000, "actual_sales": 900}
        ]"#,
    );
    let weather = write(
        &dir,
        "weather.json",
        r#"{"temperature_c": 30.5, "condition": "clear", "wind_speed_ms": 2.0}"#,
    );

    let args = PredictArgs {
        event,
        history: Some(history),
        weather: Some(weather),
        distance_km: Some(rust_decimal::Decimal::from(75)),
        format: OutputFormat::Json,
    };
    let output = args.run(&Config::default()).await.unwrap();
    let result: PredictionResult = serde_json::from_str(&output).unwrap();

    assert!(result.predicted_units >= 50);
    assert_eq!(result.similar_events, 2);
    assert!(result.warnings.contains(&DegradedInput::QualityRisk));
    assert!(!result.warnings.contains(&DegradedInput::MissingWeather));
    assert!(result.confidence > 45);
    let sum: rust_decimal::Decimal = result.cost_breakdown.iter().map(|(_, a)| a).sum();
    assert_eq!(sum, result.total_costs);
}

#[tokio::test]
async fn test_history_command_filters() {
    let dir = TempDir::new().unwrap();
    let history = write(
        &dir,
        "history.json",
        r#"[
            {"category": "food_festival", "location": "Praha", "attendees": 3000, "actual_sales": 700, "date": "2024-05-01"},
            {"category": "food_festival", "location": "Praha", "attendees": 3000, "actual_sales": 650, "date": "2024-09-01"},
            {"category": "veletrh", "location": "Brno", "attendees": 9000, "actual_sales": 500, "date": "2024-06-01"}
        ]"#,
    );

    let args = HistoryArgs {
        history,
        category: Some("food festival".parse().unwrap()),
        location: None,
        from: Some("2024-06-01".parse().unwrap()),
        to: None,
        complete_only: false,
        format: OutputFormat::Json,
    };
    let output = args.run(&Config::default()).await.unwrap();
    let report: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(report["records"].as_array().unwrap().len(), 1);
    assert_eq!(report["stats"]["complete_records"], 3);
}
