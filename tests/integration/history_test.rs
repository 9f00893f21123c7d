//! Historical data integration tests

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use stand_forecast::business::RentalTerms;
use stand_forecast::config::ModelConfig;
use stand_forecast::event::{BusinessModel, Environment, EventCategory, EventInput};
use stand_forecast::history::{load_events_json, HistoricalEvent, HistorySource, SharedHistory};
use std::io::Write;
use tempfile::NamedTempFile;

fn request(location: &str, attendees: u64) -> EventInput {
    EventInput {
        name: None,
        category: EventCategory::FoodFestival,
        expected_attendees: attendees,
        duration_days: 1,
        environment: Environment::Outdoor,
        location: location.to_string(),
        start_date: NaiveDate::from_ymd_opt(2025, 6, 12).unwrap(),
        time: None,
        business_model: BusinessModel::Owner,
        price_per_unit: dec!(45),
        cost_per_unit: dec!(18),
        transport_cost: dec!(0),
        other_fixed_costs: dec!(0),
        rental: RentalTerms::default(),
    }
}

fn write_history(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn test_similarity_from_spreadsheet_export() {
    let file = write_history(
        r#"[
            {"name": "Food fest 2023", "category": "Food Festival", "location": "Praha, Výstaviště", "attendees": 1000, "actual_sales": 240, "date": "2023-06-10"},
            {"name": "Food fest 2024", "category": "food_festival", "location": "PRAHA", "attendees": 1100, "actual_sales": 280, "date": "2024-06-08"},
            {"name": "Dýňobraní", "category": "Rodinný festival", "location": "Kutná Hora", "attendees": 2500, "actual_sales": 300}
        ]"#,
    );

    let shared = SharedHistory::new(ModelConfig::default());
    assert_eq!(shared.refresh_from(file.path()).await.unwrap(), 3);

    let store = shared.snapshot().await;
    let input = request("Praha", 1050);
    let similar = store.find_similar(&input);

    assert_eq!(similar.len(), 2);
    assert!(similar.iter().all(|s| s.score == 6));
    assert_eq!(store.location_matches(&input), 2);
}

#[tokio::test]
async fn test_incomplete_rows_counted_but_not_averaged() {
    let file = write_history(
        r#"[
            {"category": "koncert", "location": "Brno", "attendees": 2000, "actual_sales": 100},
            {"category": "koncert", "location": "Brno", "attendees": 2000},
            {"category": "koncert", "location": "Brno", "actual_sales": 90},
            {"category": "koncert", "location": "Brno", "attendees": 0, "actual_sales": 0}
        ]"#,
    );

    let events = load_events_json(file.path()).await.unwrap();
    let shared = SharedHistory::new(ModelConfig::default());
    shared.replace(events).await;

    let store = shared.snapshot().await;
    let stats = store.stats();
    assert_eq!(stats.total_records, 4);
    assert_eq!(stats.complete_records, 1);
    assert!((store.overall_average_conversion() - 0.05).abs() < 1e-12);
}

#[tokio::test]
async fn test_reload_keeps_old_snapshot_intact() {
    let shared = SharedHistory::new(ModelConfig::default());
    shared
        .replace(vec![HistoricalEvent::new(EventCategory::FoodFestival, "Praha", 1000, 500, None)])
        .await;
    let old = shared.snapshot().await;

    let file = write_history(
        r#"[{"category": "food_festival", "location": "Praha", "attendees": 1000, "actual_sales": 100}]"#,
    );
    shared.refresh_from(file.path()).await.unwrap();
    let new = shared.snapshot().await;

    let input = request("Praha", 1000);
    // 0.5 / 0.25 and 0.1 / 0.25
    assert!((old.weighted_historical_factor(&input) - 2.0).abs() < 1e-9);
    assert!((new.weighted_historical_factor(&input) - 0.4).abs() < 1e-9);
}

#[tokio::test]
async fn test_failed_reload_keeps_current_data() {
    let shared = SharedHistory::new(ModelConfig::default());
    shared
        .replace(vec![HistoricalEvent::new(EventCategory::Other, "Tábor", 500, 60, None)])
        .await;

    let broken = write_history("[{\"category\": ");
    assert!(shared.refresh_from(broken.path()).await.is_err());
    assert_eq!(shared.snapshot().await.len(), 1);
}

#[tokio::test]
async fn test_czech_sheet_cells_load() {
    let file = write_history(
        r#"[
            {"category": "Food festival", "location": "Praha", "attendees": "1 000", "actual_sales": "250", "date": "10.06.2023"},
            {"category": "Food festival", "location": "Praha", "attendees": 1100.0, "actual_sales": "", "date": "8. 6. 2024"}
        ]"#,
    );

    let events = load_events_json(file.path()).await.unwrap();
    assert_eq!(events[0].attendees, Some(1000));
    assert_eq!(events[0].date, NaiveDate::from_ymd_opt(2023, 6, 10));
    assert_eq!(events[1].actual_sales, None);
    assert_eq!(events[1].date, NaiveDate::from_ymd_opt(2024, 6, 8));

    let shared = SharedHistory::new(ModelConfig::default());
    shared.replace(events).await;
    let store = shared.snapshot().await;
    let input = request("Praha", 1050);

    assert_eq!(store.find_similar(&input).len(), 2);
    assert_eq!(store.similar_with_sales(&input), 1);
    assert_eq!(store.stats().average_attendance, Some(1050));
}
