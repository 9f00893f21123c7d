//! History command implementation

use super::OutputFormat;
use crate::config::Config;
use crate::event::EventCategory;
use crate::history::{DatasetStats, HistoricalEvent, HistoryFilter, HistorySource, SharedHistory};
use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;
use std::fmt::{self, Write};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Historical events (JSON array)
    #[arg(long)]
    pub history: PathBuf,

    /// Only records of this category
    #[arg(long)]
    pub category: Option<EventCategory>,

    /// Only records whose location contains this text
    #[arg(long)]
    pub location: Option<String>,

    /// Only records on or after this date (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Only records on or before this date (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Skip records without attendance or sales
    #[arg(long)]
    pub complete_only: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

impl HistoryArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let output = self.run(config).await?;
        println!("{output}");
        Ok(())
    }

    /// Load the dataset and render stats plus matching records
    pub async fn run(&self, config: &Config) -> anyhow::Result<String> {
        let history = SharedHistory::new(config.model.clone());
        let loaded = history.refresh_from(&self.history).await?;
        tracing::info!(records = loaded, path = %self.history.display(), "History loaded");

        let store = history.snapshot().await;
        let stats = store.stats();
        let records = store.filter(&self.filter());

        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&Report {
                stats: &stats,
                records: &records,
            })?),
            OutputFormat::Table => Ok(render_table(&stats, &records)?),
        }
    }

    fn filter(&self) -> HistoryFilter {
        HistoryFilter {
            category: self.category,
            location: self.location.clone(),
            date_from: self.from,
            date_to: self.to,
            complete_only: self.complete_only,
        }
    }
}

#[derive(Serialize)]
struct Report<'a> {
    stats: &'a DatasetStats,
    records: &'a [&'a HistoricalEvent],
}

fn render_table(stats: &DatasetStats, records: &[&HistoricalEvent]) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "Records:           {}", stats.total_records)?;
    writeln!(
        out,
        "Complete:          {} ({:.0}%)",
        stats.complete_records,
        stats.completion_rate * 100.0
    )?;
    let categories: Vec<&str> = stats.categories.iter().map(|c| c.as_str()).collect();
    writeln!(out, "Categories:        {}", categories.join(", "))?;
    writeln!(out, "Locations:         {}", stats.locations.len())?;
    match stats.average_attendance {
        Some(attendance) => writeln!(out, "Avg attendance:    {attendance}")?,
        None => writeln!(out, "Avg attendance:    -")?,
    }
    let top = stats.most_successful_category.map_or("-", |c| c.as_str());
    writeln!(out, "Best category:     {top}")?;
    writeln!(out)?;

    writeln!(out, "Matching records:  {}", records.len())?;
    for event in records {
        let date = event.date.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string());
        let rate = event
            .conversion_rate()
            .map(|r| format!("{:.1}%", r * 100.0))
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            out,
            "  {date:<10}  {:<18}  {:<24}  {rate:>6}",
            event.category.as_str(),
            event.location
        )?;
    }

    Ok(out.trim_end().to_string())
}
