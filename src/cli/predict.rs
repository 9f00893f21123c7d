//! Predict command implementation

use super::OutputFormat;
use crate::config::Config;
use crate::engine::{PredictionEngine, PredictionResult};
use crate::event::EventInput;
use crate::history::{HistorySource, SharedHistory};
use crate::weather::WeatherObservation;
use anyhow::Context;
use clap::Args;
use rust_decimal::Decimal;
use std::fmt::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct PredictArgs {
    /// Event description (JSON)
    #[arg(short, long)]
    pub event: PathBuf,

    /// Historical events (JSON array)
    #[arg(long)]
    pub history: Option<PathBuf>,

    /// Weather observation or forecast (JSON)
    #[arg(short, long)]
    pub weather: Option<PathBuf>,

    /// One-way distance to the venue in km; replaces the event's transport cost
    #[arg(long)]
    pub distance_km: Option<Decimal>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

impl PredictArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let output = self.run(config).await?;
        println!("{output}");
        Ok(())
    }

    /// Run the prediction and render it
    pub async fn run(&self, config: &Config) -> anyhow::Result<String> {
        let engine = PredictionEngine::new(config.clone());

        let mut input: EventInput = read_json(&self.event).await?;
        if let Some(km) = self.distance_km {
            input.transport_cost = engine.business().transport_cost_for_distance(km)?;
            tracing::info!(km = %km, transport_cost = %input.transport_cost, "Transport cost from distance");
        }

        let history = SharedHistory::new(config.model.clone());
        if let Some(path) = &self.history {
            history.refresh_from(path).await?;
        }
        let snapshot = history.snapshot().await;

        let weather: Option<WeatherObservation> = match &self.weather {
            Some(path) => Some(read_json(path).await?),
            None => None,
        };

        let result = engine.predict(&input, &snapshot, weather.as_ref())?;
        tracing::info!(
            units = result.predicted_units,
            profit = %result.profit,
            confidence = result.confidence,
            "Prediction complete"
        );

        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&result)?),
            OutputFormat::Table => Ok(render_table(&input, &result)?),
        }
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}

fn render_table(input: &EventInput, result: &PredictionResult) -> Result<String, fmt::Error> {
    let mut out = String::new();
    let trace = &result.factor_trace;

    writeln!(
        out,
        "Event: {} ({}, {} attendees, {} day(s))",
        input.name.as_deref().unwrap_or("unnamed"),
        input.category,
        input.expected_attendees,
        input.duration_days
    )?;
    writeln!(out, "Predicted units:   {}", result.predicted_units)?;
    writeln!(out, "Confidence:        {}%", result.confidence)?;
    writeln!(out, "Similar events:    {}", result.similar_events)?;
    writeln!(out, "Weather impact:    {}", result.weather_impact.label())?;
    writeln!(out)?;

    writeln!(out, "Factors")?;
    for (name, value) in [
        ("duration", trace.duration),
        ("weather", trace.weather),
        ("historical", trace.historical),
        ("location", trace.location),
        ("category", trace.category),
        ("day of week", trace.day_of_week),
        ("time of day", trace.time_of_day),
        ("combined", trace.combined),
    ] {
        writeln!(out, "  {name:<14} {value:>8.3}")?;
    }
    if trace.floored {
        writeln!(out, "  raised from {} to the minimum order", trace.raw_units)?;
    }
    writeln!(out)?;

    writeln!(out, "Revenue:           {}", result.revenue)?;
    for (category, amount) in result.cost_breakdown.iter() {
        writeln!(out, "  {:<20} {amount:>12}", category.as_str())?;
    }
    writeln!(out, "Total costs:       {}", result.total_costs)?;
    writeln!(out, "Profit:            {} ({}%)", result.profit, result.profit_margin)?;
    writeln!(out, "Operator profit:   {}", result.profit_allocation.operator_profit())?;
    match result.break_even_units {
        Some(units) => writeln!(out, "Break-even:        {units} units")?,
        None => writeln!(out, "Break-even:        never (unit margin is not positive)")?,
    }

    for warning in &result.warnings {
        writeln!(out, "warning: {warning}")?;
    }

    Ok(out.trim_end().to_string())
}
