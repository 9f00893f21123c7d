//! CLI interface for stand-forecast
//!
//! Provides subcommands for:
//! - `predict`: Predict sales and costs for one event
//! - `history`: Summarize a historical dataset
//! - `config`: Show the effective configuration

mod history;
mod predict;

pub use history::HistoryArgs;
pub use predict::PredictArgs;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "stand-forecast")]
#[command(about = "Sales prediction and cost estimation for food stands at events")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Predict sales, costs and profit for an event
    Predict(PredictArgs),
    /// Show statistics and records of a historical dataset
    History(HistoryArgs),
    /// Show the effective configuration
    Config,
}

/// Output rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}
