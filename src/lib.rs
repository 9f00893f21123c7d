//! stand-forecast: sales prediction and cost estimation for food stands
//!
//! This library provides the core components for:
//! - Event input types, label normalization and validation
//! - Demand factors (category, calendar, duration)
//! - Weather adjustment with indoor damping
//! - Historical store with similarity-weighted conversion
//! - Business model costing (owner, employee, franchise) and rental terms
//! - Prediction engine with confidence scoring
//! - Configuration, structured logging and a CLI

pub mod business;
pub mod cli;
pub mod config;
pub mod engine;
pub mod event;
pub mod factors;
pub mod history;
pub mod telemetry;
pub mod weather;
