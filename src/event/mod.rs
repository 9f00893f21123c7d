//! Event input module
//!
//! The typed request a prediction is made for, plus its validation

mod label;
mod types;
mod validate;

pub use label::{fold_label, location_key};
pub use types::{BusinessModel, Environment, EventCategory, EventInput};
pub use validate::{ValidationError, ValidationIssue};
