//! JSON history loader

use super::HistoricalEvent;
use anyhow::Context;
use std::path::Path;

/// Read a JSON array of historical events
///
/// Unknown category labels map to `other`; records missing attendance or
/// sales are kept and only excluded from conversion averages.
pub async fn load_events_json(path: &Path) -> anyhow::Result<Vec<HistoricalEvent>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read history file {}", path.display()))?;

    let events: Vec<HistoricalEvent> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse history file {}", path.display()))?;

    tracing::debug!(path = %path.display(), records = events.len(), "History file parsed");
    Ok(events)
}
