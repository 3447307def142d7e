use crate::progress::{GraphBar, ProgressEvent};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SerializationError>;

pub fn save_events_to_file(events: &[ProgressEvent], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(events)?;
    std::fs::write(path, json)?;
    Ok(())
}

pub fn load_events_from_file(path: &Path) -> Result<Vec<ProgressEvent>> {
    let json = std::fs::read_to_string(path)?;
    let events: Vec<ProgressEvent> = serde_json::from_str(&json)?;
    Ok(events)
}

pub fn bars_to_json(bars: &[GraphBar]) -> Result<String> {
    Ok(serde_json::to_string_pretty(bars)?)
}
