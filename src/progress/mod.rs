pub mod forest;
pub mod layout;
pub mod recorder;
pub mod serialization;

use std::time::{SystemTime, UNIX_EPOCH};

pub use forest::IntervalForest;
pub use layout::{layout_rows, GraphBar, TimeAxis, BAND_HALF_HEIGHT};
pub use recorder::{ProgressRecorder, RecorderError};

/// `parent_id` value used by events that hang directly off the root.
pub const ROOT_PARENT_ID: u64 = 0;

pub const DEFAULT_EVENT_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

fn default_event_color() -> [f32; 4] {
    DEFAULT_EVENT_COLOR
}

/// One named, optionally nested interval of tracked work.
///
/// Timestamps are milliseconds. While `active` is set the stored `end` is a
/// placeholder and the interval is treated as ending "now".
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProgressEvent {
    pub id: u64,
    pub parent_id: u64,
    pub name: String,
    pub start: i64,
    pub end: i64,
    #[serde(default)]
    pub active: bool,
    #[serde(default = "default_event_color")]
    pub color: [f32; 4],
}

impl ProgressEvent {
    pub fn new(id: u64, parent_id: u64, name: impl Into<String>, start: i64, end: i64) -> Self {
        Self {
            id,
            parent_id,
            name: name.into(),
            start,
            end,
            active: false,
            color: DEFAULT_EVENT_COLOR,
        }
    }

    pub fn active(mut self) -> Self {
        self.active = true;
        self
    }

    /// End used for display: `now` for active events, the stored end otherwise.
    pub fn effective_end(&self, now: i64) -> i64 {
        if self.active {
            now
        } else {
            self.end
        }
    }

    /// Saturates instead of overflowing on extreme timestamps.
    pub fn duration_ms(&self) -> i64 {
        self.end.saturating_sub(self.start)
    }
}

/// Source of the "current time" reading, in milliseconds.
pub trait Clock {
    fn now_ms(&self) -> i64;
}

/// Wall clock, milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as i64)
            .unwrap_or(0)
    }
}

/// Clock frozen at a given reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_ms(&self) -> i64 {
        self.0
    }
}
