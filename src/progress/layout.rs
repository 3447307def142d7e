//! Shared time axis and stacked bar geometry for flattened progress rows.

use super::ProgressEvent;
use glam::Vec3;

/// Half-height of a row band, as a fraction of one row's pitch.
pub const BAND_HALF_HEIGHT: f32 = 0.1;

/// `[min, max]` timestamp range mapped onto `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeAxis {
    pub min: i64,
    pub max: i64,
}

impl TimeAxis {
    /// Axis spanning every row, or `None` when the range collapses (`max <= min`).
    pub fn from_rows(rows: &[ProgressEvent]) -> Option<Self> {
        let min = rows.iter().map(|row| row.start).min()?;
        let max = rows.iter().map(|row| row.end).max()?;
        if max <= min {
            return None;
        }
        Some(Self { min, max })
    }

    /// Width of the axis; widened so spans past `i64::MAX` still fit.
    pub fn range(&self) -> i128 {
        self.max as i128 - self.min as i128
    }

    pub fn to_fraction(&self, t: i64) -> f32 {
        ((t as i128 - self.min as i128) as f64 / self.range() as f64) as f32
    }

    /// Timestamp at `fraction` along the axis, clamped to `[min, max]`.
    pub fn from_fraction(&self, fraction: f32) -> i64 {
        let offset = (fraction.clamp(0.0, 1.0) as f64 * self.range() as f64).round() as i128;
        (self.min as i128 + offset).clamp(self.min as i128, self.max as i128) as i64
    }
}

/// Top and bottom edges of row `index` out of `count` rows.
///
/// Rows are centered at `1 - index / count`, root at the top.
pub fn row_band(index: usize, count: usize) -> (f32, f32) {
    let n = count.max(1) as f32;
    let i = index as f32;
    let top = 1.0 - (i - BAND_HALF_HEIGHT) / n;
    let bottom = 1.0 - (i + BAND_HALF_HEIGHT) / n;
    (top, bottom)
}

/// One drawable rectangle, with the flattened event it came from.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct GraphBar {
    #[serde(skip)]
    pub event: ProgressEvent,
    /// Closed loop: top-left, top-right, bottom-right, bottom-left.
    pub points: [Vec3; 4],
    pub color: [f32; 4],
    /// Index into the flattened rows, for mapping a picked bar back to its event.
    pub row: usize,
}

impl GraphBar {
    pub fn left(&self) -> f32 {
        self.points[0].x
    }

    pub fn right(&self) -> f32 {
        self.points[1].x
    }

    pub fn top(&self) -> f32 {
        self.points[0].y
    }

    pub fn bottom(&self) -> f32 {
        self.points[2].y
    }

    pub fn center_y(&self) -> f32 {
        (self.top() + self.bottom()) * 0.5
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        let (x0, x1) = if self.left() <= self.right() {
            (self.left(), self.right())
        } else {
            (self.right(), self.left())
        };
        x >= x0 && x <= x1 && y <= self.top() && y >= self.bottom()
    }
}

/// Lay out pre-ordered rows as stacked bars on a shared normalized time axis.
///
/// Active rows have their end replaced by `now` in the returned bars; the
/// slice itself is untouched. Returns nothing when the rows span no time.
pub fn layout_rows(rows: &[ProgressEvent], now: i64) -> Vec<GraphBar> {
    let rows: Vec<ProgressEvent> = rows
        .iter()
        .map(|row| {
            let mut row = row.clone();
            row.end = row.effective_end(now);
            row
        })
        .collect();

    let Some(axis) = TimeAxis::from_rows(&rows) else {
        return Vec::new();
    };

    let count = rows.len();
    rows.into_iter()
        .enumerate()
        .map(|(index, event)| {
            let (top, bottom) = row_band(index, count);
            let x0 = axis.to_fraction(event.start);
            let x1 = axis.to_fraction(event.end);
            GraphBar {
                points: [
                    Vec3::new(x0, top, 0.0),
                    Vec3::new(x1, top, 0.0),
                    Vec3::new(x1, bottom, 0.0),
                    Vec3::new(x0, bottom, 0.0),
                ],
                color: event.color,
                row: index,
                event,
            }
        })
        .collect()
}
