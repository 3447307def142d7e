//! Progress Graph - nested progress event reconstruction and timing graph
//!
//! Rebuilds the parent/child nesting of a flat list of timed progress events,
//! lays the rows out as stacked bars on a shared normalized time axis, and
//! draws them with egui.

pub mod app;
pub mod graph;
pub mod progress;
pub mod ui;
