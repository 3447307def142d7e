//! Progress events graph state.
//!
//! Every call to [`ProgressGraph::set_progress_events`] rebuilds the interval
//! tree from scratch and replaces the previous layout. Bars are kept in draw
//! order so a picked bar's `row` indexes straight back into [`ProgressGraph::rows`].

use crate::progress::{layout_rows, Clock, GraphBar, IntervalForest, ProgressEvent, TimeAxis};

#[derive(Debug, Default)]
pub struct ProgressGraph {
    bars: Vec<GraphBar>,
    rows: Vec<ProgressEvent>,
    axis: Option<TimeAxis>,
    dropped: usize,
}

impl ProgressGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_progress_events(&mut self, events: &[ProgressEvent], clock: &dyn Clock) {
        let now = clock.now_ms();
        let forest = IntervalForest::build(events);
        let bars = layout_rows(&forest.flatten(), now);

        self.dropped = forest.dropped();
        self.rows = bars.iter().map(|bar| bar.event.clone()).collect();
        self.axis = TimeAxis::from_rows(&self.rows);
        self.bars = bars;

        if self.dropped > 0 {
            log::debug!(
                "Progress graph: {} events in, {} rows, {} dropped (parent missing)",
                events.len(),
                self.rows.len(),
                self.dropped
            );
        } else {
            log::trace!(
                "Progress graph: {} events in, {} rows",
                events.len(),
                self.rows.len()
            );
        }
    }

    pub fn bars(&self) -> &[GraphBar] {
        &self.bars
    }

    /// Flattened events in draw order, with active ends set to the layout time.
    pub fn rows(&self) -> &[ProgressEvent] {
        &self.rows
    }

    pub fn event_at_row(&self, row: usize) -> Option<&ProgressEvent> {
        self.rows.get(row)
    }

    /// Row of the first bar (in draw order) containing the normalized point.
    pub fn pick(&self, x: f32, y: f32) -> Option<usize> {
        self.bars
            .iter()
            .find(|bar| bar.contains(x, y))
            .map(|bar| bar.row)
    }

    pub fn tooltip_at(&self, x: f32, y: f32) -> Option<String> {
        let row = self.pick(x, y)?;
        self.event_at_row(row).map(tooltip_text)
    }

    /// Milliseconds between the earliest start and the latest end on screen.
    pub fn span_ms(&self) -> Option<i64> {
        let start = self.rows.iter().map(|row| row.start).min()?;
        let end = self.rows.iter().map(|row| row.end).max()?;
        Some(end.saturating_sub(start))
    }

    /// Milliseconds from the start of the axis to normalized position `x`.
    pub fn elapsed_at(&self, x: f32) -> Option<i64> {
        let axis = self.axis?;
        Some(axis.from_fraction(x).saturating_sub(axis.min))
    }

    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

pub fn tooltip_text(event: &ProgressEvent) -> String {
    let mut text = format!("{}: {} ms", event.name, event.duration_ms());
    if event.active {
        text.push_str(" (active)");
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::{FixedClock, ROOT_PARENT_ID};

    fn nested_events() -> Vec<ProgressEvent> {
        vec![
            ProgressEvent::new(1, ROOT_PARENT_ID, "frame", 0, 100),
            ProgressEvent::new(2, 1, "cull", 10, 40),
            ProgressEvent::new(3, 1, "draw", 50, 90),
        ]
    }

    #[test]
    fn test_set_progress_events_rebuilds() {
        let mut graph = ProgressGraph::new();
        graph.set_progress_events(&nested_events(), &FixedClock(0));
        assert_eq!(graph.bars().len(), 3);

        graph.set_progress_events(&nested_events()[..1], &FixedClock(0));
        assert_eq!(graph.bars().len(), 1);
        assert_eq!(graph.rows().len(), 1);

        graph.set_progress_events(&[], &FixedClock(0));
        assert!(graph.is_empty());
        assert!(graph.rows().is_empty());
    }

    #[test]
    fn test_pick_maps_back_to_event() {
        let mut graph = ProgressGraph::new();
        graph.set_progress_events(&nested_events(), &FixedClock(0));

        let draw_y = 1.0 - 2.0 / 3.0;
        let row = graph.pick(0.7, draw_y).unwrap();
        assert_eq!(graph.event_at_row(row).map(|event| event.id), Some(3));

        assert_eq!(graph.pick(0.45, draw_y), None);
        let root = graph.pick(0.5, 1.0).and_then(|row| graph.event_at_row(row));
        assert_eq!(root.map(|event| event.id), Some(1));
        assert_eq!(graph.span_ms(), Some(100));
    }

    #[test]
    fn test_tooltip_text() {
        let mut graph = ProgressGraph::new();
        let mut events = nested_events();
        events.push(ProgressEvent::new(4, 3, "upload", 60, 0).active());
        graph.set_progress_events(&events, &FixedClock(120));

        assert_eq!(graph.elapsed_at(0.5), Some(60));
        assert_eq!(graph.tooltip_at(0.5, 1.0).as_deref(), Some("frame: 100 ms"));

        let upload = graph.rows().iter().position(|event| event.id == 4).unwrap();
        let bar = &graph.bars()[upload];
        let tooltip = graph.tooltip_at(bar.right() - 0.01, bar.center_y());
        assert_eq!(tooltip.as_deref(), Some("upload: 60 ms (active)"));
    }

    #[test]
    fn test_dropped_events_are_counted() {
        let mut graph = ProgressGraph::new();
        let events = vec![
            ProgressEvent::new(1, ROOT_PARENT_ID, "root", 0, 10),
            ProgressEvent::new(3, 2, "early child", 2, 4),
            ProgressEvent::new(2, 1, "late parent", 1, 5),
        ];
        graph.set_progress_events(&events, &FixedClock(0));
        assert_eq!(graph.dropped(), 1);
        let ids: Vec<u64> = graph.rows().iter().map(|event| event.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_degenerate_range_clears_previous_output() {
        let mut graph = ProgressGraph::new();
        graph.set_progress_events(&nested_events(), &FixedClock(0));
        graph.set_progress_events(
            &[ProgressEvent::new(1, ROOT_PARENT_ID, "instant", 7, 7)],
            &FixedClock(0),
        );
        assert!(graph.is_empty());
        assert_eq!(graph.tooltip_at(0.5, 1.0), None);
        assert_eq!(graph.elapsed_at(0.5), None);
    }

    #[test]
    fn test_full_i64_span_from_file_data() {
        let events: Vec<ProgressEvent> = serde_json::from_str(
            r#"[{"id":1,"parent_id":0,"name":"wide","start":-9223372036854775808,"end":9223372036854775807}]"#,
        )
        .unwrap();
        let mut graph = ProgressGraph::new();
        graph.set_progress_events(&events, &FixedClock(0));

        assert_eq!(graph.bars().len(), 1);
        assert_eq!(graph.span_ms(), Some(i64::MAX));
        assert_eq!(graph.elapsed_at(1.0), Some(i64::MAX));
        assert_eq!(
            graph.tooltip_at(0.5, 1.0).as_deref(),
            Some("wide: 9223372036854775807 ms")
        );
    }
}
