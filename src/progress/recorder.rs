use super::{Clock, ProgressEvent, ROOT_PARENT_ID};

/// Colors handed out to new events in creation order.
pub const EVENT_PALETTE: [[f32; 4]; 6] = [
    [0.95, 0.95, 0.95, 1.0],
    [0.35, 0.70, 1.00, 1.0],
    [0.45, 0.90, 0.45, 1.0],
    [1.00, 0.75, 0.30, 1.0],
    [0.90, 0.45, 0.85, 1.0],
    [1.00, 0.40, 0.40, 1.0],
];

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RecorderError {
    #[error("unknown progress event {0}")]
    UnknownEvent(u64),
    #[error("progress event {0} is already closed")]
    AlreadyClosed(u64),
}

pub type Result<T> = std::result::Result<T, RecorderError>;

/// Collects nested progress intervals as they open and close.
///
/// The root event is opened on construction and gets id 1; later events are
/// numbered sequentially. [`ProgressRecorder::events`] returns them in creation
/// order, which always lists a parent before its children.
pub struct ProgressRecorder<C: Clock> {
    clock: C,
    events: Vec<ProgressEvent>,
    next_id: u64,
}

impl<C: Clock> ProgressRecorder<C> {
    pub fn new(root_name: impl Into<String>, clock: C) -> Self {
        let mut recorder = Self {
            clock,
            events: Vec::new(),
            next_id: 1,
        };
        recorder.open(ROOT_PARENT_ID, root_name.into());
        recorder
    }

    pub fn root_id(&self) -> u64 {
        self.events[0].id
    }

    /// Open a child of `parent` starting now.
    pub fn begin(&mut self, name: impl Into<String>, parent: u64) -> Result<u64> {
        if self.index_of(parent).is_none() {
            return Err(RecorderError::UnknownEvent(parent));
        }
        Ok(self.open(parent, name.into()))
    }

    /// Close `id` at the current clock reading.
    pub fn end(&mut self, id: u64) -> Result<()> {
        let now = self.clock.now_ms();
        let index = self.index_of(id).ok_or(RecorderError::UnknownEvent(id))?;
        let event = &mut self.events[index];
        if !event.active {
            return Err(RecorderError::AlreadyClosed(id));
        }
        event.active = false;
        event.end = now.max(event.start);
        log::debug!("Closed '{}' after {} ms", event.name, event.duration_ms());
        Ok(())
    }

    pub fn set_color(&mut self, id: u64, color: [f32; 4]) -> Result<()> {
        let index = self.index_of(id).ok_or(RecorderError::UnknownEvent(id))?;
        self.events[index].color = color;
        Ok(())
    }

    pub fn is_active(&self, id: u64) -> bool {
        self.index_of(id)
            .map(|index| self.events[index].active)
            .unwrap_or(false)
    }

    pub fn events(&self) -> &[ProgressEvent] {
        &self.events
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    fn open(&mut self, parent_id: u64, name: String) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        let now = self.clock.now_ms();
        let color = EVENT_PALETTE[self.events.len() % EVENT_PALETTE.len()];
        log::debug!("Opened progress event {} '{}' under {}", id, name, parent_id);
        self.events.push(ProgressEvent {
            id,
            parent_id,
            name,
            start: now,
            end: now,
            active: true,
            color,
        });
        id
    }

    fn index_of(&self, id: u64) -> Option<usize> {
        self.events.iter().position(|event| event.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::{FixedClock, IntervalForest};

    #[test]
    fn test_root_is_open_on_creation() {
        let recorder = ProgressRecorder::new("session", FixedClock(100));
        let events = recorder.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, recorder.root_id());
        assert_eq!(events[0].parent_id, ROOT_PARENT_ID);
        assert_eq!(events[0].start, 100);
        assert!(events[0].active);
    }

    #[test]
    fn test_begin_and_end_nested() {
        let mut recorder = ProgressRecorder::new("session", FixedClock(0));
        let root = recorder.root_id();
        recorder.clock_mut().0 = 10;
        let load = recorder.begin("load", root).unwrap();
        recorder.clock_mut().0 = 15;
        let parse = recorder.begin("parse", load).unwrap();
        recorder.clock_mut().0 = 30;
        recorder.end(parse).unwrap();
        recorder.clock_mut().0 = 45;
        recorder.end(load).unwrap();

        let events = recorder.events();
        assert_eq!(events[1].parent_id, root);
        assert_eq!(events[2].parent_id, load);
        assert_eq!((events[1].start, events[1].end), (10, 45));
        assert_eq!((events[2].start, events[2].end), (15, 30));
        assert!(recorder.is_active(root));
        assert!(!recorder.is_active(parse));

        let flat = IntervalForest::build(events).flatten();
        assert_eq!(flat.len(), 3);
    }

    #[test]
    fn test_end_errors() {
        let mut recorder = ProgressRecorder::new("session", FixedClock(0));
        assert_eq!(recorder.end(77), Err(RecorderError::UnknownEvent(77)));
        assert_eq!(
            recorder.begin("child", 77),
            Err(RecorderError::UnknownEvent(77))
        );

        let child = recorder.begin("child", recorder.root_id()).unwrap();
        recorder.end(child).unwrap();
        assert_eq!(recorder.end(child), Err(RecorderError::AlreadyClosed(child)));
    }

    #[test]
    fn test_palette_cycles() {
        let mut recorder = ProgressRecorder::new("session", FixedClock(0));
        let root = recorder.root_id();
        for index in 0..EVENT_PALETTE.len() {
            recorder.begin(format!("step {}", index), root).unwrap();
        }
        let events = recorder.events();
        assert_eq!(events[0].color, EVENT_PALETTE[0]);
        assert_eq!(events[EVENT_PALETTE.len()].color, EVENT_PALETTE[0]);

        recorder.set_color(root, [0.0, 0.0, 0.0, 1.0]).unwrap();
        assert_eq!(recorder.events()[0].color, [0.0, 0.0, 0.0, 1.0]);
    }
}
