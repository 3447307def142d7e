use crate::progress::{Clock, ProgressEvent, ProgressRecorder};

struct DemoStep {
    name: &'static str,
    /// Index of the parent step; `None` hangs the step off the root.
    parent: Option<usize>,
    begin_ms: i64,
    end_ms: i64,
}

const DEMO_STEPS: &[DemoStep] = &[
    DemoStep { name: "startup", parent: None, begin_ms: 0, end_ms: 1200 },
    DemoStep { name: "load config", parent: Some(0), begin_ms: 50, end_ms: 300 },
    DemoStep { name: "compile shaders", parent: Some(0), begin_ms: 300, end_ms: 1100 },
    DemoStep { name: "shader batch A", parent: Some(2), begin_ms: 320, end_ms: 700 },
    DemoStep { name: "shader batch B", parent: Some(2), begin_ms: 700, end_ms: 1050 },
    DemoStep { name: "stream assets", parent: None, begin_ms: 1200, end_ms: 4000 },
    DemoStep { name: "textures", parent: Some(5), begin_ms: 1250, end_ms: 3000 },
    DemoStep { name: "meshes", parent: Some(5), begin_ms: 1500, end_ms: 3800 },
];

/// Scripted recorder session shown when the viewer starts without a file.
pub struct DemoSession<C: Clock> {
    recorder: ProgressRecorder<C>,
    started_at: i64,
    step_ids: Vec<Option<u64>>,
}

impl<C: Clock> DemoSession<C> {
    pub fn new(clock: C) -> Self {
        let recorder = ProgressRecorder::new("demo session", clock);
        let started_at = recorder.events()[0].start;
        Self {
            recorder,
            started_at,
            step_ids: vec![None; DEMO_STEPS.len()],
        }
    }

    /// Open and close scripted steps whose time has come.
    pub fn tick(&mut self) {
        let elapsed = self.recorder.clock().now_ms() - self.started_at;

        for (index, step) in DEMO_STEPS.iter().enumerate() {
            if self.step_ids[index].is_none() && elapsed >= step.begin_ms {
                let parent = match step.parent {
                    Some(parent) => match self.step_ids[parent] {
                        Some(id) => id,
                        None => continue,
                    },
                    None => self.recorder.root_id(),
                };
                match self.recorder.begin(step.name, parent) {
                    Ok(id) => self.step_ids[index] = Some(id),
                    Err(err) => log::warn!("Demo step '{}' not started: {}", step.name, err),
                }
            }
        }

        for (index, step) in DEMO_STEPS.iter().enumerate() {
            let Some(id) = self.step_ids[index] else {
                continue;
            };
            if elapsed >= step.end_ms && self.recorder.is_active(id) {
                if let Err(err) = self.recorder.end(id) {
                    log::warn!("Demo step '{}' not closed: {}", step.name, err);
                }
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.step_ids
            .iter()
            .all(|id| id.map(|id| !self.recorder.is_active(id)).unwrap_or(false))
    }

    pub fn events(&self) -> &[ProgressEvent] {
        self.recorder.events()
    }

    #[cfg(test)]
    fn recorder_mut(&mut self) -> &mut ProgressRecorder<C> {
        &mut self.recorder
    }
}
