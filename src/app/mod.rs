mod demo;
mod timing;

use crate::graph::ProgressGraph;
use crate::progress::serialization::load_events_from_file;
use crate::progress::{ProgressEvent, SystemClock};
use crate::ui::{GraphStyle, ProgressGraphWidget};
use demo::DemoSession;
use timing::RefreshTiming;

use std::path::PathBuf;
use std::time::{Duration, Instant};

const LIVE_REFRESH_INTERVAL: Duration = Duration::from_millis(33);

enum EventSource {
    File(PathBuf),
    Demo(DemoSession<SystemClock>),
}

pub struct ViewerApp {
    source: EventSource,
    events: Vec<ProgressEvent>,
    graph: ProgressGraph,
    style: GraphStyle,
    live: bool,
    status: String,
    timing: RefreshTiming,
}

impl ViewerApp {
    pub fn new(path: Option<PathBuf>) -> Self {
        let mut app = Self {
            source: EventSource::Demo(DemoSession::new(SystemClock)),
            events: Vec::new(),
            graph: ProgressGraph::new(),
            style: GraphStyle::default(),
            live: true,
            status: String::new(),
            timing: RefreshTiming::new(LIVE_REFRESH_INTERVAL),
        };
        match path {
            Some(path) => app.load_file(path),
            None => {
                app.status = "Demo session".to_string();
                app.refresh_graph();
            }
        }
        app
    }

    fn load_file(&mut self, path: PathBuf) {
        match load_events_from_file(&path) {
            Ok(events) => {
                log::info!("Loaded {} progress events from {:?}", events.len(), path);
                self.events = events;
                self.source = EventSource::File(path);
                self.timing.reset();
                self.refresh_graph();
                self.status = self.summary();
            }
            Err(err) => {
                log::warn!("Failed to load progress events from {:?}: {}", path, err);
                self.status = format!("Failed to load {}: {}", path.display(), err);
            }
        }
    }

    fn refresh_graph(&mut self) {
        if let EventSource::Demo(demo) = &mut self.source {
            demo.tick();
            self.events = demo.events().to_vec();
        }
        self.graph.set_progress_events(&self.events, &SystemClock);
    }

    fn has_active_events(&self) -> bool {
        self.events.iter().any(|event| event.active)
    }

    fn summary(&self) -> String {
        let mut summary = format!(
            "{} events, {} rows",
            self.events.len(),
            self.graph.rows().len()
        );
        if self.graph.dropped() > 0 {
            summary.push_str(&format!(", {} dropped", self.graph.dropped()));
        }
        summary
    }

    fn handle_open_action(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Progress events", &["json"])
            .pick_file()
        else {
            return;
        };
        self.load_file(path);
    }

    fn handle_reload_action(&mut self) {
        let path = match &self.source {
            EventSource::File(path) => Some(path.clone()),
            EventSource::Demo(_) => None,
        };
        match path {
            Some(path) => self.load_file(path),
            None => {
                log::info!("Restarting demo session");
                self.source = EventSource::Demo(DemoSession::new(SystemClock));
                self.timing.reset();
                self.refresh_graph();
            }
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        let animating = self.live
            && (self.has_active_events() || matches!(self.source, EventSource::Demo(_)));
        if animating && self.timing.is_due(now) {
            self.refresh_graph();
            self.timing.mark_refreshed(now);
            if let EventSource::Demo(_) = self.source {
                self.status = self.summary();
            }
        }

        let mut open_file = false;
        let mut reload = false;

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                open_file = ui.button("Open…").clicked();
                reload = ui.button("Reload").clicked();
                ui.checkbox(&mut self.live, "Live");
                ui.separator();
                ui.label(self.status.as_str());
                if animating {
                    ui.separator();
                    ui.weak(format!("{:.0} updates/s", self.timing.refresh_rate()));
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add(ProgressGraphWidget::new(&self.graph).style(self.style));
            let rows = self.graph.rows();
            if let (Some(root), Some(span)) = (rows.first(), self.graph.span_ms()) {
                ui.add_space(4.0);
                ui.weak(format!("{}: {} ms across {} rows", root.name, span, rows.len()));
            }
        });

        if open_file {
            self.handle_open_action();
        }
        if reload {
            self.handle_reload_action();
        }

        if animating {
            ctx.request_repaint_after(self.timing.interval());
        }
    }
}

/// Open the viewer window and block until it is closed.
pub fn run(path: Option<PathBuf>) -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Progress Graph")
            .with_inner_size([1280.0, 720.0]),
        ..Default::default()
    };
    let app = ViewerApp::new(path);
    eframe::run_native(
        "Progress Graph",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
}
