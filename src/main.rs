//! Progress Graph viewer
//!
//! - `progress-graph` opens a window running a scripted demo session
//! - `progress-graph events.json` opens a window showing the given events
//! - `progress-graph events.json --dump` prints the computed bars as JSON

use clap::Parser;
use progress_graph::graph::ProgressGraph;
use progress_graph::progress::serialization::{bars_to_json, load_events_from_file};
use progress_graph::progress::SystemClock;
use std::path::PathBuf;
use std::process::ExitCode;

/// Nested progress event timing graph.
#[derive(Debug, Parser)]
#[command(name = "progress-graph", version, about)]
struct Args {
    /// Progress events JSON file; a scripted demo session runs when omitted
    events: Option<PathBuf>,

    /// Print the computed bars as JSON instead of opening a window
    #[arg(long, requires = "events")]
    dump: bool,
}

fn dump(path: PathBuf) -> ExitCode {
    let events = match load_events_from_file(&path) {
        Ok(events) => events,
        Err(err) => {
            log::error!("Failed to load {:?}: {}", path, err);
            return ExitCode::FAILURE;
        }
    };

    let mut graph = ProgressGraph::new();
    graph.set_progress_events(&events, &SystemClock);
    log::info!(
        "{} events -> {} bars ({} dropped)",
        events.len(),
        graph.bars().len(),
        graph.dropped()
    );

    match bars_to_json(graph.bars()) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("Failed to encode bars: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args = Args::parse();

    if args.dump {
        if let Some(path) = args.events {
            return dump(path);
        }
    }

    log::info!("Progress Graph viewer");
    match progress_graph::app::run(args.events) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("Viewer error: {}", err);
            ExitCode::FAILURE
        }
    }
}
