//! Terminal pathfinding visualizer using crossterm.
//!
//! Run: cargo run --bin pathviz -- --rows 20 --cols 40 --algorithm bfs

use std::fs::File;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use log::info;
use pathviz_core::GridConfig;
use pathviz_demo::{Visualizer, screen_size};
use pathviz_paths::Algorithm;
use pathviz_tui::{App, AppConfig, CrosstermDriver};

#[derive(Debug, Parser)]
#[command(name = "pathviz", version, about = "Watch A* and BFS search a grid")]
struct Args {
    /// Number of grid rows.
    #[arg(
        long,
        default_value_t = GridConfig::DEFAULT_ROWS,
        value_parser = clap::value_parser!(i32).range(1..=i64::from(GridConfig::MAX_DIM)),
    )]
    rows: i32,

    /// Number of grid columns.
    #[arg(
        long,
        default_value_t = GridConfig::DEFAULT_COLS,
        value_parser = clap::value_parser!(i32).range(1..=i64::from(GridConfig::MAX_DIM)),
    )]
    cols: i32,

    /// Initial search algorithm (`astar` or `bfs`).
    #[arg(long, default_value = "astar")]
    algorithm: Algorithm,

    /// Milliseconds between animation steps.
    #[arg(long = "tick-ms", default_value_t = 15)]
    tick_ms: u64,

    /// Search events revealed per animation step.
    #[arg(long = "events-per-tick", default_value_t = 1)]
    events_per_tick: usize,

    /// Leave the mouse to the terminal. Cells are then edited with the
    /// keyboard cursor.
    #[arg(long = "no-mouse")]
    no_mouse: bool,

    /// Write logs to this file. The terminal is in raw mode, so nothing is
    /// logged to stderr unless it is an error.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: Option<&PathBuf>) -> std::io::Result<()> {
    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        }
        None => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error"))
                .init();
        }
    }
    Ok(())
}

fn main() {
    let args = Args::parse();

    if let Err(e) = init_logging(args.log_file.as_ref()) {
        eprintln!("Error: cannot open log file: {e}");
        std::process::exit(1);
    }

    let config = match GridConfig::new(args.rows, args.cols) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    };
    info!(
        "starting {}x{} grid with {}",
        config.rows, config.cols, args.algorithm
    );

    let (width, height) = screen_size(config);
    let model = Visualizer::new(config, args.algorithm, args.events_per_tick);
    let mut app = App::new(AppConfig {
        model,
        driver: CrosstermDriver::new().with_mouse(!args.no_mouse),
        width,
        height,
        tick: Duration::from_millis(args.tick_ms.max(1)),
    });

    if let Err(e) = app.run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
