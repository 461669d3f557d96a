// Food Source entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, stdout is reserved for the board)
// 2. Load config, apply command-line view overrides
// 3. Load the prop slate
// 4. Score every prop and filter the board
// 5. Print cards, JSON or CSV

mod cli;
mod export;
mod render;

use std::path::PathBuf;

use anyhow::Context;
use foodsource_core::board;
use foodsource_core::config::{self, OutputFormat};
use foodsource_core::scoring::ScoringEngine;
use foodsource_core::slate;
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing()?;
    info!("Food Source starting up");

    let config = config::load_config().context("failed to load configuration")?;
    let view = cli::resolve_view(&config.display, std::env::args().skip(1))?;
    info!(?view, "View resolved");

    let slate_path = PathBuf::from(&config.data_paths.slate);
    let slate = slate::load_slate(&slate_path)
        .with_context(|| format!("failed to load slate from {}", slate_path.display()))?;
    info!("Loaded {} props from {}", slate.props.len(), slate_path.display());

    let engine = ScoringEngine::from_config(&config.scoring);
    let scored = board::score_slate(&slate, &engine);
    let shown = board::filter_props(&scored, view.league, view.position);
    info!("Showing {} of {} props", shown.len(), scored.len());

    let output = match view.format {
        OutputFormat::Text => render::render_board(&shown),
        OutputFormat::Json => export::to_json(&shown, chrono::Utc::now())?,
        OutputFormat::Csv => export::to_csv(&shown)?,
    };
    print!("{output}");
    if !output.ends_with('\n') {
        println!();
    }

    info!("Food Source finished");
    Ok(())
}

/// Directory for log files: the platform data dir, or `./logs` when the
/// platform has no home directory.
fn log_dir() -> anyhow::Result<PathBuf> {
    match directories::ProjectDirs::from("", "", "foodsource") {
        Some(dirs) => Ok(dirs.data_local_dir().join("logs")),
        None => Ok(std::env::current_dir()?.join("logs")),
    }
}

/// Initialize tracing to log to a file so stdout carries only the board.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt;

    let log_dir = log_dir()?;
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let log_file = std::fs::File::create(log_dir.join("foodsource.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("foodsource=info,foodsource_core=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
