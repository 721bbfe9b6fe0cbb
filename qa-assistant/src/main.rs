//! qa-assistant: AI-assisted QA workspace in the terminal.
//!
//! Entry point for the `qa-assistant` binary. Wires together configuration,
//! file logging, the persisted session store (`qa-assistant-core`), the
//! analysis worker thread, the terminal lifecycle (`tui`), and the unified
//! event bus (`event`).
//!
//! # Startup sequence
//!
//! 1. Parse the command line and load `config.toml`.
//! 2. Create the data directory and start file logging.
//! 3. Open the session store and restore the navigator. Errors here are
//!    returned before the terminal is touched.
//! 4. Spawn the analysis worker thread.
//! 5. `install_panic_hook()`, `register_sigterm()`, `init_tui()`.
//! 6. Spawn the event task and run the loop.
//!
//! `restore_tui()` runs after the loop exits on every path (quit key,
//! SIGTERM, channel close, draw error). The panic hook covers panics.

mod analysis;
mod app;
mod config;
mod event;
mod forms;
mod logging;
mod theme;
mod tui;
mod ui;

use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::time::{Duration, Instant};

use clap::Parser;
use qa_assistant_core::db::SqliteStore;
use qa_assistant_core::nav::Navigator;
use qa_assistant_core::store::{KeyValueStore, MemoryStore};

use analysis::AnalysisClient;
use ui::keybindings::KeyAction;

/// qa-assistant: AI-assisted QA workspace
#[derive(Parser, Debug)]
#[command(name = "qa-assistant")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (default: $XDG_CONFIG_HOME/qa-assistant/config.toml)
    #[arg(long, env = "QA_ASSISTANT_CONFIG")]
    config: Option<PathBuf>,

    /// Directory for the session database and log file
    #[arg(long, env = "QA_ASSISTANT_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Keep the session in memory only; nothing is written to disk
    #[arg(long)]
    ephemeral: bool,
}

/// Session database file name inside the data directory.
const DB_FILE: &str = "qa-assistant.db";
/// Log file name inside the data directory.
const LOG_FILE: &str = "qa-assistant.log";

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);
    let (config, config_warning) = config::load_config(&config_path);

    let data_dir = cli
        .data_dir
        .clone()
        .or_else(|| config.data_dir.clone())
        .unwrap_or_else(config::default_data_dir);
    std::fs::create_dir_all(&data_dir)?;
    logging::init(&data_dir.join(LOG_FILE), &config.log_level)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        data_dir = %data_dir.display(),
        ephemeral = cli.ephemeral,
        "qa-assistant starting"
    );
    if let Some(warning) = config_warning {
        tracing::warn!("{warning}");
    }

    let store: Box<dyn KeyValueStore> = if cli.ephemeral {
        Box::new(MemoryStore::new())
    } else {
        let db_path = data_dir.join(DB_FILE);
        let store = SqliteStore::open(&db_path).map_err(|e| {
            tracing::error!(path = %db_path.display(), error = %e, "could not open session store");
            std::io::Error::other(e)
        })?;
        Box::new(store)
    };
    let nav = Navigator::restore(store);

    let handler = event::EventHandler::new();
    let mut rx = handler.rx;

    let (job_tx, job_rx) = crossbeam_channel::unbounded();
    let worker_event_tx = handler.tx.clone();
    let delays = config.worker_delays();
    std::thread::Builder::new()
        .name("analysis-worker".into())
        .spawn(move || analysis::worker::analysis_worker_loop(job_rx, worker_event_tx, delays))?;

    let mut app = app::App::new(
        nav,
        AnalysisClient::new(job_tx),
        theme::Theme::from_name(&config.theme),
        config.analysis_timeout(),
    );

    tui::install_panic_hook();
    let term_flag = tui::register_sigterm()?;
    let mut terminal = tui::init_tui()?;
    event::spawn_event_task(handler.tx.clone());

    // Exits only via `break` so `restore_tui()` below is always reached.
    let loop_result: std::io::Result<()> = 'event_loop: loop {
        tokio::select! {
            // Heartbeat: SIGTERM is checked at least every 50ms even when no
            // other event arrives.
            _ = tokio::time::sleep(Duration::from_millis(50)) => {
                if term_flag.load(Ordering::Relaxed) {
                    tracing::info!("SIGTERM received");
                    break 'event_loop Ok(());
                }
            }
            maybe_event = rx.recv() => {
                let Some(event) = maybe_event else {
                    break 'event_loop Ok(());
                };
                match event {
                    event::AppEvent::Render => {
                        // Exactly one draw() call per Render event.
                        if let Err(e) = terminal.draw(|frame| ui::render(frame, &app)) {
                            break 'event_loop Err(e);
                        }
                    }
                    event::AppEvent::Tick => app.on_tick(Instant::now()),
                    event::AppEvent::Key(key) => {
                        if ui::keybindings::handle_key(key, &mut app) == KeyAction::Quit {
                            break 'event_loop Ok(());
                        }
                    }
                    event::AppEvent::Mouse(mouse) => {
                        ui::keybindings::handle_mouse(mouse, &mut app);
                    }
                    event::AppEvent::Paste(text) => app.paste(&text),
                    event::AppEvent::Analysis(result) => app.apply_analysis_event(*result),
                    // ratatui picks up the new size from frame.area() on the next Render.
                    event::AppEvent::Resize => {}
                }
                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop Ok(());
                }
            }
        }
    };

    tui::restore_tui()?;
    if let Err(e) = &loop_result {
        tracing::error!(error = %e, "event loop failed");
    }
    tracing::info!("qa-assistant exiting");
    loop_result
}
