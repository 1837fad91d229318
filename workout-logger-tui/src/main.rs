// workout-logger-tui/src/main.rs
use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{io, path::PathBuf, sync::Arc, time::Duration};
use tracing::{info, warn};
use workout_logger_lib::{config, logging, HttpGateway, StandardColor};

mod app; // Application state
mod terminal; // Raw mode setup and restore
mod ui; // UI rendering logic

use crate::app::{actions::Dispatcher, App};

#[derive(Parser, Debug)]
#[command(author, version, about = "Terminal client for logging workouts against a workout API")]
struct Args {
    /// Base URL of the workout API (overrides WORKOUT_LOGGER_API_URL and the config file)
    #[arg(long)]
    api_url: Option<String>,

    /// Write logs here instead of the default file next to the config
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    config::load_environment();

    let config_path = config::get_config_path().context("Failed to locate config file")?;
    let config = config::load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    let log_path = match args.log_file {
        Some(path) => path,
        None => config::get_log_path().context("Failed to locate log file")?,
    };
    logging::init_to_file(&log_path, &config.log_level)
        .with_context(|| format!("Failed to open log file {:?}", log_path))?;

    let api_url = config.resolve_api_url(args.api_url.as_deref(), &config_path)?;
    let accent = config.accent_color().unwrap_or_else(|e| {
        warn!("{}, falling back to yellow", e);
        StandardColor::Yellow
    });
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let gateway = HttpGateway::with_timeout(api_url, Duration::from_secs(config.request_timeout_secs))
        .context("Failed to build HTTP client")?;
    let api_url = gateway.base_url().to_string();
    info!("Starting against {}", api_url);
    let dispatcher = Dispatcher::new(Arc::new(gateway), runtime.handle().clone());

    let res = {
        // Restored when this block ends, also on an early `?`
        let _terminal_guard = terminal::enter()?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let mut app = App::new(dispatcher, api_url, accent);
        run_app(&mut terminal, &mut app)
    };

    if let Err(err) = res {
        eprintln!("Error: {:?}", err); // Print errors to stderr
    }

    runtime.shutdown_timeout(Duration::from_secs(1));
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        // Apply finished remote calls and expire the notification
        app.update();

        terminal.draw(|f| ui::render_ui(f, app))?;

        // Short poll so remote results show up without a key press
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key_event(key);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
