//! dinecache - Browse a restaurant listing from the terminal
//!
//! Shows the last saved listing immediately, refreshes it from the network
//! in the background, and saves it again when the list screen is closed.

use std::io;
use std::panic;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use directories::ProjectDirs;
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use dinecache::app::App;
use dinecache::cli::{Cli, StartupConfig};
use dinecache::logging::{self, LOG_FILE_NAME};
use dinecache::ui;

/// Sets up a panic hook that restores the terminal before printing the panic message.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

/// Log file from the CLI, else next to the snapshot
fn log_path(config: &StartupConfig) -> Option<PathBuf> {
    if let Some(path) = &config.log_file {
        return Some(path.clone());
    }
    if let Some(dir) = &config.cache_dir {
        return Some(dir.join(LOG_FILE_NAME));
    }
    ProjectDirs::from("", "", "dinecache").map(|dirs| dirs.cache_dir().join(LOG_FILE_NAME))
}

async fn run(config: StartupConfig) -> Result<(), Box<dyn std::error::Error>> {
    setup_panic_hook();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&config);
    app.controller.start();

    loop {
        app.tick();
        terminal.draw(|f| ui::render(f, &app))?;

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    info!("exiting");

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::from(2);
        }
    };

    if let Some(path) = log_path(&config) {
        logging::init(&path, config.log_level);
    }
    info!(url = ?config.url, "starting");

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
