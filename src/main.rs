//! Tak Site - the Dan Ivanov Bygg & Tak website in the terminal
//!
//! A Ratatui-based TUI that renders the site's pages and runs their
//! interactive behaviors, including the contact form submission.

mod app;
mod config;
mod contact;
mod dom;
mod platform;
mod site;
mod state;
mod ui;

use anyhow::{Context, Result};
use app::App;
use config::SiteConfig;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use platform::SystemClipboard;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::{self, File};
use std::io;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Poll interval while something animates (~60fps)
const FAST_POLL: Duration = Duration::from_millis(16);
const IDLE_POLL: Duration = Duration::from_millis(100);

/// Open the log file; the terminal belongs to the UI, so logs never go to stderr
fn open_log_file() -> Option<File> {
    let path = SiteConfig::log_path()?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).ok()?;
    }
    File::options().create(true).append(true).open(path).ok()
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let file_layer = open_log_file().map(|file| {
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(Mutex::new(file))
    });
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tak_site=info".into()),
        )
        .with(file_layer)
        .init();

    let config = SiteConfig::load().context("failed to load configuration")?;
    let transport = config.build_transport()?;
    tracing::info!("Starting with {:?} transport", config.transport_kind());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run
    let size = terminal.size()?;
    let mut app = App::new(
        config,
        transport,
        Box::new(SystemClipboard),
        (size.width, size.height),
    );
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        app.tick(Instant::now());

        // Draw the UI
        terminal.draw(|frame| ui::draw(frame, app))?;

        let poll_duration = if app.is_animating() {
            FAST_POLL
        } else {
            IDLE_POLL
        };

        // Let spawned submissions make progress between frames
        tokio::task::yield_now().await;

        // Handle crossterm events
        if event::poll(poll_duration)? {
            match event::read()? {
                Event::Key(key) => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                Event::Resize(width, height) => app.resize(width, height),
                _ => {}
            }
        }

        // Check if app wants to quit
        if app.should_quit() {
            return Ok(());
        }
    }
}
