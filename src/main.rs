//! schema-form - live form builder for the terminal
//!
//! Type a JSON form schema on the left, fill in the generated form on the
//! right. Submissions are validated field by field and can be saved as JSON.

mod app;
mod config;
mod debounce;
mod platform;
mod sink;
mod state;
mod ui;

use anyhow::{Context, Result};
use app::App;
use config::TuiConfig;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use debounce::Debounced;
use ratatui::{backend::CrosstermBackend, Terminal};
use sink::FileSink;
use std::fs::{self, File};
use std::io;
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ui::{TerminalSession, TerminalThemeDetector, ThemeSubscription};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    // Optional schema file to start from
    let initial_text = match std::env::args().nth(1) {
        Some(path) => Some(
            fs::read_to_string(&path).with_context(|| format!("failed to read schema {path}"))?,
        ),
        None => None,
    };

    let config = TuiConfig::load().unwrap_or_else(|err| {
        tracing::warn!("ignoring unreadable config: {err:#}");
        TuiConfig::default()
    });
    let sink = FileSink::new(config.submission_path());

    // Guards restore the terminal on every exit path
    let session = TerminalSession::enter()?;
    let subscription = ThemeSubscription::acquire()?;
    let (mut app, rx) = App::new(
        config,
        Box::new(sink),
        Box::new(TerminalThemeDetector),
        initial_text,
    );
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, rx).await;

    drop(subscription);
    drop(session);
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

/// Log to a file so output never lands on the alternate screen
fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "schema_form=info".into());

    let file = TuiConfig::log_path().and_then(|path| {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).ok()?;
        }
        File::create(path).ok()
    });

    match file {
        Some(file) => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init(),
        None => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init(),
    }
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    mut rx: UnboundedReceiver<Debounced<String>>,
) -> Result<()> {
    let poll_duration = Duration::from_millis(50);

    loop {
        // Draw the UI
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Handle crossterm events
        if event::poll(poll_duration)? {
            match event::read()? {
                Event::Key(key) => {
                    // Global quit: Ctrl+C
                    if key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        app.request_quit();
                    } else {
                        app.handle_key(key).await?;
                    }
                }
                Event::Paste(text) => app.on_paste(&text),
                Event::FocusGained => app.on_focus_gained(),
                Event::Resize(_width, _height) => {
                    // Layout is recomputed on the next draw
                }
                _ => {}
            }
        }

        // Apply debounced schema edits
        while let Ok(delivered) = rx.try_recv() {
            app.on_debounced(delivered);
        }

        // Check if app wants to quit
        if app.should_quit() {
            return Ok(());
        }
    }
}
