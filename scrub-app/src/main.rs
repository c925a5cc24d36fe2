//! Scrub - terminal frame scrubber
//!
//! Double scrollbar timeline with playback, driven by keyboard and mouse.

mod app;
mod config;

use std::fs::{self, File};
use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::config::Config;

/// Frame rate for UI updates
const FPS: u64 = 30;

/// Log to a file; the terminal belongs to the UI. Filter with `RUST_LOG`.
fn init_logging() -> anyhow::Result<PathBuf> {
    let dir = dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("scrub");
    fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = dir.join("scrub.log");
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;
    Ok(path)
}

fn main() -> anyhow::Result<()> {
    let log_path = init_logging()?;
    let config = Config::load();
    info!(?config, log = %log_path.display(), "starting scrub");
    let mut app = App::new(&config)?;

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run main event loop
    let result = run_app(&mut terminal, &mut app);

    // Cleanup
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("scrub exited");
    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> anyhow::Result<()> {
    let frame_duration = Duration::from_millis(1000 / FPS);
    let mut last_tick = Instant::now();

    while !app.should_quit {
        app.drain_events();
        terminal.draw(|frame| app.render(frame))?;

        let timeout = frame_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                // Only handle key press events (not release)
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(&mouse),
                _ => {}
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= frame_duration {
            app.tick(elapsed);
            last_tick = Instant::now();
        }
    }

    Ok(())
}
