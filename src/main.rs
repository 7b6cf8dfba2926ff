//! tubedeck - Terminal browser for a YouTube channel
//!
//! A terminal UI application that shows a channel's most viewed videos and
//! newest uploads as auto-scrolling marquee rows, with its featured playlists
//! in a grid below.

mod app;
mod cache;
mod cli;
mod data;
mod marquee;
mod refresh;
mod ui;

use std::io;
use std::panic;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use app::App;
use cache::CacheStore;
use cli::{Cli, Config};
use data::YouTubeClient;
use refresh::spawn_load;

/// Animation tick interval, roughly 30 frames per second.
const TICK_RATE: Duration = Duration::from_millis(33);

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore the terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        // Call the original panic hook
        original_hook(panic_info);
    }));
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::from_cli(&cli)?;

    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let cache = if config.no_cache {
        None
    } else {
        CacheStore::new(config.ttl_hours)
    };
    let client = YouTubeClient::new(config.api_key.clone(), cache);

    let mut app = App::new(config.clone());
    let size = terminal.size()?;
    app.relayout(size.width as f32);

    // Kick off the initial load; results arrive over the channel while the
    // marquees keep ticking.
    let (tx, mut rx) = mpsc::unbounded_channel();
    spawn_load(
        client.clone(),
        config.channels.clone(),
        config.top_order,
        tx.clone(),
    );

    let mut last_tick = Instant::now();

    // Main event loop
    loop {
        // Drain any messages from the background loader
        while let Ok(msg) = rx.try_recv() {
            app.apply_refresh(msg);
        }

        terminal.draw(|f| ui::render(f, &app))?;

        // Wait for input up to the remainder of the current tick
        let timeout = TICK_RATE.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => app.handle_key(key),
                Event::Resize(width, _) => app.relayout(width as f32),
                _ => {}
            }
        }

        // Advance the marquees by the elapsed wall time
        if last_tick.elapsed() >= TICK_RATE {
            app.on_tick(last_tick.elapsed().as_secs_f32());
            last_tick = Instant::now();
        }

        if app.refresh_requested && !app.loading {
            app.refresh_requested = false;
            spawn_load(
                client.clone(),
                config.channels.clone(),
                config.top_order,
                tx.clone(),
            );
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}
