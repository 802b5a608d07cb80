//! Terminal User Interface module

mod app;
mod editor;
mod status;
mod styles;

pub use app::*;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io;

use crate::monitor::Monitor;

pub async fn run(monitor: Monitor) -> Result<()> {
    if !monitor.runtime().is_available() {
        eprintln!("Error: {} not found in PATH", monitor.runtime().binary());
        eprintln!();
        eprintln!("Install Docker: https://docs.docker.com/get-docker/");
        eprintln!("or point [docker] binary in config.toml at another engine.");
        std::process::exit(1);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(monitor);
    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}
