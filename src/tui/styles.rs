//! TUI theme and styling

use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct Theme {
    // Background and borders
    pub background: Color,
    pub border: Color,
    pub selection: Color,
    pub row_selection: Color,

    // Text colors
    pub title: Color,
    pub text: Color,
    pub dimmed: Color,
    pub hint: Color,

    // Container states
    pub running: Color,
    pub stopped: Color,
    pub pending: Color,
    pub error: Color,

    pub accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::phosphor()
    }
}

impl Theme {
    pub fn phosphor() -> Self {
        Self {
            background: Color::Rgb(16, 20, 18),
            border: Color::Rgb(45, 70, 55),
            selection: Color::Rgb(30, 50, 40),
            row_selection: Color::Rgb(60, 60, 60),

            title: Color::Rgb(57, 255, 20),
            text: Color::Rgb(180, 255, 180),
            dimmed: Color::Rgb(80, 120, 90),
            hint: Color::Rgb(100, 160, 120),

            running: Color::Rgb(0, 255, 180),
            stopped: Color::Rgb(60, 100, 70),
            pending: Color::Rgb(255, 180, 60),
            error: Color::Rgb(255, 100, 80),

            accent: Color::Rgb(57, 255, 20),
        }
    }

    pub fn state_color(&self, state: &str) -> Color {
        match state {
            "running" => self.running,
            "restarting" | "paused" | "created" => self.pending,
            "dead" => self.error,
            _ => self.stopped,
        }
    }
}
