//! Configuration tab: multi-line editor over the watchlist text

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::*;
use ratatui_textarea::TextArea;

use super::styles::Theme;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorAction {
    Save(String),
}

pub struct WatchlistEditor {
    text_area: TextArea<'static>,
    saved: String,
}

fn text_area_for(text: &str) -> TextArea<'static> {
    let lines: Vec<String> = if text.is_empty() {
        vec![String::new()]
    } else {
        text.lines().map(|l| l.to_string()).collect()
    };
    let mut text_area = TextArea::new(lines);
    text_area.set_cursor_line_style(Style::default());
    text_area
}

impl WatchlistEditor {
    pub fn new(text: Option<&str>) -> Self {
        let saved = text.unwrap_or_default().to_string();
        Self {
            text_area: text_area_for(&saved),
            saved,
        }
    }

    pub fn text(&self) -> String {
        self.text_area.lines().join("\n")
    }

    pub fn is_dirty(&self) -> bool {
        self.text() != self.saved.lines().collect::<Vec<_>>().join("\n")
    }

    /// Record `text` as the persisted value and show it.
    pub fn set_saved(&mut self, text: &str) {
        self.saved = text.to_string();
        self.text_area = text_area_for(text);
    }

    pub fn revert(&mut self) {
        self.text_area = text_area_for(&self.saved);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<EditorAction> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('s'), KeyModifiers::CONTROL) => Some(EditorAction::Save(self.text())),
            (KeyCode::Esc, _) => {
                self.revert();
                None
            }
            _ => {
                self.text_area.input(key);
                None
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(3)])
            .split(area);

        let help = Paragraph::new(
            "Container IDs or names to watch. A container is shown when its ID or\n\
             name appears anywhere in this text.",
        )
        .style(Style::default().fg(theme.hint));
        frame.render_widget(help, chunks[0]);

        let title = if self.is_dirty() {
            " Watchlist (modified) "
        } else {
            " Watchlist "
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .title(title)
            .title_style(Style::default().fg(theme.title));

        let mut text_area = self.text_area.clone();
        text_area.set_block(block);
        text_area.set_style(Style::default().fg(theme.text));
        text_area.set_cursor_style(Style::default().fg(theme.background).bg(theme.accent));

        frame.render_widget(&text_area, chunks[1]);
    }
}
