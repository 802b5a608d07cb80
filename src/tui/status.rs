//! Status tab: watched containers with an editable "running" checkbox

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::styles::Theme;
use crate::cli::{checkbox, truncate, truncate_id};
use crate::reconcile;
use crate::snapshot::{DesiredStates, Snapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusAction {
    Apply,
    Refresh,
}

#[derive(Debug, Default)]
pub struct StatusView {
    cursor: usize,
    desired: DesiredStates,
}

impl StatusView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the checkboxes from actual states, dropping any pending toggles.
    pub fn reset(&mut self, snapshot: &Snapshot) {
        self.desired = snapshot.desired_states();
        self.cursor = self.cursor.min(snapshot.len().saturating_sub(1));
    }

    pub fn desired(&self) -> &DesiredStates {
        &self.desired
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn pending_changes(&self, snapshot: &Snapshot) -> usize {
        reconcile::plan(snapshot, &self.desired).len()
    }

    pub fn handle_key(&mut self, key: KeyEvent, snapshot: &Snapshot) -> Option<StatusAction> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.cursor + 1 < snapshot.len() {
                    self.cursor += 1;
                }
                None
            }
            KeyCode::Char(' ') => {
                self.toggle(snapshot);
                None
            }
            KeyCode::Enter => Some(StatusAction::Apply),
            KeyCode::Char('r') => Some(StatusAction::Refresh),
            _ => None,
        }
    }

    fn toggle(&mut self, snapshot: &Snapshot) {
        let Some(record) = snapshot.records().get(self.cursor) else {
            return;
        };
        let current = self
            .desired
            .get(&record.id)
            .copied()
            .unwrap_or_else(|| record.is_running());
        self.desired.insert(record.id.clone(), !current);
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        snapshot: &Snapshot,
        has_watchlist: bool,
        theme: &Theme,
    ) {
        if snapshot.is_empty() {
            let hint = if has_watchlist {
                "No watched containers found"
            } else {
                "No watchlist yet: add container IDs or names in the Configuration tab"
            };
            let empty_text = vec![
                Line::from(""),
                Line::from(hint).style(Style::default().fg(theme.dimmed)),
                Line::from(""),
                Line::from("Press 'r' to refresh").style(Style::default().fg(theme.hint)),
            ];
            frame.render_widget(
                Paragraph::new(empty_text).alignment(Alignment::Center),
                area,
            );
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(1)])
            .split(area);

        let header = Line::from(format!(
            " {:<5}{:<14}{:<24}{:<12}{}",
            "RUN", "ID", "NAME", "STATE", "STATUS"
        ))
        .style(Style::default().fg(theme.title).bold());
        frame.render_widget(Paragraph::new(header), chunks[0]);

        let items: Vec<ListItem> = snapshot
            .iter()
            .enumerate()
            .map(|(idx, record)| {
                let wanted = self
                    .desired
                    .get(&record.id)
                    .copied()
                    .unwrap_or_else(|| record.is_running());
                let changed = wanted != record.is_running();
                let box_style = if changed {
                    Style::default().fg(theme.pending).bold()
                } else {
                    Style::default().fg(theme.text)
                };

                let line = Line::from(vec![
                    Span::styled(format!(" {:<5}", checkbox(wanted)), box_style),
                    Span::styled(
                        format!("{:<14}", truncate_id(&record.id, 12)),
                        Style::default().fg(theme.dimmed),
                    ),
                    Span::styled(
                        format!("{:<24}", truncate(&record.name, 22)),
                        Style::default().fg(theme.text),
                    ),
                    Span::styled(
                        format!("{:<12}", truncate(&record.state, 10)),
                        Style::default().fg(theme.state_color(&record.state)),
                    ),
                    Span::styled(record.status.clone(), Style::default().fg(theme.dimmed)),
                ]);

                if idx == self.cursor {
                    ListItem::new(line).style(Style::default().bg(theme.row_selection))
                } else {
                    ListItem::new(line)
                }
            })
            .collect();

        // The list scrolls so the selected row stays on screen
        let mut state = ListState::default().with_selected(Some(self.cursor));
        frame.render_stateful_widget(List::new(items), chunks[1], &mut state);
    }
}
