//! Main TUI application

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::*;
use std::time::Duration;
use tokio::task::JoinHandle;

use super::editor::{EditorAction, WatchlistEditor};
use super::status::{StatusAction, StatusView};
use super::styles::Theme;
use crate::cli::ABOUT;
use crate::docker;
use crate::monitor::Monitor;
use crate::reconcile::ActionOutcome;
use crate::snapshot::{DesiredStates, Snapshot};

const SPINNER_FRAMES: &[char] = &['◐', '◓', '◑', '◒'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Status,
    Configuration,
    About,
}

impl Tab {
    const ALL: [Tab; 3] = [Tab::Status, Tab::Configuration, Tab::About];

    fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    fn title(self) -> &'static str {
        match self {
            Tab::Status => "Status",
            Tab::Configuration => "Configuration",
            Tab::About => "About",
        }
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

enum Job {
    Refresh,
    Apply(DesiredStates),
}

struct JobOutput {
    monitor: Monitor,
    outcomes: Vec<ActionOutcome>,
    refresh: docker::Result<usize>,
}

fn run_job(mut monitor: Monitor, job: Job) -> JobOutput {
    let outcomes = match job {
        Job::Refresh => Vec::new(),
        Job::Apply(desired) => monitor.apply(&desired),
    };
    let refresh = monitor.refresh();
    JobOutput {
        monitor,
        outcomes,
        refresh,
    }
}

struct Message {
    text: String,
    is_error: bool,
}

/// Summarise a finished job. Apply failures come first so a refresh error
/// afterwards can't hide them.
fn job_message(outcomes: &[ActionOutcome], refresh: &docker::Result<usize>) -> Option<Message> {
    let mut errors: Vec<String> = outcomes
        .iter()
        .filter_map(|o| {
            o.result
                .as_ref()
                .err()
                .map(|e| format!("Failed to {} {}: {}", o.planned.action, o.planned.name, e))
        })
        .collect();
    let failed = errors.len();
    if let Err(e) = refresh {
        errors.push(e.to_string().lines().next().unwrap_or_default().to_string());
    }

    if let Some(first) = errors.first() {
        let mut text = first.clone();
        if errors.len() > 1 {
            text.push_str(&format!(" (and {} more: {})", errors.len() - 1, errors[errors.len() - 1]));
        }
        return Some(Message {
            text,
            is_error: true,
        });
    }

    if failed == 0 && !outcomes.is_empty() {
        return Some(Message {
            text: format!("Applied {} changes", outcomes.len()),
            is_error: false,
        });
    }

    None
}

pub struct App {
    /// `None` while a refresh or apply job owns the monitor.
    monitor: Option<Monitor>,
    snapshot: Snapshot,
    has_watchlist: bool,
    tab: Tab,
    status: StatusView,
    editor: WatchlistEditor,
    theme: Theme,
    message: Option<Message>,
    job: Option<JoinHandle<JobOutput>>,
    spinner_frame: usize,
    should_quit: bool,
}

impl App {
    pub fn new(monitor: Monitor) -> Self {
        let editor = WatchlistEditor::new(monitor.watchlist().text());
        let has_watchlist = monitor.watchlist().text().is_some();
        Self {
            snapshot: monitor.snapshot().clone(),
            monitor: Some(monitor),
            has_watchlist,
            tab: Tab::Status,
            status: StatusView::new(),
            editor,
            theme: Theme::default(),
            message: None,
            job: None,
            spinner_frame: 0,
            should_quit: false,
        }
    }

    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    ) -> Result<()> {
        terminal.clear()?;
        self.start_job(Job::Refresh);

        loop {
            terminal.draw(|f| self.render(f))?;

            if event::poll(Duration::from_millis(80))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }

            self.poll_job().await?;

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn is_busy(&self) -> bool {
        self.job.is_some()
    }

    fn start_job(&mut self, job: Job) {
        let Some(monitor) = self.monitor.take() else {
            return;
        };
        self.job = Some(tokio::task::spawn_blocking(move || run_job(monitor, job)));
    }

    async fn poll_job(&mut self) -> Result<()> {
        match self.job.take() {
            Some(handle) if handle.is_finished() => {
                let output = handle.await?;
                self.finish_job(output);
            }
            Some(handle) => {
                self.job = Some(handle);
                self.spinner_frame = self.spinner_frame.wrapping_add(1);
            }
            None => {}
        }
        Ok(())
    }

    fn finish_job(&mut self, output: JobOutput) {
        self.snapshot = output.monitor.snapshot().clone();
        self.status.reset(&self.snapshot);
        self.monitor = Some(output.monitor);

        self.message = job_message(&output.outcomes, &output.refresh);
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return;
            }
            (KeyCode::Char('q'), _) if self.tab != Tab::Configuration => {
                self.should_quit = true;
                return;
            }
            (KeyCode::Tab, _) => {
                self.tab = self.tab.next();
                return;
            }
            (KeyCode::BackTab, _) => {
                self.tab = self.tab.prev();
                return;
            }
            _ => {}
        }

        match self.tab {
            Tab::Status => {
                if self.is_busy() {
                    return;
                }
                match self.status.handle_key(key, &self.snapshot) {
                    Some(StatusAction::Apply) => {
                        let desired = self.status.desired().clone();
                        if self.status.pending_changes(&self.snapshot) == 0 {
                            self.message = Some(Message {
                                text: "No changes".to_string(),
                                is_error: false,
                            });
                        } else {
                            self.message = None;
                            self.start_job(Job::Apply(desired));
                        }
                    }
                    Some(StatusAction::Refresh) => {
                        self.message = None;
                        self.start_job(Job::Refresh);
                    }
                    None => {}
                }
            }
            Tab::Configuration => {
                if let Some(EditorAction::Save(text)) = self.editor.handle_key(key) {
                    self.save_watchlist(&text);
                }
            }
            Tab::About => {}
        }
    }

    fn save_watchlist(&mut self, text: &str) {
        let Some(monitor) = self.monitor.as_mut() else {
            self.message = Some(Message {
                text: "Busy, try again in a moment".to_string(),
                is_error: true,
            });
            return;
        };

        self.message = Some(match monitor.save_watchlist(text) {
            Ok(()) => Message {
                text: "Watchlist saved".to_string(),
                is_error: false,
            },
            Err(e) => Message {
                text: e.to_string(),
                is_error: true,
            },
        });
        self.has_watchlist = true;
        self.editor.set_saved(text);
        self.start_job(Job::Refresh);
    }

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(area);

        let titles: Vec<Line> = Tab::ALL.iter().map(|t| Line::from(t.title())).collect();
        let tabs = Tabs::new(titles)
            .select(self.tab.index())
            .style(Style::default().fg(self.theme.dimmed))
            .highlight_style(Style::default().fg(self.theme.title).bold())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.theme.border))
                    .title(" Docker Monitor ")
                    .title_style(Style::default().fg(self.theme.title).bold()),
            );
        frame.render_widget(tabs, chunks[0]);

        let body = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border));
        let inner = body.inner(chunks[1]);
        frame.render_widget(body, chunks[1]);

        match self.tab {
            Tab::Status => self.status.render(
                frame,
                inner,
                &self.snapshot,
                self.has_watchlist,
                &self.theme,
            ),
            Tab::Configuration => self.editor.render(frame, inner, &self.theme),
            Tab::About => self.render_about(frame, inner),
        }

        self.render_status_bar(frame, chunks[2]);
    }

    fn render_about(&self, frame: &mut Frame, area: Rect) {
        let text = vec![
            Line::from(""),
            Line::from(format!("dmon {}", env!("CARGO_PKG_VERSION")))
                .style(Style::default().fg(self.theme.title).bold()),
            Line::from(""),
            Line::from(ABOUT).style(Style::default().fg(self.theme.text)),
        ];
        frame.render_widget(
            Paragraph::new(text)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            area,
        );
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let key_style = Style::default().fg(self.theme.accent).bold();
        let desc_style = Style::default().fg(self.theme.dimmed);
        let sep_style = Style::default().fg(self.theme.border);

        let mut spans = Vec::new();
        if self.is_busy() {
            let frame_char = SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()];
            spans.push(Span::styled(
                format!(" {} Talking to docker... ", frame_char),
                Style::default().fg(self.theme.pending),
            ));
        } else if let Some(message) = &self.message {
            let color = if message.is_error {
                self.theme.error
            } else {
                self.theme.running
            };
            spans.push(Span::styled(
                format!(" {} ", message.text),
                Style::default().fg(color),
            ));
        }
        if !spans.is_empty() {
            spans.push(Span::styled("│", sep_style));
        }

        let keys: &[(&str, &str)] = match self.tab {
            Tab::Status => &[
                ("Space", "Toggle"),
                ("Enter", "Apply"),
                ("r", "Refresh"),
                ("Tab", "Next"),
                ("q", "Quit"),
            ],
            Tab::Configuration => &[
                ("C-s", "Save"),
                ("Esc", "Revert"),
                ("Tab", "Next"),
                ("C-c", "Quit"),
            ],
            Tab::About => &[("Tab", "Next"), ("q", "Quit")],
        };
        for (i, (k, desc)) in keys.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("│", sep_style));
            }
            spans.push(Span::styled(format!(" {}", k), key_style));
            spans.push(Span::styled(format!(" {} ", desc), desc_style));
        }

        let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(self.theme.selection));
        frame.render_widget(status, area);
    }
}
