//! Panels drawn by the terminal UI

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, List, ListItem, Paragraph};
use ratatui::Frame;

use super::{Phase, Progress};

/// Current phase, free-form info and the running skip count
pub struct StatusPanel {
    phase: Phase,
    info: String,
    skipped: u64,
}

impl StatusPanel {
    pub fn new() -> Self {
        Self {
            phase: Phase::FetchingPeople,
            info: String::new(),
            skipped: 0,
        }
    }

    pub fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub fn set_info(&mut self, info: impl Into<String>) {
        self.info = info.into();
    }

    pub fn count_skip(&mut self) {
        self.skipped += 1;
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let phase_style = match self.phase {
            Phase::Complete => Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            _ => Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        };

        let phase_indicator = match self.phase {
            Phase::FetchingPeople | Phase::FetchingVehicles | Phase::FetchingStarships => "↓",
            Phase::Relating => "⇄",
            Phase::Writing => "✎",
            Phase::Complete => "✓",
        };

        let skipped_style = if self.skipped > 0 {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let lines = vec![
            Line::from(vec![
                Span::styled(format!(" {} ", phase_indicator), phase_style),
                Span::styled(self.phase.to_string(), phase_style),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::raw("   "),
                Span::styled(&self.info, Style::default().fg(Color::Gray)),
            ]),
            Line::from(vec![
                Span::raw("   "),
                Span::styled(format!("{} skipped", self.skipped), skipped_style),
            ]),
        ];

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" SWAPI to CSV ")
            .border_style(Style::default().fg(Color::Blue));

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

/// Gauge for the current fetch or write loop
pub struct ProgressPanel {
    progress: Option<Progress>,
}

impl ProgressPanel {
    pub fn new() -> Self {
        Self { progress: None }
    }

    pub fn set_progress(&mut self, progress: Progress) {
        self.progress = Some(progress);
    }

    pub fn clear(&mut self) {
        self.progress = None;
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::LEFT | Borders::RIGHT)
            .border_style(Style::default().fg(Color::Blue));

        let Some(progress) = &self.progress else {
            frame.render_widget(Paragraph::new("").block(block), area);
            return;
        };

        let label = if progress.total > 0 {
            format!("{} ({}/{})", progress.label, progress.current, progress.total)
        } else {
            progress.label.clone()
        };

        let gauge = Gauge::default()
            .block(block)
            .gauge_style(Style::default().fg(Color::Cyan).bg(Color::DarkGray))
            .ratio(progress.ratio().min(1.0))
            .label(label);

        frame.render_widget(gauge, area);
    }
}

struct LogEntry {
    message: String,
    warning: bool,
}

/// Activity history, newest at the bottom
pub struct LogPanel {
    entries: Vec<LogEntry>,
    max_entries: usize,
}

impl LogPanel {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            max_entries: 200,
        }
    }

    pub fn add(&mut self, message: impl Into<String>) {
        self.push(message.into(), false);
    }

    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.push(message.into(), true);
    }

    fn push(&mut self, message: String, warning: bool) {
        self.entries.push(LogEntry { message, warning });
        if self.entries.len() > self.max_entries {
            self.entries.remove(0);
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Activity ")
            .border_style(Style::default().fg(Color::Blue));

        let visible_height = area.height.saturating_sub(2) as usize; // -2 for borders
        let start = self.entries.len().saturating_sub(visible_height);

        let items: Vec<ListItem> = self.entries[start..]
            .iter()
            .map(|entry| {
                let style = if entry.warning {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default().fg(Color::Gray)
                };
                ListItem::new(Span::styled(format!(" {}", entry.message), style))
            })
            .collect();

        frame.render_widget(List::new(items).block(block), area);
    }
}
