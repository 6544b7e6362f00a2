//! Progress reporting for a pipeline run
//!
//! Three implementations of the [`Ui`] trait:
//! - [`UiApp`]: ratatui terminal UI (phase, progress gauge, activity log)
//! - [`LogUi`]: forwards everything to `tracing`
//! - [`SilentUi`]: discards everything, for tests

mod components;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::time::Duration;

use crate::fetch::Resource;
use components::{LogPanel, ProgressPanel, StatusPanel};

/// Pipeline stages shown in the status panel
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    FetchingPeople,
    Relating,
    FetchingVehicles,
    FetchingStarships,
    Writing,
    Complete,
}

impl Phase {
    /// Phase for fetching a given endpoint
    pub fn fetching(resource: Resource) -> Self {
        match resource {
            Resource::People => Phase::FetchingPeople,
            Resource::Vehicles => Phase::FetchingVehicles,
            Resource::Starships => Phase::FetchingStarships,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::FetchingPeople => write!(f, "Fetching people"),
            Phase::Relating => write!(f, "Relating references"),
            Phase::FetchingVehicles => write!(f, "Fetching vehicles"),
            Phase::FetchingStarships => write!(f, "Fetching starships"),
            Phase::Writing => write!(f, "Writing tables"),
            Phase::Complete => write!(f, "Complete"),
        }
    }
}

/// Progress information for the current operation
#[derive(Debug, Clone, Default)]
pub struct Progress {
    pub current: u64,
    pub total: u64,
    pub label: String,
}

impl Progress {
    pub fn new(current: u64, total: u64, label: impl Into<String>) -> Self {
        Self {
            current,
            total,
            label: label.into(),
        }
    }

    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.current as f64 / self.total as f64
        }
    }
}

/// Trait for UI implementations - allows terminal, log and silent modes
pub trait Ui {
    fn set_phase(&mut self, phase: Phase);
    fn set_info(&mut self, info: impl Into<String>);
    fn set_progress(&mut self, current: u64, total: u64, label: impl Into<String>);
    fn clear_progress(&mut self);
    fn log(&mut self, message: impl Into<String>);

    /// Something was dropped from the output
    fn warn(&mut self, message: impl Into<String>) {
        self.log(message);
    }
}

/// Full terminal UI
pub struct UiApp {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    status: StatusPanel,
    progress: ProgressPanel,
    log: LogPanel,
}

impl UiApp {
    /// Create a new UI application and enter the alternate screen
    pub fn new() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            status: StatusPanel::new(),
            progress: ProgressPanel::new(),
            log: LogPanel::new(),
        })
    }

    fn draw(&mut self) -> Result<()> {
        let status = &self.status;
        let progress = &self.progress;
        let log = &self.log;

        self.terminal.draw(|frame| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(6), // Status panel
                    Constraint::Length(3), // Progress bar
                    Constraint::Min(5),    // Log panel
                ])
                .split(frame.area());

            status.render(frame, chunks[0]);
            progress.render(frame, chunks[1]);
            log.render(frame, chunks[2]);
        })?;

        Ok(())
    }

    /// Show the summary, wait for a key, then restore the terminal
    pub fn finish(mut self, summary: &str) -> Result<()> {
        self.set_phase(Phase::Complete);
        self.clear_progress();
        for line in summary.lines() {
            self.log(line);
        }
        self.log("Press any key to exit...");

        loop {
            if event::poll(Duration::from_millis(100))? {
                if let CrosstermEvent::Key(_) = event::read()? {
                    break;
                }
            }
        }

        self.restore()
    }

    /// Restore terminal without waiting
    pub fn restore(mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        self.terminal.backend_mut().execute(LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Ui for UiApp {
    fn set_phase(&mut self, phase: Phase) {
        self.status.set_phase(phase);
        self.draw().ok();
    }

    fn set_info(&mut self, info: impl Into<String>) {
        self.status.set_info(info);
        self.draw().ok();
    }

    fn set_progress(&mut self, current: u64, total: u64, label: impl Into<String>) {
        self.progress
            .set_progress(Progress::new(current, total, label));
        self.draw().ok();
    }

    fn clear_progress(&mut self) {
        self.progress.clear();
        self.draw().ok();
    }

    fn log(&mut self, message: impl Into<String>) {
        self.log.add(message);
        self.draw().ok();
    }

    fn warn(&mut self, message: impl Into<String>) {
        self.status.count_skip();
        self.log.add_warning(message);
        self.draw().ok();
    }
}

impl Drop for UiApp {
    fn drop(&mut self) {
        // Best effort cleanup
        terminal::disable_raw_mode().ok();
        self.terminal
            .backend_mut()
            .execute(LeaveAlternateScreen)
            .ok();
        self.terminal.show_cursor().ok();
    }
}

/// Plain logging through `tracing`, for non-interactive runs
#[derive(Default)]
pub struct LogUi;

impl LogUi {
    pub fn new() -> Self {
        Self
    }
}

impl Ui for LogUi {
    fn set_phase(&mut self, phase: Phase) {
        tracing::info!("{}", phase);
    }

    fn set_info(&mut self, info: impl Into<String>) {
        tracing::info!("{}", info.into());
    }

    fn set_progress(&mut self, current: u64, total: u64, label: impl Into<String>) {
        tracing::trace!(current, total, "{}", label.into());
    }

    fn clear_progress(&mut self) {}

    fn log(&mut self, message: impl Into<String>) {
        tracing::info!("{}", message.into());
    }

    fn warn(&mut self, message: impl Into<String>) {
        tracing::warn!("{}", message.into());
    }
}

/// Silent UI implementation for testing
#[derive(Default)]
pub struct SilentUi;

impl SilentUi {
    pub fn new() -> Self {
        Self
    }
}

impl Ui for SilentUi {
    fn set_phase(&mut self, _phase: Phase) {}
    fn set_info(&mut self, _info: impl Into<String>) {}
    fn set_progress(&mut self, _current: u64, _total: u64, _label: impl Into<String>) {}
    fn clear_progress(&mut self) {}
    fn log(&mut self, _message: impl Into<String>) {}
}
