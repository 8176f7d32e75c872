//! TUI for the kick binary
//!
//! Live scope from the voice history, an offline preview of the current
//! parameters, a spectrum of the scope window, and the parameter panel.

mod params;
mod spectrum;
pub mod state;
mod status;
mod waveform;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use kick_dsp::{KickHandle, KickParam, KickSettings};
use parking_lot::Mutex;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};

use params::render_params;
use spectrum::{render_spectrum, SpectrumAnalyzer};
use state::{AudioStats, VoiceSummary};
use status::render_status;
use waveform::render_waveform;

/// How often the preview is re-rendered from the current parameters
const PREVIEW_INTERVAL: Duration = Duration::from_millis(100);

pub struct UiApp {
    handle: KickHandle,
    /// Newest history window, oldest sample first
    scope: Vec<f32>,
    preview: Vec<f32>,
    last_preview: Option<Instant>,
    spectrum: SpectrumAnalyzer,
    /// Index into `KickParam::ALL`
    selected: usize,
    kicks: u64,
    /// Set by the started observer, consumed by the next scope poll
    pending_clear: Arc<AtomicBool>,
    last_voice: Arc<Mutex<Option<VoiceSummary>>>,
    should_quit: bool,
}

impl UiApp {
    pub fn new(mut handle: KickHandle) -> Self {
        let history_len = handle.history().capacity();
        let sample_rate = handle.sample_rate();

        let pending_clear = Arc::new(AtomicBool::new(false));
        let clear = Arc::clone(&pending_clear);
        handle.on_started(move || clear.store(true, Ordering::Relaxed));

        let last_voice = Arc::new(Mutex::new(None));
        let summary = Arc::clone(&last_voice);
        handle.on_completed(move |samples| {
            *summary.lock() = Some(VoiceSummary::from_samples(samples, sample_rate));
        });

        Self {
            handle,
            scope: vec![0.0; history_len],
            preview: Vec::new(),
            last_preview: None,
            spectrum: SpectrumAnalyzer::new(history_len, sample_rate),
            selected: 0,
            kicks: 0,
            pending_clear,
            last_voice,
            should_quit: false,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.handle.poll_events();
            self.poll_scope();

            // Braille packs two dots per cell horizontally
            let width = terminal.size()?.width as usize * 2;
            self.refresh_preview(width);

            terminal.draw(|frame| self.render(frame))?;

            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    fn poll_scope(&mut self) {
        if self.pending_clear.swap(false, Ordering::Relaxed) {
            self.scope.fill(0.0);
        }
        self.handle.copy_latest(&mut self.scope);
        self.spectrum.update(&self.scope);
    }

    fn refresh_preview(&mut self, width: usize) {
        let due = self
            .last_preview
            .map_or(true, |at| at.elapsed() >= PREVIEW_INTERVAL);
        if due || self.preview.len() != width {
            self.preview = self.handle.render_preview(width);
            self.last_preview = Some(Instant::now());
        }
    }

    fn selected_param(&self) -> KickParam {
        KickParam::ALL[self.selected]
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') => {
                if self.handle.trigger() {
                    self.kicks += 1;
                }
            }
            KeyCode::Up => {
                self.selected = (self.selected + KickParam::ALL.len() - 1) % KickParam::ALL.len();
            }
            KeyCode::Down => {
                self.selected = (self.selected + 1) % KickParam::ALL.len();
            }
            KeyCode::Left => self.nudge(-1),
            KeyCode::Right => self.nudge(1),
            KeyCode::Char('t') | KeyCode::Char('T') => {
                let params = self.handle.params();
                let timing = params.timing().toggled();
                params.set_timing(timing);
                tracing::debug!(timing = timing.name(), "envelope timing changed");
                self.last_preview = None;
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.handle.params().apply(&KickSettings::default());
                self.last_preview = None;
            }
            _ => {}
        }
    }

    fn nudge(&mut self, steps: i32) {
        let param = self.selected_param();
        let value = self.handle.params().nudge(param, steps);
        tracing::debug!(param = param.name(), value, "parameter changed");
        self.last_preview = None;
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let settings = self.handle.settings();

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Status bar
                Constraint::Min(10),   // Charts and parameters
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        let stats = AudioStats::from_buffer(&self.scope);
        render_status(
            frame,
            rows[0],
            self.handle.sample_rate(),
            self.handle.is_playing(),
            self.kicks,
            *self.last_voice.lock(),
            &stats,
        );

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(68), Constraint::Percentage(32)])
            .split(rows[1]);

        let charts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(columns[0]);
        render_waveform(frame, charts[0], " Scope ", &self.scope, Color::Cyan);
        render_waveform(frame, charts[1], " Preview ", &self.preview, Color::Yellow);

        let side = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(15), Constraint::Min(6)])
            .split(columns[1]);
        render_params(frame, side[0], &settings, self.selected);
        render_spectrum(frame, side[1], self.spectrum.data());

        let help = Line::from(vec![
            Span::styled(" [Space] ", Style::default().fg(Color::Cyan)),
            Span::raw("Kick  "),
            Span::styled("[↑↓] ", Style::default().fg(Color::Cyan)),
            Span::raw("Select  "),
            Span::styled("[←→] ", Style::default().fg(Color::Cyan)),
            Span::raw("Adjust  "),
            Span::styled("[T] ", Style::default().fg(Color::Cyan)),
            Span::raw("Timing  "),
            Span::styled("[R] ", Style::default().fg(Color::Cyan)),
            Span::raw("Reset  "),
            Span::styled("[Q] ", Style::default().fg(Color::Cyan)),
            Span::raw("Quit"),
        ]);
        frame.render_widget(Paragraph::new(help), rows[2]);
    }
}
