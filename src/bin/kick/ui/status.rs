//! Status bar - sample rate, voice state, last completed voice, scope stats

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::state::{AudioStats, VoiceSummary};

pub fn render_status(
    frame: &mut Frame,
    area: Rect,
    sample_rate: f32,
    playing: bool,
    kicks: u64,
    last_voice: Option<VoiceSummary>,
    audio_stats: &AudioStats,
) {
    let block = Block::default().title(" kick ").borders(Borders::ALL);

    let (symbol, label, color) = if playing {
        ("▶", "Playing", Color::Green)
    } else {
        ("■", "Idle", Color::Yellow)
    };

    let last = match last_voice {
        Some(voice) => format!(
            "Last: {} smp / {:.1} ms, peak {:.2}  ",
            voice.frames, voice.duration_ms, voice.peak
        ),
        None => "Last: -  ".to_string(),
    };

    let line = Line::from(vec![
        Span::styled(format!(" {} {}  ", symbol, label), Style::default().fg(color)),
        Span::styled(format!("Kicks: {}  ", kicks), Style::default().fg(Color::White)),
        Span::styled(last, Style::default().fg(Color::Cyan)),
        Span::styled(
            format!("{:.1}kHz  ", sample_rate / 1000.0),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("Peak: {:.2}  RMS: {:.2}", audio_stats.peak, audio_stats.rms),
            Style::default().fg(Color::Magenta),
        ),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}
