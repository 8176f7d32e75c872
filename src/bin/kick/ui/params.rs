//! Parameter panel - one row per control, selected row highlighted

use kick_dsp::{dsp::EnvelopeTiming, KickParam, KickSettings};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render_params(frame: &mut Frame, area: Rect, settings: &KickSettings, selected: usize) {
    let block = Block::default().title(" Parameters ").borders(Borders::ALL);

    let mut lines: Vec<Line> = KickParam::ALL
        .iter()
        .enumerate()
        .map(|(i, &param)| {
            let style = if i == selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(vec![
                Span::styled(format!(" {:<13}", param.name()), style),
                Span::styled(
                    format!("{:>8.2} {}", param.get(settings), param.unit()),
                    style,
                ),
            ])
        })
        .collect();

    let timing = match settings.timing {
        EnvelopeTiming::Sequential => Color::Green,
        EnvelopeTiming::Scaled => Color::Yellow,
    };
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!(" Timing: {}", settings.timing.name()),
        Style::default().fg(timing),
    )));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
