use super::{dim_style, title_style};
use crate::app::App;
use crate::demo::DemoPhase;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw_demo(f: &mut Frame, area: Rect, app: &App) {
    let Some(demo) = &app.demo else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(4)])
        .split(area);

    let mut text = Text::from(demo.typed());
    if !demo.typing_done() {
        text.push_span(Span::styled("▌", Style::default().fg(Color::Cyan)));
    }
    let sample = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled("Sample Content", title_style())),
        );
    f.render_widget(sample, chunks[0]);

    let status = match (demo.phase(), app.demo_hook.error()) {
        (DemoPhase::Processing, _) => Line::from(Span::styled(
            "Processing Demo...",
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        )),
        (DemoPhase::Complete, _) => Line::from(Span::styled(
            "Demo Complete! Opening results...",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        (DemoPhase::Idle, Some(error)) => Line::from(Span::styled(
            format!("Demo failed: {} (Esc to dismiss)", error),
            Style::default().fg(Color::Red),
        )),
        (DemoPhase::Idle, None) => Line::from(Span::styled(
            "Press Enter to see this text turned into study materials",
            dim_style(),
        )),
    };
    let panel = Paragraph::new(vec![status])
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Demo"));
    f.render_widget(panel, chunks[1]);
}
