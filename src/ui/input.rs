use super::layout::calculate_input_chunks;
use super::{dim_style, title_style};
use crate::app::{App, InputFocus, TextField};
use crate::models::Level;
use crate::utils::calculate_wrapped_cursor_position;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const PROCESSING_STEPS: [&str; 3] = [
    "Analyzing content structure...",
    "Extracting key concepts...",
    "Creating learning materials...",
];

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn draw_processing(f: &mut Frame, area: Rect) {
    let mut text = Text::default();
    text.push_line(Line::from(Span::styled("AI Processing Your Content", title_style())));
    text.push_line(Line::from("Generating summaries, quizzes, and flashcards..."));
    text.push_line(Line::from(""));
    for step in PROCESSING_STEPS {
        text.push_line(Line::from(vec![
            Span::styled("• ", Style::default().fg(Color::Blue)),
            Span::from(step),
        ]));
    }
    let panel = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(panel, area);
}

fn draw_error(f: &mut Frame, area: Rect, message: &str) {
    let text = vec![
        Line::from(Span::styled(
            "Processing Error",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled("Press Esc to dismiss", dim_style())),
    ];
    let panel = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );
    f.render_widget(panel, area);
}

fn level_line(selected: Level) -> Line<'static> {
    let mut spans = Vec::new();
    for level in Level::ALL {
        let style = if level == selected {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default()
        };
        spans.push(Span::styled(format!(" {} ", level.label()), style));
        spans.push(Span::from("  "));
    }
    Line::from(spans)
}

/// Places the terminal cursor inside a bordered single- or multi-line field.
fn place_cursor(f: &mut Frame, area: Rect, field: &TextField, scroll: u16) {
    let width = area.width.saturating_sub(2) as usize;
    let (line, col) = calculate_wrapped_cursor_position(field.value(), field.cursor(), width);
    let x = area.x + 1 + col as u16;
    let y = area.y + 1 + (line as u16).saturating_sub(scroll);
    f.set_cursor_position((x.min(area.right().saturating_sub(2)), y));
}

pub fn draw_input(f: &mut Frame, area: Rect, app: &App) {
    if app.is_processing() {
        draw_processing(f, area);
        return;
    }
    if let Some(error) = app.processing.error() {
        draw_error(f, area, &error);
        return;
    }

    let input = &app.input;
    let layout = calculate_input_chunks(area);

    let level = Paragraph::new(level_line(input.level)).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Reading Level (←/→)")
            .border_style(focus_style(input.focus == InputFocus::Level)),
    );
    f.render_widget(level, layout.level_area);

    let counter_style = if input.over_limit() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let visible = layout.text_area.height.saturating_sub(2) as usize;
    let width = layout.text_area.width.saturating_sub(2) as usize;
    let (cursor_line, _) =
        calculate_wrapped_cursor_position(input.text.value(), input.text.cursor(), width);
    let scroll = cursor_line.saturating_sub(visible.saturating_sub(1)) as u16;

    let text_content = if input.text.value().is_empty() {
        Text::from(Span::styled("[Paste or type your content here...]", dim_style()))
    } else {
        Text::from(input.text.value())
    };
    let text = Paragraph::new(text_content)
        .wrap(Wrap { trim: true })
        .scroll((scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Content")
                .title_bottom(Line::from(Span::styled(input.counter(), counter_style)).right_aligned())
                .border_style(focus_style(input.focus == InputFocus::Text)),
        );
    f.render_widget(text, layout.text_area);

    let file_content = if input.file.value().is_empty() {
        Span::styled("[Path to a .txt, .pdf or .docx file]", dim_style())
    } else {
        Span::from(input.file.value())
    };
    let file = Paragraph::new(file_content).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Or upload a file")
            .border_style(focus_style(input.focus == InputFocus::File)),
    );
    f.render_widget(file, layout.file_area);

    match input.focus {
        InputFocus::Text => place_cursor(f, layout.text_area, &input.text, scroll),
        InputFocus::File => place_cursor(f, layout.file_area, &input.file, 0),
        InputFocus::Level => {}
    }
}
