use super::{dim_style, title_style};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const FEATURES: [(&str, &str); 3] = [
    (
        "Smart Summaries",
        "AI-powered condensation of complex content into digestible insights.",
    ),
    (
        "Interactive Quizzes",
        "Test your understanding with automatically generated questions.",
    ),
    (
        "Dynamic Flashcards",
        "Flip through cards for effective spaced repetition learning.",
    ),
];

const STEPS: [(&str, &str, &str); 3] = [
    (
        "01",
        "Content Analysis",
        "Your content is analysed for structure and key concepts.",
    ),
    (
        "02",
        "Smart Processing",
        "Relationships between concepts are identified at your reading level.",
    ),
    (
        "03",
        "Output Generation",
        "Summaries, quizzes and interactive flashcards are created.",
    ),
];

pub fn draw_landing(f: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(6),
            Constraint::Length(3),
        ])
        .split(area);

    let title = Paragraph::new(vec![
        Line::from(Span::styled(
            "StudyBridge",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from("AI Summarizer for Complex Content"),
        Line::from(Span::styled(
            "Turn dense text into summaries, quizzes and flashcards.",
            dim_style(),
        )),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(chunks[1]);
    for ((name, description), column) in FEATURES.iter().zip(columns.iter()) {
        let card = Paragraph::new(*description)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(*name, title_style())),
            );
        f.render_widget(card, *column);
    }

    let cta = Paragraph::new("Ready to transform your learning? Press Enter to get started.")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(cta, chunks[2]);
}

pub fn draw_about(f: &mut Frame, area: Rect) {
    let mut text = Text::default();
    text.push_line(Line::from(Span::styled("Our Mission", title_style())));
    text.push_line(Line::from(""));
    text.push_line(Line::from(
        "To make learning more accessible by transforming complex educational content into \
         digestible, interactive formats that help comprehension and retention.",
    ));
    text.push_line(Line::from(""));
    text.push_line(Line::from(Span::styled("How It Works", title_style())));
    text.push_line(Line::from(""));
    for (step, name, description) in STEPS {
        text.push_line(Line::from(vec![
            Span::styled(
                format!("{}  ", step),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(name, Style::default().add_modifier(Modifier::BOLD)),
        ]));
        text.push_line(Line::from(format!("    {}", description)));
        text.push_line(Line::from(""));
    }

    let about = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("About"));
    f.render_widget(about, area);
}

pub fn draw_placeholder(f: &mut Frame, area: Rect, message: &str) {
    let placeholder = Paragraph::new(Span::styled(message.to_string(), dim_style()))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(placeholder, area);
}
