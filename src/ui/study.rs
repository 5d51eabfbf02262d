use super::layout::calculate_study_chunks;
use super::{dim_style, title_style};
use crate::models::ProcessingResult;
use crate::study::{NarrationState, OptionMark, QuizMode, StudyTab, StudyView};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
    Frame,
};

/// Letter label for an option; falls back to a number past `Z`.
fn option_label(index: usize) -> String {
    match u8::try_from(index) {
        Ok(i) if i < 26 => char::from(b'A' + i).to_string(),
        _ => (index + 1).to_string(),
    }
}

fn mark_style(mark: OptionMark) -> Style {
    match mark {
        OptionMark::Neutral => Style::default(),
        OptionMark::Correct => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        OptionMark::Incorrect => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    }
}

fn summary_text(view: &StudyView) -> Text<'_> {
    let result = view.result();
    let mut text = Text::default();
    if result.summary.is_empty() {
        text.push_line(Line::from(Span::styled("No summary available", dim_style())));
    } else {
        for line in result.summary.lines() {
            text.push_line(Line::from(line));
        }
    }
    if let Some(note) = result.processing_note() {
        text.push_line(Line::from(""));
        text.push_line(Line::from(Span::styled(note, dim_style())));
    }
    if view.narration_state() == NarrationState::Speaking {
        text.push_line(Line::from(""));
        text.push_line(Line::from(Span::styled(
            "Reading aloud... (Ctrl+L to stop)",
            Style::default().fg(Color::Magenta),
        )));
    }
    text
}

fn interactive_quiz_text(view: &StudyView) -> Text<'_> {
    let quiz = &view.quiz;
    let item = &view.result().quiz[quiz.current()];
    let mut text = Text::default();

    text.push_line(Line::from(Span::styled(
        format!("Question {} of {}", quiz.current() + 1, quiz.len()),
        dim_style(),
    )));
    text.push_line(Line::from(""));
    text.push_line(Line::from(Span::styled(
        item.question.as_str(),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    text.push_line(Line::from(""));

    for (i, option) in item.options.iter().enumerate() {
        let marker = if quiz.selected() == Some(i) { ">" } else { " " };
        text.push_line(Line::from(Span::styled(
            format!("{} {}. {}", marker, option_label(i), option),
            mark_style(quiz.mark(i)),
        )));
    }

    if quiz.revealed() {
        text.push_line(Line::from(""));
        let verdict = match quiz.answered_correctly() {
            Some(true) => Span::styled("✓ Correct!", mark_style(OptionMark::Correct)),
            _ => Span::styled("✗ Incorrect", mark_style(OptionMark::Incorrect)),
        };
        text.push_line(Line::from(verdict));
        if let Some(explanation) = &item.explanation {
            text.push_line(Line::from(explanation.as_str()));
        }
        text.push_line(Line::from(""));
        let footer = if quiz.is_last() {
            "Quiz complete."
        } else {
            "Next question coming up..."
        };
        text.push_line(Line::from(Span::styled(footer, dim_style())));
    }
    text
}

fn review_quiz_text(result: &ProcessingResult) -> Text<'_> {
    let mut text = Text::default();
    for (n, item) in result.quiz.iter().enumerate() {
        text.push_line(Line::from(Span::styled(
            format!("{}. {}", n + 1, item.question),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for (i, option) in item.options.iter().enumerate() {
            let line = format!("   {}. {}", option_label(i), option);
            if i == item.correct_index {
                text.push_line(Line::from(Span::styled(
                    format!("{} ✓", line),
                    mark_style(OptionMark::Correct),
                )));
            } else {
                text.push_line(Line::from(line));
            }
        }
        if let Some(explanation) = &item.explanation {
            text.push_line(Line::from(Span::styled(format!("   {}", explanation), dim_style())));
        }
        text.push_line(Line::from(""));
    }
    text
}

fn flashcard_text(view: &StudyView) -> Text<'_> {
    let deck = &view.deck;
    let card = &view.result().flashcards[deck.current()];
    let (side, body, color) = if deck.flipped() {
        ("Back", card.back.as_str(), Color::Green)
    } else {
        ("Front", card.front.as_str(), Color::Cyan)
    };

    let mut text = Text::default();
    text.push_line(Line::from(Span::styled(
        format!("Card {} of {}", deck.current() + 1, deck.len()),
        dim_style(),
    )));
    text.push_line(Line::from(""));
    text.push_line(Line::from(Span::styled(
        side,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )));
    text.push_line(Line::from(""));
    text.push_line(Line::from(body));
    text.push_line(Line::from(""));
    text.push_line(Line::from(Span::styled("Space to flip", dim_style())));
    text
}

/// Header, tab bar and the active pane of a study view.
pub fn draw_study(f: &mut Frame, area: Rect, view: &StudyView, header: &str, saving: bool) {
    let layout = calculate_study_chunks(area);

    let mut header_spans = vec![Span::styled(header.to_string(), title_style())];
    if saving {
        header_spans.push(Span::styled("  Saving...", dim_style()));
    }
    let title = Paragraph::new(Line::from(header_spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, layout.header_area);

    let titles: Vec<Line> = StudyTab::ALL
        .iter()
        .enumerate()
        .map(|(i, tab)| {
            let label = format!("{} {}", i + 1, tab.label());
            if view.is_available(*tab) {
                Line::from(label)
            } else {
                Line::from(Span::styled(label, Style::default().fg(Color::DarkGray)))
            }
        })
        .collect();
    let selected = StudyTab::ALL
        .iter()
        .position(|t| *t == view.active())
        .unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(tabs, layout.tabs_area);

    let content = match view.active() {
        StudyTab::Summary => summary_text(view),
        StudyTab::Quiz => match view.mode() {
            QuizMode::Interactive => interactive_quiz_text(view),
            QuizMode::Review => review_quiz_text(view.result()),
        },
        StudyTab::Flashcards => flashcard_text(view),
    };
    let pane = Paragraph::new(content)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(view.active().label()),
        );
    f.render_widget(pane, layout.content_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample_result;
    use crate::study::narration::mock::RecordingSpeech;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;
    use std::time::Instant;

    fn screen(view: &StudyView) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|f| draw_study(f, f.area(), view, "Header", false))
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn view(mode: QuizMode) -> StudyView {
        let (engine, _) = RecordingSpeech::new(&[]);
        StudyView::with_mode(Arc::new(sample_result()), Box::new(engine), mode)
    }

    #[test]
    fn test_option_labels_past_z_are_numeric() {
        assert_eq!(option_label(0), "A");
        assert_eq!(option_label(25), "Z");
        assert_eq!(option_label(26), "27");
        assert_eq!(option_label(300), "301");
    }

    #[test]
    fn test_revealed_answer_shows_verdict() {
        let mut v = view(QuizMode::Interactive);
        v.select_tab(StudyTab::Quiz);
        v.select_answer(0, Instant::now());
        let s = screen(&v);
        assert!(s.contains("✗ Incorrect"));
        assert!(s.contains("Cells make up all living things."));
    }

    #[test]
    fn test_review_lists_every_question() {
        let mut v = view(QuizMode::Review);
        v.select_tab(StudyTab::Quiz);
        let s = screen(&v);
        assert!(s.contains("1. What is the basic unit of life?"));
        assert!(s.contains("3. Plants make food by?"));
        assert!(s.contains("Photosynthesis ✓"));
    }

    #[test]
    fn test_flashcard_sides() {
        let mut v = view(QuizMode::Interactive);
        v.select_tab(StudyTab::Flashcards);
        assert!(screen(&v).contains("Front"));
        v.deck.flip();
        let s = screen(&v);
        assert!(s.contains("Back"));
        assert!(s.contains("Basic unit of life"));
    }

    #[test]
    fn test_empty_summary_placeholder() {
        let (engine, _) = RecordingSpeech::new(&[]);
        let v = StudyView::new(Arc::new(ProcessingResult::default()), Box::new(engine));
        assert!(screen(&v).contains("No summary available"));
    }
}
