mod auth;
mod demo;
mod history;
mod input;
pub mod layout;
mod pages;
mod study;

pub use layout::{calculate_page_chunks, calculate_study_chunks, centered_rect};
pub use study::draw_study;

use crate::app::{App, NoticeKind};
use crate::navigation::Page;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub(crate) fn key_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn title_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn dim_style() -> Style {
    Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC)
}

/// "Key Label  Key Label" help line.
pub(crate) fn help_line(hints: &[(&str, &str)]) -> Line<'static> {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, label) in hints {
        spans.push(Span::styled(key.to_string(), key_style()));
        spans.push(Span::from(format!(" {}  ", label)));
    }
    Line::from(spans)
}

/// Entries of the navigation bar, each with its function key.
pub fn nav_entries(authenticated: bool) -> Vec<(&'static str, Page)> {
    let mut entries = vec![
        ("F1", Page::Landing),
        ("F2", Page::Input),
        ("F3", Page::Results),
        ("F4", Page::History),
        ("F5", Page::Demo),
        ("F6", Page::About),
    ];
    if !authenticated {
        entries.push(("F7", Page::Login));
        entries.push(("F8", Page::Signup));
    }
    entries
}

fn draw_nav_bar(f: &mut Frame, area: Rect, current: Page, authenticated: bool) {
    let mut spans = vec![Span::styled(
        "StudyBridge  ",
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
    )];
    for (key, page) in nav_entries(authenticated) {
        let style = if page == current {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default()
        };
        spans.push(Span::styled(key, key_style()));
        spans.push(Span::styled(format!(" {} ", page.title()), style));
        spans.push(Span::from(" "));
    }
    if authenticated {
        spans.push(Span::styled("F7", key_style()));
        spans.push(Span::from(" Logout"));
    }

    let bar = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Left)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(bar, area);
}

fn page_hints(app: &App) -> Vec<(&'static str, &'static str)> {
    match app.page() {
        Page::Landing => vec![("Enter", "Get Started"), ("d", "Demo"), ("a", "About"), ("q", "Quit")],
        Page::About => vec![("Enter", "Start Learning"), ("Esc", "Home")],
        Page::Input => vec![
            ("Tab", "Next Field"),
            ("Ctrl+G", "Process"),
            ("Esc", "Dismiss Error / Home"),
            ("Ctrl+C", "Exit"),
        ],
        Page::Results => vec![
            ("1-3/Tab", "Tabs"),
            ("a-d", "Answer"),
            ("←/→", "Cards"),
            ("Space", "Flip"),
            ("Ctrl+L", "Listen"),
            ("Ctrl+S", "Save"),
            ("Ctrl+E", "Export"),
        ],
        Page::History if app.history.detail.is_some() => vec![
            ("1-3/Tab", "Tabs"),
            ("←/→", "Cards"),
            ("Space", "Flip"),
            ("Ctrl+L", "Listen"),
            ("Esc", "Back to List"),
        ],
        Page::History => vec![
            ("↑/↓", "Navigate"),
            ("Enter", "Open"),
            ("r", "Refresh"),
            ("n", "New Content"),
        ],
        Page::Demo => vec![("Enter", "Process Demo"), ("i", "Try Your Own Content"), ("Esc", "Home")],
        Page::Login | Page::Signup => vec![("Tab", "Switch Field"), ("Enter", "Submit"), ("Esc", "Home")],
    }
}

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let line = match app.notice() {
        Some(notice) => {
            let color = match notice.kind {
                NoticeKind::Info => Color::Blue,
                NoticeKind::Success => Color::Green,
                NoticeKind::Error => Color::Red,
            };
            Line::from(Span::styled(
                notice.message.clone(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
        }
        None => help_line(&page_hints(app)),
    };
    let status = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, area);
}

pub fn draw(f: &mut Frame, app: &App) {
    let layout = calculate_page_chunks(f.area());
    draw_nav_bar(f, layout.nav_area, app.page(), app.is_authenticated());

    let body = layout.body_area;
    match app.page() {
        Page::Landing => pages::draw_landing(f, body),
        Page::About => pages::draw_about(f, body),
        Page::Input => input::draw_input(f, body, app),
        Page::Results => match &app.results {
            Some(view) => {
                let header = if view.result().is_demo() {
                    "Demo Content Generated"
                } else {
                    "AI Generated Successfully"
                };
                draw_study(f, body, view, header, app.is_saving());
            }
            None => pages::draw_placeholder(f, body, "No results yet"),
        },
        Page::History => history::draw_history(f, body, &app.history),
        Page::Demo => demo::draw_demo(f, body, app),
        Page::Login => auth::draw_auth(f, body, &app.login, auth::AuthKind::Login),
        Page::Signup => auth::draw_auth(f, body, &app.signup, auth::AuthKind::Signup),
    }

    draw_status(f, layout.status_area, app);
}
