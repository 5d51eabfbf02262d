use super::{centered_rect, dim_style, title_style};
use crate::app::{AuthField, AuthForm};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthKind {
    Login,
    Signup,
}

impl AuthKind {
    fn title(&self) -> &'static str {
        match self {
            AuthKind::Login => "Welcome Back",
            AuthKind::Signup => "Create Account",
        }
    }

    fn pending(&self) -> &'static str {
        match self {
            AuthKind::Login => "Logging in...",
            AuthKind::Signup => "Creating account...",
        }
    }

    fn switch_hint(&self) -> &'static str {
        match self {
            AuthKind::Login => "Don't have an account? F8 to sign up",
            AuthKind::Signup => "Already have an account? F7 to log in",
        }
    }
}

fn field_block(title: &str, focused: bool) -> Block<'_> {
    let border = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(border)
}

pub fn draw_auth(f: &mut Frame, area: Rect, form: &AuthForm, kind: AuthKind) {
    let panel = centered_rect(60, 14, area);
    f.render_widget(Clear, panel);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Min(1),
        ])
        .split(panel);

    let title = Paragraph::new(Span::styled(kind.title(), title_style())).alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    let email = Paragraph::new(form.email.value())
        .block(field_block("Email", form.focus == AuthField::Email));
    f.render_widget(email, chunks[1]);

    let masked = "•".repeat(form.password.char_count());
    let password = Paragraph::new(masked)
        .block(field_block("Password", form.focus == AuthField::Password));
    f.render_widget(password, chunks[2]);

    let status = if form.submitting {
        Line::from(Span::styled(kind.pending(), Style::default().fg(Color::Blue)))
    } else if let Some(success) = &form.success {
        Line::from(Span::styled(success.clone(), Style::default().fg(Color::Green)))
    } else if let Some(error) = &form.error {
        Line::from(Span::styled(error.clone(), Style::default().fg(Color::Red)))
    } else {
        Line::from("")
    };
    f.render_widget(Paragraph::new(status).alignment(Alignment::Center), chunks[3]);

    let hint = Paragraph::new(Span::styled(kind.switch_hint(), dim_style())).alignment(Alignment::Center);
    f.render_widget(hint, chunks[4]);

    let (field_area, cursor) = match form.focus {
        AuthField::Email => (chunks[1], form.email.cursor()),
        AuthField::Password => (chunks[2], form.password.cursor()),
    };
    f.set_cursor_position((field_area.x + 1 + cursor as u16, field_area.y + 1));
}
