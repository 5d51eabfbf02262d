use super::{dim_style, draw_study};
use crate::app::HistoryPage;
use crate::models::HistoryItem;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

fn item_lines(item: &HistoryItem, selected: bool) -> ListItem<'static> {
    let heading_style = if selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    ListItem::new(Text::from(vec![
        Line::from(Span::styled(
            format!("{} – Level: {}", item.created_label(), item.level),
            heading_style,
        )),
        Line::from(Span::styled(item.preview(), dim_style())),
        Line::from(""),
    ]))
}

pub fn draw_history(f: &mut Frame, area: Rect, history: &HistoryPage) {
    if let Some(view) = &history.detail {
        draw_study(f, area, view, "Saved Results", false);
        return;
    }

    let block = Block::default().borders(Borders::ALL).title("Your History");

    if history.loading && history.items.is_empty() {
        let loading = Paragraph::new("Loading your history...")
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(loading, area);
        return;
    }

    if history.items.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(Span::styled("No saved results yet", dim_style())),
            Line::from(""),
            Line::from("Process some content and save it from the results page."),
        ])
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = history
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| item_lines(item, i == history.selected))
        .collect();
    let list = List::new(items).block(block);
    f.render_widget(list, area);
}
