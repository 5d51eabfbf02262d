use unicode_width::UnicodeWidthChar;

/// Visual lines of `text` wrapped at `max_width` columns, matching ratatui's
/// `Wrap { trim: true }`. Each entry is (start, end) in character indices.
fn wrap_spans(text: &str, max_width: usize) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut width = 0;
    let mut start = 0;
    let mut count = 0;

    for (idx, ch) in text.chars().enumerate() {
        count = idx + 1;
        if ch == '\n' {
            spans.push((start, idx));
            width = 0;
            start = idx + 1;
            continue;
        }
        let w = ch.width().unwrap_or(1);
        if width + w > max_width && width > 0 {
            spans.push((start, idx));
            width = w;
            start = idx;
        } else {
            width += w;
        }
    }

    if start < count || text.ends_with('\n') {
        spans.push((start, count));
    }
    spans
}

/// Line and column of a cursor (a character index) within wrapped text.
pub fn calculate_wrapped_cursor_position(
    text: &str,
    cursor: usize,
    max_width: usize,
) -> (usize, usize) {
    if text.is_empty() || cursor == 0 || max_width == 0 {
        return (0, 0);
    }

    let spans = wrap_spans(text, max_width);
    for (line, (start, end)) in spans.iter().enumerate() {
        if cursor >= *start && cursor <= *end {
            return (line, cursor - start);
        }
    }

    match spans.last() {
        Some((start, end)) => (spans.len() - 1, end - start),
        None => (0, 0),
    }
}
