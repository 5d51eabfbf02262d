use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct PageLayout {
    pub nav_area: Rect,
    pub body_area: Rect,
    pub status_area: Rect,
}

pub struct StudyLayout {
    pub header_area: Rect,
    pub tabs_area: Rect,
    pub content_area: Rect,
}

pub struct InputLayout {
    pub level_area: Rect,
    pub text_area: Rect,
    pub file_area: Rect,
}

pub fn calculate_page_chunks(area: Rect) -> PageLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(area);

    PageLayout {
        nav_area: chunks[0],
        body_area: chunks[1],
        status_area: chunks[2],
    }
}

pub fn calculate_study_chunks(area: Rect) -> StudyLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
        ])
        .split(area);

    StudyLayout {
        header_area: chunks[0],
        tabs_area: chunks[1],
        content_area: chunks[2],
    }
}

pub fn calculate_input_chunks(area: Rect) -> InputLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(area);

    InputLayout {
        level_area: chunks[0],
        text_area: chunks[1],
        file_area: chunks[2],
    }
}

/// A box `width` percent wide and `height` rows tall, centred in `area`.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = (u32::from(area.width) * u32::from(width.min(100)) / 100) as u16;
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_layout() {
        let layout = calculate_page_chunks(Rect::new(0, 0, 100, 40));
        assert_eq!(layout.nav_area.height, 3);
        assert_eq!(layout.status_area.height, 3);
        assert_eq!(layout.body_area.height, 34);
        assert_eq!(layout.status_area.y, 37);
    }

    #[test]
    fn test_study_layout() {
        let layout = calculate_study_chunks(Rect::new(0, 0, 80, 30));
        assert_eq!(layout.header_area.height, 3);
        assert_eq!(layout.tabs_area.height, 3);
        assert_eq!(layout.content_area.height, 24);
    }

    #[test]
    fn test_input_layout() {
        let layout = calculate_input_chunks(Rect::new(0, 0, 80, 20));
        assert_eq!(layout.level_area.height, 3);
        assert_eq!(layout.file_area.height, 3);
        assert_eq!(layout.text_area.height, 14);
    }

    #[test]
    fn test_centered_rect_fits_inside() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(50, 10, area);
        assert_eq!(rect.height, 10);
        assert_eq!(rect.width, 50);
        assert_eq!(rect.x, 25);
        assert_eq!(rect.y, 15);
    }
}
