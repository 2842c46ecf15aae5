//! Full-frame rendering: the narrowed message list above, the compose
//! panel below.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::{Block, Paragraph},
    Frame,
};

use crate::core::app::{App, Focus};
use crate::ui::compose_box;
use crate::ui::message_box::MessageBox;

/// Start offset and length of one message's lines in the flattened list,
/// used for scrolling and mouse hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageLineSpan {
    pub start: usize,
    pub len: usize,
}

/// Split the frame into the message pane and the compose pane.
pub fn panes(area: Rect, app: &App) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(compose_box::desired_height(&app.compose)),
        ])
        .split(area);
    (chunks[0], chunks[1])
}

/// Flatten the visible messages into display lines, with one blank
/// separator line after each message.
pub fn message_lines(app: &App, width: u16) -> (Vec<Line<'static>>, Vec<MessageLineSpan>) {
    let mut lines = Vec::new();
    let mut spans = Vec::new();
    for (idx, message) in app.visible_messages().into_iter().enumerate() {
        let mb = MessageBox::new(message.clone());
        let start = lines.len();
        lines.extend(mb.display_lines(width, idx == app.selected));
        // The span covers the message's own lines only; the separator
        // that follows belongs to no message.
        let len = lines.len() - start;
        lines.push(Line::from(""));
        spans.push(MessageLineSpan { start, len });
    }
    (lines, spans)
}

/// Scroll offset that keeps the selected message in view. The newest
/// selection sits against the bottom edge; earlier messages pull the
/// window up just enough to stay visible.
pub fn scroll_offset(
    spans: &[MessageLineSpan],
    selected: usize,
    total_lines: usize,
    available_height: u16,
) -> u16 {
    let avail = available_height as usize;
    if avail == 0 || total_lines <= avail {
        return 0;
    }
    let max_offset = total_lines - avail;
    let Some(span) = spans.get(selected) else {
        return max_offset as u16;
    };
    let end = span.start + span.len;
    // Keep the block's end visible, but never scroll its first line out
    // of view; a block taller than the window shows from its top.
    let desired = end.saturating_sub(avail);
    desired.min(span.start).min(max_offset) as u16
}

pub fn ui(f: &mut Frame, app: &App) {
    let (messages_area, compose_area) = panes(f.area(), app);

    let title = format!(
        "Brume v{} — {}",
        env!("CARGO_PKG_VERSION"),
        app.narrow.describe()
    );

    // Account for the title row.
    let width = messages_area.width;
    let available_height = messages_area.height.saturating_sub(1);
    let (lines, spans) = message_lines(app, width);
    let offset = scroll_offset(&spans, app.selected, lines.len(), available_height);

    let messages_paragraph = Paragraph::new(lines)
        .block(Block::default().title(title))
        .scroll((offset, 0));
    f.render_widget(messages_paragraph, messages_area);

    compose_box::render(f, compose_area, &app.compose, app.focus == Focus::Compose);
}

/// The visible-list index of the message rendered at terminal row `y`, if
/// any. Inverse of the layout performed by [`ui`].
pub fn message_at(app: &App, messages_area: Rect, y: u16) -> Option<usize> {
    if y <= messages_area.y || y >= messages_area.y + messages_area.height {
        return None;
    }
    let (lines, spans) = message_lines(app, messages_area.width);
    let available_height = messages_area.height.saturating_sub(1);
    let offset = scroll_offset(&spans, app.selected, lines.len(), available_height);
    // Row 0 of the pane is the title line.
    let line_index = (y - messages_area.y - 1) as usize + offset as usize;
    spans
        .iter()
        .position(|span| line_index >= span.start && line_index < span.start + span.len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_utils::{create_test_app, private_message, stream_message};

    #[test]
    fn spans_cover_all_lines_contiguously() {
        let mut app = create_test_app();
        app.push_message(stream_message());
        app.push_message(private_message());
        let (lines, spans) = message_lines(&app, 80);

        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].start, 0);
        // One separator line between the blocks, one after the last.
        assert_eq!(spans[1].start, spans[0].len + 1);
        assert_eq!(lines.len(), spans[1].start + spans[1].len + 1);
    }

    #[test]
    fn no_scroll_when_everything_fits() {
        let spans = [MessageLineSpan { start: 0, len: 4 }];
        assert_eq!(scroll_offset(&spans, 0, 4, 10), 0);
    }

    #[test]
    fn bottom_selection_scrolls_its_block_fully_into_view() {
        let spans = [
            MessageLineSpan { start: 0, len: 4 },
            MessageLineSpan { start: 5, len: 4 },
            MessageLineSpan { start: 10, len: 4 },
        ];
        assert_eq!(scroll_offset(&spans, 2, 15, 5), 9);
        assert_eq!(scroll_offset(&spans, 1, 15, 5), 4);
        assert_eq!(scroll_offset(&spans, 0, 15, 5), 0);
    }

    #[test]
    fn oversized_block_shows_from_its_top() {
        let spans = [
            MessageLineSpan { start: 0, len: 4 },
            MessageLineSpan { start: 5, len: 10 },
        ];
        assert_eq!(scroll_offset(&spans, 1, 16, 6), 5);
    }

    #[test]
    fn click_row_maps_back_to_message_index() {
        let mut app = create_test_app();
        app.push_message(stream_message());
        app.push_message(private_message());
        let area = Rect::new(0, 0, 80, 20);

        // Stream message: header + sender + content = rows 1-3, then a
        // separator row that belongs to neither message.
        assert_eq!(message_at(&app, area, 1), Some(0));
        assert_eq!(message_at(&app, area, 3), Some(0));
        assert_eq!(message_at(&app, area, 4), None);
        assert_eq!(message_at(&app, area, 5), Some(1));
        assert_eq!(message_at(&app, area, 7), Some(1));
        assert_eq!(message_at(&app, area, 0), None);
        assert_eq!(message_at(&app, area, 15), None);
    }
}
