//! Compose panel widget: draws whichever layout the panel is in and turns
//! key presses into state transitions or a submit.

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::api::OutgoingMessage;
use crate::core::compose::{
    ComposePanel, ComposeState, MenuChoice, PrivateField, SendStatus, StreamField,
};
use crate::utils::field::LineField;

const PRIVATE_BUTTON: &str = "New Private Message";
const STREAM_BUTTON: &str = "New Topic";

/// What the chat loop should do after a key reached the compose panel.
#[derive(Debug, PartialEq)]
pub enum ComposeKeyResult {
    /// Key consumed, nothing further to do.
    Handled,
    /// Key not meaningful here.
    Ignored,
    /// A completed request ready to hand to the messaging client.
    Submit(OutgoingMessage),
    /// Esc from the idle menu: give focus back to the message list.
    LeaveCompose,
}

/// Rows the panel wants for its current layout, borders included.
pub fn desired_height(panel: &ComposePanel) -> u16 {
    match &panel.state {
        ComposeState::Menu { .. } => 3,
        // Addressing row plus body row, each bordered.
        ComposeState::Private { .. } | ComposeState::Stream { .. } => 6,
    }
}

/// Translate one key press into a panel transition.
pub fn handle_key(panel: &mut ComposePanel, key: &KeyEvent) -> ComposeKeyResult {
    match &mut panel.state {
        ComposeState::Menu { selected } => match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                *selected = selected.toggled();
                ComposeKeyResult::Handled
            }
            KeyCode::Enter => {
                match *selected {
                    MenuChoice::Private => panel.enter_private_mode(""),
                    MenuChoice::Stream => panel.enter_stream_mode("", ""),
                }
                ComposeKeyResult::Handled
            }
            KeyCode::Esc => ComposeKeyResult::LeaveCompose,
            _ => ComposeKeyResult::Ignored,
        },
        _ => match key.code {
            KeyCode::Enter => match panel.build_request() {
                Some(request) => ComposeKeyResult::Submit(request),
                None => ComposeKeyResult::Handled,
            },
            KeyCode::Esc => {
                panel.show_menu();
                ComposeKeyResult::Handled
            }
            KeyCode::Tab | KeyCode::Down => {
                panel.focus_next();
                ComposeKeyResult::Handled
            }
            KeyCode::BackTab | KeyCode::Up => {
                panel.focus_prev();
                ComposeKeyResult::Handled
            }
            _ => {
                let consumed = panel
                    .focused_field_mut()
                    .map(|field| field.handle_key(key))
                    .unwrap_or(false);
                if consumed {
                    ComposeKeyResult::Handled
                } else {
                    ComposeKeyResult::Ignored
                }
            }
        },
    }
}

/// Which menu button, if any, sits under a click at (x, y).
pub fn menu_button_at(panel: &ComposePanel, area: Rect, x: u16, y: u16) -> Option<MenuChoice> {
    if !matches!(panel.state, ComposeState::Menu { .. }) {
        return None;
    }
    let halves = split_menu(area);
    if halves[0].contains((x, y).into()) {
        Some(MenuChoice::Private)
    } else if halves[1].contains((x, y).into()) {
        Some(MenuChoice::Stream)
    } else {
        None
    }
}

fn split_menu(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area)
}

fn status_suffix(status: &SendStatus) -> String {
    match status {
        SendStatus::Idle => String::new(),
        SendStatus::Pending => " — sending…".to_string(),
        SendStatus::Failed(reason) => format!(" — send failed: {reason}"),
    }
}

fn field_block(title: &str, focused: bool) -> Block<'static> {
    let style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(title.to_string())
}

fn render_field(
    f: &mut Frame,
    area: Rect,
    title: &str,
    field: &LineField,
    focused: bool,
    panel_focused: bool,
) {
    let para = Paragraph::new(field.text()).block(field_block(title, focused && panel_focused));
    f.render_widget(para, area);
    if focused && panel_focused {
        f.set_cursor_position((area.x + 1 + field.cursor_column(), area.y + 1));
    }
}

/// Draw the panel into `area`. `panel_focused` controls highlight and
/// cursor placement; the message list may own the keyboard instead.
pub fn render(f: &mut Frame, area: Rect, panel: &ComposePanel, panel_focused: bool) {
    match &panel.state {
        ComposeState::Menu { selected } => {
            let halves = split_menu(area);
            for (rect, label, choice) in [
                (halves[0], PRIVATE_BUTTON, MenuChoice::Private),
                (halves[1], STREAM_BUTTON, MenuChoice::Stream),
            ] {
                let is_selected = panel_focused && *selected == choice;
                let style = if is_selected {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                let button = Paragraph::new(label)
                    .style(style)
                    .alignment(Alignment::Center)
                    .block(Block::default().borders(Borders::ALL));
                f.render_widget(button, rect);
            }
        }
        ComposeState::Private {
            recipient,
            body,
            focus,
        } => {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(3), Constraint::Length(3)])
                .split(area);
            render_field(
                f,
                rows[0],
                "To",
                recipient,
                *focus == PrivateField::Recipient,
                panel_focused,
            );
            let body_title = format!("Message{}", status_suffix(&panel.send_status));
            render_field(
                f,
                rows[1],
                &body_title,
                body,
                *focus == PrivateField::Body,
                panel_focused,
            );
        }
        ComposeState::Stream {
            stream,
            topic,
            body,
            focus,
        } => {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(3), Constraint::Length(3)])
                .split(area);
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(rows[0]);
            render_field(
                f,
                cols[0],
                "Stream",
                stream,
                *focus == StreamField::Stream,
                panel_focused,
            );
            render_field(
                f,
                cols[1],
                "Topic",
                topic,
                *focus == StreamField::Topic,
                panel_focused,
            );
            let body_title = format!("Message{}", status_suffix(&panel.send_status));
            render_field(
                f,
                rows[1],
                &body_title,
                body,
                *focus == StreamField::Body,
                panel_focused,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::RecipientType;
    use ratatui::crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(panel: &mut ComposePanel, text: &str) {
        for c in text.chars() {
            assert_eq!(
                handle_key(panel, &key(KeyCode::Char(c))),
                ComposeKeyResult::Handled
            );
        }
    }

    #[test]
    fn menu_enter_opens_the_selected_mode() {
        let mut panel = ComposePanel::new();
        handle_key(&mut panel, &key(KeyCode::Enter));
        assert!(matches!(panel.state, ComposeState::Private { .. }));

        let mut panel = ComposePanel::new();
        handle_key(&mut panel, &key(KeyCode::Right));
        handle_key(&mut panel, &key(KeyCode::Enter));
        assert!(matches!(panel.state, ComposeState::Stream { .. }));
    }

    #[test]
    fn typed_keys_reach_the_focused_field_and_enter_submits() {
        let mut panel = ComposePanel::new();
        panel.enter_private_mode("hamlet@example.com");
        type_text(&mut panel, "to be");

        let result = handle_key(&mut panel, &key(KeyCode::Enter));
        match result {
            ComposeKeyResult::Submit(req) => {
                assert_eq!(req.recipient_type, RecipientType::Private);
                assert_eq!(req.to, "hamlet@example.com");
                assert_eq!(req.content, "to be");
            }
            other => panic!("expected submit, got {other:?}"),
        }
    }

    #[test]
    fn tab_moves_between_stream_fields() {
        let mut panel = ComposePanel::new();
        panel.enter_stream_mode("", "");
        type_text(&mut panel, "denmark");
        handle_key(&mut panel, &key(KeyCode::Tab));
        type_text(&mut panel, "castle");
        handle_key(&mut panel, &key(KeyCode::Tab));
        type_text(&mut panel, "a ghost!");

        match handle_key(&mut panel, &key(KeyCode::Enter)) {
            ComposeKeyResult::Submit(req) => {
                assert_eq!(req.to, "denmark");
                assert_eq!(req.subject.as_deref(), Some("castle"));
                assert_eq!(req.content, "a ghost!");
            }
            other => panic!("expected submit, got {other:?}"),
        }
    }

    #[test]
    fn enter_with_empty_body_is_a_no_op() {
        let mut panel = ComposePanel::new();
        panel.enter_private_mode("hamlet@example.com");
        assert_eq!(
            handle_key(&mut panel, &key(KeyCode::Enter)),
            ComposeKeyResult::Handled
        );
        assert!(matches!(panel.state, ComposeState::Private { .. }));
    }

    #[test]
    fn esc_discards_edits_and_returns_to_menu() {
        let mut panel = ComposePanel::new();
        panel.enter_stream_mode("denmark", "castle");
        type_text(&mut panel, "draft");
        handle_key(&mut panel, &key(KeyCode::Esc));
        assert!(panel.is_menu());

        // Esc again leaves the compose pane entirely.
        assert_eq!(
            handle_key(&mut panel, &key(KeyCode::Esc)),
            ComposeKeyResult::LeaveCompose
        );
    }

    #[test]
    fn menu_clicks_map_to_buttons() {
        let panel = ComposePanel::new();
        let area = Rect::new(0, 10, 80, 3);
        assert_eq!(
            menu_button_at(&panel, area, 5, 11),
            Some(MenuChoice::Private)
        );
        assert_eq!(
            menu_button_at(&panel, area, 60, 11),
            Some(MenuChoice::Stream)
        );
        assert_eq!(menu_button_at(&panel, area, 5, 30), None);
    }

    #[test]
    fn edit_mode_ignores_clicks_through_menu_hit_test() {
        let mut panel = ComposePanel::new();
        panel.enter_private_mode("");
        let area = Rect::new(0, 10, 80, 6);
        assert_eq!(menu_button_at(&panel, area, 5, 11), None);
    }

    #[test]
    fn desired_height_tracks_layout() {
        let mut panel = ComposePanel::new();
        assert_eq!(desired_height(&panel), 3);
        panel.enter_private_mode("");
        assert_eq!(desired_height(&panel), 6);
        panel.enter_stream_mode("", "");
        assert_eq!(desired_height(&panel), 6);
    }
}
