//! Per-message widget: renders one message's header and body, and turns
//! interactive keys into reply or narrowing actions.

use chrono::DateTime;
use ratatui::crossterm::event::{KeyCode, KeyEvent, MouseButton};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use crate::core::compose::ComposeAction;
use crate::core::message::{Message, MessageContext};
use crate::core::narrow::Controller;

/// Fixed delimiter between stream name and topic in the header.
const TOPIC_DELIMITER: &str = " > ";

/// Header label for private messages, independent of sender.
const PRIVATE_LABEL: &str = "Private Message";

/// A read-only view of one message. Display fields are cached at
/// construction and reused to prefill the compose panel on reply.
#[derive(Debug, Clone)]
pub struct MessageBox {
    message: Message,
    caption: Option<String>,
    stream_id: Option<u64>,
    topic: Option<String>,
    email: String,
}

impl MessageBox {
    pub fn new(message: Message) -> Self {
        let (caption, stream_id, topic) = match &message.context {
            MessageContext::Stream {
                stream,
                stream_id,
                topic,
            } => (Some(stream.clone()), Some(*stream_id), Some(topic.clone())),
            MessageContext::Private => (None, None, None),
        };
        let email = message.sender_email.clone();
        Self {
            message,
            caption,
            stream_id,
            topic,
            email,
        }
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }

    pub fn stream_id(&self) -> Option<u64> {
        self.stream_id
    }

    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Every message participates in focus and keyboard navigation.
    pub fn is_selectable(&self) -> bool {
        true
    }

    /// Timestamp formatted for the header's right edge.
    pub fn format_time(&self) -> String {
        DateTime::from_timestamp(self.message.time, 0)
            .map(|dt| dt.format("%a %b %d %H:%M").to_string())
            .unwrap_or_default()
    }

    fn header_label(&self) -> String {
        match (&self.caption, &self.topic) {
            (Some(stream), Some(topic)) => format!("{stream}{TOPIC_DELIMITER}{topic}"),
            _ => PRIVATE_LABEL.to_string(),
        }
    }

    /// Header line: stream context (or the private label) on the left,
    /// timestamp right-aligned within `width` columns.
    pub fn header_line(&self, width: u16, selected: bool) -> Line<'static> {
        let label = self.header_label();
        let time = self.format_time();

        let header_style = if selected {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };

        let pad = (width as usize)
            .saturating_sub(label.width())
            .saturating_sub(time.width())
            .max(1);

        Line::from(vec![
            Span::styled(label, header_style),
            Span::styled(" ".repeat(pad), header_style),
            Span::styled(time, header_style),
        ])
    }

    /// Body: sender name on its own line, then the message content.
    pub fn body_lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![Line::from(Span::styled(
            self.message.sender.clone(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ))];
        for content_line in self.message.content.lines() {
            lines.push(Line::from(content_line.to_string()));
        }
        lines
    }

    /// All display lines for this message, header first.
    pub fn display_lines(&self, width: u16, selected: bool) -> Vec<Line<'static>> {
        let mut lines = vec![self.header_line(width, selected)];
        lines.extend(self.body_lines());
        lines
    }

    /// The compose prefill for replying in this message's context.
    fn reply_action(&self) -> ComposeAction {
        match (&self.caption, &self.topic) {
            (Some(stream), Some(topic)) => ComposeAction::Stream {
                stream: stream.clone(),
                topic: topic.clone(),
            },
            _ => ComposeAction::Private {
                recipient: self.email.clone(),
            },
        }
    }

    /// The compose prefill for starting a new topic at the same target.
    /// For private messages this is identical to a reply.
    fn compose_new_action(&self) -> ComposeAction {
        match &self.caption {
            Some(stream) => ComposeAction::Stream {
                stream: stream.clone(),
                topic: String::new(),
            },
            None => ComposeAction::Private {
                recipient: self.email.clone(),
            },
        }
    }

    /// Translate a key press into a compose request or a controller call.
    /// Returns the compose action when one should open the compose panel.
    pub fn handle_key(
        &self,
        key: &KeyEvent,
        controller: &mut dyn Controller,
    ) -> Option<ComposeAction> {
        match key.code {
            KeyCode::Enter => Some(self.reply_action()),
            KeyCode::Char('c') => Some(self.compose_new_action()),
            KeyCode::Char('S') => {
                if self.message.is_private() {
                    controller.narrow_to_user(self);
                } else {
                    controller.narrow_to_stream(self);
                }
                None
            }
            KeyCode::Char('s') => {
                if self.message.is_private() {
                    controller.narrow_to_user(self);
                } else {
                    controller.narrow_to_topic(self);
                }
                None
            }
            KeyCode::Esc => {
                controller.show_all_messages(self);
                None
            }
            _ => None,
        }
    }

    /// Primary mouse button press is equivalent to pressing Enter.
    pub fn handle_mouse(
        &self,
        button: MouseButton,
        controller: &mut dyn Controller,
    ) -> Option<ComposeAction> {
        if button == MouseButton::Left {
            let key = KeyEvent::new(KeyCode::Enter, ratatui::crossterm::event::KeyModifiers::NONE);
            self.handle_key(&key, controller)
        } else {
            None
        }
    }
}
