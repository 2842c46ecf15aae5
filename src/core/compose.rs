//! Compose-panel state machine.
//!
//! The panel is always in exactly one of three layouts: the idle menu, a
//! private-message editor, or a stream-post editor. Each layout carries its
//! own fields as enum payload, so a private session has no stream or topic
//! field to consult and vice versa. Switching layouts rebuilds the payload
//! and discards unsent edits.

use crate::api::OutgoingMessage;
use crate::utils::field::LineField;

/// Which menu button currently has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Private,
    Stream,
}

impl MenuChoice {
    pub fn toggled(self) -> Self {
        match self {
            MenuChoice::Private => MenuChoice::Stream,
            MenuChoice::Stream => MenuChoice::Private,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivateField {
    Recipient,
    Body,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamField {
    Stream,
    Topic,
    Body,
}

#[derive(Debug)]
pub enum ComposeState {
    Menu {
        selected: MenuChoice,
    },
    Private {
        recipient: LineField,
        body: LineField,
        focus: PrivateField,
    },
    Stream {
        stream: LineField,
        topic: LineField,
        body: LineField,
        focus: StreamField,
    },
}

/// Outcome of the last submit, rendered in the panel chrome. `Pending`
/// means a send task is in flight; the panel stays editable but refuses a
/// second submit until the outcome lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendStatus {
    Idle,
    Pending,
    Failed(String),
}

/// A request from elsewhere in the UI (reply shortcuts) to open the panel
/// with prefilled addressing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposeAction {
    Private { recipient: String },
    Stream { stream: String, topic: String },
}

#[derive(Debug)]
pub struct ComposePanel {
    pub state: ComposeState,
    pub send_status: SendStatus,
    /// Identifies the current edit session. Every transition (menu or a
    /// fresh edit layout) bumps it, so a send outcome can be matched to
    /// the session that submitted it and dropped when that session was
    /// discarded before the outcome arrived.
    session_id: u64,
}

impl Default for ComposePanel {
    fn default() -> Self {
        Self::new()
    }
}

impl ComposePanel {
    /// A fresh panel starts at the idle menu.
    pub fn new() -> Self {
        Self {
            state: ComposeState::Menu {
                selected: MenuChoice::Private,
            },
            send_status: SendStatus::Idle,
            session_id: 0,
        }
    }

    pub fn session_id(&self) -> u64 {
        self.session_id
    }

    /// Return to the idle two-button menu, discarding any unsent edits.
    pub fn show_menu(&mut self) {
        self.state = ComposeState::Menu {
            selected: MenuChoice::Private,
        };
        self.send_status = SendStatus::Idle;
        self.session_id += 1;
    }

    /// Switch to the private-message layout. The recipient prefill comes
    /// from reply shortcuts; focus lands on the body when a recipient is
    /// already known.
    pub fn enter_private_mode(&mut self, prefill_recipient: &str) {
        let focus = if prefill_recipient.is_empty() {
            PrivateField::Recipient
        } else {
            PrivateField::Body
        };
        self.state = ComposeState::Private {
            recipient: LineField::with_text(prefill_recipient),
            body: LineField::new(),
            focus,
        };
        self.send_status = SendStatus::Idle;
        self.session_id += 1;
    }

    /// Switch to the stream-post layout with optional stream/topic prefill.
    pub fn enter_stream_mode(&mut self, prefill_stream: &str, prefill_topic: &str) {
        let focus = if prefill_stream.is_empty() {
            StreamField::Stream
        } else if prefill_topic.is_empty() {
            StreamField::Topic
        } else {
            StreamField::Body
        };
        self.state = ComposeState::Stream {
            stream: LineField::with_text(prefill_stream),
            topic: LineField::with_text(prefill_topic),
            body: LineField::new(),
            focus,
        };
        self.send_status = SendStatus::Idle;
        self.session_id += 1;
    }

    /// Open the layout a reply shortcut asked for.
    pub fn apply(&mut self, action: ComposeAction) {
        match action {
            ComposeAction::Private { recipient } => self.enter_private_mode(&recipient),
            ComposeAction::Stream { stream, topic } => self.enter_stream_mode(&stream, &topic),
        }
    }

    pub fn is_menu(&self) -> bool {
        matches!(self.state, ComposeState::Menu { .. })
    }

    /// Build the outgoing request from the current field values. Returns
    /// `None` from the menu, while a send is already pending, or when the
    /// body is empty.
    pub fn build_request(&self) -> Option<OutgoingMessage> {
        if self.send_status == SendStatus::Pending {
            return None;
        }
        match &self.state {
            ComposeState::Menu { .. } => None,
            ComposeState::Private {
                recipient, body, ..
            } => {
                if body.text().trim().is_empty() {
                    return None;
                }
                Some(OutgoingMessage::private(recipient.text(), body.text()))
            }
            ComposeState::Stream {
                stream,
                topic,
                body,
                ..
            } => {
                if body.text().trim().is_empty() {
                    return None;
                }
                Some(OutgoingMessage::stream(
                    stream.text(),
                    topic.text(),
                    body.text(),
                ))
            }
        }
    }

    pub fn mark_pending(&mut self) {
        self.send_status = SendStatus::Pending;
    }

    /// A send succeeded: clear the body only, keeping the addressing fields
    /// so the next message to the same target needs no re-entry.
    pub fn apply_send_success(&mut self) {
        match &mut self.state {
            ComposeState::Menu { .. } => {}
            ComposeState::Private { body, .. } => body.clear(),
            ComposeState::Stream { body, .. } => body.clear(),
        }
        self.send_status = SendStatus::Idle;
    }

    /// A send failed: leave every field intact for retry and record the
    /// reason for display.
    pub fn apply_send_failure(&mut self, reason: impl Into<String>) {
        self.send_status = SendStatus::Failed(reason.into());
    }

    /// Move focus to the next field in the active layout, wrapping.
    pub fn focus_next(&mut self) {
        match &mut self.state {
            ComposeState::Menu { selected } => *selected = selected.toggled(),
            ComposeState::Private { focus, .. } => {
                *focus = match focus {
                    PrivateField::Recipient => PrivateField::Body,
                    PrivateField::Body => PrivateField::Recipient,
                };
            }
            ComposeState::Stream { focus, .. } => {
                *focus = match focus {
                    StreamField::Stream => StreamField::Topic,
                    StreamField::Topic => StreamField::Body,
                    StreamField::Body => StreamField::Stream,
                };
            }
        }
    }

    /// Move focus to the previous field in the active layout, wrapping.
    pub fn focus_prev(&mut self) {
        match &mut self.state {
            ComposeState::Menu { selected } => *selected = selected.toggled(),
            ComposeState::Private { focus, .. } => {
                *focus = match focus {
                    PrivateField::Recipient => PrivateField::Body,
                    PrivateField::Body => PrivateField::Recipient,
                };
            }
            ComposeState::Stream { focus, .. } => {
                *focus = match focus {
                    StreamField::Stream => StreamField::Body,
                    StreamField::Topic => StreamField::Stream,
                    StreamField::Body => StreamField::Topic,
                };
            }
        }
    }

    /// The field that should receive plain keystrokes, if any.
    pub fn focused_field_mut(&mut self) -> Option<&mut LineField> {
        match &mut self.state {
            ComposeState::Menu { .. } => None,
            ComposeState::Private {
                recipient,
                body,
                focus,
            } => Some(match focus {
                PrivateField::Recipient => recipient,
                PrivateField::Body => body,
            }),
            ComposeState::Stream {
                stream,
                topic,
                body,
                focus,
            } => Some(match focus {
                StreamField::Stream => stream,
                StreamField::Topic => topic,
                StreamField::Body => body,
            }),
        }
    }
}
