//! Application state: the message list, the compose panel, the active
//! narrow, and which pane owns the keyboard.

use crate::core::compose::ComposePanel;
use crate::core::message::Message;
use crate::core::narrow::{Controller, NarrowState};
use crate::ui::message_box::MessageBox;

/// Which pane receives key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Messages,
    Compose,
}

pub struct App {
    pub messages: Vec<Message>,
    pub compose: ComposePanel,
    pub narrow: NarrowState,
    pub focus: Focus,
    /// Index into the *visible* (narrowed) message list.
    pub selected: usize,
    pub exit_requested: bool,
    /// Display name used for the local echo of sent messages.
    pub own_name: String,
    pub own_email: String,
}

impl App {
    pub fn new(own_name: String, own_email: String) -> Self {
        Self {
            messages: Vec::new(),
            compose: ComposePanel::new(),
            narrow: NarrowState::All,
            focus: Focus::Messages,
            selected: 0,
            exit_requested: false,
            own_name,
            own_email,
        }
    }

    /// Messages matching the active narrow, oldest first.
    pub fn visible_messages(&self) -> Vec<&Message> {
        self.messages
            .iter()
            .filter(|m| self.narrow.matches(m))
            .collect()
    }

    /// The message box for the currently selected message, if any.
    pub fn selected_message_box(&self) -> Option<MessageBox> {
        self.visible_messages()
            .get(self.selected)
            .map(|m| MessageBox::new((*m).clone()))
    }

    pub fn select_next(&mut self) {
        let len = self.visible_messages().len();
        if len > 0 && self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Select by index into the visible list, clamping.
    pub fn select(&mut self, index: usize) {
        let len = self.visible_messages().len();
        self.selected = index.min(len.saturating_sub(1));
    }

    fn set_narrow(&mut self, narrow: NarrowState) {
        tracing::debug!(narrow = %narrow.describe(), "narrow changed");
        self.narrow = narrow;
        // Selection indexes the visible list; land on its newest entry.
        self.selected = self.visible_messages().len().saturating_sub(1);
    }

    /// Append a message and keep the selection on the newest visible one
    /// when it was already there.
    pub fn push_message(&mut self, message: Message) {
        let was_at_end = self.selected + 1 >= self.visible_messages().len().max(1);
        self.messages.push(message);
        if was_at_end {
            self.selected = self.visible_messages().len().saturating_sub(1);
        }
    }
}

impl Controller for App {
    fn narrow_to_user(&mut self, message_box: &MessageBox) {
        self.set_narrow(NarrowState::User(message_box.email().to_string()));
    }

    fn narrow_to_stream(&mut self, message_box: &MessageBox) {
        if let Some(stream) = message_box.caption() {
            self.set_narrow(NarrowState::Stream(stream.to_string()));
        }
    }

    fn narrow_to_topic(&mut self, message_box: &MessageBox) {
        if let (Some(stream), Some(topic)) = (message_box.caption(), message_box.topic()) {
            self.set_narrow(NarrowState::Topic {
                stream: stream.to_string(),
                topic: topic.to_string(),
            });
        }
    }

    fn show_all_messages(&mut self, _message_box: &MessageBox) {
        self.set_narrow(NarrowState::All);
    }
}
