//! Narrowing: restricting the visible message list to one sender, stream,
//! or topic.

use crate::core::message::{Message, MessageContext};
use crate::ui::message_box::MessageBox;

/// The active narrow, owned by the app.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NarrowState {
    /// No narrow: every message is visible.
    #[default]
    All,
    /// Private conversation with one user, keyed by email.
    User(String),
    /// Everything in one stream.
    Stream(String),
    /// One topic within one stream.
    Topic { stream: String, topic: String },
}

impl NarrowState {
    pub fn matches(&self, message: &Message) -> bool {
        match self {
            NarrowState::All => true,
            NarrowState::User(email) => {
                message.is_private() && message.sender_email == *email
            }
            NarrowState::Stream(name) => match &message.context {
                MessageContext::Stream { stream, .. } => stream == name,
                MessageContext::Private => false,
            },
            NarrowState::Topic { stream, topic } => match &message.context {
                MessageContext::Stream {
                    stream: s,
                    topic: t,
                    ..
                } => s == stream && t == topic,
                MessageContext::Private => false,
            },
        }
    }

    /// Short description for the pane title.
    pub fn describe(&self) -> String {
        match self {
            NarrowState::All => "All messages".to_string(),
            NarrowState::User(email) => format!("Private: {email}"),
            NarrowState::Stream(name) => format!("Stream: {name}"),
            NarrowState::Topic { stream, topic } => format!("{stream} > {topic}"),
        }
    }
}

/// Navigation sink for message-box shortcuts. The message box holds no
/// navigation state of its own; it hands itself to whichever controller
/// was injected at construction time.
pub trait Controller {
    /// Narrow to the message's sender (private conversations).
    fn narrow_to_user(&mut self, message_box: &MessageBox);
    /// Narrow to the message's whole stream.
    fn narrow_to_stream(&mut self, message_box: &MessageBox);
    /// Narrow to the message's specific topic.
    fn narrow_to_topic(&mut self, message_box: &MessageBox);
    /// Drop any active narrow.
    fn show_all_messages(&mut self, message_box: &MessageBox);
}
