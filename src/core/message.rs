use serde::{Deserialize, Serialize};

/// Where a message was addressed: into a stream topic, or directly to a
/// user. A tagged enum keeps the stream-only fields (`stream`, `topic`)
/// from existing at all on private messages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MessageContext {
    Stream {
        stream: String,
        stream_id: u64,
        topic: String,
    },
    Private,
}

/// One message as held by the message list. Owned by the app; widgets only
/// ever borrow it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub sender: String,
    pub sender_email: String,
    pub content: String,
    /// Unix timestamp in seconds, as delivered by the server.
    pub time: i64,
    #[serde(flatten)]
    pub context: MessageContext,
}

impl Message {
    pub fn stream(
        sender: impl Into<String>,
        sender_email: impl Into<String>,
        content: impl Into<String>,
        time: i64,
        stream: impl Into<String>,
        stream_id: u64,
        topic: impl Into<String>,
    ) -> Self {
        Self {
            sender: sender.into(),
            sender_email: sender_email.into(),
            content: content.into(),
            time,
            context: MessageContext::Stream {
                stream: stream.into(),
                stream_id,
                topic: topic.into(),
            },
        }
    }

    pub fn private(
        sender: impl Into<String>,
        sender_email: impl Into<String>,
        content: impl Into<String>,
        time: i64,
    ) -> Self {
        Self {
            sender: sender.into(),
            sender_email: sender_email.into(),
            content: content.into(),
            time,
            context: MessageContext::Private,
        }
    }

    pub fn is_private(&self) -> bool {
        matches!(self.context, MessageContext::Private)
    }

    /// Stream name, when this is a stream message.
    pub fn stream_name(&self) -> Option<&str> {
        match &self.context {
            MessageContext::Stream { stream, .. } => Some(stream),
            MessageContext::Private => None,
        }
    }

    /// Topic within the stream, when this is a stream message.
    pub fn topic(&self) -> Option<&str> {
        match &self.context {
            MessageContext::Stream { topic, .. } => Some(topic),
            MessageContext::Private => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_fields_absent_on_private_messages() {
        let msg = Message::private("Iago", "iago@example.com", "hi", 1_700_000_000);
        assert!(msg.is_private());
        assert!(msg.stream_name().is_none());
        assert!(msg.topic().is_none());
    }

    #[test]
    fn context_round_trips_through_tagged_serde() {
        let msg = Message::stream(
            "Othello",
            "othello@example.com",
            "hail",
            1_700_000_000,
            "Venice",
            7,
            "plots",
        );
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "stream");
        assert_eq!(json["stream"], "Venice");
        let back: Message = serde_json::from_value(json).unwrap();
        assert_eq!(back, msg);
    }
}
