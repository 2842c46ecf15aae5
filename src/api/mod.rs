use serde::{Deserialize, Serialize};

pub mod client;

pub use client::{ClientError, HttpMessageClient, MessageClient};

/// Recipient type for an outgoing message, serialized as the server's
/// `type` parameter.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecipientType {
    Private,
    Stream,
}

/// An outgoing message request, shaped for `POST /api/v1/messages`.
///
/// Private messages carry no `subject`; stream messages address a stream
/// by name in `to` and thread under `subject`.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct OutgoingMessage {
    #[serde(rename = "type")]
    pub recipient_type: RecipientType,
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub content: String,
}

impl OutgoingMessage {
    pub fn private(to: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            recipient_type: RecipientType::Private,
            to: to.into(),
            subject: None,
            content: content.into(),
        }
    }

    pub fn stream(
        to: impl Into<String>,
        subject: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            recipient_type: RecipientType::Stream,
            to: to.into(),
            subject: Some(subject.into()),
            content: content.into(),
        }
    }
}

/// Server reply to a send. The server reports errors in-band: `result` is
/// `"success"` or `"error"`, with `msg` carrying the human-readable reason.
#[derive(Deserialize, Clone, Debug)]
pub struct SendMessageResponse {
    pub result: String,
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub id: Option<u64>,
}

impl SendMessageResponse {
    pub fn is_success(&self) -> bool {
        self.result == "success"
    }
}
