//! Shared fixtures for module tests.

use async_trait::async_trait;

use crate::api::{ClientError, MessageClient, OutgoingMessage, SendMessageResponse};
use crate::core::app::App;
use crate::core::message::Message;
use crate::core::narrow::Controller;
use crate::ui::message_box::MessageBox;

pub fn create_test_app() -> App {
    App::new("Tester".into(), "tester@example.com".into())
}

pub fn stream_message() -> Message {
    Message::stream(
        "Othello",
        "othello@example.com",
        "hail to the general",
        1_700_000_000,
        "Venice",
        7,
        "plots",
    )
}

pub fn private_message() -> Message {
    Message::private("Iago", "iago@example.com", "a word in private", 1_700_000_100)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerEvent {
    NarrowToUser(String),
    NarrowToStream(String),
    NarrowToTopic(String, String),
    ShowAll,
}

/// Controller that records delegation instead of mutating any view state.
#[derive(Default)]
pub struct RecordingController {
    pub events: Vec<ControllerEvent>,
}

impl Controller for RecordingController {
    fn narrow_to_user(&mut self, message_box: &MessageBox) {
        self.events
            .push(ControllerEvent::NarrowToUser(message_box.email().into()));
    }

    fn narrow_to_stream(&mut self, message_box: &MessageBox) {
        self.events.push(ControllerEvent::NarrowToStream(
            message_box.caption().unwrap_or_default().into(),
        ));
    }

    fn narrow_to_topic(&mut self, message_box: &MessageBox) {
        self.events.push(ControllerEvent::NarrowToTopic(
            message_box.caption().unwrap_or_default().into(),
            message_box.topic().unwrap_or_default().into(),
        ));
    }

    fn show_all_messages(&mut self, _message_box: &MessageBox) {
        self.events.push(ControllerEvent::ShowAll);
    }
}

/// Client that returns a canned response without touching the network.
pub struct MockClient {
    pub response: Result<SendMessageResponse, String>,
}

impl MockClient {
    pub fn succeeding() -> Self {
        Self {
            response: Ok(SendMessageResponse {
                result: "success".into(),
                msg: String::new(),
                id: Some(1),
            }),
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            response: Ok(SendMessageResponse {
                result: "error".into(),
                msg: msg.into(),
                id: None,
            }),
        }
    }
}

#[async_trait]
impl MessageClient for MockClient {
    async fn send_message(
        &self,
        _request: &OutgoingMessage,
    ) -> Result<SendMessageResponse, ClientError> {
        self.response.clone().map_err(|e| e.into())
    }
}
