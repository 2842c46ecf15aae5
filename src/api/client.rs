use async_trait::async_trait;

use super::{OutgoingMessage, SendMessageResponse};

pub type ClientError = Box<dyn std::error::Error + Send + Sync>;

/// Delivery seam for outgoing messages. The chat loop only ever talks to
/// this trait, so tests can substitute a recording or failing client.
#[async_trait]
pub trait MessageClient: Send + Sync {
    async fn send_message(
        &self,
        request: &OutgoingMessage,
    ) -> Result<SendMessageResponse, ClientError>;
}

/// HTTP client for a Zulip-style message API.
///
/// Authentication is HTTP basic with the account email as username and the
/// API key as password; the request body is form-encoded.
pub struct HttpMessageClient {
    http: reqwest::Client,
    server_url: String,
    email: String,
    api_key: String,
}

impl HttpMessageClient {
    pub fn new(server_url: String, email: String, api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            server_url: server_url.trim_end_matches('/').to_string(),
            email,
            api_key,
        }
    }

    fn messages_endpoint(&self) -> String {
        format!("{}/api/v1/messages", self.server_url)
    }
}

#[async_trait]
impl MessageClient for HttpMessageClient {
    async fn send_message(
        &self,
        request: &OutgoingMessage,
    ) -> Result<SendMessageResponse, ClientError> {
        tracing::debug!(to = %request.to, "sending message");

        let response = self
            .http
            .post(self.messages_endpoint())
            .basic_auth(&self.email, Some(&self.api_key))
            .form(request)
            .send()
            .await?;

        // The server reports domain errors (bad stream, deactivated user)
        // as a structured body with result == "error", sometimes alongside
        // a 4xx status. Parse the body either way so the caller sees the
        // server's own message rather than a bare status code.
        let status = response.status();
        match response.json::<SendMessageResponse>().await {
            Ok(parsed) => Ok(parsed),
            Err(_) if !status.is_success() => Err(format!("server returned {status}").into()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let client = HttpMessageClient::new(
            "https://chat.example.com/".into(),
            "iago@example.com".into(),
            "key".into(),
        );
        assert_eq!(
            client.messages_endpoint(),
            "https://chat.example.com/api/v1/messages"
        );
    }
}
