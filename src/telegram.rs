//! Telegram Bot API long-polling transport.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use crate::transport::{ChatEvent, Reply, Transport, TransportError};

const POLL_TIMEOUT_SECS: u64 = 30;
const CHOICES_PER_ROW: usize = 2;

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Update {
    update_id: i64,
    message: Option<Message>,
}

#[derive(Debug, Deserialize)]
struct Message {
    text: Option<String>,
    chat: Chat,
    from: Option<Sender>,
}

#[derive(Debug, Deserialize)]
struct Chat {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct Sender {
    id: i64,
    username: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
}

pub struct TelegramTransport {
    client: reqwest::Client,
    base_url: String,
    offset: i64,
}

impl TelegramTransport {
    pub fn new(token: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: format!("https://api.telegram.org/bot{token}"),
            offset: 0,
        }
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        body: &serde_json::Value,
    ) -> Result<T, TransportError> {
        let response: ApiResponse<T> = self
            .client
            .post(format!("{}/{}", self.base_url, method))
            .json(body)
            .send()
            .await?
            .json()
            .await?;

        if !response.ok {
            return Err(TransportError::Api(
                response
                    .description
                    .unwrap_or_else(|| format!("{method} failed")),
            ));
        }

        response
            .result
            .ok_or_else(|| TransportError::Api(format!("{method} returned no result")))
    }

    fn keyboard(choices: &[String]) -> serde_json::Value {
        let rows: Vec<Vec<serde_json::Value>> = choices
            .chunks(CHOICES_PER_ROW)
            .map(|row| row.iter().map(|label| json!({ "text": label })).collect())
            .collect();
        json!({ "keyboard": rows, "resize_keyboard": true })
    }
}

#[async_trait]
impl Transport for TelegramTransport {
    async fn next_events(&mut self) -> Result<Vec<ChatEvent>, TransportError> {
        let updates: Vec<Update> = self
            .call(
                "getUpdates",
                &json!({
                    "offset": self.offset,
                    "timeout": POLL_TIMEOUT_SECS,
                    "allowed_updates": ["message"],
                }),
            )
            .await?;

        let mut events = Vec::new();
        for update in updates {
            self.offset = self.offset.max(update.update_id + 1);

            let Some(message) = update.message else {
                continue;
            };
            let (Some(text), Some(sender)) = (message.text, message.from) else {
                continue;
            };

            events.push(ChatEvent {
                chat_id: message.chat.id,
                user_id: sender.id,
                username: sender.username,
                first_name: sender.first_name,
                last_name: sender.last_name,
                text,
            });
        }

        Ok(events)
    }

    async fn send(&self, reply: Reply) -> Result<(), TransportError> {
        let mut body = json!({
            "chat_id": reply.chat_id,
            "text": reply.text,
        });

        if !reply.choices.is_empty() {
            body["reply_markup"] = Self::keyboard(&reply.choices);
        }

        let _: serde_json::Value = self.call("sendMessage", &body).await?;
        Ok(())
    }
}
