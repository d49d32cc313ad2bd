//! Chat-platform-neutral transport surface: inbound text events and outbound
//! renders with choice buttons. The orchestrator never sees platform types.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("chat api error: {0}")]
    Api(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct ChatEvent {
    pub chat_id: i64,
    pub user_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub text: String,
}

/// Outbound render request. An empty `choices` list means plain text with no
/// keyboard.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub chat_id: i64,
    pub text: String,
    pub choices: Vec<String>,
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Blocks (long-polls) until at least one event arrives or the poll
    /// window elapses; an empty batch is a normal outcome.
    async fn next_events(&mut self) -> Result<Vec<ChatEvent>, TransportError>;

    async fn send(&self, reply: Reply) -> Result<(), TransportError>;
}
