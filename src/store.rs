//! Contracts the quiz core requires from the persistent store, plus the
//! records flowing across them. The Postgres implementation lives in
//! [`crate::db`]; tests use an in-memory implementation.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

/// Dictionary entry. `(source_text, target_text)` is unique; `is_common`
/// words are visible to every user.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Word {
    pub id: i64,
    pub source_text: String,
    pub target_text: String,
    pub is_common: bool,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub telegram_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Identity fields carried by an inbound chat event.
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub telegram_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EventCount {
    pub kind: String,
    pub count: i64,
}

#[derive(Debug, Clone, Copy)]
pub struct GlobalStats {
    pub total_users: i64,
    pub total_events: i64,
}

/// Vocabulary and per-user activation state. A word is eligible for a user
/// iff it is common or that user holds an `active = true` activation row.
#[async_trait]
pub trait WordStore: Send + Sync {
    async fn upsert_user(&self, profile: &UserProfile) -> Result<User, StoreError>;

    /// Uniformly random word from the user's eligible pool; `None` when the
    /// pool is empty. Repeats across calls are fine.
    async fn pick_quiz_word(&self, user_id: i64) -> Result<Option<Word>, StoreError>;

    /// Up to `count` distinct source texts from the eligible pool, excluding
    /// the correct word. Fewer when the pool is small.
    async fn pick_distractors(
        &self,
        word_id: i64,
        user_id: i64,
        count: i64,
    ) -> Result<Vec<String>, StoreError>;

    /// Reuses the dictionary entry when the pair already exists, otherwise
    /// inserts a non-common one; then flips the activation row to active.
    /// Idempotent.
    async fn add_custom_word(
        &self,
        user_id: i64,
        source: &str,
        target: &str,
    ) -> Result<(), StoreError>;

    /// Deactivates every matching activation row for the user. `Ok(false)`
    /// when nothing matched, including common words the user never added.
    async fn deactivate_user_word(&self, user_id: i64, source: &str) -> Result<bool, StoreError>;

    async fn count_active_words(&self, user_id: i64) -> Result<i64, StoreError>;
}

/// Append-only usage analytics.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn record_event(&self, user_id: i64, kind: &str, detail: &str)
        -> Result<(), StoreError>;

    async fn user_stats(&self, user_id: i64) -> Result<Vec<EventCount>, StoreError>;

    async fn global_stats(&self) -> Result<GlobalStats, StoreError>;
}
