pub mod events;
pub mod schema;
pub mod users;
pub mod words;

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::store::{
    EventCount, EventSink, GlobalStats, StoreError, User, UserProfile, Word, WordStore,
};

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Creates the tables and seeds the shared dictionary. Run once at
    /// startup; failure here aborts the process.
    pub async fn setup(&self) -> Result<(), sqlx::Error> {
        schema::create_tables(&self.pool).await?;
        schema::seed_common_words(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl WordStore for Database {
    async fn upsert_user(&self, profile: &UserProfile) -> Result<User, StoreError> {
        Ok(users::upsert_user(&self.pool, profile).await?)
    }

    async fn pick_quiz_word(&self, user_id: i64) -> Result<Option<Word>, StoreError> {
        Ok(words::pick_quiz_word(&self.pool, user_id).await?)
    }

    async fn pick_distractors(
        &self,
        word_id: i64,
        user_id: i64,
        count: i64,
    ) -> Result<Vec<String>, StoreError> {
        Ok(words::pick_distractors(&self.pool, word_id, user_id, count).await?)
    }

    async fn add_custom_word(
        &self,
        user_id: i64,
        source: &str,
        target: &str,
    ) -> Result<(), StoreError> {
        Ok(words::add_custom_word(&self.pool, user_id, source, target).await?)
    }

    async fn deactivate_user_word(&self, user_id: i64, source: &str) -> Result<bool, StoreError> {
        Ok(words::deactivate_user_word(&self.pool, user_id, source).await?)
    }

    async fn count_active_words(&self, user_id: i64) -> Result<i64, StoreError> {
        Ok(words::count_active_words(&self.pool, user_id).await?)
    }
}

#[async_trait]
impl EventSink for Database {
    async fn record_event(
        &self,
        user_id: i64,
        kind: &str,
        detail: &str,
    ) -> Result<(), StoreError> {
        Ok(events::record_event(&self.pool, user_id, kind, detail).await?)
    }

    async fn user_stats(&self, user_id: i64) -> Result<Vec<EventCount>, StoreError> {
        Ok(events::user_stats(&self.pool, user_id).await?)
    }

    async fn global_stats(&self) -> Result<GlobalStats, StoreError> {
        Ok(events::global_stats(&self.pool).await?)
    }
}
