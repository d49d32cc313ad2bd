//! In-memory store and recording transport used by the integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rand::seq::IndexedRandom;

use cardbot::config::Config;
use cardbot::store::{
    EventCount, EventSink, GlobalStats, StoreError, User, UserProfile, Word, WordStore,
};
use cardbot::transport::{ChatEvent, Reply, Transport, TransportError};

pub const ADMIN_ID: i64 = 1000;

#[derive(Default)]
struct StoreState {
    next_word_id: i64,
    words: Vec<Word>,
    activations: HashMap<(i64, i64), bool>,
    users: HashMap<i64, User>,
    events: Vec<(i64, String, String)>,
}

/// Shares its state across clones so tests can inspect it after handing a
/// clone to the orchestrator.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<StoreState>>,
    unavailable: Arc<AtomicBool>,
    count_unavailable: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_common_words(pairs: &[(&str, &str)]) -> Self {
        let store = Self::new();
        {
            let mut state = store.state.lock().unwrap();
            for (source, target) in pairs {
                state.next_word_id += 1;
                let id = state.next_word_id;
                state.words.push(Word {
                    id,
                    source_text: source.to_string(),
                    target_text: target.to_string(),
                    is_common: true,
                });
            }
        }
        store
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Fails only `count_active_words`, leaving the other operations up.
    pub fn set_count_unavailable(&self, unavailable: bool) {
        self.count_unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn recorded_events(&self) -> Vec<(i64, String, String)> {
        self.state.lock().unwrap().events.clone()
    }

    pub fn has_user(&self, telegram_id: i64) -> bool {
        self.state.lock().unwrap().users.contains_key(&telegram_id)
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("simulated outage".to_string()));
        }
        Ok(())
    }

    fn eligible(state: &StoreState, user_id: i64) -> Vec<Word> {
        state
            .words
            .iter()
            .filter(|word| {
                word.is_common
                    || state
                        .activations
                        .get(&(user_id, word.id))
                        .copied()
                        .unwrap_or(false)
            })
            .cloned()
            .collect()
    }
}

#[async_trait]
impl WordStore for MemoryStore {
    async fn upsert_user(&self, profile: &UserProfile) -> Result<User, StoreError> {
        self.check_available()?;
        let mut state = self.state.lock().unwrap();
        let user = User {
            id: profile.telegram_id,
            telegram_id: profile.telegram_id,
            username: profile.username.clone(),
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
        };
        state.users.insert(profile.telegram_id, user.clone());
        Ok(user)
    }

    async fn pick_quiz_word(&self, user_id: i64) -> Result<Option<Word>, StoreError> {
        self.check_available()?;
        let state = self.state.lock().unwrap();
        let pool = Self::eligible(&state, user_id);
        Ok(pool.choose(&mut rand::rng()).cloned())
    }

    async fn pick_distractors(
        &self,
        word_id: i64,
        user_id: i64,
        count: i64,
    ) -> Result<Vec<String>, StoreError> {
        self.check_available()?;
        let state = self.state.lock().unwrap();
        let correct_text = state
            .words
            .iter()
            .find(|word| word.id == word_id)
            .map(|word| word.source_text.clone());

        // distinct texts, never the correct word's own text
        let mut candidates: Vec<String> = Self::eligible(&state, user_id)
            .into_iter()
            .filter(|word| word.id != word_id && Some(&word.source_text) != correct_text.as_ref())
            .map(|word| word.source_text)
            .collect();
        candidates.sort();
        candidates.dedup();

        Ok(candidates
            .choose_multiple(&mut rand::rng(), count as usize)
            .cloned()
            .collect())
    }

    async fn add_custom_word(
        &self,
        user_id: i64,
        source: &str,
        target: &str,
    ) -> Result<(), StoreError> {
        self.check_available()?;
        let mut state = self.state.lock().unwrap();

        let word_id = match state
            .words
            .iter()
            .find(|word| word.source_text == source && word.target_text == target)
        {
            Some(word) => word.id,
            None => {
                state.next_word_id += 1;
                let id = state.next_word_id;
                state.words.push(Word {
                    id,
                    source_text: source.to_string(),
                    target_text: target.to_string(),
                    is_common: false,
                });
                id
            }
        };

        state.activations.insert((user_id, word_id), true);
        Ok(())
    }

    async fn deactivate_user_word(&self, user_id: i64, source: &str) -> Result<bool, StoreError> {
        self.check_available()?;
        let mut state = self.state.lock().unwrap();

        let matching: Vec<i64> = state
            .words
            .iter()
            .filter(|word| word.source_text == source)
            .map(|word| word.id)
            .collect();

        let mut changed = false;
        for word_id in matching {
            if let Some(active) = state.activations.get_mut(&(user_id, word_id)) {
                if *active {
                    *active = false;
                    changed = true;
                }
            }
        }
        Ok(changed)
    }

    async fn count_active_words(&self, user_id: i64) -> Result<i64, StoreError> {
        self.check_available()?;
        if self.count_unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("simulated outage".to_string()));
        }
        let state = self.state.lock().unwrap();
        Ok(Self::eligible(&state, user_id).len() as i64)
    }
}

#[async_trait]
impl EventSink for MemoryStore {
    async fn record_event(
        &self,
        user_id: i64,
        kind: &str,
        detail: &str,
    ) -> Result<(), StoreError> {
        self.check_available()?;
        let mut state = self.state.lock().unwrap();
        state
            .events
            .push((user_id, kind.to_string(), detail.to_string()));
        Ok(())
    }

    async fn user_stats(&self, user_id: i64) -> Result<Vec<EventCount>, StoreError> {
        self.check_available()?;
        let state = self.state.lock().unwrap();
        let mut counts: HashMap<String, i64> = HashMap::new();
        for (event_user, kind, _) in &state.events {
            if *event_user == user_id {
                *counts.entry(kind.clone()).or_insert(0) += 1;
            }
        }
        let mut counts: Vec<EventCount> = counts
            .into_iter()
            .map(|(kind, count)| EventCount { kind, count })
            .collect();
        counts.sort_by(|a, b| a.kind.cmp(&b.kind));
        Ok(counts)
    }

    async fn global_stats(&self) -> Result<GlobalStats, StoreError> {
        self.check_available()?;
        let state = self.state.lock().unwrap();
        Ok(GlobalStats {
            total_users: state.users.len() as i64,
            total_events: state.events.len() as i64,
        })
    }
}

/// Records every outbound reply; never produces inbound events (tests call
/// `dispatch` directly).
#[derive(Clone, Default)]
pub struct RecordingTransport {
    sent: Arc<Mutex<Vec<Reply>>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replies(&self) -> Vec<Reply> {
        self.sent.lock().unwrap().clone()
    }

    pub fn take_replies(&self) -> Vec<Reply> {
        std::mem::take(&mut *self.sent.lock().unwrap())
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn next_events(&mut self) -> Result<Vec<ChatEvent>, TransportError> {
        Ok(vec![])
    }

    async fn send(&self, reply: Reply) -> Result<(), TransportError> {
        self.sent.lock().unwrap().push(reply);
        Ok(())
    }
}

pub fn test_config() -> Config {
    Config {
        bot_token: "test-token".to_string(),
        database_url: String::new(),
        log_level: "info".to_string(),
        admin_ids: vec![ADMIN_ID],
        max_words_per_user: 1000,
    }
}

pub fn chat_event(user_id: i64, text: &str) -> ChatEvent {
    ChatEvent {
        chat_id: user_id,
        user_id,
        username: Some("tester".to_string()),
        first_name: Some("Test".to_string()),
        last_name: None,
        text: text.to_string(),
    }
}
