//! Event dispatch: routes inbound chat events between the quiz round, the
//! pending-input flows and the store, and renders replies through the
//! transport. Owns all per-user ephemeral state in an explicit map.

use std::collections::HashMap;

use crate::config::Config;
use crate::pending::{PendingInput, PendingStep};
use crate::session::{Answer, QuizRound};
use crate::store::{EventSink, UserProfile, WordStore};
use crate::texts;
use crate::transport::{ChatEvent, Reply, Transport};

const DISTRACTOR_COUNT: i64 = 3;
const POLL_RETRY_SECS: u64 = 3;

pub const EV_START: &str = "start";
pub const EV_ANSWER_CORRECT: &str = "answer_correct";
pub const EV_ANSWER_WRONG: &str = "answer_wrong";
pub const EV_WORD_ADDED: &str = "word_added";
pub const EV_WORD_REMOVED: &str = "word_removed";

#[derive(Debug, Default)]
struct UserSession {
    round: Option<QuizRound>,
    pending: PendingInput,
}

pub struct SessionOrchestrator<S, T> {
    store: S,
    transport: T,
    config: Config,
    sessions: HashMap<i64, UserSession>,
}

impl<S, T> SessionOrchestrator<S, T>
where
    S: WordStore + EventSink,
    T: Transport,
{
    pub fn new(store: S, transport: T, config: Config) -> Self {
        Self {
            store,
            transport,
            config,
            sessions: HashMap::new(),
        }
    }

    /// Blocking receive-and-dispatch loop. Poll failures are logged and
    /// retried after a short pause; dispatch never tears the loop down.
    pub async fn run(&mut self) {
        loop {
            match self.transport.next_events().await {
                Ok(events) => {
                    for event in events {
                        self.dispatch(event).await;
                    }
                }
                Err(err) => {
                    tracing::error!(error = %err, "event poll failed");
                    tokio::time::sleep(std::time::Duration::from_secs(POLL_RETRY_SECS)).await;
                }
            }
        }
    }

    pub async fn dispatch(&mut self, event: ChatEvent) {
        let chat_id = event.chat_id;
        let user_id = event.user_id;
        let text = event.text.clone();

        tracing::debug!(user_id, text = %text, "inbound event");

        match text.as_str() {
            "/start" | "/cards" => self.handle_start(&event).await,
            "/stats" => self.handle_stats(chat_id, user_id).await,
            texts::NEXT => {
                self.session(user_id).pending.reset();
                self.present_question(chat_id, user_id).await;
            }
            texts::ADD_WORD => self.begin_add(chat_id, user_id).await,
            texts::DELETE_WORD => {
                self.session(user_id).pending.begin_delete();
                self.send(chat_id, texts::ENTER_DELETE, vec![]).await;
            }
            _ => self.handle_text(chat_id, user_id, &text).await,
        }
    }

    fn session(&mut self, user_id: i64) -> &mut UserSession {
        self.sessions.entry(user_id).or_default()
    }

    async fn handle_start(&mut self, event: &ChatEvent) {
        let profile = UserProfile {
            telegram_id: event.user_id,
            username: event.username.clone(),
            first_name: event.first_name.clone(),
            last_name: event.last_name.clone(),
        };

        if let Err(err) = self.store.upsert_user(&profile).await {
            tracing::error!(error = %err, user_id = event.user_id, "user upsert failed");
            self.send(event.chat_id, texts::STORE_UNAVAILABLE, vec![]).await;
            return;
        }

        tracing::info!(user_id = event.user_id, "user started the trainer");
        self.record(event.user_id, EV_START, "").await;
        self.session(event.user_id).pending.reset();

        self.send(event.chat_id, texts::WELCOME, vec![]).await;
        self.present_question(event.chat_id, event.user_id).await;
    }

    async fn handle_stats(&mut self, chat_id: i64, user_id: i64) {
        let counts = match self.store.user_stats(user_id).await {
            Ok(counts) => counts,
            Err(err) => {
                tracing::error!(error = %err, user_id, "stats query failed");
                self.send(chat_id, texts::STORE_UNAVAILABLE, vec![]).await;
                return;
            }
        };
        let active = match self.store.count_active_words(user_id).await {
            Ok(count) => count,
            Err(err) => {
                tracing::error!(error = %err, user_id, "word count query failed");
                self.send(chat_id, texts::STORE_UNAVAILABLE, vec![]).await;
                return;
            }
        };

        let mut report = texts::stats_header(active);
        for entry in &counts {
            report.push('\n');
            report.push_str(&texts::stats_line(&entry.kind, entry.count));
        }

        if self.config.admin_ids.contains(&user_id) {
            if let Ok(global) = self.store.global_stats().await {
                report.push_str(&texts::global_stats(global.total_users, global.total_events));
            }
        }

        self.send(chat_id, report, texts::command_row()).await;
    }

    async fn begin_add(&mut self, chat_id: i64, user_id: i64) {
        self.session(user_id).pending.reset();
        match self.store.count_active_words(user_id).await {
            Ok(count) if count >= self.config.max_words_per_user => {
                self.send(
                    chat_id,
                    texts::limit_reached(self.config.max_words_per_user),
                    texts::command_row(),
                )
                .await;
                return;
            }
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(error = %err, user_id, "word count unavailable, allowing add");
            }
        }

        self.session(user_id).pending.begin_add();
        self.send(chat_id, texts::ENTER_SOURCE, vec![]).await;
    }

    /// Plain text: pending input first, then the open round, otherwise a
    /// fresh question.
    async fn handle_text(&mut self, chat_id: i64, user_id: i64, text: &str) {
        if !self.session(user_id).pending.is_idle() {
            let step = self.session(user_id).pending.feed(text);
            self.apply_pending_step(chat_id, user_id, step).await;
            return;
        }

        if self.session(user_id).round.is_some() {
            self.handle_answer(chat_id, user_id, text).await;
        } else {
            self.present_question(chat_id, user_id).await;
        }
    }

    async fn apply_pending_step(&mut self, chat_id: i64, user_id: i64, step: PendingStep) {
        match step {
            PendingStep::Reprompt(prompt) => {
                self.send(chat_id, prompt, vec![]).await;
            }
            PendingStep::AskTranslation => {
                self.send(chat_id, texts::ENTER_TARGET, vec![]).await;
            }
            PendingStep::AddWord { source, target } => {
                match self.store.add_custom_word(user_id, &source, &target).await {
                    Ok(()) => {
                        self.record(user_id, EV_WORD_ADDED, &source).await;
                        let count = self.active_count_or_zero(user_id).await;
                        self.send(chat_id, texts::word_added(&source, &target, count), vec![])
                            .await;
                    }
                    Err(err) => {
                        tracing::error!(error = %err, user_id, "add word failed");
                        self.send(chat_id, texts::ADD_FAILED, vec![]).await;
                    }
                }
                self.present_question(chat_id, user_id).await;
            }
            PendingStep::RemoveWord { source } => {
                match self.store.deactivate_user_word(user_id, &source).await {
                    Ok(true) => {
                        self.record(user_id, EV_WORD_REMOVED, &source).await;
                        let count = self.active_count_or_zero(user_id).await;
                        self.send(chat_id, texts::word_removed(&source, count), vec![])
                            .await;
                    }
                    Ok(false) => {
                        self.send(chat_id, texts::word_not_found(&source), vec![]).await;
                    }
                    Err(err) => {
                        tracing::error!(error = %err, user_id, "remove word failed");
                        self.send(chat_id, texts::STORE_UNAVAILABLE, vec![]).await;
                    }
                }
                self.present_question(chat_id, user_id).await;
            }
            PendingStep::NotPending => {}
        }
    }

    async fn handle_answer(&mut self, chat_id: i64, user_id: i64, text: &str) {
        let Some(round) = self.session(user_id).round.as_mut() else {
            return;
        };

        match round.submit_answer(text) {
            Answer::Correct { target, translation } => {
                self.record(user_id, EV_ANSWER_CORRECT, &target).await;
                self.send(
                    chat_id,
                    texts::correct(&target, &translation),
                    texts::command_row(),
                )
                .await;
                self.present_question(chat_id, user_id).await;
            }
            Answer::Incorrect { translation, display } => {
                self.record(user_id, EV_ANSWER_WRONG, text).await;
                let mut choices = display;
                choices.extend(texts::command_row());
                self.send(chat_id, texts::wrong(&translation), choices).await;
            }
            Answer::Ignored => {}
        }
    }

    /// Fetches a fresh question for the user and replaces any open round.
    /// An empty pool clears the round and offers the add-word button only.
    async fn present_question(&mut self, chat_id: i64, user_id: i64) {
        let word = match self.store.pick_quiz_word(user_id).await {
            Ok(word) => word,
            Err(err) => {
                tracing::error!(error = %err, user_id, "quiz word pick failed");
                self.send(chat_id, texts::STORE_UNAVAILABLE, vec![]).await;
                return;
            }
        };

        let Some(word) = word else {
            self.session(user_id).round = None;
            self.send(chat_id, texts::NO_WORDS, vec![texts::ADD_WORD.to_string()])
                .await;
            return;
        };

        let distractors = match self
            .store
            .pick_distractors(word.id, user_id, DISTRACTOR_COUNT)
            .await
        {
            Ok(distractors) => distractors,
            Err(err) => {
                tracing::error!(error = %err, user_id, "distractor pick failed");
                self.send(chat_id, texts::STORE_UNAVAILABLE, vec![]).await;
                return;
            }
        };

        let round = QuizRound::new(word.source_text, word.target_text, distractors);
        let mut choices = round.options().to_vec();
        choices.extend(texts::command_row());
        let question = texts::question(round.translation());

        self.session(user_id).round = Some(round);
        self.send(chat_id, question, choices).await;
    }

    async fn active_count_or_zero(&self, user_id: i64) -> i64 {
        match self.store.count_active_words(user_id).await {
            Ok(count) => count,
            Err(err) => {
                tracing::warn!(error = %err, user_id, "word count unavailable");
                0
            }
        }
    }

    /// Analytics append is fire-and-forget: failures are logged, never
    /// surfaced to the user.
    async fn record(&self, user_id: i64, kind: &str, detail: &str) {
        if let Err(err) = self.store.record_event(user_id, kind, detail).await {
            tracing::warn!(error = %err, user_id, kind, "usage event dropped");
        }
    }

    async fn send(&self, chat_id: i64, text: impl Into<String>, choices: Vec<String>) {
        let reply = Reply {
            chat_id,
            text: text.into(),
            choices,
        };
        if let Err(err) = self.transport.send(reply).await {
            tracing::error!(error = %err, chat_id, "send failed");
        }
    }
}
