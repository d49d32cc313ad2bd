//! Pending free-text input per user: which field (if any) the next plain
//! message fills. Drives the two-step add-word flow and the delete flow.

use crate::texts;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum PendingInput {
    #[default]
    Idle,
    AwaitingNewWordSource,
    /// Holds the source-language word already entered.
    AwaitingNewWordTarget(String),
    AwaitingDeleteTarget,
}

/// What the orchestrator should do after feeding one message into the flow.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingStep {
    /// Input was empty: repeat the prompt, state unchanged.
    Reprompt(&'static str),
    /// Source word accepted, ask for its translation.
    AskTranslation,
    AddWord { source: String, target: String },
    RemoveWord { source: String },
    /// Not awaiting anything; the caller routes the text elsewhere.
    NotPending,
}

impl PendingInput {
    pub fn is_idle(&self) -> bool {
        matches!(self, PendingInput::Idle)
    }

    /// A top-level command always abandons whatever was pending.
    pub fn reset(&mut self) {
        *self = PendingInput::Idle;
    }

    pub fn begin_add(&mut self) {
        *self = PendingInput::AwaitingNewWordSource;
    }

    pub fn begin_delete(&mut self) {
        *self = PendingInput::AwaitingDeleteTarget;
    }

    pub fn feed(&mut self, text: &str) -> PendingStep {
        let text = text.trim();

        match self {
            PendingInput::Idle => PendingStep::NotPending,
            PendingInput::AwaitingNewWordSource => {
                if text.is_empty() {
                    return PendingStep::Reprompt(texts::EMPTY_SOURCE);
                }
                *self = PendingInput::AwaitingNewWordTarget(text.to_string());
                PendingStep::AskTranslation
            }
            PendingInput::AwaitingNewWordTarget(source) => {
                if text.is_empty() {
                    return PendingStep::Reprompt(texts::EMPTY_TARGET);
                }
                let source = std::mem::take(source);
                *self = PendingInput::Idle;
                PendingStep::AddWord {
                    source,
                    target: text.to_string(),
                }
            }
            PendingInput::AwaitingDeleteTarget => {
                if text.is_empty() {
                    return PendingStep::Reprompt(texts::EMPTY_DELETE);
                }
                *self = PendingInput::Idle;
                PendingStep::RemoveWord {
                    source: text.to_string(),
                }
            }
        }
    }
}
