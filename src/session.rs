//! Per-user quiz round: the current question, its correct answer and the
//! multiple-choice option set. The round is created when a question is
//! presented and mutated in place on wrong guesses; a new question simply
//! replaces it.

use rand::seq::SliceRandom;

use crate::texts;

/// Display-only decoration appended to the option the user just got wrong.
/// Never stored back into the option set.
pub const WRONG_MARK: &str = " ❌";

#[derive(Debug, Clone)]
pub struct QuizRound {
    target_word: String,
    translation: String,
    options: Vec<String>,
}

/// Outcome of feeding one answer attempt into the round.
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    Correct {
        target: String,
        translation: String,
    },
    /// Wrong guess or arbitrary text. `display` is the reshuffled option set
    /// with the chosen option marked; the stored set keeps no marking.
    Incorrect {
        translation: String,
        display: Vec<String>,
    },
    /// Reserved command labels are never answer attempts.
    Ignored,
}

impl QuizRound {
    /// Builds the option set from the correct word plus distractors and
    /// shuffles it so the answer position is unpredictable.
    pub fn new(target_word: String, translation: String, distractors: Vec<String>) -> Self {
        let mut options = Vec::with_capacity(distractors.len() + 1);
        options.push(target_word.clone());
        options.extend(distractors);
        options.shuffle(&mut rand::rng());

        Self {
            target_word,
            translation,
            options,
        }
    }

    pub fn target_word(&self) -> &str {
        &self.target_word
    }

    pub fn translation(&self) -> &str {
        &self.translation
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Exact, case-sensitive match against the target word. A wrong guess
    /// reshuffles the same option set with a fresh permutation so the learner
    /// cannot memorize the answer by position.
    pub fn submit_answer(&mut self, text: &str) -> Answer {
        if texts::is_command(text) {
            return Answer::Ignored;
        }

        if text == self.target_word {
            return Answer::Correct {
                target: self.target_word.clone(),
                translation: self.translation.clone(),
            };
        }

        // Carry the marking as a flag next to each option so a stored text
        // that legitimately ends with the mark is never corrupted.
        let mut shuffled: Vec<(String, bool)> = self
            .options
            .iter()
            .map(|option| (option.clone(), option.as_str() == text))
            .collect();
        shuffled.shuffle(&mut rand::rng());

        self.options = shuffled.iter().map(|(option, _)| option.clone()).collect();

        let display = shuffled
            .into_iter()
            .map(|(option, marked)| {
                if marked {
                    format!("{option}{WRONG_MARK}")
                } else {
                    option
                }
            })
            .collect();

        Answer::Incorrect {
            translation: self.translation.clone(),
            display,
        }
    }
}
