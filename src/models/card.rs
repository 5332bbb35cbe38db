//! Flashcard records and generator drafts.

use serde::{Deserialize, Serialize};

/// A parsed question/answer card.
///
/// `id` is the position of the card's block in the source file. It is stable
/// for one parse only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    pub id: usize,
    pub question: String,
    pub answer: String,
}

/// A card being written in the generator form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardDraft {
    /// Form-local key, unrelated to [`CardRecord::id`]
    pub key: u64,
    pub question: String,
    pub answer: String,
}

impl CardDraft {
    /// Create an empty draft.
    pub fn new(key: u64) -> Self {
        Self {
            key,
            ..Default::default()
        }
    }

    /// Both fields hold something other than whitespace.
    pub fn is_complete(&self) -> bool {
        !self.question.trim().is_empty() && !self.answer.trim().is_empty()
    }
}
