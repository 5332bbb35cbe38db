//! Flashcard text format.
//!
//! A chapter is a list of blocks separated by blank lines. A block becomes a
//! card when it has a line starting with `Q:` and a line starting with `A:`;
//! the text after the first colon of each (trimmed) is the field value.
//!
//! ```text
//! Q: What is 2 + 2?
//! A: 4
//!
//! Q: Capital of France?
//! A: Paris
//! ```

use std::sync::LazyLock;

use regex::Regex;

use crate::config::{DECK_EXTENSION, DEFAULT_DECK_FILENAME};
use crate::models::{CardDraft, CardRecord};

/// Two or more consecutive line breaks (LF or CRLF).
static BLOCK_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\r?\n(?:\r?\n)+").expect("block separator pattern is valid")
});

/// Parse a chapter into cards.
///
/// Malformed blocks are dropped silently. A card's `id` is the index of its
/// block among all blocks, so dropped blocks leave gaps in the ids.
pub fn parse_cards(content: &str) -> Vec<CardRecord> {
    let content = content.trim();
    if content.is_empty() {
        return Vec::new();
    }

    BLOCK_SEPARATOR
        .split(content)
        .enumerate()
        .filter_map(|(id, block)| parse_block(id, block))
        .collect()
}

fn parse_block(id: usize, block: &str) -> Option<CardRecord> {
    let question = field(block, "Q:")?;
    let answer = field(block, "A:")?;
    Some(CardRecord {
        id,
        question,
        answer,
    })
}

/// Value of the first line whose trimmed text starts with `prefix`.
fn field(block: &str, prefix: &str) -> Option<String> {
    let line = block
        .lines()
        .find(|line| line.trim().starts_with(prefix))?;
    let (_, value) = line.split_once(':')?;
    Some(value.trim().to_string())
}

// =============================================================================
// Generator
// =============================================================================

/// Render drafts in the chapter format, one block per draft.
pub fn render_cards(drafts: &[CardDraft]) -> String {
    drafts
        .iter()
        .map(|draft| format!("Q: {}\nA: {}", draft.question.trim(), draft.answer.trim()))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Drafts can be exported when there is at least one and all are complete.
pub fn can_generate(drafts: &[CardDraft]) -> bool {
    !drafts.is_empty() && drafts.iter().all(CardDraft::is_complete)
}

/// Download name for a generated deck, always ending in `.txt`.
pub fn normalize_filename(filename: &str) -> String {
    let filename = filename.trim();
    if filename.is_empty() {
        DEFAULT_DECK_FILENAME.to_string()
    } else if filename.ends_with(DECK_EXTENSION) {
        filename.to_string()
    } else {
        format!("{filename}{DECK_EXTENSION}")
    }
}
