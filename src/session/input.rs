use serde::{Deserialize, Serialize};

use crate::generator::text::TokenKind;
use crate::keyboard::keys::KeyId;

/// One key press as delivered by the input source.
///
/// `seq` is strictly increasing per source; consumers process each value at
/// most once.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputEvent {
    pub seq: u64,
    pub t: u64,
    pub key_id: Option<KeyId>,
    /// What the active layout produces for this key.
    pub mapped_char: Option<String>,
    /// What the host reported, independent of the layout.
    pub raw_char: Option<char>,
    pub alt_key: bool,
}

impl InputEvent {
    pub fn is_backspace(&self) -> bool {
        self.key_id == Some(KeyId::Backspace)
    }

    pub fn is_space(&self) -> bool {
        self.key_id == Some(KeyId::Space)
    }

    /// Mapped output if non-empty, otherwise the raw character.
    pub fn typed_text(&self) -> Option<String> {
        match self.mapped_char.as_deref() {
            Some(mapped) if !mapped.is_empty() => Some(mapped.to_string()),
            _ => self.raw_char.map(String::from),
        }
    }
}

/// Outcome of one scored keystroke.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptResult {
    pub seq: u64,
    pub kind: TokenKind,
    pub correct: bool,
}

/// Tracks the last consumed `seq` so redelivered events are no-ops.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SeqGuard {
    last: Option<u64>,
}

impl SeqGuard {
    /// Returns true the first time a newer `seq` is seen.
    pub fn accept(&mut self, seq: u64) -> bool {
        if self.last.is_some_and(|last| seq <= last) {
            return false;
        }
        self.last = Some(seq);
        true
    }

    pub fn mark(&mut self, seq: u64) {
        self.last = Some(self.last.map_or(seq, |last| last.max(seq)));
    }

    pub fn last(&self) -> Option<u64> {
        self.last
    }
}
