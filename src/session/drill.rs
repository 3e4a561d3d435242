use tracing::debug;

use crate::generator::text::{Token, TokenSequence};
use crate::keyboard::layout::MappedChars;
use crate::session::input::{AttemptResult, InputEvent, SeqGuard};
use crate::session::result::BlockResult;

/// What the host renders.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionState {
    pub cursor: usize,
    pub has_error: bool,
    pub expected_char: Option<char>,
    pub last_attempt: Option<AttemptResult>,
    pub last_block_result: Option<BlockResult>,
}

/// Effect of a single input event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Transition {
    /// Duplicate seq, nothing to type, or no usable character.
    Ignored,
    /// Backspace cleared the error or moved the cursor back.
    Erased,
    Attempted(AttemptResult),
    /// The attempt finished the sequence; the cursor is back at 0.
    Completed {
        attempt: AttemptResult,
        block: BlockResult,
    },
}

impl Transition {
    pub fn attempt(&self) -> Option<&AttemptResult> {
        match self {
            Transition::Attempted(attempt) | Transition::Completed { attempt, .. } => Some(attempt),
            Transition::Ignored | Transition::Erased => None,
        }
    }

    pub fn block(&self) -> Option<&BlockResult> {
        match self {
            Transition::Completed { block, .. } => Some(block),
            _ => None,
        }
    }
}

/// Cursor and error tracker for practice mode.
///
/// The sequence loops: reaching the end emits a `BlockResult` and starts over
/// from the first token.
pub struct DrillSession {
    tokens: TokenSequence,
    cursor: usize,
    has_error: bool,
    attempted: usize,
    correct: usize,
    last_attempt: Option<AttemptResult>,
    last_block_result: Option<BlockResult>,
    seen: SeqGuard,
}

impl DrillSession {
    pub fn new(tokens: TokenSequence) -> Self {
        Self {
            tokens,
            cursor: 0,
            has_error: false,
            attempted: 0,
            correct: 0,
            last_attempt: None,
            last_block_result: None,
            seen: SeqGuard::default(),
        }
    }

    pub fn tokens(&self) -> &TokenSequence {
        &self.tokens
    }

    /// Swap in a different sequence. Everything but the seq guard resets;
    /// passing the same sequence again changes nothing.
    pub fn set_tokens(&mut self, tokens: TokenSequence) {
        if self.tokens.same_as(&tokens) {
            return;
        }
        self.tokens = tokens;
        self.reset();
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
        self.has_error = false;
        self.attempted = 0;
        self.correct = 0;
        self.last_attempt = None;
        self.last_block_result = None;
    }

    /// Consume `seq` values up to and including this one without scoring them.
    pub fn skip_through(&mut self, seq: u64) {
        self.seen.mark(seq);
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn has_error(&self) -> bool {
        self.has_error
    }

    pub fn current_token(&self) -> Option<&Token> {
        self.tokens.get(self.cursor)
    }

    /// Attempts and correct attempts in the block so far.
    pub fn block_counts(&self) -> (usize, usize) {
        (self.attempted, self.correct)
    }

    pub fn state(&self) -> SessionState {
        SessionState {
            cursor: self.cursor,
            has_error: self.has_error,
            expected_char: self.current_token().map(|t| t.expected),
            last_attempt: self.last_attempt,
            last_block_result: self.last_block_result,
        }
    }

    pub fn process(&mut self, input: &InputEvent, mapped: &MappedChars) -> Transition {
        if !self.seen.accept(input.seq) {
            return Transition::Ignored;
        }
        let Some(&token) = self.tokens.get(self.cursor) else {
            return Transition::Ignored;
        };

        if input.is_backspace() {
            if self.has_error {
                self.has_error = false;
            } else {
                self.cursor = self.cursor.saturating_sub(1);
            }
            self.last_attempt = None;
            return Transition::Erased;
        }

        let correct = if token.is_space() {
            // Physical key identity; whatever the layout maps to Space is irrelevant.
            input.is_space()
        } else {
            match typed_matches(token.expected, input, mapped) {
                Some(correct) => correct,
                None => return Transition::Ignored,
            }
        };

        self.attempted += 1;
        let attempt = AttemptResult {
            seq: input.seq,
            kind: token.kind,
            correct,
        };
        self.last_attempt = Some(attempt);

        if !correct {
            self.has_error = true;
            return Transition::Attempted(attempt);
        }

        self.has_error = false;
        self.correct += 1;
        self.cursor += 1;

        if self.cursor < self.tokens.len() {
            return Transition::Attempted(attempt);
        }

        let block = BlockResult::new(input.seq, self.attempted, self.correct);
        debug!(
            seq = block.seq,
            attempted = block.attempted,
            correct = block.correct,
            "block complete"
        );
        self.last_block_result = Some(block);
        self.cursor = 0;
        self.attempted = 0;
        self.correct = 0;
        Transition::Completed { attempt, block }
    }
}

/// Compare the typed character against `expected`, or `None` when the event
/// carries nothing to compare.
///
/// Characters the layout can produce are checked against the mapped output.
/// Anything else is checked against the raw character, ignoring ASCII case.
fn typed_matches(expected: char, input: &InputEvent, mapped: &MappedChars) -> Option<bool> {
    if mapped.contains(expected) {
        let typed = input.mapped_char.as_deref().filter(|s| !s.is_empty())?;
        let mut chars = typed.chars();
        return Some(chars.next() == Some(expected) && chars.next().is_none());
    }

    let typed = input.raw_char?;
    if expected.is_ascii_alphabetic() {
        Some(typed.eq_ignore_ascii_case(&expected))
    } else {
        Some(typed == expected)
    }
}
