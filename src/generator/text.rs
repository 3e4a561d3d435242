use std::ops::Deref;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Glyph shown in place of a whitespace run.
pub const SPACE_GLYPH: char = '\u{00b7}';

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Char,
    Space,
}

/// One unit of expected input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    pub display: char,
    pub expected: char,
    pub kind: TokenKind,
}

impl Token {
    pub fn char(ch: char) -> Self {
        Self {
            display: ch,
            expected: ch,
            kind: TokenKind::Char,
        }
    }

    pub fn space() -> Self {
        Self {
            display: SPACE_GLYPH,
            expected: ' ',
            kind: TokenKind::Space,
        }
    }

    pub fn is_space(&self) -> bool {
        self.expected == ' '
    }
}

/// Immutable, shared token sequence.
///
/// Cloning is cheap and keeps identity: the session machine compares
/// sequences by pointer, so a rebuilt sequence with equal contents still
/// counts as new text.
#[derive(Clone, Debug)]
pub struct TokenSequence(Arc<[Token]>);

impl TokenSequence {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self(Arc::from(tokens))
    }

    pub fn from_text(text: &str) -> Self {
        Self::new(tokenize(text))
    }

    pub fn same_as(&self, other: &TokenSequence) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for TokenSequence {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Deref for TokenSequence {
    type Target = [Token];

    fn deref(&self) -> &[Token] {
        &self.0
    }
}

impl From<Vec<Token>> for TokenSequence {
    fn from(tokens: Vec<Token>) -> Self {
        Self::new(tokens)
    }
}

/// Split text into tokens: one per character, one per whitespace run.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::with_capacity(text.len());
    let mut in_space = false;

    for ch in text.chars() {
        if ch.is_whitespace() {
            if !in_space {
                tokens.push(Token::space());
            }
            in_space = true;
        } else {
            tokens.push(Token::char(ch));
            in_space = false;
        }
    }

    tokens
}

/// Rebuild the text a sequence expects, with whitespace runs collapsed.
pub fn expected_text(tokens: &[Token]) -> String {
    tokens.iter().map(|t| t.expected).collect()
}
