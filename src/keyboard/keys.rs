use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Logical identity of a physical key, independent of the active layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum KeyId {
    Backquote,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,
    Digit0,
    Minus,
    Equal,
    Backspace,
    Tab,
    Q,
    W,
    E,
    R,
    T,
    Y,
    U,
    I,
    O,
    P,
    Lbracket,
    Rbracket,
    Backslash,
    Enter,
    Caps,
    A,
    S,
    D,
    F,
    G,
    H,
    J,
    K,
    L,
    Semicolon,
    Quote,
    Lshift,
    Z,
    X,
    C,
    V,
    B,
    N,
    M,
    Comma,
    Period,
    Slash,
    Rshift,
    Fn,
    Lctrl,
    Lalt,
    Lmeta,
    Space,
    Rmeta,
    Ralt,
    Rctrl,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown key id: {0:?}")]
pub struct UnknownKeyId(pub String);

impl KeyId {
    pub const ALL: [KeyId; 61] = [
        KeyId::Backquote,
        KeyId::Digit1,
        KeyId::Digit2,
        KeyId::Digit3,
        KeyId::Digit4,
        KeyId::Digit5,
        KeyId::Digit6,
        KeyId::Digit7,
        KeyId::Digit8,
        KeyId::Digit9,
        KeyId::Digit0,
        KeyId::Minus,
        KeyId::Equal,
        KeyId::Backspace,
        KeyId::Tab,
        KeyId::Q,
        KeyId::W,
        KeyId::E,
        KeyId::R,
        KeyId::T,
        KeyId::Y,
        KeyId::U,
        KeyId::I,
        KeyId::O,
        KeyId::P,
        KeyId::Lbracket,
        KeyId::Rbracket,
        KeyId::Backslash,
        KeyId::Enter,
        KeyId::Caps,
        KeyId::A,
        KeyId::S,
        KeyId::D,
        KeyId::F,
        KeyId::G,
        KeyId::H,
        KeyId::J,
        KeyId::K,
        KeyId::L,
        KeyId::Semicolon,
        KeyId::Quote,
        KeyId::Lshift,
        KeyId::Z,
        KeyId::X,
        KeyId::C,
        KeyId::V,
        KeyId::B,
        KeyId::N,
        KeyId::M,
        KeyId::Comma,
        KeyId::Period,
        KeyId::Slash,
        KeyId::Rshift,
        KeyId::Fn,
        KeyId::Lctrl,
        KeyId::Lalt,
        KeyId::Lmeta,
        KeyId::Space,
        KeyId::Rmeta,
        KeyId::Ralt,
        KeyId::Rctrl,
    ];

    /// Character rows of the main block, in physical order.
    pub const ROWS: [&'static [KeyId]; 4] = [
        &[
            KeyId::Backquote,
            KeyId::Digit1,
            KeyId::Digit2,
            KeyId::Digit3,
            KeyId::Digit4,
            KeyId::Digit5,
            KeyId::Digit6,
            KeyId::Digit7,
            KeyId::Digit8,
            KeyId::Digit9,
            KeyId::Digit0,
            KeyId::Minus,
            KeyId::Equal,
        ],
        &[
            KeyId::Q,
            KeyId::W,
            KeyId::E,
            KeyId::R,
            KeyId::T,
            KeyId::Y,
            KeyId::U,
            KeyId::I,
            KeyId::O,
            KeyId::P,
            KeyId::Lbracket,
            KeyId::Rbracket,
            KeyId::Backslash,
        ],
        &[
            KeyId::A,
            KeyId::S,
            KeyId::D,
            KeyId::F,
            KeyId::G,
            KeyId::H,
            KeyId::J,
            KeyId::K,
            KeyId::L,
            KeyId::Semicolon,
            KeyId::Quote,
        ],
        &[
            KeyId::Z,
            KeyId::X,
            KeyId::C,
            KeyId::V,
            KeyId::B,
            KeyId::N,
            KeyId::M,
            KeyId::Comma,
            KeyId::Period,
            KeyId::Slash,
        ],
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            KeyId::Backquote => "keyBackquote",
            KeyId::Digit1 => "key1",
            KeyId::Digit2 => "key2",
            KeyId::Digit3 => "key3",
            KeyId::Digit4 => "key4",
            KeyId::Digit5 => "key5",
            KeyId::Digit6 => "key6",
            KeyId::Digit7 => "key7",
            KeyId::Digit8 => "key8",
            KeyId::Digit9 => "key9",
            KeyId::Digit0 => "key0",
            KeyId::Minus => "keyMinus",
            KeyId::Equal => "keyEqual",
            KeyId::Backspace => "keyBackspace",
            KeyId::Tab => "keyTab",
            KeyId::Q => "keyQ",
            KeyId::W => "keyW",
            KeyId::E => "keyE",
            KeyId::R => "keyR",
            KeyId::T => "keyT",
            KeyId::Y => "keyY",
            KeyId::U => "keyU",
            KeyId::I => "keyI",
            KeyId::O => "keyO",
            KeyId::P => "keyP",
            KeyId::Lbracket => "keyLbracket",
            KeyId::Rbracket => "keyRbracket",
            KeyId::Backslash => "keyBackslash",
            KeyId::Enter => "keyEnter",
            KeyId::Caps => "keyCaps",
            KeyId::A => "keyA",
            KeyId::S => "keyS",
            KeyId::D => "keyD",
            KeyId::F => "keyF",
            KeyId::G => "keyG",
            KeyId::H => "keyH",
            KeyId::J => "keyJ",
            KeyId::K => "keyK",
            KeyId::L => "keyL",
            KeyId::Semicolon => "keySemicolon",
            KeyId::Quote => "keyQuote",
            KeyId::Lshift => "keyLshift",
            KeyId::Z => "keyZ",
            KeyId::X => "keyX",
            KeyId::C => "keyC",
            KeyId::V => "keyV",
            KeyId::B => "keyB",
            KeyId::N => "keyN",
            KeyId::M => "keyM",
            KeyId::Comma => "keyComma",
            KeyId::Period => "keyPeriod",
            KeyId::Slash => "keySlash",
            KeyId::Rshift => "keyRshift",
            KeyId::Fn => "keyFn",
            KeyId::Lctrl => "keyLctrl",
            KeyId::Lalt => "keyLalt",
            KeyId::Lmeta => "keyLmeta",
            KeyId::Space => "keySpace",
            KeyId::Rmeta => "keyRmeta",
            KeyId::Ralt => "keyRalt",
            KeyId::Rctrl => "keyRctrl",
        }
    }

    /// The physical key a US-QWERTY host reports for `ch`, shifted or not.
    pub fn from_qwerty_char(ch: char) -> Option<KeyId> {
        let base = match ch {
            '~' => '`',
            '!' => '1',
            '@' => '2',
            '#' => '3',
            '$' => '4',
            '%' => '5',
            '^' => '6',
            '&' => '7',
            '*' => '8',
            '(' => '9',
            ')' => '0',
            '_' => '-',
            '+' => '=',
            '{' => '[',
            '}' => ']',
            '|' => '\\',
            ':' => ';',
            '"' => '\'',
            '<' => ',',
            '>' => '.',
            '?' => '/',
            c => c.to_ascii_lowercase(),
        };

        if base == ' ' {
            return Some(KeyId::Space);
        }

        KeyId::ROWS
            .iter()
            .zip(QWERTY_ROWS)
            .find_map(|(keys, chars)| {
                chars
                    .chars()
                    .position(|c| c == base)
                    .map(|idx| keys[idx])
            })
    }
}

/// US-QWERTY unshifted characters, aligned with `KeyId::ROWS`.
pub(crate) const QWERTY_ROWS: [&str; 4] = [
    "`1234567890-=",
    "qwertyuiop[]\\",
    "asdfghjkl;'",
    "zxcvbnm,./",
];

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyId {
    type Err = UnknownKeyId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KeyId::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownKeyId(s.to_string()))
    }
}

impl TryFrom<String> for KeyId {
    type Error = UnknownKeyId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<KeyId> for &'static str {
    fn from(key: KeyId) -> Self {
        key.as_str()
    }
}
