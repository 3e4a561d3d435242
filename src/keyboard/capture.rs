use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::keyboard::keys::KeyId;
use crate::keyboard::layout::LayoutLayers;
use crate::session::input::InputEvent;

const SHIFTED_SYMBOLS: &str = "~!@#$%^&*()_+{}|:\"<>?";

/// Turns terminal key presses into numbered `InputEvent`s.
///
/// The terminal reports characters, not scan codes, so the physical key is
/// recovered by assuming a US-QWERTY host layout. The active training layout
/// then decides what that key produces.
#[derive(Debug, Default)]
pub struct InputCapture {
    seq: u64,
}

impl InputCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_seq(&self) -> u64 {
        self.seq
    }

    /// `None` for releases, shortcuts with Ctrl/Super, and keys with no
    /// logical id or character.
    pub fn capture(&mut self, key: &KeyEvent, t: u64, layout: &LayoutLayers) -> Option<InputEvent> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER) {
            return None;
        }

        let alt_key = key.modifiers.contains(KeyModifiers::ALT);
        let (key_id, raw_char, shifted) = match key.code {
            KeyCode::Backspace => (Some(KeyId::Backspace), None, false),
            KeyCode::Tab => (Some(KeyId::Tab), None, false),
            KeyCode::Enter => (Some(KeyId::Enter), None, false),
            KeyCode::Char(ch) => {
                let shifted = key.modifiers.contains(KeyModifiers::SHIFT)
                    || ch.is_ascii_uppercase()
                    || SHIFTED_SYMBOLS.contains(ch);
                (KeyId::from_qwerty_char(ch), Some(ch), shifted)
            }
            _ => return None,
        };

        let mapped_char = key_id
            .and_then(|k| layout.lookup(k, shifted))
            .map(str::to_string);

        self.seq += 1;
        Some(InputEvent {
            seq: self.seq,
            t,
            key_id,
            mapped_char,
            raw_char,
            alt_key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::layout::LayoutPreset;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_letter_goes_through_layout() {
        let layout = LayoutLayers::from_preset(LayoutPreset::Dvorak);
        let mut capture = InputCapture::new();
        let event = capture
            .capture(&press(KeyCode::Char('s'), KeyModifiers::NONE), 10, &layout)
            .unwrap();
        assert_eq!(event.seq, 1);
        assert_eq!(event.t, 10);
        assert_eq!(event.key_id, Some(KeyId::S));
        assert_eq!(event.mapped_char.as_deref(), Some("o"));
        assert_eq!(event.raw_char, Some('s'));
    }

    #[test]
    fn test_shifted_characters_use_shift_layer() {
        let layout = LayoutLayers::from_preset(LayoutPreset::Qwerty);
        let mut capture = InputCapture::new();
        let upper = capture
            .capture(&press(KeyCode::Char('Q'), KeyModifiers::SHIFT), 0, &layout)
            .unwrap();
        assert_eq!(upper.mapped_char.as_deref(), Some("Q"));
        let bang = capture
            .capture(&press(KeyCode::Char('!'), KeyModifiers::NONE), 0, &layout)
            .unwrap();
        assert_eq!(bang.key_id, Some(KeyId::Digit1));
        assert_eq!(bang.mapped_char.as_deref(), Some("!"));
        assert_eq!(bang.seq, 2);
    }

    #[test]
    fn test_backspace_and_alt() {
        let layout = LayoutLayers::default();
        let mut capture = InputCapture::new();
        let event = capture
            .capture(&press(KeyCode::Backspace, KeyModifiers::ALT), 0, &layout)
            .unwrap();
        assert!(event.is_backspace());
        assert!(event.alt_key);
        assert_eq!(event.raw_char, None);
    }

    #[test]
    fn test_space_bar() {
        let layout = LayoutLayers::from_preset(LayoutPreset::Qwerty);
        let mut capture = InputCapture::new();
        let event = capture
            .capture(&press(KeyCode::Char(' '), KeyModifiers::NONE), 0, &layout)
            .unwrap();
        assert!(event.is_space());
        assert_eq!(event.mapped_char.as_deref(), Some(" "));
    }

    #[test]
    fn test_non_qwerty_character_keeps_raw_only() {
        let layout = LayoutLayers::from_preset(LayoutPreset::Qwerty);
        let mut capture = InputCapture::new();
        let event = capture
            .capture(&press(KeyCode::Char('ж'), KeyModifiers::NONE), 0, &layout)
            .unwrap();
        assert_eq!(event.key_id, None);
        assert_eq!(event.mapped_char, None);
        assert_eq!(event.raw_char, Some('ж'));
    }

    #[test]
    fn test_ignored_keys_do_not_consume_seq() {
        let layout = LayoutLayers::default();
        let mut capture = InputCapture::new();
        assert!(
            capture
                .capture(&press(KeyCode::Char('c'), KeyModifiers::CONTROL), 0, &layout)
                .is_none()
        );
        assert!(capture.capture(&press(KeyCode::Left, KeyModifiers::NONE), 0, &layout).is_none());
        let mut release = press(KeyCode::Char('a'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert!(capture.capture(&release, 0, &layout).is_none());
        assert_eq!(capture.last_seq(), 0);
    }
}
