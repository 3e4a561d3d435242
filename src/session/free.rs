use crate::generator::paging::PAGE_WIDTH;
use crate::generator::text::{Token, tokenize};
use crate::session::input::{InputEvent, SeqGuard};

/// Unscored typing into a short rolling buffer.
pub struct FreeTyping {
    text: String,
    window: usize,
    enabled: bool,
    seen: SeqGuard,
}

impl FreeTyping {
    pub fn new(window: usize) -> Self {
        Self {
            text: String::new(),
            window: window.max(1),
            enabled: false,
            seen: SeqGuard::default(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> Vec<Token> {
        tokenize(&self.text)
    }

    pub fn cursor(&self) -> usize {
        self.tokens().len()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Start a fresh buffer. Events up to `current_seq` are treated as already
    /// handled so the key that switched modes is not typed.
    pub fn enable(&mut self, current_seq: u64) {
        if !self.enabled {
            self.enabled = true;
            self.text.clear();
        }
        self.seen.mark(current_seq);
    }

    pub fn disable(&mut self, current_seq: u64) {
        self.enabled = false;
        self.seen.mark(current_seq);
    }

    pub fn reset(&mut self) {
        self.text.clear();
    }

    /// Apply one input event. Returns true when the buffer changed.
    pub fn process(&mut self, input: &InputEvent) -> bool {
        if !self.enabled || !self.seen.accept(input.seq) {
            return false;
        }

        if input.is_backspace() {
            if self.text.is_empty() {
                return false;
            }
            if input.alt_key {
                drop_word(&mut self.text);
            } else {
                self.text.pop();
            }
            return true;
        }

        if input.is_space() {
            self.push_char(' ');
            return true;
        }

        let Some(typed) = input.typed_text() else {
            return false;
        };
        for ch in typed.chars() {
            self.push_char(ch);
        }
        true
    }

    fn push_char(&mut self, ch: char) {
        let ch = if ch.is_whitespace() { ' ' } else { ch };
        if self.text.chars().count() >= self.window {
            self.text.clear();
        }
        self.text.push(ch);
    }
}

impl Default for FreeTyping {
    fn default() -> Self {
        Self::new(PAGE_WIDTH)
    }
}

/// Remove trailing whitespace, then the word before it.
fn drop_word(text: &mut String) {
    let trimmed = text.trim_end_matches(char::is_whitespace);
    let kept = trimmed.trim_end_matches(|c: char| !c.is_whitespace()).len();
    text.truncate(kept);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::keys::KeyId;

    struct Feed {
        seq: u64,
    }

    impl Feed {
        fn key(&mut self, ch: char) -> InputEvent {
            self.seq += 1;
            InputEvent {
                seq: self.seq,
                key_id: KeyId::from_qwerty_char(ch),
                mapped_char: Some(ch.to_string()),
                raw_char: Some(ch),
                ..Default::default()
            }
        }

        fn backspace(&mut self, alt_key: bool) -> InputEvent {
            self.seq += 1;
            InputEvent {
                seq: self.seq,
                key_id: Some(KeyId::Backspace),
                alt_key,
                ..Default::default()
            }
        }
    }

    fn enabled() -> (FreeTyping, Feed) {
        let mut free = FreeTyping::default();
        free.enable(0);
        (free, Feed { seq: 0 })
    }

    fn type_str(free: &mut FreeTyping, feed: &mut Feed, text: &str) {
        for ch in text.chars() {
            free.process(&feed.key(ch));
        }
    }

    #[test]
    fn test_disabled_ignores_input() {
        let mut free = FreeTyping::default();
        let mut feed = Feed { seq: 0 };
        assert!(!free.process(&feed.key('a')));
        assert_eq!(free.text(), "");
    }

    #[test]
    fn test_typing_and_backspace() {
        let (mut free, mut feed) = enabled();
        type_str(&mut free, &mut feed, "héllo");
        assert_eq!(free.text(), "héllo");
        free.process(&feed.backspace(false));
        assert_eq!(free.text(), "héll");
        assert_eq!(free.cursor(), 4);
    }

    #[test]
    fn test_word_backspace() {
        let (mut free, mut feed) = enabled();
        type_str(&mut free, &mut feed, "one two  ");
        free.process(&feed.backspace(true));
        assert_eq!(free.text(), "one ");
        free.process(&feed.backspace(true));
        assert_eq!(free.text(), "");
        assert!(!free.process(&feed.backspace(true)));
    }

    #[test]
    fn test_whitespace_is_normalised() {
        let (mut free, mut feed) = enabled();
        type_str(&mut free, &mut feed, "a\tb");
        assert_eq!(free.text(), "a b");
        let space_bar = InputEvent {
            seq: 99,
            key_id: Some(KeyId::Space),
            mapped_char: Some("_".to_string()),
            ..Default::default()
        };
        free.process(&space_bar);
        assert_eq!(free.text(), "a b ");
    }

    #[test]
    fn test_full_buffer_restarts() {
        let mut free = FreeTyping::new(4);
        free.enable(0);
        let mut feed = Feed { seq: 0 };
        type_str(&mut free, &mut feed, "abcd");
        assert_eq!(free.text(), "abcd");
        type_str(&mut free, &mut feed, "e");
        assert_eq!(free.text(), "e");
    }

    #[test]
    fn test_duplicate_seq_ignored() {
        let (mut free, mut feed) = enabled();
        let event = feed.key('x');
        assert!(free.process(&event));
        assert!(!free.process(&event));
        assert_eq!(free.text(), "x");
    }

    #[test]
    fn test_enable_clears_and_skips_current_seq() {
        let (mut free, mut feed) = enabled();
        type_str(&mut free, &mut feed, "abc");
        free.disable(feed.seq);
        let switch_key = feed.key('z');
        free.enable(switch_key.seq);
        assert_eq!(free.text(), "");
        assert!(!free.process(&switch_key));
    }

    #[test]
    fn test_tokens_mirror_text() {
        let (mut free, mut feed) = enabled();
        type_str(&mut free, &mut feed, "ab c");
        let tokens = free.tokens();
        assert_eq!(tokens.len(), 4);
        assert!(tokens[2].is_space());
    }
}
