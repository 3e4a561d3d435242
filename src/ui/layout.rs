use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen regions for the trainer, top to bottom.
pub struct TrainerLayout {
    pub header: Rect,
    pub typing: Rect,
    pub metrics: Rect,
    pub keyboard: Option<Rect>,
    pub footer: Rect,
}

const KEYBOARD_HEIGHT: u16 = 7;
const MIN_HEIGHT_FOR_KEYBOARD: u16 = 20;

impl TrainerLayout {
    pub fn new(area: Rect) -> Self {
        let show_keyboard = area.height >= MIN_HEIGHT_FOR_KEYBOARD && area.width >= 60;
        let keyboard_height = if show_keyboard { KEYBOARD_HEIGHT } else { 0 };

        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(1),
                Constraint::Length(keyboard_height),
                Constraint::Length(1),
            ])
            .split(area);

        Self {
            header: vertical[0],
            typing: vertical[1],
            metrics: vertical[2],
            keyboard: show_keyboard.then_some(vertical[3]),
            footer: vertical[4],
        }
    }
}

/// Greedily pack hints into lines no wider than `width`.
pub fn pack_hint_lines(hints: &[&str], width: usize) -> Vec<String> {
    if width == 0 || hints.is_empty() {
        return Vec::new();
    }

    let prefix = " ";
    let separator = "  ";
    let mut out: Vec<String> = Vec::new();
    let mut current = prefix.to_string();
    let mut has_hint = false;

    for hint in hints.iter().filter(|h| !h.is_empty()) {
        let candidate = if has_hint {
            format!("{current}{separator}{hint}")
        } else {
            format!("{current}{hint}")
        };
        if candidate.chars().count() <= width {
            current = candidate;
        } else {
            if has_hint {
                out.push(current);
            }
            current = format!("{prefix}{hint}");
        }
        has_hint = true;
    }

    if has_hint {
        out.push(current);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyboard_hidden_on_short_terminal() {
        let layout = TrainerLayout::new(Rect::new(0, 0, 100, 12));
        assert!(layout.keyboard.is_none());
        assert_eq!(layout.header.height, 1);
        assert_eq!(layout.footer.y, 11);
    }

    #[test]
    fn test_keyboard_shown_when_room() {
        let layout = TrainerLayout::new(Rect::new(0, 0, 100, 30));
        let keyboard = layout.keyboard.unwrap();
        assert_eq!(keyboard.height, KEYBOARD_HEIGHT);
        assert!(layout.typing.height >= 3);
    }

    #[test]
    fn test_pack_hint_lines() {
        let hints = ["[Tab] mode", "[Esc] quit", ""];
        assert_eq!(pack_hint_lines(&hints, 80), vec![" [Tab] mode  [Esc] quit"]);
        assert_eq!(
            pack_hint_lines(&hints, 14),
            vec![" [Tab] mode", " [Esc] quit"]
        );
        assert!(pack_hint_lines(&hints, 0).is_empty());
    }
}
