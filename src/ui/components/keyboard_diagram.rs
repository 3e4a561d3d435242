use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Widget};

use keyshape::keyboard::finger::{Finger, Hand};
use keyshape::keyboard::{FingerMap, FingerZone, KeyId, LayoutLayers};

use crate::ui::theme::Palette;

/// The active layout drawn over the physical rows, keys tinted by finger,
/// with the key for the next expected character highlighted.
pub struct KeyboardDiagram<'a> {
    layout: &'a LayoutLayers,
    fingers: &'a FingerMap,
    next_key: Option<(KeyId, bool)>,
    palette: &'a Palette,
}

impl<'a> KeyboardDiagram<'a> {
    pub fn new(
        layout: &'a LayoutLayers,
        fingers: &'a FingerMap,
        next_char: Option<char>,
        palette: &'a Palette,
    ) -> Self {
        Self {
            layout,
            fingers,
            next_key: next_char.and_then(|ch| layout.find_key(ch)),
            palette,
        }
    }

    /// Finger that should press the next key, if it has one.
    pub fn next_finger(&self) -> Option<FingerZone> {
        self.next_key.and_then(|(key, _)| self.fingers.get(&key).copied())
    }
}

const KEY_WIDTH: u16 = 4;
const ROW_OFFSETS: [u16; 4] = [0, 2, 3, 5];

/// Label shown on a key cap; blank when the layout leaves the key unmapped.
fn key_label(layout: &LayoutLayers, key: KeyId, shifted: bool) -> String {
    match layout.lookup(key, shifted) {
        Some(value) => value.chars().take(2).collect(),
        None => String::new(),
    }
}

fn finger_color(zone: FingerZone) -> Color {
    match (zone.hand(), zone.finger()) {
        (Hand::Left, Finger::Pinky) => Color::Rgb(180, 100, 100),
        (Hand::Left, Finger::Ring) => Color::Rgb(180, 140, 80),
        (Hand::Left, Finger::Middle) => Color::Rgb(120, 160, 80),
        (Hand::Left, Finger::Index) => Color::Rgb(80, 140, 180),
        (Hand::Right, Finger::Index) => Color::Rgb(100, 140, 200),
        (Hand::Right, Finger::Middle) => Color::Rgb(120, 160, 80),
        (Hand::Right, Finger::Ring) => Color::Rgb(180, 140, 80),
        (Hand::Right, Finger::Pinky) => Color::Rgb(180, 100, 100),
    }
}

impl Widget for KeyboardDiagram<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let palette = self.palette;
        let title = match self.next_finger() {
            Some(zone) => format!(" Keyboard: {} ", zone.label()),
            None => " Keyboard ".to_string(),
        };
        let block = Block::bordered()
            .title(title)
            .border_style(Style::default().fg(palette.border))
            .style(Style::default().bg(palette.bg));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < 4 || inner.width < 30 {
            return;
        }

        let shifted = self.next_key.is_some_and(|(_, shifted)| shifted);
        let next = self.next_key.map(|(key, _)| key);

        for (row_idx, row) in KeyId::ROWS.iter().enumerate() {
            let y = inner.y + row_idx as u16;
            let offset = ROW_OFFSETS[row_idx];

            for (col_idx, &key) in row.iter().enumerate() {
                let x = inner.x + offset + col_idx as u16 * KEY_WIDTH;
                if x + KEY_WIDTH > inner.x + inner.width {
                    break;
                }

                let label = key_label(self.layout, key, shifted);
                let style = if next == Some(key) {
                    Style::default()
                        .fg(palette.bg)
                        .bg(palette.accent)
                        .add_modifier(Modifier::BOLD)
                } else if label.is_empty() {
                    Style::default().fg(palette.space_marker)
                } else if let Some(&zone) = self.fingers.get(&key) {
                    Style::default().fg(palette.bg).bg(finger_color(zone))
                } else {
                    Style::default().fg(palette.fg)
                };
                buf.set_string(x, y, format!("[{label:<2}]"), style);
            }
        }

        if next == Some(KeyId::Space) && inner.height > 4 {
            let style = Style::default().fg(palette.bg).bg(palette.accent);
            buf.set_string(inner.x + 12, inner.y + 4, "[   space   ]", style);
        }
    }
}
