use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use keyshape::generator::Token;

use crate::ui::theme::Palette;

/// One page of tokens with the cursor drawn on top.
pub struct TypingArea<'a> {
    tokens: &'a [Token],
    cursor: usize,
    has_error: bool,
    title: &'a str,
    palette: &'a Palette,
}

impl<'a> TypingArea<'a> {
    /// `cursor` is relative to `tokens`; it may equal `tokens.len()`, in which
    /// case a caret is drawn after the last token.
    pub fn new(tokens: &'a [Token], cursor: usize, has_error: bool, palette: &'a Palette) -> Self {
        Self {
            tokens,
            cursor,
            has_error,
            title: "",
            palette,
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Cell {
    Done,
    Cursor,
    CursorError,
    Pending,
}

fn cell_at(idx: usize, cursor: usize, has_error: bool) -> Cell {
    if idx < cursor {
        Cell::Done
    } else if idx == cursor {
        if has_error {
            Cell::CursorError
        } else {
            Cell::Cursor
        }
    } else {
        Cell::Pending
    }
}

fn build_spans<'t>(
    tokens: &[Token],
    cursor: usize,
    has_error: bool,
    palette: &Palette,
) -> Vec<Span<'t>> {
    let mut spans: Vec<Span> = tokens
        .iter()
        .enumerate()
        .map(|(idx, token)| {
            let cell = cell_at(idx, cursor, has_error);
            let style = match cell {
                Cell::Done => Style::default().fg(palette.text_done),
                Cell::Cursor => Style::default().fg(palette.cursor_fg).bg(palette.cursor_bg),
                Cell::CursorError => Style::default()
                    .fg(palette.error_fg)
                    .bg(palette.error_bg)
                    .add_modifier(Modifier::BOLD),
                Cell::Pending if token.is_space() => Style::default().fg(palette.space_marker),
                Cell::Pending => Style::default().fg(palette.text_pending),
            };
            Span::styled(token.display.to_string(), style)
        })
        .collect();

    if cursor >= tokens.len() {
        let style = if has_error {
            Style::default().bg(palette.error_bg)
        } else {
            Style::default().bg(palette.cursor_bg)
        };
        spans.push(Span::styled(" ", style));
    }
    spans
}

impl Widget for TypingArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let palette = self.palette;
        let spans = build_spans(self.tokens, self.cursor, self.has_error, palette);

        let block = Block::bordered()
            .title(self.title)
            .border_style(Style::default().fg(palette.border))
            .style(Style::default().bg(palette.bg));

        let paragraph = Paragraph::new(Line::from(spans))
            .block(block)
            .wrap(Wrap { trim: false });

        paragraph.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyshape::generator::tokenize;

    #[test]
    fn test_cell_classification() {
        assert_eq!(cell_at(0, 2, false), Cell::Done);
        assert_eq!(cell_at(2, 2, false), Cell::Cursor);
        assert_eq!(cell_at(2, 2, true), Cell::CursorError);
        assert_eq!(cell_at(3, 2, true), Cell::Pending);
    }

    #[test]
    fn test_spans_show_space_glyph() {
        let tokens = tokenize("a b");
        let spans = build_spans(&tokens, 0, false, &Palette::default());
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[1].content, "\u{00b7}");
        assert_eq!(spans[1].style.fg, Some(Palette::default().space_marker));
    }

    #[test]
    fn test_error_cursor_is_red() {
        let palette = Palette::default();
        let tokens = tokenize("ab");
        let spans = build_spans(&tokens, 1, true, &palette);
        assert_eq!(spans[1].style.bg, Some(palette.error_bg));
        assert_eq!(spans[0].style.fg, Some(palette.text_done));
    }

    #[test]
    fn test_trailing_caret_when_cursor_at_end() {
        let tokens = tokenize("ab");
        let spans = build_spans(&tokens, 2, false, &Palette::default());
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[2].content, " ");
    }

    #[test]
    fn test_render_into_buffer() {
        let palette = Palette::default();
        let tokens = tokenize("hi there");
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        TypingArea::new(&tokens, 0, false, &palette).render(area, &mut buf);
        assert_eq!(buf[(1, 1)].symbol(), "h");
        assert_eq!(buf[(3, 1)].symbol(), "\u{00b7}");
    }
}
