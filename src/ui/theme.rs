use ratatui::style::Color;

/// Fixed colour set for the trainer screens.
#[derive(Clone, Copy, Debug)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub text_done: Color,
    pub text_pending: Color,
    pub space_marker: Color,
    pub cursor_fg: Color,
    pub cursor_bg: Color,
    pub error_fg: Color,
    pub error_bg: Color,
    pub accent: Color,
    pub border: Color,
    pub success: Color,
    pub warning: Color,
}

pub const DEFAULT_PALETTE: Palette = Palette {
    bg: Color::Rgb(30, 30, 46),
    fg: Color::Rgb(205, 214, 244),
    text_done: Color::Rgb(166, 227, 161),
    text_pending: Color::Rgb(127, 132, 156),
    space_marker: Color::Rgb(69, 71, 90),
    cursor_fg: Color::Rgb(30, 30, 46),
    cursor_bg: Color::Rgb(245, 224, 220),
    error_fg: Color::Rgb(30, 30, 46),
    error_bg: Color::Rgb(243, 139, 168),
    accent: Color::Rgb(137, 180, 250),
    border: Color::Rgb(88, 91, 112),
    success: Color::Rgb(166, 227, 161),
    warning: Color::Rgb(249, 226, 175),
};

impl Default for Palette {
    fn default() -> Self {
        DEFAULT_PALETTE
    }
}
