use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use keyshape::engine::Metrics;

use crate::ui::theme::Palette;

pub struct MetricsBar<'a> {
    metrics: Metrics,
    palette: &'a Palette,
}

impl<'a> MetricsBar<'a> {
    pub fn new(metrics: Metrics, palette: &'a Palette) -> Self {
        Self { metrics, palette }
    }
}

pub fn speed_label(metrics: &Metrics) -> String {
    format!("Speed: {:.1} wpm", metrics.wpm)
}

pub fn accuracy_label(metrics: &Metrics) -> String {
    format!("Accuracy: {:.1}%", metrics.accuracy)
}

impl Widget for MetricsBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let value = Style::default()
            .fg(self.palette.accent)
            .add_modifier(Modifier::BOLD);
        let line = Line::from(vec![
            Span::styled(format!(" {} ", speed_label(&self.metrics)), value),
            Span::styled("|", Style::default().fg(self.palette.border)),
            Span::styled(format!(" {} ", accuracy_label(&self.metrics)), value),
        ]);
        Paragraph::new(line)
            .style(Style::default().bg(self.palette.bg))
            .render(area, buf);
    }
}
