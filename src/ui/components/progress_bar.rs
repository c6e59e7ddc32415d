use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Widget};

use crate::ui::theme::Theme;

/// Bordered bar filled to `percent`, with a caption centered on the fill.
pub struct ProgressBar<'a> {
    pub title: String,
    pub caption: String,
    pub percent: u32,
    pub theme: &'a Theme,
}

impl<'a> ProgressBar<'a> {
    pub fn new(title: &str, percent: u32, theme: &'a Theme) -> Self {
        let percent = percent.min(100);
        Self {
            title: title.to_string(),
            caption: format!("{percent}%"),
            percent,
            theme,
        }
    }

    pub fn caption(mut self, caption: String) -> Self {
        self.caption = caption;
        self
    }
}

impl Widget for ProgressBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", self.title))
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let filled_width = (inner.width as u32 * self.percent / 100) as u16;
        for x in inner.x..inner.x + inner.width {
            let style = if x < inner.x + filled_width {
                Style::default().fg(colors.bg()).bg(colors.bar_filled())
            } else {
                Style::default().fg(colors.fg()).bg(colors.bar_empty())
            };
            buf[(x, inner.y)].set_style(style);
        }

        let caption_width = self.caption.chars().count() as u16;
        let caption_x = inner.x + inner.width.saturating_sub(caption_width) / 2;
        buf.set_string(caption_x, inner.y, &self.caption, Style::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_matches_percent() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 12, 3);
        let mut buf = Buffer::empty(area);
        ProgressBar::new("Progress", 50, &theme).render(area, &mut buf);

        let filled = theme.colors.bar_filled();
        let filled_cells = (1..11).filter(|&x| buf[(x, 1)].bg == filled).count();
        assert_eq!(filled_cells, 5);
    }

    #[test]
    fn test_percent_capped() {
        let theme = Theme::default();
        let bar = ProgressBar::new("Progress", 140, &theme);
        assert_eq!(bar.percent, 100);
        assert_eq!(bar.caption, "100%");
    }
}
