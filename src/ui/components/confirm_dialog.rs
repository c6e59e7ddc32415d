use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget, Wrap};

use crate::ui::theme::Theme;

/// Modal yes/no prompt drawn over whatever is underneath.
pub struct ConfirmDialog<'a> {
    pub title: &'a str,
    pub message: &'a str,
    pub theme: &'a Theme,
}

impl Widget for ConfirmDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        Clear.render(area, buf);
        let block = Block::bordered()
            .title(format!(" {} ", self.title))
            .border_style(Style::default().fg(colors.warning()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(self.message, Style::default().fg(colors.fg()))),
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    "[y] OK",
                    Style::default()
                        .fg(colors.warning())
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("    "),
                Span::styled("[n/Esc] Cancel", Style::default().fg(colors.accent())),
            ]),
        ];
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}
