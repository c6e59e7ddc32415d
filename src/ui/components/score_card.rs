use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::engine::assessment::performance_icon;
use crate::engine::scoring::progress_percent;
use crate::ui::theme::Theme;

/// Running score, progress and what to press next while a quiz is active.
pub struct ScoreCard<'a> {
    pub score: u32,
    pub total_possible: u32,
    pub index: usize,
    pub total_questions: usize,
    pub confirmed: bool,
    pub is_last: bool,
    pub theme: &'a Theme,
}

impl ScoreCard<'_> {
    pub fn score_line(&self) -> String {
        format!(
            "{} Score: {}/{} points \u{2022} Progress: {}%",
            performance_icon(self.score, self.total_possible),
            self.score,
            self.total_possible,
            progress_percent(self.index, self.total_questions),
        )
    }

    pub fn advance_label(&self) -> &'static str {
        if self.is_last { "End of Quiz" } else { "Next Question" }
    }
}

impl Widget for ScoreCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Score ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = Vec::new();
        if !self.confirmed {
            lines.push(Line::from(Span::styled(
                " \u{1F446} Select one of the options above to continue",
                Style::default().fg(colors.text_muted()),
            )));
        }
        lines.push(Line::from(Span::styled(
            format!(" {}", self.score_line()),
            Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
        )));

        let advance_style = if self.confirmed {
            Style::default().fg(colors.accent()).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors.accent_dim())
        };
        lines.push(Line::from(Span::styled(
            format!(" [n] {}", self.advance_label()),
            advance_style,
        )));

        Paragraph::new(lines).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(theme: &Theme, score: u32, index: usize, is_last: bool) -> ScoreCard<'_> {
        ScoreCard {
            score,
            total_possible: 20,
            index,
            total_questions: 10,
            confirmed: true,
            is_last,
            theme,
        }
    }

    #[test]
    fn test_score_line_shows_points_and_progress() {
        let theme = Theme::default();
        let line = card(&theme, 18, 4, false).score_line();
        assert!(line.starts_with("\u{1F3C6}"));
        assert!(line.contains("Score: 18/20 points"));
        assert!(line.ends_with("Progress: 50%"));
    }

    #[test]
    fn test_advance_label_on_last_question() {
        let theme = Theme::default();
        assert_eq!(card(&theme, 0, 3, false).advance_label(), "Next Question");
        assert_eq!(card(&theme, 0, 9, true).advance_label(), "End of Quiz");
    }
}
