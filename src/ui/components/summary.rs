use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::engine::assessment::{PerformanceTier, performance_tier};
use crate::engine::scoring::score_percent;
use crate::ui::theme::Theme;

pub struct Summary<'a> {
    pub score: u32,
    pub total_possible: u32,
    pub question_count: usize,
    pub elapsed: String,
    pub theme: &'a Theme,
}

impl<'a> Summary<'a> {
    pub fn new(
        score: u32,
        total_possible: u32,
        question_count: usize,
        elapsed: String,
        theme: &'a Theme,
    ) -> Self {
        Self {
            score,
            total_possible,
            question_count,
            elapsed,
            theme,
        }
    }

    pub fn tier(&self) -> PerformanceTier {
        performance_tier(self.score, self.total_possible)
    }

    pub fn completion_line(&self) -> Option<String> {
        if self.elapsed.is_empty() {
            None
        } else {
            Some(format!("\u{1F552} Completed in {}", self.elapsed))
        }
    }
}

impl Widget for Summary<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Quiz Complete ")
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(2),
            ])
            .split(inner);

        let tier = self.tier();
        let tier_color = match tier {
            PerformanceTier::Champion | PerformanceTier::Excellent | PerformanceTier::Great => {
                colors.success()
            }
            PerformanceTier::Good | PerformanceTier::NotBad => colors.warning(),
            PerformanceTier::KeepTrying | PerformanceTier::Beginner => colors.error(),
        };
        Paragraph::new(Line::from(Span::styled(
            format!("{} {}", tier.icon(), tier.label()),
            Style::default().fg(tier_color).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .render(layout[1], buf);

        let score_text = format!("{}/{} points", self.score, self.total_possible);
        let pct_text = format!(
            "  ({}% over {} questions)",
            score_percent(self.score, self.total_possible),
            self.question_count
        );
        Paragraph::new(Line::from(vec![
            Span::styled("  Score: ", Style::default().fg(colors.fg())),
            Span::styled(
                score_text,
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(pct_text, Style::default().fg(colors.text_muted())),
        ]))
        .render(layout[2], buf);

        if let Some(time) = self.completion_line() {
            Paragraph::new(Line::from(Span::styled(
                format!("  {time}"),
                Style::default().fg(colors.fg()),
            )))
            .render(layout[3], buf);
        }

        Paragraph::new(Line::from(vec![
            Span::styled("  [Enter] Back to Start  ", Style::default().fg(colors.accent())),
            Span::styled("[r] Play Again  ", Style::default().fg(colors.accent())),
            Span::styled("[q] Quit", Style::default().fg(colors.accent())),
        ]))
        .render(layout[5], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_line_hidden_without_time() {
        let theme = Theme::default();
        let summary = Summary::new(3, 10, 5, String::new(), &theme);
        assert_eq!(summary.completion_line(), None);
        assert_eq!(summary.tier(), PerformanceTier::KeepTrying);

        let summary = Summary::new(3, 10, 5, "1m 5s".to_string(), &theme);
        assert_eq!(
            summary.completion_line().as_deref(),
            Some("\u{1F552} Completed in 1m 5s")
        );
    }
}
