use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::engine::feedback::Feedback;
use crate::ui::theme::Theme;

pub struct FeedbackPanel<'a> {
    feedback: Feedback,
    correct: bool,
    /// Text of the right option, shown only after a miss.
    reveal: Option<&'a str>,
    theme: &'a Theme,
}

impl<'a> FeedbackPanel<'a> {
    pub fn new(feedback: Feedback, correct: bool, reveal: Option<&'a str>, theme: &'a Theme) -> Self {
        Self {
            feedback,
            correct,
            reveal: if correct { None } else { reveal },
            theme,
        }
    }

    pub fn lines(&self) -> Vec<Line<'static>> {
        let colors = &self.theme.colors;
        let tone = if self.correct { colors.success() } else { colors.warning() };

        let mut lines = vec![Line::from(Span::styled(
            format!(" {} {}", self.feedback.icon, self.feedback.message),
            Style::default().fg(tone).add_modifier(Modifier::BOLD),
        ))];
        if let Some(answer) = self.reveal {
            lines.push(Line::from(vec![
                Span::styled(" \u{2705} Correct answer: ", Style::default().fg(colors.fg())),
                Span::styled(
                    answer.to_string(),
                    Style::default().fg(colors.success()),
                ),
            ]));
        }
        lines
    }
}

impl Widget for FeedbackPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        Paragraph::new(self.lines())
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::feedback::messages;

    #[test]
    fn test_reveal_only_after_miss() {
        let theme = Theme::default();
        let hit = FeedbackPanel::new(messages(true)[0], true, Some("Paris"), &theme);
        assert_eq!(hit.lines().len(), 1);

        let miss = FeedbackPanel::new(messages(false)[2], false, Some("Paris"), &theme);
        let lines = miss.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].spans[1].content, "Paris");
    }

    #[test]
    fn test_reveal_can_be_disabled() {
        let theme = Theme::default();
        let miss = FeedbackPanel::new(messages(false)[0], false, None, &theme);
        assert_eq!(miss.lines().len(), 1);
    }
}
