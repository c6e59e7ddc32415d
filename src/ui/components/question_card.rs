use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::engine::scoring::category_label;
use crate::session::question::Question;
use crate::ui::theme::Theme;

pub struct QuestionCard<'a> {
    question: &'a Question,
    selected: Option<usize>,
    confirmed: bool,
    cursor: usize,
    theme: &'a Theme,
}

impl<'a> QuestionCard<'a> {
    pub fn new(
        question: &'a Question,
        selected: Option<usize>,
        confirmed: bool,
        cursor: usize,
        theme: &'a Theme,
    ) -> Self {
        Self {
            question,
            selected,
            confirmed,
            cursor,
            theme,
        }
    }

    fn option_line(&self, index: usize, text: &str) -> Line<'static> {
        let colors = &self.theme.colors;
        let is_selected = self.selected == Some(index);
        let at_cursor = !self.confirmed && index == self.cursor;

        let radio = if is_selected { "(\u{2022})" } else { "( )" };
        let pointer = if at_cursor { ">" } else { " " };

        let mut style = Style::default().fg(colors.fg());
        if self.confirmed {
            if index == self.question.correct_answer && is_selected {
                style = style.fg(colors.success()).add_modifier(Modifier::BOLD);
            } else if is_selected {
                style = style.fg(colors.error()).add_modifier(Modifier::BOLD);
            } else {
                style = style.fg(colors.text_muted());
            }
        } else if is_selected {
            style = style.fg(colors.selected()).add_modifier(Modifier::BOLD);
        } else if at_cursor {
            style = style.fg(colors.accent());
        }

        Line::from(vec![
            Span::styled(
                format!(" {pointer} {radio} "),
                Style::default().fg(colors.accent()),
            ),
            Span::styled(format!("{}. {text}", index + 1), style),
        ])
    }
}

impl Widget for QuestionCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(if self.confirmed {
                colors.border()
            } else {
                colors.border_focused()
            }))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let option_rows = self.question.options.len() as u16;
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(2),
                Constraint::Length(option_rows + 1),
            ])
            .split(inner);

        Paragraph::new(Line::from(Span::styled(
            category_label(&self.question.category, self.question.difficulty_level),
            Style::default().fg(colors.text_muted()),
        )))
        .render(layout[0], buf);

        let heading = format!("Question {}: {}", self.question.id, self.question.question);
        Paragraph::new(Line::from(Span::styled(
            heading,
            Style::default()
                .fg(colors.fg())
                .add_modifier(Modifier::BOLD),
        )))
        .wrap(Wrap { trim: true })
        .render(layout[2], buf);

        let lines: Vec<Line> = self
            .question
            .options
            .iter()
            .enumerate()
            .map(|(i, text)| self.option_line(i, text))
            .collect();
        Paragraph::new(lines).render(layout[3], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::question::{Difficulty, sample_question};

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    #[test]
    fn test_renders_heading_and_marks_selection() {
        let theme = Theme::default();
        let question = sample_question(3, 1, Difficulty::Medium);
        let area = Rect::new(0, 0, 50, 12);
        let mut buf = Buffer::empty(area);
        QuestionCard::new(&question, Some(1), false, 1, &theme).render(area, &mut buf);

        let rows: Vec<String> = (0..area.height).map(|y| row_text(&buf, y)).collect();
        assert!(rows.iter().any(|r| r.contains("Question 3: Question number 3?")));
        assert!(rows.iter().any(|r| r.contains("> (\u{2022}) 2. B")));
        assert!(rows.iter().any(|r| r.contains("( ) 1. A")));
    }

    #[test]
    fn test_confirmed_wrong_answer_uses_error_color() {
        let theme = Theme::default();
        let question = sample_question(1, 0, Difficulty::Easy);
        let card = QuestionCard::new(&question, Some(2), true, 2, &theme);
        let line = card.option_line(2, "C");
        assert_eq!(line.spans[1].style.fg, Some(theme.colors.error()));
        let untouched = card.option_line(0, "A");
        assert_eq!(untouched.spans[1].style.fg, Some(theme.colors.text_muted()));
    }
}
