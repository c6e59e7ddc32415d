use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    Start,
    Settings,
    Quit,
}

pub struct MenuItem {
    pub key: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub action: MenuAction,
}

pub struct Menu<'a> {
    pub items: Vec<MenuItem>,
    pub selected: usize,
    pub theme: &'a Theme,
}

impl<'a> Menu<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self {
            items: vec![
                MenuItem {
                    key: "Enter",
                    label: "Start Quiz",
                    description: "Answer every question, then see how you did",
                    action: MenuAction::Start,
                },
                MenuItem {
                    key: "c",
                    label: "Settings",
                    description: "Theme, question set and answer reveal",
                    action: MenuAction::Settings,
                },
                MenuItem {
                    key: "q",
                    label: "Quit",
                    description: "Leave trivia",
                    action: MenuAction::Quit,
                },
            ],
            selected: 0,
            theme,
        }
    }

    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % self.items.len();
    }

    pub fn prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        } else {
            self.selected = self.items.len() - 1;
        }
    }

    pub fn selected_action(&self) -> MenuAction {
        self.items[self.selected].action
    }
}

impl Widget for &Menu<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let title_lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "trivia",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Multiple choice, weighted by difficulty",
                Style::default().fg(colors.fg()),
            )),
            Line::from(""),
        ];
        Paragraph::new(title_lines)
            .alignment(Alignment::Center)
            .render(layout[0], buf);

        let menu_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                self.items
                    .iter()
                    .map(|_| Constraint::Length(3))
                    .collect::<Vec<_>>(),
            )
            .split(layout[2]);

        for (i, item) in self.items.iter().enumerate() {
            let is_selected = i == self.selected;
            let indicator = if is_selected { ">" } else { " " };

            let label_text = format!(" {indicator} [{}] {}", item.key, item.label);
            let desc_text = format!("     {}", item.description);

            let label_style = Style::default()
                .fg(if is_selected { colors.accent() } else { colors.fg() })
                .add_modifier(if is_selected {
                    Modifier::BOLD
                } else {
                    Modifier::empty()
                });

            let lines = vec![
                Line::from(Span::styled(label_text, label_style)),
                Line::from(Span::styled(
                    desc_text,
                    Style::default().fg(colors.text_muted()),
                )),
            ];

            if i < menu_layout.len() {
                Paragraph::new(lines).render(menu_layout[i], buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_wraps() {
        let theme = Theme::default();
        let mut menu = Menu::new(&theme);
        assert_eq!(menu.selected_action(), MenuAction::Start);
        menu.prev();
        assert_eq!(menu.selected_action(), MenuAction::Quit);
        menu.next();
        menu.next();
        assert_eq!(menu.selected_action(), MenuAction::Settings);
    }
}
