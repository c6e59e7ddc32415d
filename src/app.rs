use rand::rngs::SmallRng;

use crate::config::{Config, Overrides};
use crate::engine::feedback::{Feedback, feedback_for};
use crate::session::progression::QuizEngine;
use crate::session::question::QuestionSet;
use crate::store::question_store::{self, QuestionSource};
use crate::ui::components::menu::Menu;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Welcome,
    Question,
    Summary,
    Settings,
}

pub const SETTINGS_COUNT: usize = 4;

pub struct App {
    pub engine: QuizEngine,
    /// What gets saved. Command-line choices live in `overrides` instead.
    pub config: Config,
    pub overrides: Overrides,
    pub source: QuestionSource,
    pub theme: &'static Theme,
    pub menu: Menu<'static>,
    pub option_cursor: usize,
    /// Chosen once per confirmation so redraws don't reshuffle the message.
    pub feedback: Option<Feedback>,
    pub restart_prompt_open: bool,
    pub settings_open: bool,
    pub settings_selected: usize,
    pub status_message: Option<String>,
    pub should_quit: bool,
    rng: SmallRng,
}

impl App {
    pub fn new(
        config: Config,
        overrides: Overrides,
        questions: QuestionSet,
        source: QuestionSource,
        rng: SmallRng,
    ) -> Self {
        let theme_name = config.with_overrides(&overrides).theme;
        let theme: &'static Theme =
            Box::leak(Box::new(Theme::load(&theme_name).unwrap_or_default()));
        Self {
            engine: QuizEngine::new(questions),
            config,
            overrides,
            source,
            theme,
            menu: Menu::new(theme),
            option_cursor: 0,
            feedback: None,
            restart_prompt_open: false,
            settings_open: false,
            settings_selected: 0,
            status_message: None,
            should_quit: false,
            rng,
        }
    }

    pub fn effective_config(&self) -> Config {
        self.config.with_overrides(&self.overrides)
    }

    pub fn screen(&self) -> AppScreen {
        if self.settings_open {
            AppScreen::Settings
        } else if self.engine.is_quiz_complete() {
            AppScreen::Summary
        } else if self.engine.is_quiz_started() {
            AppScreen::Question
        } else {
            AppScreen::Welcome
        }
    }

    fn reset_question_view(&mut self) {
        self.option_cursor = 0;
        self.feedback = None;
        self.restart_prompt_open = false;
    }

    pub fn start_quiz(&mut self) {
        self.engine.start_quiz();
        self.status_message = None;
        self.reset_question_view();
    }

    pub fn back_to_start(&mut self) {
        self.engine.end_quiz();
        self.reset_question_view();
    }

    fn option_count(&self) -> usize {
        self.engine
            .current_question()
            .map_or(0, |q| q.options.len())
    }

    pub fn cursor_up(&mut self) {
        let count = self.option_count();
        if count == 0 || self.engine.state().is_answer_confirmed() {
            return;
        }
        self.option_cursor = if self.option_cursor == 0 {
            count - 1
        } else {
            self.option_cursor - 1
        };
    }

    pub fn cursor_down(&mut self) {
        let count = self.option_count();
        if count == 0 || self.engine.state().is_answer_confirmed() {
            return;
        }
        self.option_cursor = (self.option_cursor + 1) % count;
    }

    /// Jump to an option by number key and select it.
    pub fn pick_option(&mut self, index: usize) {
        if index >= self.option_count() || self.engine.state().is_answer_confirmed() {
            return;
        }
        self.option_cursor = index;
        self.engine.select_option(index);
    }

    pub fn select_at_cursor(&mut self) {
        self.engine.select_option(self.option_cursor);
    }

    pub fn confirm_answer(&mut self) {
        self.engine.confirm_answer();
        if self.feedback.is_none() {
            if let Some(correct) = self.engine.last_answer_correct() {
                self.feedback = Some(feedback_for(correct, &mut self.rng));
            }
        }
    }

    /// Advance only after the answer is locked in.
    pub fn next_question(&mut self) {
        if !self.engine.state().is_answer_confirmed() {
            return;
        }
        self.engine.next_question();
        self.reset_question_view();
    }

    /// Move on without answering. Scores nothing.
    pub fn skip_question(&mut self) {
        self.engine.next_question();
        self.reset_question_view();
    }

    /// Enter: select the highlighted option, confirm it, then advance.
    pub fn activate(&mut self) {
        let state = self.engine.state();
        if state.is_answer_confirmed() {
            self.next_question();
        } else if state.selected_answer_index() == Some(self.option_cursor) {
            self.confirm_answer();
        } else {
            self.select_at_cursor();
        }
    }

    pub fn request_restart(&mut self) {
        if self.config.confirm_restart {
            self.restart_prompt_open = true;
        } else {
            self.back_to_start();
        }
    }

    pub fn cancel_restart(&mut self) {
        self.restart_prompt_open = false;
    }

    pub fn go_to_settings(&mut self) {
        if self.engine.is_quiz_started() {
            return;
        }
        self.settings_selected = 0;
        self.settings_open = true;
    }

    /// Leave settings, loading a different question set if it changed.
    pub fn close_settings(&mut self) {
        self.settings_open = false;
        let source = self.effective_config().question_source();
        if source == self.source {
            return;
        }
        match source.load() {
            Ok(questions) => {
                self.engine = QuizEngine::new(questions);
                self.source = source;
                self.status_message = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "keeping previous question set");
                self.status_message = Some(format!("Could not load {}: {e}", source.describe()));
            }
        }
    }

    pub fn settings_up(&mut self) {
        self.settings_selected = self.settings_selected.saturating_sub(1);
    }

    pub fn settings_down(&mut self) {
        self.settings_selected = (self.settings_selected + 1).min(SETTINGS_COUNT - 1);
    }

    pub fn settings_cycle_forward(&mut self) {
        self.settings_cycle(true);
    }

    pub fn settings_cycle_backward(&mut self) {
        self.settings_cycle(false);
    }

    fn settings_cycle(&mut self, forward: bool) {
        match self.settings_selected {
            0 => {
                let themes = Theme::available_themes();
                let current = self.effective_config().theme;
                self.overrides.theme = None;
                self.config.theme = cycle(&themes, &current, forward);
                if let Some(new_theme) = Theme::load(&self.config.theme) {
                    let theme: &'static Theme = Box::leak(Box::new(new_theme));
                    self.theme = theme;
                    self.menu.theme = theme;
                }
            }
            1 => {
                let sets = question_store::bundled_sets();
                let current = self.effective_config().question_set;
                // A custom file is replaced by the bundled sets once cycled.
                self.overrides.question_set = None;
                self.overrides.questions_path = None;
                self.config.questions_path = None;
                self.config.question_set = cycle(&sets, &current, forward);
            }
            2 => self.config.reveal_correct_answer = !self.config.reveal_correct_answer,
            3 => self.config.confirm_restart = !self.config.confirm_restart,
            _ => {}
        }
    }

    pub fn settings_fields(&self) -> Vec<(&'static str, String)> {
        let effective = self.effective_config();
        let set_label = match &effective.questions_path {
            Some(path) => format!("file: {}", path.display()),
            None => effective.question_set,
        };
        vec![
            ("Theme", effective.theme),
            ("Question Set", set_label),
            ("Reveal Correct Answer", on_off(self.config.reveal_correct_answer)),
            ("Confirm Before Restart", on_off(self.config.confirm_restart)),
        ]
    }
}

fn on_off(value: bool) -> String {
    if value { "on".to_string() } else { "off".to_string() }
}

fn cycle(items: &[String], current: &str, forward: bool) -> String {
    let Some(first) = items.first() else {
        return current.to_string();
    };
    match items.iter().position(|i| i == current) {
        Some(idx) => {
            let next = if forward {
                (idx + 1) % items.len()
            } else if idx == 0 {
                items.len() - 1
            } else {
                idx - 1
            };
            items[next].clone()
        }
        None => first.clone(),
    }
}
