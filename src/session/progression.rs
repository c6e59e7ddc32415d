use chrono::{DateTime, Utc};

use crate::engine::elapsed::format_elapsed;
use crate::session::question::{Question, QuestionSet};
use crate::session::state::{Action, AnswerState, QuizState};

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Owns one quiz attempt at a time over a fixed question set.
pub struct QuizEngine {
    questions: QuestionSet,
    state: QuizState,
    clock: Box<dyn Clock>,
}

impl QuizEngine {
    pub fn new(questions: QuestionSet) -> Self {
        Self::with_clock(questions, Box::new(SystemClock))
    }

    pub fn with_clock(questions: QuestionSet, clock: Box<dyn Clock>) -> Self {
        Self {
            questions,
            state: QuizState::NotStarted,
            clock,
        }
    }

    fn dispatch(&mut self, action: Action) {
        let name = action.name();
        let next = self.state.apply(action, &self.questions, self.clock.now());
        if next == self.state {
            tracing::debug!(action = name, "transition ignored");
            return;
        }
        self.state = next;
        tracing::debug!(
            action = name,
            index = ?self.current_question_index(),
            score = self.state.score(),
            "transition applied"
        );
        if let QuizState::Completed { score, .. } = self.state {
            tracing::info!(
                score,
                total = self.total_possible_score(),
                elapsed = %self.elapsed(),
                "quiz completed"
            );
        }
    }

    pub fn start_quiz(&mut self) {
        self.dispatch(Action::Start);
    }

    pub fn select_answer(&mut self, value: &str, index: usize) {
        self.dispatch(Action::Select {
            value: value.to_string(),
            index,
        });
    }

    /// Select the option at `index` of the current question by position alone.
    pub fn select_option(&mut self, index: usize) {
        let value = self
            .current_question()
            .and_then(|q| q.options.get(index))
            .cloned();
        if let Some(value) = value {
            self.select_answer(&value, index);
        }
    }

    pub fn confirm_answer(&mut self) {
        self.dispatch(Action::Confirm);
    }

    pub fn next_question(&mut self) {
        self.dispatch(Action::Next);
    }

    pub fn end_quiz(&mut self) {
        self.dispatch(Action::End);
    }

    pub fn state(&self) -> &QuizState {
        &self.state
    }

    pub fn questions(&self) -> &QuestionSet {
        &self.questions
    }

    pub fn current_question(&self) -> Option<&Question> {
        match self.state {
            QuizState::Active { index, .. } => self.questions.get(index),
            _ => None,
        }
    }

    pub fn current_question_index(&self) -> Option<usize> {
        self.state.current_question_index(self.questions.len())
    }

    pub fn is_quiz_started(&self) -> bool {
        self.state.is_started()
    }

    pub fn is_quiz_complete(&self) -> bool {
        self.state.is_complete()
    }

    pub fn is_last_question(&self) -> bool {
        matches!(self.state, QuizState::Active { index, .. } if index + 1 == self.questions.len())
    }

    pub fn total_possible_score(&self) -> u32 {
        crate::engine::scoring::total_possible_score(&self.questions)
    }

    /// Whether the confirmed answer on the current question was right.
    /// `None` until an answer is confirmed.
    pub fn last_answer_correct(&self) -> Option<bool> {
        match (&self.state, self.current_question()) {
            (
                QuizState::Active {
                    answer: AnswerState::Confirmed(sel),
                    ..
                },
                Some(q),
            ) => Some(q.is_correct(sel.index)),
            _ => None,
        }
    }

    /// Final elapsed time once complete, running time while active.
    pub fn elapsed(&self) -> String {
        match self.state {
            QuizState::Active { started_at, .. } => {
                format_elapsed(Some(started_at), Some(self.clock.now()))
            }
            _ => format_elapsed(self.state.start_time(), self.state.end_time()),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_clock::ManualClock;
    use super::*;
    use crate::session::question::{Difficulty, sample_question};

    fn engine_with(questions: Vec<Question>) -> (QuizEngine, ManualClock) {
        let clock = ManualClock::new();
        let set = QuestionSet::new(questions).unwrap();
        (QuizEngine::with_clock(set, Box::new(clock.clone())), clock)
    }

    #[test]
    fn test_two_question_walkthrough() {
        let (mut engine, clock) = engine_with(vec![
            sample_question(1, 1, Difficulty::Easy),
            sample_question(2, 0, Difficulty::Hard),
        ]);

        engine.start_quiz();
        engine.select_answer("B", 1);
        engine.confirm_answer();
        assert_eq!(engine.state().score(), 1);
        assert_eq!(engine.last_answer_correct(), Some(true));

        engine.next_question();
        assert_eq!(engine.current_question_index(), Some(1));
        assert!(engine.is_last_question());

        engine.select_answer("A", 0);
        engine.confirm_answer();
        assert_eq!(engine.state().score(), 4);

        clock.advance_ms(150_000);
        engine.next_question();
        assert_eq!(engine.current_question_index(), Some(2));
        assert!(engine.is_quiz_complete());
        assert!(engine.state().end_time().is_some());
        assert!(engine.current_question().is_none());
        assert_eq!(engine.elapsed(), "2m 30s");
    }

    #[test]
    fn test_skipping_every_question_scores_zero() {
        let (mut engine, _clock) = engine_with(vec![
            sample_question(1, 0, Difficulty::Medium),
            sample_question(2, 1, Difficulty::Hard),
            sample_question(3, 2, Difficulty::Easy),
        ]);
        engine.start_quiz();
        while !engine.is_quiz_complete() {
            engine.next_question();
        }
        assert_eq!(engine.state().score(), 0);
        assert_eq!(engine.total_possible_score(), 6);
    }

    #[test]
    fn test_select_option_uses_option_text() {
        let (mut engine, _clock) = engine_with(vec![sample_question(1, 2, Difficulty::Easy)]);
        engine.start_quiz();
        engine.select_option(2);
        assert_eq!(engine.state().selected_answer(), "C");
        assert_eq!(engine.state().selected_answer_index(), Some(2));

        engine.select_option(10);
        assert_eq!(engine.state().selected_answer_index(), Some(2));
    }

    #[test]
    fn test_wrong_confirm_reports_incorrect() {
        let (mut engine, _clock) = engine_with(vec![sample_question(1, 2, Difficulty::Hard)]);
        engine.start_quiz();
        assert_eq!(engine.last_answer_correct(), None);
        engine.select_option(0);
        engine.confirm_answer();
        assert_eq!(engine.last_answer_correct(), Some(false));
        assert_eq!(engine.state().score(), 0);
    }

    #[test]
    fn test_live_elapsed_while_active() {
        let (mut engine, clock) = engine_with(vec![sample_question(1, 0, Difficulty::Easy)]);
        assert_eq!(engine.elapsed(), "");
        engine.start_quiz();
        clock.advance_ms(45_000);
        assert_eq!(engine.elapsed(), "45s");
    }

    #[test]
    fn test_end_quiz_resets_timestamps() {
        let (mut engine, _clock) = engine_with(vec![sample_question(1, 0, Difficulty::Easy)]);
        engine.start_quiz();
        engine.next_question();
        assert!(engine.is_quiz_complete());
        engine.end_quiz();
        assert!(!engine.is_quiz_started());
        assert_eq!(engine.state().start_time(), None);
        assert_eq!(engine.state().end_time(), None);
    }
}
