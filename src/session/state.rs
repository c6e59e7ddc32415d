use chrono::{DateTime, Utc};

use crate::session::question::{Question, QuestionSet};

/// The option the user picked for the current question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    pub value: String,
    pub index: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AnswerState {
    #[default]
    Unanswered,
    Selected(Selection),
    /// Locked in. Points, if any, were added when entering this state.
    Confirmed(Selection),
}

impl AnswerState {
    pub fn selection(&self) -> Option<&Selection> {
        match self {
            AnswerState::Unanswered => None,
            AnswerState::Selected(sel) | AnswerState::Confirmed(sel) => Some(sel),
        }
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self, AnswerState::Confirmed(_))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum QuizState {
    #[default]
    NotStarted,
    Active {
        index: usize,
        answer: AnswerState,
        score: u32,
        started_at: DateTime<Utc>,
    },
    Completed {
        score: u32,
        started_at: DateTime<Utc>,
        ended_at: DateTime<Utc>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Start,
    Select { value: String, index: usize },
    Confirm,
    Next,
    End,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Start => "start",
            Action::Select { .. } => "select",
            Action::Confirm => "confirm",
            Action::Next => "next",
            Action::End => "end",
        }
    }
}

impl QuizState {
    /// Compute the state that follows `action`. Calls that make no sense in the
    /// current state return an identical state.
    pub fn apply(&self, action: Action, questions: &QuestionSet, now: DateTime<Utc>) -> QuizState {
        match action {
            Action::Start => QuizState::Active {
                index: 0,
                answer: AnswerState::Unanswered,
                score: 0,
                started_at: now,
            },
            Action::End => QuizState::NotStarted,
            Action::Select { value, index } => self.select(value, index, questions),
            Action::Confirm => self.confirm(questions),
            Action::Next => self.advance(questions, now),
        }
    }

    fn select(&self, value: String, option: usize, questions: &QuestionSet) -> QuizState {
        match self {
            QuizState::Active {
                index,
                answer,
                score,
                started_at,
            } if !answer.is_confirmed() => {
                let valid = questions
                    .get(*index)
                    .is_some_and(|q| option < q.options.len());
                if !valid {
                    return self.clone();
                }
                QuizState::Active {
                    index: *index,
                    answer: AnswerState::Selected(Selection {
                        value,
                        index: option,
                    }),
                    score: *score,
                    started_at: *started_at,
                }
            }
            _ => self.clone(),
        }
    }

    fn confirm(&self, questions: &QuestionSet) -> QuizState {
        match self {
            QuizState::Active {
                index,
                answer: AnswerState::Selected(sel),
                score,
                started_at,
            } => {
                let earned = questions
                    .get(*index)
                    .filter(|q| q.is_correct(sel.index))
                    .map_or(0, Question::points);
                QuizState::Active {
                    index: *index,
                    answer: AnswerState::Confirmed(sel.clone()),
                    score: score + earned,
                    started_at: *started_at,
                }
            }
            _ => self.clone(),
        }
    }

    fn advance(&self, questions: &QuestionSet, now: DateTime<Utc>) -> QuizState {
        match self {
            QuizState::Active {
                index,
                score,
                started_at,
                ..
            } => {
                let next = index + 1;
                if next >= questions.len() {
                    QuizState::Completed {
                        score: *score,
                        started_at: *started_at,
                        ended_at: now,
                    }
                } else {
                    QuizState::Active {
                        index: next,
                        answer: AnswerState::Unanswered,
                        score: *score,
                        started_at: *started_at,
                    }
                }
            }
            _ => self.clone(),
        }
    }

    pub fn score(&self) -> u32 {
        match self {
            QuizState::NotStarted => 0,
            QuizState::Active { score, .. } | QuizState::Completed { score, .. } => *score,
        }
    }

    /// `None` before the quiz starts; the question count once it is complete.
    pub fn current_question_index(&self, total: usize) -> Option<usize> {
        match self {
            QuizState::NotStarted => None,
            QuizState::Active { index, .. } => Some(*index),
            QuizState::Completed { .. } => Some(total),
        }
    }

    pub fn answer(&self) -> Option<&AnswerState> {
        match self {
            QuizState::Active { answer, .. } => Some(answer),
            _ => None,
        }
    }

    pub fn selected_answer(&self) -> &str {
        self.answer()
            .and_then(AnswerState::selection)
            .map_or("", |sel| sel.value.as_str())
    }

    pub fn selected_answer_index(&self) -> Option<usize> {
        self.answer().and_then(AnswerState::selection).map(|sel| sel.index)
    }

    pub fn is_answer_confirmed(&self) -> bool {
        self.answer().is_some_and(AnswerState::is_confirmed)
    }

    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        match self {
            QuizState::NotStarted => None,
            QuizState::Active { started_at, .. } | QuizState::Completed { started_at, .. } => {
                Some(*started_at)
            }
        }
    }

    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        match self {
            QuizState::Completed { ended_at, .. } => Some(*ended_at),
            _ => None,
        }
    }

    pub fn is_started(&self) -> bool {
        !matches!(self, QuizState::NotStarted)
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, QuizState::Completed { .. })
    }
}
