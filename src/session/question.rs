use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn points(self) -> u32 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Difficulty::Easy => "\u{1F7E2}",
            Difficulty::Medium => "\u{1F7E1}",
            Difficulty::Hard => "\u{1F534}",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    pub category: String,
    pub difficulty_level: Difficulty,
}

impl Question {
    pub fn points(&self) -> u32 {
        self.difficulty_level.points()
    }

    pub fn is_correct(&self, index: usize) -> bool {
        index == self.correct_answer
    }

    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_answer]
    }
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DatasetError {
    #[error("failed to read question file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed question data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("bundled question set {0} is missing")]
    MissingAsset(String),
    #[error("question set is empty")]
    Empty,
    #[error("question at position {position} has id 0; ids must be positive")]
    ZeroId { position: usize },
    #[error("question id {id} appears more than once")]
    DuplicateId { id: u32 },
    #[error("question {id} has {count} option(s); at least 2 are required")]
    TooFewOptions { id: u32, count: usize },
    #[error("question {id} marks option {index} as correct but only has {count} options")]
    CorrectAnswerOutOfRange { id: u32, index: usize, count: usize },
}

/// Ordered, validated question list. Read-only for the lifetime of the process.
#[derive(Clone, Debug)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    pub fn new(questions: Vec<Question>) -> Result<Self, DatasetError> {
        if questions.is_empty() {
            return Err(DatasetError::Empty);
        }

        let mut seen = HashSet::new();
        for (position, q) in questions.iter().enumerate() {
            if q.id == 0 {
                return Err(DatasetError::ZeroId { position });
            }
            if !seen.insert(q.id) {
                return Err(DatasetError::DuplicateId { id: q.id });
            }
            if q.options.len() < 2 {
                return Err(DatasetError::TooFewOptions {
                    id: q.id,
                    count: q.options.len(),
                });
            }
            if q.correct_answer >= q.options.len() {
                return Err(DatasetError::CorrectAnswerOutOfRange {
                    id: q.id,
                    index: q.correct_answer,
                    count: q.options.len(),
                });
            }
        }

        Ok(Self { questions })
    }

    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let questions: Vec<Question> = serde_json::from_str(json)?;
        Self::new(questions)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false for a constructed set.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.questions.iter()
    }

    pub fn as_slice(&self) -> &[Question] {
        &self.questions
    }
}

impl<'a> IntoIterator for &'a QuestionSet {
    type Item = &'a Question;
    type IntoIter = std::slice::Iter<'a, Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.questions.iter()
    }
}

#[cfg(test)]
pub(crate) fn sample_question(id: u32, correct_answer: usize, difficulty: Difficulty) -> Question {
    Question {
        id,
        question: format!("Question number {id}?"),
        options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
        correct_answer,
        category: "General".into(),
        difficulty_level: difficulty,
    }
}
