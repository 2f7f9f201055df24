use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum QuizError {
    #[error("unknown question: {0}")]
    UnknownQuestion(String),
    #[error("'{option}' is not an option for question '{question}'")]
    UnknownOption { question: String, option: String },
    #[error("question '{0}' takes a single answer")]
    NotMultipleChoice(String),
    #[error("question '{0}' takes multiple answers")]
    NotSingleChoice(String),
    #[error("unanswered questions: {}", .0.join(", "))]
    Incomplete(Vec<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    Single,
    Multiple,
}

#[derive(Debug, Clone, Copy)]
pub struct Question {
    pub id: &'static str,
    pub prompt: &'static str,
    pub kind: QuestionKind,
    pub options: &'static [&'static str],
}

pub const QUESTIONS: &[Question] = &[
    Question {
        id: "people",
        prompt: "How many people are you cooking for?",
        kind: QuestionKind::Single,
        options: &["One", "Two", "Three", "5+"],
    },
    Question {
        id: "budget",
        prompt: "What's your weekly food budget?",
        kind: QuestionKind::Single,
        options: &["Under Ksh.500", "Ksh.500-1,000", "Ksh.1,000-1,500", "Ksh.1,500+"],
    },
    Question {
        id: "dietary",
        prompt: "Any dietary restrictions or preferences?",
        kind: QuestionKind::Multiple,
        options: &[
            "None",
            "Vegetarian",
            "Vegan",
            "Gluten-free",
            "Keto",
            "Paleo",
            "Dairy-free",
            "Nut-free",
        ],
    },
    Question {
        id: "cuisine",
        prompt: "Which cuisines do you enjoy most?",
        kind: QuestionKind::Multiple,
        options: &[
            "Italian",
            "Mexican",
            "Asian",
            "Mediterranean",
            "American",
            "Indian",
            "Middle Eastern",
            "French",
            "Thai",
            "Japanese",
        ],
    },
    Question {
        id: "experience",
        prompt: "How would you describe your cooking experience?",
        kind: QuestionKind::Single,
        options: &["Beginner", "Some experience", "Intermediate", "Advanced"],
    },
    Question {
        id: "time",
        prompt: "How much time do you typically have for meal prep?",
        kind: QuestionKind::Single,
        options: &["Under 30 min", "30-60 min", "1-2 hours", "2+ hours"],
    },
];

pub fn question(id: &str) -> Result<&'static Question, QuizError> {
    QUESTIONS
        .iter()
        .find(|q| q.id == id)
        .ok_or_else(|| QuizError::UnknownQuestion(id.to_string()))
}

impl Question {
    fn option(&self, wanted: &str) -> Result<&'static str, QuizError> {
        self.options
            .iter()
            .copied()
            .find(|o| o.eq_ignore_ascii_case(wanted.trim()))
            .ok_or_else(|| QuizError::UnknownOption {
                question: self.id.to_string(),
                option: wanted.to_string(),
            })
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum Answer {
    Single(String),
    Multiple(Vec<String>),
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct QuizAnswers {
    answers: BTreeMap<String, Answer>,
}

impl QuizAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, question_id: &str) -> Option<&Answer> {
        self.answers.get(question_id)
    }

    pub fn choose_single(&mut self, question_id: &str, option: &str) -> Result<(), QuizError> {
        let q = question(question_id)?;
        if q.kind != QuestionKind::Single {
            return Err(QuizError::NotSingleChoice(q.id.to_string()));
        }
        let option = q.option(option)?;
        self.answers
            .insert(q.id.to_string(), Answer::Single(option.to_string()));
        Ok(())
    }

    /// Adds the option to a multiple-choice answer, or removes it if it was
    /// already picked. Returns whether it is selected afterwards.
    pub fn toggle_multiple(&mut self, question_id: &str, option: &str) -> Result<bool, QuizError> {
        let q = question(question_id)?;
        if q.kind != QuestionKind::Multiple {
            return Err(QuizError::NotMultipleChoice(q.id.to_string()));
        }
        let option = q.option(option)?;
        let mut picked = match self.answers.remove(q.id) {
            Some(Answer::Multiple(picked)) => picked,
            _ => Vec::new(),
        };
        let selected = match picked.iter().position(|p| p == option) {
            Some(index) => {
                picked.remove(index);
                false
            }
            None => {
                picked.push(option.to_string());
                true
            }
        };
        self.answers
            .insert(q.id.to_string(), Answer::Multiple(picked));
        Ok(selected)
    }

    pub fn is_answered(&self, q: &Question) -> bool {
        match (q.kind, self.answers.get(q.id)) {
            (QuestionKind::Multiple, Some(Answer::Multiple(picked))) => !picked.is_empty(),
            (QuestionKind::Single, Some(Answer::Single(_))) => true,
            _ => false,
        }
    }

    pub fn unanswered(&self) -> Vec<&'static str> {
        QUESTIONS
            .iter()
            .filter(|q| !self.is_answered(q))
            .map(|q| q.id)
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.unanswered().is_empty()
    }

    pub fn finish(self) -> Result<QuizResults, QuizError> {
        let missing = self.unanswered();
        if !missing.is_empty() {
            return Err(QuizError::Incomplete(
                missing.into_iter().map(str::to_string).collect(),
            ));
        }
        Ok(QuizResults {
            timestamp: Utc::now(),
            answers: self,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct QuizResults {
    pub timestamp: DateTime<Utc>,
    pub answers: QuizAnswers,
}
