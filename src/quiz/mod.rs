pub mod grading;
pub mod schema;

use std::collections::BTreeMap;

pub use grading::{Feedback, GradeError, QuizRun};
pub use schema::{ResponseSchema, SchemaError};

pub type OptionId = String;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestionSet {
    /// Generated scenario text the questions refer to, when the page has one.
    pub context: Option<String>,
    pub questions: Vec<Question>,
}

impl QuestionSet {
    pub fn new(context: Option<String>, questions: Vec<Question>) -> Self {
        Self { context, questions }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub prompt: String,
    pub options: Vec<QuizOption>,
    pub correct: OptionId,
    pub explanation: Explanation,
}

impl Question {
    pub fn new(
        prompt: String,
        options: Vec<QuizOption>,
        correct: OptionId,
        explanation: Explanation,
    ) -> Self {
        Self {
            prompt,
            options,
            correct,
            explanation,
        }
    }

    pub fn option(&self, id: &str) -> Option<&QuizOption> {
        self.options.iter().find(|o| o.id == id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuizOption {
    pub id: OptionId,
    pub text: String,
}

impl QuizOption {
    pub fn new(id: impl Into<OptionId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// The two explanation layouts the generator produces.
#[derive(Debug, Clone, PartialEq)]
pub enum Explanation {
    /// One explanation per option, plus an optional takeaway shown with every answer.
    PerOption {
        by_option: BTreeMap<OptionId, String>,
        exam_tip: Option<String>,
    },
    Shared(String),
}

impl Explanation {
    pub fn for_option(&self, id: &str) -> String {
        match self {
            Explanation::PerOption { by_option, .. } => {
                by_option.get(id).cloned().unwrap_or_default()
            }
            Explanation::Shared(text) => text.clone(),
        }
    }

    pub fn exam_tip(&self) -> Option<&str> {
        match self {
            Explanation::PerOption { exam_tip, .. } => exam_tip.as_deref(),
            Explanation::Shared(_) => None,
        }
    }
}
