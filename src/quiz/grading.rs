use std::collections::BTreeMap;
use std::fmt;

use super::{OptionId, Question, QuestionSet};

/// Grading result for one answered question. Always recomputed from the
/// recorded answer, never stored on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub is_correct: bool,
    pub explanation: String,
    pub exam_tip: Option<String>,
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_correct {
            write!(f, "✅ Correct!")?;
        } else {
            write!(f, "❌ Incorrect.")?;
        }
        if !self.explanation.is_empty() {
            write!(f, " {}", self.explanation)?;
        }
        if let Some(tip) = &self.exam_tip {
            write!(f, "\nExam Tip: {}", tip)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GradeError {
    NoSuchQuestion(usize),
    NoSuchOption { question: usize, option: OptionId },
}

impl fmt::Display for GradeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradeError::NoSuchQuestion(index) => write!(f, "there is no question {}", index + 1),
            GradeError::NoSuchOption { question, option } => {
                write!(f, "question {} has no option {:?}", question + 1, option)
            }
        }
    }
}

impl std::error::Error for GradeError {}

/// A generated question set together with the answers given to it. The whole
/// run is replaced when a new set is generated.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizRun {
    set: QuestionSet,
    answers: BTreeMap<usize, OptionId>,
    last_answered: Option<usize>,
}

impl QuizRun {
    pub fn new(set: QuestionSet) -> Self {
        Self {
            set,
            answers: BTreeMap::new(),
            last_answered: None,
        }
    }

    pub fn set(&self) -> &QuestionSet {
        &self.set
    }

    pub fn question(&self, index: usize) -> Option<&Question> {
        self.set.questions.get(index)
    }

    /// Records `option` for question `index`. The first answer locks the
    /// question: later selections return the original feedback unchanged.
    pub fn select(&mut self, index: usize, option: &str) -> Result<Feedback, GradeError> {
        let question = self
            .set
            .questions
            .get(index)
            .ok_or(GradeError::NoSuchQuestion(index))?;

        if let Some(previous) = self.answers.get(&index) {
            log::debug!("question {} already answered with {:?}", index, previous);
            return Ok(grade(question, previous));
        }

        if question.option(option).is_none() {
            return Err(GradeError::NoSuchOption {
                question: index,
                option: option.to_string(),
            });
        }

        self.answers.insert(index, option.to_string());
        self.last_answered = Some(index);
        Ok(grade(question, option))
    }

    pub fn answer(&self, index: usize) -> Option<&str> {
        self.answers.get(&index).map(String::as_str)
    }

    pub fn is_answered(&self, index: usize) -> bool {
        self.answers.contains_key(&index)
    }

    pub fn feedback(&self, index: usize) -> Option<Feedback> {
        let selected = self.answers.get(&index)?;
        let question = self.set.questions.get(index)?;
        Some(grade(question, selected))
    }

    pub fn last_answered(&self) -> Option<usize> {
        self.last_answered
    }

    /// Plain-text block with the latest answered prompt and its feedback.
    pub fn copy_text(&self) -> Option<String> {
        let index = self.last_answered?;
        let question = self.set.questions.get(index)?;
        let feedback = self.feedback(index)?;
        Some(format!("Question: {}\n{}", question.prompt, feedback))
    }

    /// (correct, answered)
    pub fn score(&self) -> (usize, usize) {
        let correct = self
            .answers
            .keys()
            .filter_map(|i| self.feedback(*i))
            .filter(|f| f.is_correct)
            .count();
        (correct, self.answers.len())
    }

    pub fn is_complete(&self) -> bool {
        self.answers.len() == self.set.questions.len()
    }
}

fn grade(question: &Question, selected: &str) -> Feedback {
    Feedback {
        is_correct: selected == question.correct,
        explanation: question.explanation.for_option(selected),
        exam_tip: question.explanation.exam_tip().map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::{Explanation, QuizOption};

    fn per_option_question() -> Question {
        Question::new(
            "Which framework is risk-based?".to_string(),
            vec![
                QuizOption::new("0", "PCI DSS"),
                QuizOption::new("1", "HIPAA"),
                QuizOption::new("2", "NIST RMF"),
                QuizOption::new("3", "SOX"),
            ],
            "2".to_string(),
            Explanation::PerOption {
                by_option: (0..4)
                    .map(|i| (i.to_string(), format!("why {}", i)))
                    .collect(),
                exam_tip: Some("RMF = risk".to_string()),
            },
        )
    }

    fn shared_question(correct: &str) -> Question {
        Question::new(
            "First step?".to_string(),
            vec![
                QuizOption::new("A", "Isolate"),
                QuizOption::new("B", "Reboot"),
            ],
            correct.to_string(),
            Explanation::Shared("Containment comes first.".to_string()),
        )
    }

    #[test]
    fn grades_by_key_with_per_option_explanations() {
        let mut run = QuizRun::new(QuestionSet::new(None, vec![per_option_question()]));
        let fb = run.select(0, "0").unwrap();
        assert!(!fb.is_correct);
        assert_eq!(fb.explanation, "why 0");
        assert_eq!(fb.exam_tip.as_deref(), Some("RMF = risk"));
    }

    #[test]
    fn answered_question_is_locked() {
        let mut run = QuizRun::new(QuestionSet::new(None, vec![per_option_question()]));
        let first = run.select(0, "2").unwrap();
        assert!(first.is_correct);

        let second = run.select(0, "1").unwrap();
        assert_eq!(second, first);
        assert_eq!(run.answer(0), Some("2"));
    }

    #[test]
    fn option_order_does_not_affect_correctness() {
        let mut reordered = shared_question("A");
        reordered.options.reverse();
        let mut run = QuizRun::new(QuestionSet::new(None, vec![shared_question("A"), reordered]));
        assert!(run.select(0, "A").unwrap().is_correct);
        assert!(run.select(1, "A").unwrap().is_correct);
        assert_eq!(run.score(), (2, 2));
        assert!(run.is_complete());
    }

    #[test]
    fn unknown_question_or_option_records_nothing() {
        let mut run = QuizRun::new(QuestionSet::new(None, vec![shared_question("B")]));
        assert_eq!(run.select(3, "A"), Err(GradeError::NoSuchQuestion(3)));
        assert!(matches!(run.select(0, "Z"), Err(GradeError::NoSuchOption { .. })));
        assert!(!run.is_answered(0));
        assert_eq!(run.feedback(0), None);
    }

    #[test]
    fn copy_text_uses_latest_answer() {
        let mut run = QuizRun::new(QuestionSet::new(
            Some("scenario".to_string()),
            vec![shared_question("A"), per_option_question()],
        ));
        assert_eq!(run.copy_text(), None);

        run.select(1, "2").unwrap();
        run.select(0, "B").unwrap();
        assert_eq!(
            run.copy_text().unwrap(),
            "Question: First step?\n❌ Incorrect. Containment comes first."
        );
    }

    #[test]
    fn feedback_text_includes_exam_tip() {
        let mut run = QuizRun::new(QuestionSet::new(None, vec![per_option_question()]));
        let fb = run.select(0, "2").unwrap();
        assert_eq!(fb.to_string(), "✅ Correct! why 2\nExam Tip: RMF = risk");
    }
}
