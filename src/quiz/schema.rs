//! Adapters from the generator's JSON bodies to a [`QuestionSet`].

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::Deserialize;
use serde_json::Value;

use super::{Explanation, Question, QuestionSet, QuizOption};

/// Which body layout a page's generator returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseSchema {
    /// One question with an options array, `correct_answer_index`,
    /// per-option `explanations` and an `exam_tip`.
    SingleWithTip,
    /// A `scenario` text and a list of `interactive_questions`, each with
    /// lettered options and one shared `explanation`.
    ScenarioQuestions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    Malformed(String),
    NoQuestions,
    UnknownCorrectOption { question: usize, correct: String },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::Malformed(e) => write!(f, "malformed generator response: {}", e),
            SchemaError::NoQuestions => write!(f, "generator response has no questions"),
            SchemaError::UnknownCorrectOption { question, correct } => write!(
                f,
                "question {} marks {:?} as correct but has no such option",
                question + 1,
                correct
            ),
        }
    }
}

impl std::error::Error for SchemaError {}

#[derive(Deserialize)]
struct SingleQuestionBody {
    question: String,
    options: Vec<String>,
    correct_answer_index: usize,
    #[serde(default)]
    explanations: HashMap<String, String>,
    #[serde(default)]
    exam_tip: Option<String>,
}

#[derive(Deserialize)]
struct ScenarioBody {
    #[serde(default)]
    scenario: Option<String>,
    #[serde(default)]
    interactive_questions: Vec<ScenarioQuestionBody>,
}

#[derive(Deserialize)]
struct ScenarioQuestionBody {
    question: String,
    options: BTreeMap<String, String>,
    #[serde(alias = "correct_answer_index")]
    correct_answer: CorrectKey,
    explanation: String,
}

/// Scenario questions name the correct option by letter, or occasionally by position.
#[derive(Deserialize)]
#[serde(untagged)]
enum CorrectKey {
    Key(String),
    Index(usize),
}

impl ResponseSchema {
    pub fn parse(&self, body: Value) -> Result<QuestionSet, SchemaError> {
        let set = match self {
            ResponseSchema::SingleWithTip => {
                let body: SingleQuestionBody = from_value(body)?;
                QuestionSet::new(None, vec![single_question(body)])
            }
            ResponseSchema::ScenarioQuestions => {
                let body: ScenarioBody = from_value(body)?;
                let questions = body
                    .interactive_questions
                    .into_iter()
                    .map(scenario_question)
                    .collect();
                QuestionSet::new(body.scenario, questions)
            }
        };
        validate(&set)?;
        Ok(set)
    }
}

fn from_value<T: serde::de::DeserializeOwned>(body: Value) -> Result<T, SchemaError> {
    serde_json::from_value(body).map_err(|e| SchemaError::Malformed(e.to_string()))
}

fn single_question(body: SingleQuestionBody) -> Question {
    let options = body
        .options
        .into_iter()
        .enumerate()
        .map(|(i, text)| QuizOption::new(i.to_string(), text))
        .collect();
    Question::new(
        body.question,
        options,
        body.correct_answer_index.to_string(),
        Explanation::PerOption {
            by_option: body.explanations.into_iter().collect(),
            exam_tip: body.exam_tip,
        },
    )
}

fn scenario_question(body: ScenarioQuestionBody) -> Question {
    let options: Vec<QuizOption> = body
        .options
        .into_iter()
        .map(|(key, text)| QuizOption::new(key, text))
        .collect();
    let correct = match body.correct_answer {
        CorrectKey::Key(key) => key.trim().to_string(),
        CorrectKey::Index(i) => options
            .get(i)
            .map(|o| o.id.clone())
            .unwrap_or_else(|| i.to_string()),
    };
    Question::new(
        body.question,
        options,
        correct,
        Explanation::Shared(body.explanation),
    )
}

fn validate(set: &QuestionSet) -> Result<(), SchemaError> {
    if set.questions.is_empty() {
        return Err(SchemaError::NoQuestions);
    }
    for (i, q) in set.questions.iter().enumerate() {
        if q.option(&q.correct).is_none() {
            return Err(SchemaError::UnknownCorrectOption {
                question: i,
                correct: q.correct.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_single_question_with_tip() {
        let body = json!({
            "question": "Who owns residual risk?",
            "options": ["Auditor", "CISO", "Asset owner", "Regulator"],
            "correct_answer_index": 2,
            "explanations": {"0": "no", "1": "no", "2": "yes", "3": "no"},
            "exam_tip": "Owners own risk"
        });
        let set = ResponseSchema::SingleWithTip.parse(body).unwrap();
        assert_eq!(set.context, None);
        let q = &set.questions[0];
        assert_eq!(q.options.len(), 4);
        assert_eq!(q.correct, "2");
        assert_eq!(q.option("2").unwrap().text, "Asset owner");
        assert_eq!(q.explanation.for_option("1"), "no");
        assert_eq!(q.explanation.exam_tip(), Some("Owners own risk"));
    }

    #[test]
    fn parses_scenario_questions() {
        let body = json!({
            "scenario": "A hospital is hit by ransomware.",
            "interactive_questions": [
                {
                    "question": "First action?",
                    "options": {"B": "Pay", "A": "Isolate hosts", "C": "Ignore", "D": "Reboot"},
                    "correct_answer": "A",
                    "explanation": "Contain first."
                },
                {
                    "question": "Who to notify?",
                    "options": {"A": "Nobody", "B": "Regulator", "C": "Press", "D": "Attacker"},
                    "correct_answer_index": 1,
                    "explanation": "Breach notification rules apply."
                }
            ]
        });
        let set = ResponseSchema::ScenarioQuestions.parse(body).unwrap();
        assert_eq!(set.context.as_deref(), Some("A hospital is hit by ransomware."));
        assert_eq!(set.questions.len(), 2);
        let ids: Vec<_> = set.questions[0].options.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, ["A", "B", "C", "D"]);
        assert_eq!(set.questions[1].correct, "B");
        assert_eq!(set.questions[1].explanation.for_option("D"), "Breach notification rules apply.");
    }

    #[test]
    fn missing_fields_are_malformed() {
        let err = ResponseSchema::SingleWithTip
            .parse(json!({"question": "q", "options": ["a"]}))
            .unwrap_err();
        assert!(matches!(err, SchemaError::Malformed(_)));
    }

    #[test]
    fn correct_option_must_exist() {
        let body = json!({
            "question": "q",
            "options": ["a", "b"],
            "correct_answer_index": 5,
        });
        assert_eq!(
            ResponseSchema::SingleWithTip.parse(body),
            Err(SchemaError::UnknownCorrectOption { question: 0, correct: "5".to_string() })
        );
    }

    #[test]
    fn empty_scenario_is_rejected() {
        let body = json!({"scenario": "text", "interactive_questions": []});
        assert_eq!(
            ResponseSchema::ScenarioQuestions.parse(body),
            Err(SchemaError::NoQuestions)
        );
    }
}
