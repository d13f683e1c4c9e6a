//! One page's worth of quiz interaction: form values, suggestion panels,
//! the generation in flight and the answers given to the current set.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, warn};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::autocomplete::{Autocomplete, Key};
use crate::clipboard::Clipboard;
use crate::coordinator::{Completion, GenerationCoordinator, Status, Ticket};
use crate::generator::{GenerationFailed, GenerationParameters, Generator, ParamValue};
use crate::page::{FieldDomain, PageSpec};
use crate::quiz::{Feedback, GradeError, QuizRun};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    UnknownField(String),
    Required { label: &'static str },
    NotAChoice { label: &'static str, value: String },
    OutOfRange { label: &'static str, value: i64, min: i64, max: i64 },
    WrongType { label: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::UnknownField(name) => write!(f, "unknown field {:?}", name),
            ValidationError::Required { label } => write!(f, "Please enter the {}.", label),
            ValidationError::NotAChoice { label, value } => {
                write!(f, "{:?} is not a valid {}.", value, label)
            }
            ValidationError::OutOfRange { label, value, min, max } => {
                write!(f, "{} must be between {} and {} (got {}).", label, min, max, value)
            }
            ValidationError::WrongType { label } => write!(f, "{} has the wrong kind of value.", label),
        }
    }
}

impl std::error::Error for ValidationError {}

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone)]
pub struct Session {
    id: u64,
    page: &'static PageSpec,
    params: GenerationParameters,
    suggestions: BTreeMap<&'static str, Autocomplete>,
    coordinator: GenerationCoordinator,
}

impl Session {
    pub fn new(page: &'static PageSpec) -> Self {
        let mut params = GenerationParameters::new();
        let mut suggestions = BTreeMap::new();
        for field in page.fields {
            params.set(field.name, field.default.value());
            if let FieldDomain::FreeText {
                suggestions: Some(vocabulary),
            } = field.domain
            {
                suggestions.insert(field.name, Autocomplete::new(vocabulary));
            }
        }
        Self {
            id: NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed),
            page,
            params,
            suggestions,
            coordinator: GenerationCoordinator::new(),
        }
    }

    /// Distinguishes sessions opened on the same page one after another.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn page(&self) -> &'static PageSpec {
        self.page
    }

    pub fn params(&self) -> &GenerationParameters {
        &self.params
    }

    pub fn set_field(&mut self, name: &str, value: ParamValue) -> Result<(), ValidationError> {
        let field = self
            .page
            .field(name)
            .ok_or_else(|| ValidationError::UnknownField(name.to_string()))?;
        match (field.domain, &value) {
            (FieldDomain::Choice(choices), ParamValue::Text(text)) => {
                if !choices.iter().any(|c| *c == text.as_str()) {
                    return Err(ValidationError::NotAChoice {
                        label: field.label,
                        value: text.clone(),
                    });
                }
            }
            (FieldDomain::FreeText { .. }, ParamValue::Text(_)) => {}
            (FieldDomain::Range { min, max }, ParamValue::Int(n)) => {
                if *n < min || *n > max {
                    return Err(ValidationError::OutOfRange {
                        label: field.label,
                        value: *n,
                        min,
                        max,
                    });
                }
            }
            _ => return Err(ValidationError::WrongType { label: field.label }),
        }
        self.params.set(field.name, value);
        Ok(())
    }

    /// A keystroke in a free-text field; recomputes its suggestions.
    pub fn type_text(&mut self, name: &str, text: &str) -> Result<(), ValidationError> {
        self.set_field(name, ParamValue::Text(text.to_string()))?;
        if let Some(ac) = self.suggestions.get_mut(name) {
            ac.input(text);
        }
        Ok(())
    }

    pub fn suggestions(&self, name: &str) -> Option<&Autocomplete> {
        self.suggestions.get(name)
    }

    pub fn suggestion_key(&mut self, name: &str, key: Key) -> Option<String> {
        let committed = self.suggestions.get_mut(name)?.key(key)?;
        self.commit(name, &committed);
        Some(committed)
    }

    pub fn click_suggestion(&mut self, name: &str, text: &str) -> Option<String> {
        let committed = self.suggestions.get_mut(name)?.click_text(text)?;
        self.commit(name, &committed);
        Some(committed)
    }

    pub fn show_all_suggestions(&mut self, name: &str) {
        if let Some(ac) = self.suggestions.get_mut(name) {
            ac.show_all();
        }
    }

    pub fn blur_suggestions(&mut self, name: &str) {
        if let Some(ac) = self.suggestions.get_mut(name) {
            ac.blur();
        }
    }

    pub fn focus_suggestions(&mut self, name: &str) {
        if let Some(ac) = self.suggestions.get_mut(name) {
            ac.focus();
        }
    }

    fn commit(&mut self, name: &str, value: &str) {
        debug!("{}: committed suggestion {:?}", self.page.title, value);
        self.params.set(name, ParamValue::Text(value.to_string()));
    }

    /// Free-text fields must hold something other than whitespace.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for field in self.page.fields {
            if let FieldDomain::FreeText { .. } = field.domain {
                let filled = self
                    .params
                    .get(field.name)
                    .and_then(ParamValue::as_text)
                    .map_or(false, |s| !s.trim().is_empty());
                if !filled {
                    return Err(ValidationError::Required { label: field.label });
                }
            }
        }
        Ok(())
    }

    /// Starts a generation. `Ok(None)` while one is already pending.
    pub fn trigger(&mut self) -> Result<Option<Ticket>, ValidationError> {
        if !self.coordinator.trigger_enabled() {
            return Ok(None);
        }
        self.validate()?;
        for ac in self.suggestions.values_mut() {
            ac.clear();
        }
        Ok(self.coordinator.begin(self.params.clone()))
    }

    /// Applies the generator's answer for `epoch`, parsing it with the page's schema.
    pub fn finish(&mut self, epoch: u64, result: Result<Value, GenerationFailed>) -> Completion {
        let parsed = result.and_then(|body| {
            self.page.schema.parse(body).map_err(|e| {
                warn!("{}: {}", self.page.title, e);
                GenerationFailed::new(None)
            })
        });
        self.coordinator.complete(epoch, parsed)
    }

    pub fn status(&self) -> &Status {
        self.coordinator.status()
    }

    pub fn epoch(&self) -> u64 {
        self.coordinator.epoch()
    }

    pub fn is_pending(&self) -> bool {
        self.coordinator.is_pending()
    }

    pub fn trigger_enabled(&self) -> bool {
        self.coordinator.trigger_enabled()
    }

    pub fn error(&self) -> Option<&GenerationFailed> {
        match self.coordinator.status() {
            Status::Failed(e) => Some(e),
            _ => None,
        }
    }

    pub fn run(&self) -> Option<&QuizRun> {
        self.coordinator.run()
    }

    pub fn answer(&mut self, index: usize, option: &str) -> Result<Feedback, GradeError> {
        match self.coordinator.run_mut() {
            Some(run) => run.select(index, option),
            None => Err(GradeError::NoSuchQuestion(index)),
        }
    }

    pub fn feedback(&self, index: usize) -> Option<Feedback> {
        self.run()?.feedback(index)
    }

    /// Copies the latest prompt and feedback. Failures are logged, never surfaced.
    pub fn copy_feedback(&self, clipboard: &mut dyn Clipboard) -> bool {
        let Some(text) = self.run().and_then(QuizRun::copy_text) else {
            return false;
        };
        match clipboard.write_text(&text) {
            Ok(()) => {
                debug!("copied feedback to clipboard");
                true
            }
            Err(e) => {
                warn!("{}", e);
                false
            }
        }
    }

    pub fn close(&mut self) {
        for ac in self.suggestions.values_mut() {
            ac.clear();
        }
        self.coordinator.close();
    }
}

/// Runs one generation for a shared session without holding the lock across
/// the network call. `Ok(None)` when the trigger was disabled.
pub async fn drive(
    session: &Mutex<Session>,
    generator: &dyn Generator,
) -> Result<Option<Completion>, ValidationError> {
    let (route, ticket) = {
        let mut s = session.lock().await;
        match s.trigger()? {
            Some(ticket) => (s.page().route, ticket),
            None => return Ok(None),
        }
    };
    let result = generator.generate(route, &ticket.params).await;
    let mut s = session.lock().await;
    Ok(Some(s.finish(ticket.epoch, result)))
}
