pub mod http;

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

pub use http::HttpGenerator;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Text(String),
    Int(i64),
}

impl ParamValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParamValue::Text(s) => Some(s),
            ParamValue::Int(_) => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Text(s) => write!(f, "{}", s),
            ParamValue::Int(n) => write!(f, "{}", n),
        }
    }
}

/// Named form values sent as the JSON body of a generation request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GenerationParameters(BTreeMap<String, ParamValue>);

impl GenerationParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: ParamValue) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: &str, value: ParamValue) {
        self.0.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.0.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Every way a generation can go wrong, collapsed into one kind. The message
/// is the server's own `error` text when it sent one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationFailed {
    pub message: Option<String>,
}

impl GenerationFailed {
    pub fn new(message: Option<String>) -> Self {
        Self { message }
    }
}

impl fmt::Display for GenerationFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "generation failed: {}", message),
            None => write!(f, "generation failed"),
        }
    }
}

impl std::error::Error for GenerationFailed {}

/// Source of generated question bodies. `route` is the resource path under
/// the generator's base, e.g. `grc/generate_question`.
#[async_trait::async_trait]
pub trait Generator: Send + Sync {
    async fn generate(
        &self,
        route: &str,
        params: &GenerationParameters,
    ) -> Result<Value, GenerationFailed>;
}
