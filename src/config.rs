use std::fmt;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:5000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_base: String,
    pub request_timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidTimeout(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTimeout(raw) => write!(
                f,
                "CYBERQUIZ_TIMEOUT_SECS must be a positive number of seconds, got {:?}",
                raw
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_base = var("CYBERQUIZ_API_BASE")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let request_timeout = match var("CYBERQUIZ_TIMEOUT_SECS") {
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(ConfigError::InvalidTimeout(raw)),
            },
        };

        Ok(Self {
            api_base,
            request_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = Config::from_vars(vars(&[])).unwrap();
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.request_timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_vars(vars(&[
            ("CYBERQUIZ_API_BASE", "https://quiz.example/api"),
            ("CYBERQUIZ_TIMEOUT_SECS", "15"),
        ]))
        .unwrap();
        assert_eq!(config.api_base, "https://quiz.example/api");
        assert_eq!(config.request_timeout, Duration::from_secs(15));
    }

    #[test]
    fn rejects_bad_timeout() {
        for raw in ["0", "soon", "-3"] {
            assert_eq!(
                Config::from_vars(vars(&[("CYBERQUIZ_TIMEOUT_SECS", raw)])),
                Err(ConfigError::InvalidTimeout(raw.to_string()))
            );
        }
    }
}
