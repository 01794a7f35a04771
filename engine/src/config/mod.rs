//! Configuration management
//!
//! This module resolves the run configuration from environment variables.
//! A `.env` file in the working directory is loaded by the binary before
//! resolution; real environment variables take precedence over it.
//!
//! # Variables
//!
//! | Variable | Default |
//! |---|---|
//! | `OPENMEMORY_URL` | `http://localhost:8765` |
//! | `OLLAMA_URL` | `http://localhost:11434` |
//! | `OLLAMA_MODEL` | `mixtral:8x7b` |
//! | `LLM_TEMPERATURE` | `0.1` |
//! | `LLM_MAX_TOKENS` | `512` |
//!
//! Absent and empty values both take the default. Numeric values are parsed
//! leniently and never rejected: an unparsable temperature becomes `NaN` and
//! an unparsable token count becomes `None`. Both reach the memory service
//! as-is.
//!
//! # Examples
//!
//! ```
//! use memprobe_engine::config::RunConfiguration;
//!
//! let config = RunConfiguration::resolve_with(|_| None);
//! assert_eq!(config.memory_service_url, "http://localhost:8765");
//! assert_eq!(config.max_tokens, Some(512));
//! ```

use serde::{Deserialize, Serialize};

pub const OPENMEMORY_URL: &str = "OPENMEMORY_URL";
pub const OLLAMA_URL: &str = "OLLAMA_URL";
pub const OLLAMA_MODEL: &str = "OLLAMA_MODEL";
pub const LLM_TEMPERATURE: &str = "LLM_TEMPERATURE";
pub const LLM_MAX_TOKENS: &str = "LLM_MAX_TOKENS";

const DEFAULT_MEMORY_SERVICE_URL: &str = "http://localhost:8765";
const DEFAULT_LLM_SERVICE_URL: &str = "http://localhost:11434";
const DEFAULT_MODEL: &str = "mixtral:8x7b";
const DEFAULT_TEMPERATURE: &str = "0.1";
const DEFAULT_MAX_TOKENS: &str = "512";

/// Connection and generation parameters for one run
///
/// Created once at startup and passed by reference from then on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfiguration {
    /// Base URL of the OpenMemory server
    pub memory_service_url: String,

    /// Base URL of the Ollama runtime
    pub llm_service_url: String,

    /// Model name handed to the memory service's LLM
    pub model_name: String,

    /// Sampling temperature; `NaN` when the input did not parse
    pub temperature: f64,

    /// Generation bound; `None` when the input did not parse
    pub max_tokens: Option<i64>,
}

impl RunConfiguration {
    /// Resolve from the process environment
    pub fn resolve() -> Self {
        Self::resolve_with(|key| std::env::var(key).ok())
    }

    /// Resolve using `lookup` as the environment
    pub fn resolve_with<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| -> String {
            match lookup(key) {
                Some(value) if !value.is_empty() => value,
                _ => default.to_string(),
            }
        };

        let config = Self {
            memory_service_url: get(OPENMEMORY_URL, DEFAULT_MEMORY_SERVICE_URL),
            llm_service_url: get(OLLAMA_URL, DEFAULT_LLM_SERVICE_URL),
            model_name: get(OLLAMA_MODEL, DEFAULT_MODEL),
            temperature: parse_float_prefix(&get(LLM_TEMPERATURE, DEFAULT_TEMPERATURE)),
            max_tokens: parse_int_prefix(&get(LLM_MAX_TOKENS, DEFAULT_MAX_TOKENS)),
        };

        tracing::debug!(?config, "Resolved run configuration");
        config
    }

    /// Human-readable configuration banner
    pub fn summary(&self) -> String {
        let max_tokens = match self.max_tokens {
            Some(n) => n.to_string(),
            None => "NaN".to_string(),
        };
        format!(
            "--- Configuration ---\n\
             OPENMEMORY_URL: {}\n\
             OLLAMA_URL: {}\n\
             OLLAMA_MODEL: {}\n\
             LLM_TEMPERATURE: {}\n\
             LLM_MAX_TOKENS: {}\n\
             --------------------",
            self.memory_service_url,
            self.llm_service_url,
            self.model_name,
            self.temperature,
            max_tokens
        )
    }
}

impl Default for RunConfiguration {
    fn default() -> Self {
        Self::resolve_with(|_| None)
    }
}

/// Parse the longest leading decimal number, `NaN` if there is none.
///
/// Accepts leading whitespace, an optional sign, digits with an optional
/// fraction and an optional exponent. Trailing garbage is ignored.
pub fn parse_float_prefix(input: &str) -> f64 {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if digits > 0 || frac_end > frac_start {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }
    if digits == 0 {
        return f64::NAN;
    }

    // Exponent only counts when it has at least one digit
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}

/// Parse the leading base-10 integer, `None` if there is none.
pub fn parse_int_prefix(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }

    s[..end].parse().ok()
}
