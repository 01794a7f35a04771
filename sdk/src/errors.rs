//! Error types and handling
//!
//! This module provides the run-level error taxonomy of the memprobe engine.
//! Every error implements the `ErrorExt` trait which provides a user-friendly
//! remediation hint. Every class ends the run; nothing is retried.
//!
//! # Error Categories
//!
//! - **Unreachable**: a dependent service failed its readiness probe
//! - **ClientUnavailable**: the memory client could not be instantiated
//! - **MemoryOperation**: search or add failed after the gate passed
//!
//! # Examples
//!
//! ```
//! use sdk::errors::{EngineError, ErrorExt};
//!
//! let error = EngineError::Unreachable(vec!["Ollama".to_string()]);
//! assert_eq!(
//!     error.user_hint(),
//!     "Please ensure all services are running before proceeding."
//! );
//! ```

use thiserror::Error;

/// Trait for engine error extensions
///
/// Provides the remediation message printed under a failure.
pub trait ErrorExt {
    /// Returns a user-friendly hint for the error
    ///
    /// The hint is a static string and never embeds the underlying message.
    fn user_hint(&self) -> &str;
}

/// Main engine error type
#[derive(Debug, Error)]
pub enum EngineError {
    // Readiness gate
    #[error("Unreachable services: {}", .0.join(", "))]
    Unreachable(Vec<String>),

    // Capability check
    #[error("Memory client unavailable: {0}")]
    ClientUnavailable(String),

    // Search and add share one class on purpose; the step is not reported
    #[error("An error occurred during memory operations: {0}")]
    MemoryOperation(String),
}

impl ErrorExt for EngineError {
    fn user_hint(&self) -> &str {
        match self {
            Self::Unreachable(_) => "Please ensure all services are running before proceeding.",
            Self::ClientUnavailable(_) => {
                "Check OPENMEMORY_URL: the memory client needs an absolute http(s) URL."
            }
            Self::MemoryOperation(_) => {
                "Please check your OpenMemory server and network connection."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreachable_lists_every_service() {
        let err = EngineError::Unreachable(vec!["Ollama".to_string(), "OpenMemory".to_string()]);
        assert_eq!(err.to_string(), "Unreachable services: Ollama, OpenMemory");
    }

    #[test]
    fn test_memory_operation_message_is_step_agnostic() {
        let err = EngineError::MemoryOperation("HTTP 401 Unauthorized".to_string());
        assert_eq!(
            err.to_string(),
            "An error occurred during memory operations: HTTP 401 Unauthorized"
        );
        assert!(err.user_hint().contains("OpenMemory"));
    }

    #[test]
    fn test_client_unavailable_hint_names_the_variable() {
        let err = EngineError::ClientUnavailable("relative URL without a base".to_string());
        assert_eq!(
            err.to_string(),
            "Memory client unavailable: relative URL without a base"
        );
        assert!(err.user_hint().contains("OPENMEMORY_URL"));
    }
}
