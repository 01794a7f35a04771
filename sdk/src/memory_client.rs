//! Memory client trait and per-call errors
//!
//! This module defines the `MemoryClient` trait that every memory backend
//! implements. The engine only ever talks to a memory service through it, so
//! the session runner can be driven by the HTTP client in production and by an
//! in-process double in tests.

use async_trait::async_trait;

use crate::types::{AddOptions, MemoryMessage, SearchOptions, SearchResults};

/// Result type for memory operations
pub type Result<T> = std::result::Result<T, MemoryError>;

/// Errors that can occur during a single memory call
#[derive(Debug, thiserror::Error)]
pub enum MemoryError {
    #[error("Cannot connect to memory service: {0}")]
    Connection(String),

    #[error("Memory service timed out")]
    Timeout,

    #[error("Memory service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode memory service response: {0}")]
    Decode(String),

    #[error("Request failed: {0}")]
    Request(String),
}

/// Memory client trait that all backends must implement
#[async_trait]
pub trait MemoryClient: Send + Sync {
    /// Returns the name of the backend (e.g., "openmemory")
    fn name(&self) -> &str;

    /// Search stored memories relevant to `query`
    ///
    /// # Arguments
    /// * `query` - Free-text query
    /// * `options` - Subject identifier and result bound
    async fn search(&self, query: &str, options: &SearchOptions) -> Result<SearchResults>;

    /// Record an interaction as memory
    ///
    /// Returns the service's acknowledgement unmodified.
    async fn add(
        &self,
        messages: &[MemoryMessage],
        options: &AddOptions,
    ) -> Result<serde_json::Value>;

    /// Push the client's bound generation settings to the service.
    ///
    /// Default implementation does nothing and acknowledges with `null`.
    async fn configure(&self) -> Result<serde_json::Value> {
        Ok(serde_json::Value::Null)
    }
}

/// Outcome of the startup capability check for a memory client
pub enum ClientAvailability {
    /// A client ready to use; no network I/O has happened yet
    Loaded(Box<dyn MemoryClient>),

    /// The client cannot be instantiated; the reason is user-facing
    Unavailable(String),
}

impl ClientAvailability {
    /// True when a client was loaded
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }
}

impl std::fmt::Debug for ClientAvailability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loaded(client) => f.debug_tuple("Loaded").field(&client.name()).finish(),
            Self::Unavailable(reason) => f.debug_tuple("Unavailable").field(reason).finish(),
        }
    }
}
