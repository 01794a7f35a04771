//! Memprobe SDK
//!
//! Shared library providing the memory-client seam, message types and the
//! run-level error taxonomy. The engine depends on it, and so does any
//! alternative memory client implementation.

/// Error types and handling
pub mod errors;

/// Memory client trait and per-call errors
pub mod memory_client;

/// Message and option types exchanged with a memory service
pub mod types;

// Re-export commonly used types
pub use errors::{EngineError, ErrorExt};
pub use memory_client::{ClientAvailability, MemoryClient, MemoryError};
pub use types::{AddOptions, MemoryMessage, MessageRole, SearchOptions, SearchResults};
