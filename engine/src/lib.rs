//! Memprobe Engine Library
//!
//! This library provides the core functionality of the memprobe run.
//! It is used by both the main binary and integration tests.

/// Configuration management module
pub mod config;

/// Readiness probing and gating module
pub mod probe;

/// Memory service client implementations
pub mod memory;

/// Scripted memory session module
pub mod session;

/// Telemetry and Observability
pub mod telemetry;

/// CLI interface module
pub mod cli;

/// Command handlers module
pub mod handlers;
