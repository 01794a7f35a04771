//! Memory service clients
//!
//! The `MemoryClient` trait lives in the SDK; this module holds the
//! implementations the engine ships with.

pub mod openmemory;

pub use openmemory::OpenMemoryClient;
