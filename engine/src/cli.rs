//! CLI interface for memprobe
//!
//! This module provides the command-line interface using clap's derive API.
//! Connection settings come from the environment; the flags only shape the
//! scripted session and the output.

use clap::Parser;

use crate::handlers::{OutputFormat, RunOptions};
use crate::session::{SessionScript, DEFAULT_LIMIT, DEFAULT_QUERY, DEFAULT_REPLY, DEFAULT_USER_ID};

/// Memprobe
///
/// Checks that a local Ollama runtime and an OpenMemory server are reachable,
/// then searches and records a memory through the OpenMemory API.
#[derive(Parser, Debug)]
#[command(name = "memprobe")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Print the configuration banner as JSON
    #[arg(long)]
    pub json: bool,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL")]
    pub log: Option<String>,

    /// Subject identifier the memories are scoped to
    #[arg(long, value_name = "ID", default_value = DEFAULT_USER_ID)]
    pub user_id: String,

    /// Query to search for and then record
    #[arg(long, value_name = "TEXT", default_value = DEFAULT_QUERY)]
    pub query: String,

    /// Maximum number of search matches
    #[arg(long, value_name = "N", default_value_t = DEFAULT_LIMIT)]
    pub limit: usize,

    /// Push the LLM configuration to the memory server before the session
    #[arg(long)]
    pub configure: bool,
}

impl Cli {
    /// Run options described by these flags
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            format: if self.json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            },
            script: SessionScript {
                user_id: self.user_id.clone(),
                query: self.query.clone(),
                reply: DEFAULT_REPLY.to_string(),
                limit: self.limit,
                push_config: self.configure,
            },
        }
    }
}
