//! Command handlers
//!
//! Wires the configuration, the client capability check, the readiness gate
//! and the session runner into one run, and maps the result to an exit code.
//!
//! Stages run strictly in order and the first failure ends the run:
//! capability check, readiness gate, session.

use std::io::Write;

use anyhow::{Context, Result};
use sdk::errors::{EngineError, ErrorExt};
use sdk::memory_client::ClientAvailability;

use crate::config::RunConfiguration;
use crate::probe::{dependencies, ReadinessProber};
use crate::session::{RunResult, SessionRunner, SessionScript};

/// Output format for the configuration banner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for machine consumption
    Json,
}

/// Options for one run
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub format: OutputFormat,
    pub script: SessionScript,
}

/// Result of a complete run
#[derive(Debug)]
pub enum Outcome {
    /// Gate passed and every memory operation succeeded
    Success,

    /// The run halted; the error names the class
    Failed(EngineError),
}

impl Outcome {
    /// Process exit status: 0 on success, 1 otherwise
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Failed(_) => 1,
        }
    }
}

/// Run to completion behind a catch layer and return the process exit code.
///
/// The run executes on its own task so that a panic anywhere below (for
/// instance `println!` hitting a closed stdout) surfaces as a `JoinError`
/// and maps to exit code 1 instead of aborting with 101.
pub async fn execute(
    config: RunConfiguration,
    options: RunOptions,
    prober: ReadinessProber,
    availability: ClientAvailability,
) -> u8 {
    let task = tokio::spawn(async move {
        handle_run(&config, &options, &prober, availability).await
    });

    match task.await {
        Ok(Ok(outcome)) => outcome.exit_code(),
        Ok(Err(e)) => {
            eprintln!("\nAn unexpected error occurred: {:#}", e);
            1
        }
        Err(e) => {
            eprintln!("\nAn unexpected error occurred: {}", e);
            1
        }
    }
}

/// Execute the run
///
/// Expected failures are reported and returned as `Outcome::Failed`. A
/// failed banner write comes back as `Err`.
pub async fn handle_run(
    config: &RunConfiguration,
    options: &RunOptions,
    prober: &ReadinessProber,
    availability: ClientAvailability,
) -> Result<Outcome> {
    print_banner(&mut std::io::stdout(), config, options.format)?;

    tracing::debug!(loaded = availability.is_loaded(), "Memory client capability check");
    let client = match availability {
        ClientAvailability::Loaded(client) => client,
        ClientAvailability::Unavailable(reason) => {
            return Ok(fail(EngineError::ClientUnavailable(reason)));
        }
    };

    println!("\n--- Running Health Checks ---");
    let admission = match prober.admit(&dependencies(config)).await {
        Ok(admission) => admission,
        Err(e) => return Ok(fail(e)),
    };
    println!("---------------------------\n");

    println!("🚀 Initializing Memory client...");
    let runner = SessionRunner::new(options.script.clone());
    match runner.run(&admission, client.as_ref()).await {
        RunResult::Success => Ok(Outcome::Success),
        RunResult::Failure(e) => Ok(fail(e)),
    }
}

fn print_banner<W: Write>(
    out: &mut W,
    config: &RunConfiguration,
    format: OutputFormat,
) -> Result<()> {
    let banner = match format {
        OutputFormat::Text => config.summary(),
        OutputFormat::Json => {
            serde_json::to_string_pretty(config).context("Failed to serialize configuration")?
        }
    };
    writeln!(out, "{}", banner).context("Failed to write configuration banner")?;
    Ok(())
}

fn fail(error: EngineError) -> Outcome {
    tracing::debug!(error = %error, "Run failed");
    eprintln!("\n❌ {}", error);
    eprintln!("{}", error.user_hint());
    Outcome::Failed(error)
}
