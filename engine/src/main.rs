// Memprobe
// Main entry point for the memprobe binary

use std::process::ExitCode;

use clap::Parser;
use memprobe_engine::cli::Cli;
use memprobe_engine::config::RunConfiguration;
use memprobe_engine::handlers::execute;
use memprobe_engine::memory::OpenMemoryClient;
use memprobe_engine::probe::ReadinessProber;
use memprobe_engine::telemetry::{init_telemetry, init_telemetry_with_level};

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = Cli::parse();

    // A missing .env file is fine; variables may come from the shell
    let env_file = dotenv::dotenv();

    match &cli.log {
        Some(level) => init_telemetry_with_level(level),
        None => init_telemetry(),
    }

    tracing::info!("Memprobe v{}", env!("CARGO_PKG_VERSION"));

    match env_file {
        Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
        Err(e) => tracing::debug!("No .env file loaded: {}", e),
    }

    let config = RunConfiguration::resolve();
    let availability = OpenMemoryClient::load(&config);

    let code = execute(
        config,
        cli.run_options(),
        ReadinessProber::default(),
        availability,
    )
    .await;
    ExitCode::from(code)
}
