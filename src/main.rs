use colored::Colorize;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use unixbench_runner::cli;

#[tokio::main]
async fn main() -> ExitCode {
    // Diagnostics go to stderr; stdout carries the benchmark echo and summary.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red(), e);
            ExitCode::FAILURE
        }
    }
}
