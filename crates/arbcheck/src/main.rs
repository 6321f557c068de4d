use std::io;
use std::process::ExitCode;

use anyhow::Context;
use arbcheck::run_check;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{App, LogLevel};

mod cli;

/// The scan ran to completion but found no ARB marker.
const EXIT_NOT_DETECTED: u8 = 3;

fn init_tracing(level: Option<LogLevel>) {
    let builder = tracing_subscriber::fmt().with_writer(io::stderr);
    match EnvFilter::builder()
        .with_env_var("ARBCHECK_LOG")
        .try_from_env()
    {
        Ok(filter) => builder.with_env_filter(filter).init(),
        Err(_) => builder
            .with_max_level(level.map(tracing::Level::from).unwrap_or(tracing::Level::WARN))
            .init(),
    }
}

fn main() -> ExitCode {
    let app = App::parse();
    init_tracing(app.log_level);

    let config = app.config();
    let mut stdout = io::stdout().lock();
    let result = run_check(&config, &mut stdout)
        .with_context(|| format!("failed to check '{}'", config.input.display()));

    match result {
        Ok(report) if report.index().is_some() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(EXIT_NOT_DETECTED),
        Err(why) => {
            eprintln!("error: {why:#}");
            ExitCode::FAILURE
        }
    }
}
