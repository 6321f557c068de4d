use std::path::PathBuf;

use arbcheck::CheckConfig;
use clap::{Parser, ValueEnum};

#[derive(Clone, Debug, Parser)]
#[command(name = "arbcheck", version = env!("CARGO_PKG_VERSION"), about, long_about = None)]
pub struct App {
    /// Recovery ROM (.zip), fastboot ROM (.tgz), flashing script (.sh/.bat) or XBL image
    pub file: PathBuf,

    /// Log verbosity, overridden by ARBCHECK_LOG
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Directory to create the temporary extraction directory in
    #[arg(long, value_name = "DIR")]
    pub scratch_dir: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

impl App {
    pub fn config(&self) -> CheckConfig {
        let config = CheckConfig::new(&self.file);
        match &self.scratch_dir {
            Some(dir) => config.scratch_root(dir),
            None => config,
        }
    }
}
