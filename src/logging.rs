//! File-backed log output.
//!
//! Log lines are appended to a file, one per event, with a timestamp and
//! level. Earlier content is never truncated.
//!
//! ```no_run
//! use tdameritrade_rs::logging::{self, LogConfig};
//!
//! # fn example() -> tdameritrade_rs::Result<()> {
//! logging::init(&LogConfig::default().with_stdout(true))?;
//! tracing::info!("ready");
//! # Ok(())
//! # }
//! ```

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::EnvFilter;

use crate::{Error, Result};

/// Log file used when none is configured.
pub const DEFAULT_LOG_FILE: &str = "trading_bot.log";

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "tdameritrade_rs=info,td_trader=info";

/// Where and what to log.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// File that log lines are appended to
    pub path: PathBuf,
    /// Filter directives, overridden by `RUST_LOG`
    pub filter: String,
    /// Also write every line to stdout
    pub stdout: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_LOG_FILE),
            filter: DEFAULT_FILTER.to_string(),
            stdout: false,
        }
    }
}

impl LogConfig {
    /// Log to `path` with the default filter.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Set the fallback filter directives.
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    /// Tee log lines to stdout.
    pub fn with_stdout(mut self, stdout: bool) -> Self {
        self.stdout = stdout;
        self
    }
}

/// Install the global subscriber.
///
/// # Errors
///
/// Fails if the log file cannot be opened, the filter does not parse, or
/// a global subscriber is already installed.
pub fn init(config: &LogConfig) -> Result<()> {
    let file = open_log_file(&config.path)?;
    let filter = build_filter(&config.filter)?;

    let writer = if config.stdout {
        BoxMakeWriter::new(Mutex::new(file).and(std::io::stdout))
    } else {
        BoxMakeWriter::new(Mutex::new(file))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| Error::Config(format!("failed to install log subscriber: {}", e)))
}

/// Open `path` for appending, creating it if needed.
pub fn open_log_file(path: &Path) -> Result<File> {
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}

fn build_filter(fallback: &str) -> Result<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .map_err(|e| Error::Config(format!("invalid log filter: {}", e)))
}
