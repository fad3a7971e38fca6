//! Logging setup from an explicitly constructed configuration value.
//!
//! Rather than mutating a process-wide logger in place, callers build a
//! [`LoggingConfig`] (typically from the resolved `logging` config section
//! plus CLI flags) and call [`LoggingConfig::init`] exactly once. A second
//! init fails because the global subscriber is already set; nothing here
//! reconfigures logging after that point.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Where log output goes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogOutput {
    /// No logging at all.
    Off,
    Stdout,
    #[default]
    Stderr,
    /// Append to a file (no ANSI colors).
    File(PathBuf),
}

impl LogOutput {
    /// Parse the CLI convention: `0`/`off`, `1`/`stdout`, `2`/`stderr`, or a
    /// filename.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "0" | "off" => LogOutput::Off,
            "1" | "stdout" => LogOutput::Stdout,
            "2" | "stderr" => LogOutput::Stderr,
            filename => LogOutput::File(PathBuf::from(filename)),
        }
    }
}

/// An owned logging configuration, built once at startup.
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    pub level: Option<Level>,
    pub output: LogOutput,
}

impl LoggingConfig {
    pub fn new(level: Level, output: LogOutput) -> Self {
        Self {
            level: Some(level),
            output,
        }
    }

    /// Build from a `logging` config section value (e.g. `INFO`), falling
    /// back to INFO when the level string is absent or unrecognized.
    pub fn from_level_str(level: Option<&str>, output: LogOutput) -> Self {
        let level = level
            .and_then(|s| Level::from_str(s).ok())
            .unwrap_or(Level::INFO);
        Self::new(level, output)
    }

    /// Install the global tracing subscriber. Errors if logging was already
    /// initialized or the log file cannot be opened.
    pub fn init(self) -> Result<()> {
        let level = self.level.unwrap_or(Level::INFO);
        match self.output {
            LogOutput::Off => Ok(()),
            LogOutput::Stdout => {
                let subscriber = FmtSubscriber::builder()
                    .with_max_level(level)
                    .with_writer(std::io::stdout)
                    .finish();
                tracing::subscriber::set_global_default(subscriber)
                    .context("logging already initialized")
            }
            LogOutput::Stderr => {
                let subscriber = FmtSubscriber::builder()
                    .with_max_level(level)
                    .with_writer(std::io::stderr)
                    .finish();
                tracing::subscriber::set_global_default(subscriber)
                    .context("logging already initialized")
            }
            LogOutput::File(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&path)
                    .with_context(|| format!("failed to open log file {}", path.display()))?;
                let subscriber = FmtSubscriber::builder()
                    .with_max_level(level)
                    .with_writer(file)
                    .with_ansi(false)
                    .finish();
                tracing::subscriber::set_global_default(subscriber)
                    .context("logging already initialized")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_parse() {
        assert_eq!(LogOutput::parse("0"), LogOutput::Off);
        assert_eq!(LogOutput::parse("off"), LogOutput::Off);
        assert_eq!(LogOutput::parse("stdout"), LogOutput::Stdout);
        assert_eq!(LogOutput::parse("2"), LogOutput::Stderr);
        assert_eq!(
            LogOutput::parse("server.log"),
            LogOutput::File(PathBuf::from("server.log"))
        );
    }

    #[test]
    fn test_level_from_config_section() {
        let config = LoggingConfig::from_level_str(Some("DEBUG"), LogOutput::Stderr);
        assert_eq!(config.level, Some(Level::DEBUG));

        let fallback = LoggingConfig::from_level_str(Some("verbose?"), LogOutput::Stderr);
        assert_eq!(fallback.level, Some(Level::INFO));

        let absent = LoggingConfig::from_level_str(None, LogOutput::Stderr);
        assert_eq!(absent.level, Some(Level::INFO));
    }
}
