//! Runtime configuration shared by every connector binary.
//!
//! These settings only shape diagnostics on stderr; nothing here changes the
//! protocol output on stdout. Each value can come from a global flag or an
//! environment variable, with the flag taking precedence.

use clap::Args;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Default tracing filter directive.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Supported diagnostic output formats.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// Structured JSON suitable for ingestion by logging stacks.
    #[default]
    Json,
    /// Human-readable single line output.
    Compact,
}

/// Errors encountered while parsing a [`LogFormat`] from text.
pub type LogFormatParseError = strum::ParseError;

/// Diagnostic settings accepted by every connector binary.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct RuntimeConfig {
    /// Tracing filter directive for stderr diagnostics.
    #[arg(
        long,
        global = true,
        env = "TRIBUTARY_LOG_FILTER",
        default_value = DEFAULT_LOG_FILTER
    )]
    log_filter: String,

    /// Format of stderr diagnostics: json or compact.
    #[arg(
        long,
        global = true,
        env = "TRIBUTARY_LOG_FORMAT",
        default_value_t = LogFormat::Json
    )]
    log_format: LogFormat,
}

impl RuntimeConfig {
    /// Builds a configuration from explicit values.
    #[must_use]
    pub fn new(log_filter: impl Into<String>, log_format: LogFormat) -> Self {
        Self {
            log_filter: log_filter.into(),
            log_format,
        }
    }

    /// Returns the tracing filter directive.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Returns the diagnostic output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_FILTER, LogFormat::default())
    }
}
