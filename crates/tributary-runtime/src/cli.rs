//! Command-line surface of connector binaries.
//!
//! Verbs are subcommands. Source binaries accept `spec`, `check`, `discover`
//! and `read`; destination binaries accept `spec`, `check` and `write`. Any
//! other verb is a usage error.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use strum::Display;

use crate::config::RuntimeConfig;

/// The protocol verbs, used to label diagnostics and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Verb {
    /// Describe the connector's configuration.
    Spec,
    /// Validate a configuration.
    Check,
    /// List available streams.
    Discover,
    /// Extract records.
    Read,
    /// Load records.
    Write,
}

/// Command line of a source connector.
#[derive(Parser, Debug)]
#[command(version, about = "Data source connector", disable_help_subcommand = true)]
pub struct SourceCli {
    /// Diagnostic settings.
    #[command(flatten)]
    pub runtime: RuntimeConfig,
    /// The verb to execute.
    #[command(subcommand)]
    pub command: SourceCommand,
}

/// Verbs understood by a source connector.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum SourceCommand {
    /// Prints the connector configuration schema.
    Spec,
    /// Validates the given configuration.
    Check {
        /// Configuration file.
        #[arg(long)]
        config: PathBuf,
    },
    /// Lists the available streams.
    Discover {
        /// Configuration file.
        #[arg(long)]
        config: PathBuf,
    },
    /// Extracts records from the upstream system.
    Read {
        /// Configuration file.
        #[arg(long)]
        config: PathBuf,
        /// Configured catalog file.
        #[arg(long)]
        catalog: PathBuf,
        /// State file from the previous sync.
        #[arg(long)]
        state: PathBuf,
    },
}

impl SourceCommand {
    /// Returns the verb this command executes.
    #[must_use]
    pub const fn verb(&self) -> Verb {
        match self {
            Self::Spec => Verb::Spec,
            Self::Check { .. } => Verb::Check,
            Self::Discover { .. } => Verb::Discover,
            Self::Read { .. } => Verb::Read,
        }
    }
}

/// Command line of a destination connector.
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Data destination connector",
    disable_help_subcommand = true
)]
pub struct DestinationCli {
    /// Diagnostic settings.
    #[command(flatten)]
    pub runtime: RuntimeConfig,
    /// The verb to execute.
    #[command(subcommand)]
    pub command: DestinationCommand,
}

/// Verbs understood by a destination connector.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum DestinationCommand {
    /// Prints the connector configuration schema.
    Spec,
    /// Validates the given configuration.
    Check {
        /// Configuration file.
        #[arg(long)]
        config: PathBuf,
    },
    /// Loads records into the downstream system.
    Write {
        /// Configuration file.
        #[arg(long)]
        config: PathBuf,
        /// Configured catalog file.
        #[arg(long)]
        catalog: PathBuf,
    },
}

impl DestinationCommand {
    /// Returns the verb this command executes.
    #[must_use]
    pub const fn verb(&self) -> Verb {
        match self {
            Self::Spec => Verb::Spec,
            Self::Check { .. } => Verb::Check,
            Self::Write { .. } => Verb::Write,
        }
    }
}
