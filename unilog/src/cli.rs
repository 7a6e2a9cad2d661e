//! This file defines the command-line interface (CLI) for the unilog application.
//! License: MIT OR Apache-2.0

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use unilog_core::DEFAULT_CONFIG_FILE_NAME;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "unilog",
    version = env!("CARGO_PKG_VERSION"),
    about = "Strip noise from Unity build logs and collapse repetitive sections into summaries",
    long_about = "unilog reads a Unity Editor or player log line by line, removes noise, drops whole blocks of irrelevant output and replaces long repetitive sections with compact summaries. The raw log can be kept in a secondary file so nothing is lost.",
)]
pub struct Cli {
    /// Path to the YAML parsing configuration.
    #[arg(
        long = "parse-config",
        short = 'c',
        alias = "parseConfig",
        value_name = "FILE",
        env = "UNILOG_CONFIG",
        default_value = DEFAULT_CONFIG_FILE_NAME,
        help = "Path to the YAML parsing configuration. The built-in configuration is used if the file does not exist."
    )]
    pub parse_config: PathBuf,

    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read the log from a specified file instead of stdin.")]
    pub input: Option<PathBuf>,

    /// Secondary sink for whichever stream does not go to stdout.
    #[arg(
        long = "secondary-log-file",
        short = 's',
        alias = "secondaryLogFile",
        value_name = "FILE",
        help = "Path to the secondary log file. Receives the unparsed input by default, or the parsed output with --print-unparsed."
    )]
    pub secondary_log_file: Option<PathBuf>,

    /// Swap the sinks: raw input to stdout, parsed output to the secondary file.
    #[arg(
        long = "print-unparsed",
        short = 'u',
        alias = "printUnparsed",
        help = "Print the unparsed input to stdout. Parsed output goes to --secondary-log-file, if present."
    )]
    pub print_unparsed: bool,

    /// Print the built-in configuration and exit.
    #[arg(
        long = "print-default-config",
        alias = "printDefaultConfig",
        help = "Print the built-in configuration to stdout and exit without reading input."
    )]
    pub print_default_config: bool,

    /// Output format for --print-default-config.
    #[arg(long = "format", value_enum, default_value = "yaml", help = "Format used by --print-default-config.")]
    pub format: ConfigFormat,

    /// Write the built-in configuration to a file and exit.
    #[arg(
        long = "write-default-config",
        value_name = "FILE",
        conflicts_with = "print_default_config",
        help = "Write the built-in configuration to FILE (JSON for a .json extension, YAML otherwise) and exit."
    )]
    pub write_default_config: Option<PathBuf>,

    /// Disable informational messages
    #[arg(long, short = 'q', help = "Suppress all diagnostic messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', conflicts_with = "quiet", help = "Enable debug logging.")]
    pub debug: bool,
}

/// Serialization format for printed configurations.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
}
