use std::path::PathBuf;

use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::{Commands, ReportCommands, ServeArgs};

/// Top-level CLI parser for the `riskmgr` binary.
#[derive(Debug, Parser)]
#[command(name = "riskmgr", version, about = "Risk register reporting API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file to use instead of ./riskmgr.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            config: self.config.clone(),
        }
    }

    /// Log level used when `RISKMGR_LOG` is unset.
    ///
    /// `serve` runs until stopped and reports at `info`, so its bind address
    /// and request traces show up without extra flags.
    #[must_use]
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "debug"
        } else if matches!(self.command, Commands::Serve(_)) {
            "info"
        } else {
            "warn"
        }
    }
}
