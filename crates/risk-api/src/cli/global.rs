use clap::ValueEnum;

/// Output mode for one-shot report commands.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Raw,
}

/// Global flags that command handlers read. Log level flags are consumed
/// by tracing setup in `main`.
#[derive(Clone, Debug)]
pub struct GlobalFlags {
    pub format: OutputFormat,
    pub config: Option<std::path::PathBuf>,
}
