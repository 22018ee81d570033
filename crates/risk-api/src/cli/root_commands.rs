use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP reporting API.
    Serve(ServeArgs),
    /// Print a single report to stdout.
    Report {
        #[command(subcommand)]
        report: ReportCommands,
    },
}

#[derive(Clone, Debug, Args)]
pub struct ServeArgs {
    /// Override `server.host`.
    #[arg(long)]
    pub host: Option<String>,

    /// Override `server.port`.
    #[arg(long)]
    pub port: Option<u16>,
}

#[derive(Clone, Debug, Subcommand)]
pub enum ReportCommands {
    /// Risk counts per country.
    ByCountry,
    /// Likelihood × impact heatmap.
    Heatmap,
    /// Dashboard headline counts.
    Dashboard,
    /// One risk with its controls, action plans and comments.
    Risk {
        /// Risk id.
        id: i64,
    },
}
