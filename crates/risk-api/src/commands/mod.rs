pub mod report;
pub mod serve;

use risk_config::RiskConfig;

use crate::cli::{Commands, GlobalFlags};

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, config: RiskConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Serve(args) => serve::handle(&args, config).await,
        Commands::Report { report } => report::handle(&report, &config, flags).await,
    }
}
