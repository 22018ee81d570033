use risk_config::RiskConfig;

use crate::bootstrap;
use crate::cli::{GlobalFlags, ReportCommands};
use crate::output::output;

/// Handle `riskmgr report <kind>`.
pub async fn handle(
    report: &ReportCommands,
    config: &RiskConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let service = bootstrap::open_service(config).await?;
    match report {
        ReportCommands::ByCountry => output(&service.summarize_by_country().await?, flags.format),
        ReportCommands::Heatmap => output(&service.summarize_heatmap().await?, flags.format),
        ReportCommands::Dashboard => output(&service.summarize_dashboard().await?, flags.format),
        ReportCommands::Risk { id } => output(&service.get_risk_detail(*id).await?, flags.format),
    }
}
