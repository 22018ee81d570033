use anyhow::Context;
use risk_config::RiskConfig;
use risk_db::service::RiskService;

use crate::cli::GlobalFlags;

/// Load layered configuration, reading `.env` from the working directory.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<RiskConfig> {
    RiskConfig::load_with_dotenv(flags.config.as_deref()).context("failed to load configuration")
}

/// Open the risk store described by `config`.
pub async fn open_service(config: &RiskConfig) -> anyhow::Result<RiskService> {
    let target = if config.database.is_remote() {
        config.database.url.as_str()
    } else {
        config.database.local_path.as_str()
    };
    RiskService::from_config(config)
        .await
        .with_context(|| format!("failed to open risk store at {target}"))
}
