use std::sync::Arc;

use risk_api::AppState;
use risk_config::RiskConfig;

use crate::bootstrap;
use crate::cli::ServeArgs;

/// Handle `riskmgr serve`.
pub async fn handle(args: &ServeArgs, mut config: RiskConfig) -> anyhow::Result<()> {
    if let Some(host) = &args.host {
        config.server.host.clone_from(host);
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let service = bootstrap::open_service(&config).await?;
    let settings = service.settings();
    tracing::info!(
        scale_min = settings.scale.min(),
        scale_max = settings.scale.max(),
        basis = %settings.basis,
        closed_status_id = ?settings.closed_status_id,
        "reporting settings"
    );

    let addr = config.server.bind_addr();
    risk_api::routes::serve(Arc::new(AppState::new(service)), &addr).await
}
