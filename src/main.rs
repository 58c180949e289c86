use std::sync::Arc;

use blog::{build_app, config::AppConfig, run_app, telemetry::init_tracing, AppState};

#[tokio::main]
async fn main() -> blog::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    init_tracing(config.log_format)?;

    let state = AppState::from_config(&config).await?;
    let app = build_app(Arc::new(state));
    if let Err(error) = run_app(app, config.bind_addr).await {
        tracing::error!(%error, "server stopped");
        return Err(error);
    }
    Ok(())
}
