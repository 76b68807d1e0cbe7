use std::sync::Arc;

use referral_rust::{
    app, config::Config, database::open_store, libs::time::LocalClock, logging::init_logging,
    AppState,
};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let setting = Config::read()?;
    init_logging(&setting.log.level);
    let store = open_store(&setting.store);
    let state = AppState::new(setting.auth.clone(), store, Arc::new(LocalClock))?;
    let router = app(state, &setting);
    let listener = tokio::net::TcpListener::bind(setting.bind_addr()).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
