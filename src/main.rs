use pevi::{app, config::AppConfig, state::AppState, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init("pevi=debug,axum=info,tower_http=info");

    let config = AppConfig::from_env()?;
    let (host, port) = (config.host.clone(), config.port);
    let state = AppState::init(config).await?;

    app::serve(app::build_app(state), &host, port).await
}
