use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sweetfish::{build_router, AppConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,sweetfish=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env().context("loading configuration")?;
    let addr = config.bind_addr();
    if let Some(seed) = config.rng_seed {
        tracing::info!(seed, "random draws are seeded");
    }

    let app_state = AppState::new(config);
    app_state.bootstrap().context("bootstrapping accounts")?;

    let app = build_router(app_state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    tracing::info!("🚀 Server starting on {}", addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
