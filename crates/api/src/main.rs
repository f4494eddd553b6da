use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::{AppState, Config};
use domain::services::TickScheduler;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Starting draft engine API server");
    tracing::info!("Server will listen on: {}", config.server_address());

    // Create database pool
    let pool = db::create_pool(&config.database.url).await?;
    tracing::info!("Database connection pool created");

    // Create application state
    let state = AppState::new(pool, config.advisory_lock_namespace);

    // The tick scheduler autopicks any draft whose clock has expired. It runs
    // alongside the HTTP server and shuts down when the server does.
    let tick_scheduler = TickScheduler::new(
        state.draft_state.clone(),
        state.draft_repo.clone(),
        state.draft_order_repo.clone(),
        state.roster_repo.clone(),
        config.tick_cadence_seconds,
    );
    let tick_cancellation = CancellationToken::new();
    let tick_handle = {
        let cancellation = tick_cancellation.clone();
        tokio::spawn(async move { tick_scheduler.run(cancellation).await })
    };

    // Create router
    let app = api::routes::create_router_with_cors(state, &config.cors_origins);

    // Create TCP listener
    let listener = tokio::net::TcpListener::bind(&config.server_address()).await?;
    tracing::info!("Server listening on {}", config.server_address());

    // Run the server
    let result = axum::serve(listener, app).await;

    tick_cancellation.cancel();
    let _ = tick_handle.await;

    result?;
    Ok(())
}
