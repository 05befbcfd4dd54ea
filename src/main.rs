use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use zone_tracker::diameters::{load_diameters_map, DiameterRegistry};
use zone_tracker::{config::Config, routes::create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing: console output plus a combined log file
    std::fs::create_dir_all(&config.data.logs_dir)?;
    let file_appender = tracing_appender::rolling::never(&config.data.logs_dir, "combined.log");
    let (log_file, _log_guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "zone_tracker=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(log_file),
        )
        .init();

    info!("Configuration loaded: {:?}", config.server);
    std::fs::create_dir_all(&config.data.data_dir)?;
    std::fs::create_dir_all(&config.data.upload_dir)?;

    // Connect to database
    let pool = zone_tracker::db::create_pool(&config.database).await?;

    // Run migrations
    info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to run migrations: {}", e))?;
    info!("Database migrations completed");

    // Load the diameters reference data before accepting requests; without it
    // every file response would be missing its measurements.
    let diameters = DiameterRegistry::new();
    let map = load_diameters_map(&config.diameters.csv_path, &config.diameters.settings)
        .map_err(|e| anyhow::anyhow!("Failed to load diameters data: {}", e))?;
    diameters.set_map(Some(map));
    info!("Diameters data loaded successfully");

    // Create shared state
    let state = AppState {
        pool,
        config: config.clone(),
        diameters,
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    info!("Zone of Inhibition Tracker is running at http://localhost:{}", config.server.port);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
