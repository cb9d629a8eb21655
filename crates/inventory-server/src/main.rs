use anyhow::{Context, Result};
use clap::Parser;
use migration::{Migrator, MigratorTrait};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use infrastructure::ServerConfig;
use inventory_server::{api, setup_app_state};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding default.toml and per-environment overrides
    #[arg(long, default_value = "config")]
    config_dir: String,

    /// API Port (overrides configuration)
    #[arg(long)]
    port: Option<u16>,

    /// Database URL (overrides configuration and DATABASE_URL)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("info,inventory_server=debug,application=debug")
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    info!("📦 Inventory Server Starting...");

    let mut config = ServerConfig::load(&args.config_dir).context("Failed to load configuration")?;
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(url) = args.database_url {
        config.database.url = Some(url);
    }

    let calendar = config.calendar()?;
    info!(offset = %calendar.offset(), record_cap = config.report.record_cap, "Configuration loaded");

    // 0. Connect to Database
    let database_url = config.database_url()?;
    info!("Connecting to database...");
    let db = infrastructure::database::connect(&database_url, config.database.max_connections)
        .await
        .context("Failed to connect to database")?;

    // 0.1 Run Migrations
    if config.database.run_migrations {
        info!("Running database migrations...");
        Migrator::up(&db, None).await?;
        info!("✅ Migrations applied successfully");
    }

    // 1. Initialize State
    let state = setup_app_state(db, calendar, config.report.record_cap).await;

    // 2. Start API Server
    let app = api::create_router(state, config.server.static_dir.as_deref());
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("🚀 API Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
