mod entities;
mod errors;
mod events;
mod orchestrator;
mod search;
mod settings;
mod storage;
mod web;

use clap::Parser;
use miette::{IntoDiagnostic, Result};
use migration::MigratorTrait;
use std::sync::Arc;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "furlough",
    version,
    about = "Employee leave/permission service"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // logging
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    // load settings
    let settings = settings::Settings::load(&cli.config)?;
    tracing::info!(?settings, "Loaded configuration");

    // init storage (database) and apply migrations
    let db = storage::init(&settings.database).await?;
    migration::Migrator::up(&db, None).await.into_diagnostic()?;

    // downstream adapters: search index (lazy index creation) and event stream
    let index = Arc::new(search::EsIndex::new(&settings.search));
    let events = Arc::new(events::NatsPublisher::connect(&settings.events).await?);

    let orchestrator = orchestrator::Orchestrator::new(db, index, events);

    // start web server
    web::serve(settings, orchestrator).await?;
    Ok(())
}
