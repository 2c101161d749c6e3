use std::sync::Arc;

use axum::http::Method;
use clap::{Parser, Subcommand};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use currency_rates_backend::centrobank::CentralBankApi;
use currency_rates_backend::config::AppConfig;
use currency_rates_backend::db::DbConnection;
use currency_rates_backend::domain::CurrencyService;
use currency_rates_backend::ingest::RateLoader;
use currency_rates_backend::rest::{self, AppState};
use currency_rates_backend::storage::CurrencyRepository;

#[derive(Parser)]
#[command(name = "currency-rates", about = "Daily currency rates API and importer")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the HTTP API (default)
    Serve,
    /// Fetch and store the Central Bank rates for the trailing days
    LoadRates,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env();

    info!("Setting up database");
    let db = DbConnection::new(&config.database_url).await?;
    let repository = CurrencyRepository::new(db)?;
    let currency_service = CurrencyService::new(repository);

    match cli.command.unwrap_or(Command::Serve) {
        Command::LoadRates => {
            let feed = Arc::new(CentralBankApi::new(config.feed_url.clone()));
            let loader = RateLoader::new(currency_service, feed, config.ingest_days);

            info!("Loading rates for the last {} days", config.ingest_days);
            loader.run().await?;
        }
        Command::Serve => {
            // Mapping tables resolve here; a bad converter alias aborts
            // startup instead of failing a request later.
            let state = AppState::new(currency_service)?;

            let cors = CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET])
                .allow_headers(Any);

            let app = rest::router(state).layer(cors);

            let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
            info!("Listening on {}", config.bind_addr);

            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
