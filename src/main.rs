use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use dex_token_seeder::config::Config;
use dex_token_seeder::db::StoreConnector;
use dex_token_seeder::seed::{plan_quote_tokens, seed_quote_tokens};

/// Seed the quote tokens of a DEX deployment into its token store
#[derive(Parser, Debug)]
#[command(name = "seed-quotes", version, about, long_about = None)]
struct Args {
    /// Network name (development, tomochain, ...) or numeric network id
    #[arg(long, env = "NETWORK")]
    network: String,

    /// Token store connection string (mongodb:// or postgres://)
    #[arg(
        long = "mongo_url",
        alias = "store-url",
        env = "MONGO_URL",
        required_unless_present = "dry_run"
    )]
    mongo_url: Option<String>,

    /// Path to the token config file
    #[arg(long, default_value = "config.toml")]
    config: String,

    /// Print the documents that would be inserted and exit without connecting
    #[arg(long)]
    dry_run: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    dotenv::dotenv().ok();

    let args = Args::parse();

    // Set RUST_LOG=debug to see each built document
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if args.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }

    let config = Config::load(&args.config)?;
    tracing::info!(
        quote_tokens = config.quote_tokens.len(),
        "Configuration loaded from {}",
        args.config
    );

    if args.dry_run {
        let plan = plan_quote_tokens(&config, &args.network, chrono::Utc::now())?;
        println!("{}", serde_json::to_string_pretty(&plan.documents)?);
        return Ok(());
    }

    let url = args
        .mongo_url
        .ok_or_else(|| eyre::eyre!("--mongo_url is required unless --dry-run is set"))?;

    let shutdown = CancellationToken::new();
    let signal = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown signal received, aborting seed");
            signal.cancel();
        }
    });

    let connector = StoreConnector::new(config.database.name.clone());
    let report = seed_quote_tokens(&connector, &config, &args.network, &url, &shutdown).await?;

    if !report.is_complete() {
        return Err(eyre::eyre!(
            "Only {} of {} quote tokens were inserted",
            report.inserted,
            report.expected
        ));
    }

    tracing::info!(inserted = report.inserted, "Seeding complete");
    Ok(())
}
