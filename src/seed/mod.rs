pub mod runner;
#[cfg(test)]
pub(crate) mod testing;

use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::db::Connector;
use crate::error::SeedError;
use crate::network::resolve_network_id;
use crate::tokens::{build_quote_documents, TokenSeedDocument};

pub use runner::{seed_documents, SeedReport, Timeouts};

/// Quote-token documents resolved for one network, ready to write.
#[derive(Debug, Clone)]
pub struct SeedPlan {
    pub network: String,
    pub network_id: u64,
    pub documents: Vec<TokenSeedDocument>,
}

/// Resolve the network and build every quote-token document. Touches no store.
pub fn plan_quote_tokens(
    config: &Config,
    network: &str,
    now: DateTime<Utc>,
) -> Result<SeedPlan, SeedError> {
    let network_id = resolve_network_id(network, &config.networks)?;
    let tables = config.token_tables(network, network_id)?;
    let documents = build_quote_documents(&config.quote_tokens, &tables, now)?;

    tracing::info!(
        network = %network,
        network_id,
        tokens = documents.len(),
        "Quote token documents built"
    );

    Ok(SeedPlan {
        network: network.to_string(),
        network_id,
        documents,
    })
}

/// Build the quote-token documents for `network` and insert them into the store at `url`.
///
/// Configuration errors are raised before any connection is opened.
pub async fn seed_quote_tokens<C: Connector>(
    connector: &C,
    config: &Config,
    network: &str,
    url: &str,
    shutdown: &CancellationToken,
) -> Result<SeedReport, SeedError> {
    let plan = plan_quote_tokens(config, network, Utc::now())?;

    let timeouts = Timeouts {
        connect: config.database.connect_timeout(),
        write: config.database.write_timeout(),
    };

    let report = seed_documents(connector, url, &plan.documents, timeouts, shutdown).await?;

    tracing::info!(
        network = %plan.network,
        network_id = plan.network_id,
        inserted = report.inserted,
        "Quote tokens seeded"
    );

    Ok(report)
}
