use std::time::Duration;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use crate::db::{Connector, TokenStore};
use crate::error::SeedError;
use crate::tokens::TokenSeedDocument;

/// Upper bounds for the two store round trips.
#[derive(Debug, Clone, Copy)]
pub struct Timeouts {
    /// Covers opening the store and the readiness check.
    pub connect: Duration,
    pub write: Duration,
}

/// Outcome of a successful seeding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub expected: usize,
    pub inserted: u64,
}

impl SeedReport {
    pub fn is_complete(&self) -> bool {
        self.inserted == self.expected as u64
    }
}

/// Open the store, insert `documents` as one batch, and close the store.
///
/// Once the store is open it is closed exactly once, whether the write
/// succeeds, fails, times out or is cancelled.
pub async fn seed_documents<C: Connector>(
    connector: &C,
    url: &str,
    documents: &[TokenSeedDocument],
    timeouts: Timeouts,
    shutdown: &CancellationToken,
) -> Result<SeedReport, SeedError> {
    let opened = tokio::select! {
        opened = timeout(timeouts.connect, connector.open(url)) => opened,
        _ = shutdown.cancelled() => return Err(SeedError::Cancelled),
    };
    let mut store = match opened {
        Ok(result) => result.map_err(SeedError::Connect)?,
        Err(_) => return Err(SeedError::ConnectTimeout(timeouts.connect)),
    };

    let outcome = tokio::select! {
        result = write_documents(&mut store, documents, timeouts) => result,
        _ = shutdown.cancelled() => Err(SeedError::Cancelled),
    };

    store.close().await;

    let inserted = outcome?;
    let report = SeedReport {
        expected: documents.len(),
        inserted,
    };

    if !report.is_complete() {
        tracing::warn!(
            expected = report.expected,
            inserted = report.inserted,
            "Store acknowledged fewer documents than submitted"
        );
    }

    Ok(report)
}

async fn write_documents<S: TokenStore>(
    store: &mut S,
    documents: &[TokenSeedDocument],
    timeouts: Timeouts,
) -> Result<u64, SeedError> {
    match timeout(timeouts.connect, store.prepare()).await {
        Ok(result) => result.map_err(SeedError::Connect)?,
        Err(_) => return Err(SeedError::ConnectTimeout(timeouts.connect)),
    }

    match timeout(timeouts.write, store.insert_tokens(documents)).await {
        Ok(result) => result.map_err(SeedError::Write),
        Err(_) => Err(SeedError::WriteTimeout(timeouts.write)),
    }
}
