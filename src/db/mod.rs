pub mod mongo;
pub mod postgres;

use std::future::Future;

use crate::tokens::TokenSeedDocument;

use self::mongo::MongoStore;
use self::postgres::PgStore;

/// Errors raised by a token store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("unsupported store URL '{0}', expected mongodb:// or postgres://")]
    UnsupportedScheme(String),

    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),

    #[error(transparent)]
    Postgres(#[from] sqlx::Error),

    #[error(transparent)]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// An open connection to wherever token documents are persisted.
///
/// `close` takes the store by value, so a handle can be released only once.
pub trait TokenStore: Send {
    /// Check the store is reachable and ready for writes.
    fn prepare(&mut self) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Insert all documents as one batch. Returns the number of documents written.
    fn insert_tokens(
        &mut self,
        documents: &[TokenSeedDocument],
    ) -> impl Future<Output = Result<u64, StoreError>> + Send;

    fn close(self) -> impl Future<Output = ()> + Send;
}

/// Opens a [`TokenStore`] from a connection string.
pub trait Connector: Sync {
    type Store: TokenStore;

    fn open(&self, url: &str) -> impl Future<Output = Result<Self::Store, StoreError>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Mongo,
    Postgres,
}

impl StoreKind {
    pub fn from_url(url: &str) -> Result<Self, StoreError> {
        let scheme = url
            .split_once("://")
            .map(|(scheme, _)| scheme.to_ascii_lowercase())
            .ok_or_else(|| StoreError::UnsupportedScheme(url.to_string()))?;

        match scheme.as_str() {
            "mongodb" | "mongodb+srv" => Ok(Self::Mongo),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            _ => Err(StoreError::UnsupportedScheme(url.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mongo => "mongodb",
            Self::Postgres => "postgres",
        }
    }
}

/// Store picked at runtime from the URL scheme.
pub enum AnyStore {
    Mongo(MongoStore),
    Postgres(PgStore),
}

impl TokenStore for AnyStore {
    async fn prepare(&mut self) -> Result<(), StoreError> {
        match self {
            Self::Mongo(store) => store.prepare().await,
            Self::Postgres(store) => store.prepare().await,
        }
    }

    async fn insert_tokens(&mut self, documents: &[TokenSeedDocument]) -> Result<u64, StoreError> {
        match self {
            Self::Mongo(store) => store.insert_tokens(documents).await,
            Self::Postgres(store) => store.insert_tokens(documents).await,
        }
    }

    async fn close(self) {
        match self {
            Self::Mongo(store) => store.close().await,
            Self::Postgres(store) => store.close().await,
        }
    }
}

/// Connects to MongoDB or PostgreSQL depending on the URL.
#[derive(Debug, Clone)]
pub struct StoreConnector {
    /// MongoDB database used when the URL path names none. PostgreSQL takes the database from the URL.
    pub database: String,
}

impl StoreConnector {
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
        }
    }
}

impl Connector for StoreConnector {
    type Store = AnyStore;

    async fn open(&self, url: &str) -> Result<AnyStore, StoreError> {
        let kind = StoreKind::from_url(url)?;
        tracing::debug!(store = kind.as_str(), database = %self.database, "Opening token store");

        match kind {
            StoreKind::Mongo => Ok(AnyStore::Mongo(MongoStore::open(url, &self.database).await?)),
            StoreKind::Postgres => Ok(AnyStore::Postgres(PgStore::open(url)?)),
        }
    }
}
