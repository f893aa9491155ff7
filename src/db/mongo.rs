use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};

use super::{StoreError, TokenStore};
use crate::tokens::TokenSeedDocument;

pub const TOKENS_COLLECTION: &str = "tokens";

pub struct MongoStore {
    client: Client,
    database: Database,
    tokens: Collection<TokenSeedDocument>,
}

impl MongoStore {
    /// Parse the URL and build a client. No round trip happens until [`TokenStore::prepare`].
    ///
    /// A database named in the URL path wins over `database`.
    pub async fn open(url: &str, database: &str) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(url).await?;
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        let database_name = database_name(&options, database);

        let client = Client::with_options(options)?;
        let database = client.database(&database_name);
        let tokens = database.collection::<TokenSeedDocument>(TOKENS_COLLECTION);

        Ok(Self {
            client,
            database,
            tokens,
        })
    }
}

fn database_name(options: &ClientOptions, fallback: &str) -> String {
    options
        .default_database
        .clone()
        .unwrap_or_else(|| fallback.to_string())
}

impl TokenStore for MongoStore {
    async fn prepare(&mut self) -> Result<(), StoreError> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        tracing::info!(database = %self.database.name(), "Connected to MongoDB");
        Ok(())
    }

    async fn insert_tokens(&mut self, documents: &[TokenSeedDocument]) -> Result<u64, StoreError> {
        if documents.is_empty() {
            return Ok(0);
        }

        let result = self.tokens.insert_many(documents).await?;
        Ok(result.inserted_ids.len() as u64)
    }

    async fn close(self) {
        self.client.shutdown().await;
        tracing::debug!("MongoDB client shut down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_database_from_url_wins() {
        let options = ClientOptions::parse("mongodb://localhost:27017/exchange")
            .await
            .unwrap();
        assert_eq!(database_name(&options, "tomodex"), "exchange");
    }

    #[tokio::test]
    async fn test_configured_database_without_url_path() {
        let options = ClientOptions::parse("mongodb://localhost:27017").await.unwrap();
        assert_eq!(database_name(&options, "tomodex"), "tomodex");
    }
}
