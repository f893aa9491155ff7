use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::{StoreError, TokenStore};
use crate::tokens::TokenSeedDocument;

/// Rows per INSERT statement. Each row binds 8 parameters, well under PostgreSQL's 65535 limit.
const INSERT_CHUNK: usize = 1000;

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Build a lazy single-connection pool. No connection is made until [`TokenStore::prepare`].
    pub fn open(url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new().max_connections(1).connect_lazy(url)?;
        Ok(Self { pool })
    }
}

impl TokenStore for PgStore {
    async fn prepare(&mut self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        tracing::info!("Connected to PostgreSQL");

        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::debug!("Token store migrations complete");
        Ok(())
    }

    /// Multi-row INSERT inside one transaction, so the batch lands whole or not at all.
    async fn insert_tokens(&mut self, documents: &[TokenSeedDocument]) -> Result<u64, StoreError> {
        if documents.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await?;
        let mut inserted = 0u64;

        for chunk in documents.chunks(INSERT_CHUNK) {
            let mut query_builder: sqlx::QueryBuilder<sqlx::Postgres> = sqlx::QueryBuilder::new(
                "INSERT INTO tokens (symbol, contract_address, decimals, make_fee, take_fee, \
                 quote, created_at, updated_at) ",
            );

            query_builder.push_values(chunk, |mut b, d| {
                b.push_bind(&d.symbol)
                    .push_bind(&d.contract_address)
                    .push_bind(d.decimals as i16)
                    .push_bind(d.make_fee)
                    .push_bind(d.take_fee)
                    .push_bind(d.quote)
                    .push_bind(d.created_at)
                    .push_bind(d.updated_at);
            });

            let result = query_builder.build().execute(&mut *tx).await?;
            inserted += result.rows_affected();
        }

        tx.commit().await?;
        Ok(inserted)
    }

    async fn close(self) {
        self.pool.close().await;
        tracing::debug!("PostgreSQL pool closed");
    }
}
