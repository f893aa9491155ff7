//! In-memory store used by the seeding tests.

use chrono::{TimeZone, Utc};
use std::sync::{Arc, Mutex};

use crate::db::{Connector, StoreError, TokenStore};
use crate::tokens::TokenSeedDocument;

#[derive(Debug, Clone, Copy)]
pub enum Behaviour {
    Succeed,
    FailOpen,
    HangOpen,
    FailPrepare,
    HangPrepare,
    FailInsert,
    HangInsert,
    /// Acknowledge one document fewer than submitted.
    DropLast,
}

#[derive(Debug, Clone, Default)]
pub struct RecordedState {
    pub opens: usize,
    pub inserts: usize,
    pub closes: usize,
    pub stored: Vec<TokenSeedDocument>,
}

pub struct RecordingConnector {
    behaviour: Behaviour,
    state: Arc<Mutex<RecordedState>>,
}

impl RecordingConnector {
    pub fn new(behaviour: Behaviour) -> Self {
        Self {
            behaviour,
            state: Arc::new(Mutex::new(RecordedState::default())),
        }
    }

    pub fn state(&self) -> RecordedState {
        self.state.lock().unwrap().clone()
    }
}

pub struct RecordingStore {
    behaviour: Behaviour,
    state: Arc<Mutex<RecordedState>>,
}

impl Connector for RecordingConnector {
    type Store = RecordingStore;

    async fn open(&self, _url: &str) -> Result<RecordingStore, StoreError> {
        self.state.lock().unwrap().opens += 1;
        match self.behaviour {
            Behaviour::FailOpen => {
                return Err(StoreError::UnsupportedScheme("mem://".to_string()));
            }
            Behaviour::HangOpen => std::future::pending::<()>().await,
            _ => {}
        }
        Ok(RecordingStore {
            behaviour: self.behaviour,
            state: self.state.clone(),
        })
    }
}

impl TokenStore for RecordingStore {
    async fn prepare(&mut self) -> Result<(), StoreError> {
        match self.behaviour {
            Behaviour::FailPrepare => Err(StoreError::Postgres(sqlx::Error::PoolTimedOut)),
            Behaviour::HangPrepare => std::future::pending().await,
            _ => Ok(()),
        }
    }

    async fn insert_tokens(&mut self, documents: &[TokenSeedDocument]) -> Result<u64, StoreError> {
        self.state.lock().unwrap().inserts += 1;

        match self.behaviour {
            Behaviour::FailInsert => Err(StoreError::Postgres(sqlx::Error::Protocol(
                "write rejected".to_string(),
            ))),
            Behaviour::HangInsert => std::future::pending().await,
            Behaviour::DropLast => {
                let kept = &documents[..documents.len().saturating_sub(1)];
                self.state.lock().unwrap().stored.extend_from_slice(kept);
                Ok(kept.len() as u64)
            }
            _ => {
                self.state.lock().unwrap().stored.extend_from_slice(documents);
                Ok(documents.len() as u64)
            }
        }
    }

    async fn close(self) {
        self.state.lock().unwrap().closes += 1;
    }
}

pub fn sample_documents(symbols: &[&str]) -> Vec<TokenSeedDocument> {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    symbols
        .iter()
        .map(|symbol| TokenSeedDocument {
            symbol: symbol.to_string(),
            contract_address: "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed".to_string(),
            decimals: 18,
            make_fee: 0.001,
            take_fee: 0.002,
            quote: true,
            created_at: now,
            updated_at: now,
        })
        .collect()
}
