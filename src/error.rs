use std::time::Duration;

use crate::db::StoreError;
use crate::tokens::address::AddressError;

/// Lookup tables a quote token must appear in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenTable {
    ContractAddresses,
    Decimals,
    MakeFees,
    TakeFees,
}

impl TokenTable {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ContractAddresses => "contract_addresses",
            Self::Decimals => "decimals",
            Self::MakeFees => "make_fees",
            Self::TakeFees => "take_fees",
        }
    }
}

impl std::fmt::Display for TokenTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything that can stop a seeding run.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("unknown network '{0}'")]
    UnknownNetwork(String),

    #[error("no contract addresses configured for network '{network}' (id {network_id})")]
    MissingNetworkAddresses { network: String, network_id: u64 },

    #[error("token {symbol}: no entry in the {table} table")]
    MissingEntry { symbol: String, table: TokenTable },

    #[error("token {symbol}: invalid contract address '{address}': {source}")]
    InvalidAddress {
        symbol: String,
        address: String,
        #[source]
        source: AddressError,
    },

    #[error("failed to connect to token store: {0}")]
    Connect(#[source] StoreError),

    #[error("connecting to token store timed out after {0:?}")]
    ConnectTimeout(Duration),

    #[error("failed to insert token documents: {0}")]
    Write(#[source] StoreError),

    #[error("inserting token documents timed out after {0:?}")]
    WriteTimeout(Duration),

    #[error("seeding cancelled")]
    Cancelled,
}

impl SeedError {
    /// True for errors caused by the config tables or CLI arguments rather than the store.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Self::UnknownNetwork(_)
                | Self::MissingNetworkAddresses { .. }
                | Self::MissingEntry { .. }
                | Self::InvalidAddress { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_entry_names_symbol_and_table() {
        let err = SeedError::MissingEntry {
            symbol: "DAI".to_string(),
            table: TokenTable::TakeFees,
        };
        assert_eq!(err.to_string(), "token DAI: no entry in the take_fees table");
        assert!(err.is_config());
    }

    #[test]
    fn test_store_errors_are_not_config() {
        let err = SeedError::Connect(StoreError::UnsupportedScheme("redis://x".to_string()));
        assert!(!err.is_config());
        assert!(!SeedError::Cancelled.is_config());
    }
}
