use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::time::Duration;

use crate::error::SeedError;
use crate::tokens::TokenTables;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Extra or overriding network name -> id entries.
    #[serde(default)]
    pub networks: HashMap<String, u64>,
    pub quote_tokens: Vec<String>,
    #[serde(default)]
    pub decimals: HashMap<String, u8>,
    #[serde(default)]
    pub make_fees: HashMap<String, f64>,
    #[serde(default)]
    pub take_fees: HashMap<String, f64>,
    /// Keyed by network id, then by token symbol.
    #[serde(default)]
    pub contract_addresses: HashMap<String, HashMap<String, String>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_name")]
    pub name: String,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_write_timeout_secs")]
    pub write_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            name: default_database_name(),
            connect_timeout_secs: default_connect_timeout_secs(),
            write_timeout_secs: default_write_timeout_secs(),
        }
    }
}

impl DatabaseConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_secs(self.write_timeout_secs)
    }
}

fn default_database_name() -> String {
    "tomodex".to_string()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_write_timeout_secs() -> u64 {
    30
}

impl Config {
    pub fn load(path: &str) -> eyre::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| eyre::eyre!("Failed to read config file '{}': {}", path, e))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| eyre::eyre!("Failed to parse config file '{}': {}", path, e))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> eyre::Result<()> {
        if self.quote_tokens.is_empty() {
            return Err(eyre::eyre!("At least one quote token must be configured"));
        }

        let mut seen = HashSet::new();
        for symbol in &self.quote_tokens {
            if symbol.trim().is_empty() {
                return Err(eyre::eyre!("Quote token symbols must not be empty"));
            }
            if !seen.insert(symbol.as_str()) {
                return Err(eyre::eyre!("Quote token '{}' is listed more than once", symbol));
            }
        }

        for (table, fees) in [("make_fees", &self.make_fees), ("take_fees", &self.take_fees)] {
            for (symbol, fee) in fees {
                if !fee.is_finite() || *fee < 0.0 {
                    return Err(eyre::eyre!(
                        "Invalid fee {} for {} in {}",
                        fee,
                        symbol,
                        table
                    ));
                }
            }
        }

        if self.database.name.trim().is_empty() {
            return Err(eyre::eyre!("Database name must not be empty"));
        }
        if self.database.connect_timeout_secs == 0 || self.database.write_timeout_secs == 0 {
            return Err(eyre::eyre!("Database timeouts must be greater than zero"));
        }
        Ok(())
    }

    /// Lookup tables for the given network. Fails if the network has no address table.
    pub fn token_tables(&self, network: &str, network_id: u64) -> Result<TokenTables<'_>, SeedError> {
        let addresses = self
            .contract_addresses
            .get(&network_id.to_string())
            .ok_or_else(|| SeedError::MissingNetworkAddresses {
                network: network.to_string(),
                network_id,
            })?;

        Ok(TokenTables {
            addresses,
            decimals: &self.decimals,
            make_fees: &self.make_fees,
            take_fees: &self.take_fees,
        })
    }
}
