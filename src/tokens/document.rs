use chrono::{DateTime, Utc};
use serde::Serialize;

/// A quote-currency token record as persisted in the `tokens` collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSeedDocument {
    pub symbol: String,
    /// EIP-55 checksummed.
    pub contract_address: String,
    pub decimals: u8,
    pub make_fee: f64,
    pub take_fee: f64,
    pub quote: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
