use chrono::{DateTime, Utc};
use std::collections::HashMap;

use super::address::checksum_address;
use super::document::TokenSeedDocument;
use crate::error::{SeedError, TokenTable};

/// Per-symbol lookup tables for one network.
#[derive(Debug, Clone, Copy)]
pub struct TokenTables<'a> {
    pub addresses: &'a HashMap<String, String>,
    pub decimals: &'a HashMap<String, u8>,
    pub make_fees: &'a HashMap<String, f64>,
    pub take_fees: &'a HashMap<String, f64>,
}

fn lookup<'a, T>(
    table: &'a HashMap<String, T>,
    kind: TokenTable,
    symbol: &str,
) -> Result<&'a T, SeedError> {
    table.get(symbol).ok_or_else(|| SeedError::MissingEntry {
        symbol: symbol.to_string(),
        table: kind,
    })
}

/// Build one quote-token document per symbol, preserving input order.
///
/// Fails on the first symbol missing from any table, so an incomplete
/// document never reaches the store.
pub fn build_quote_documents(
    symbols: &[String],
    tables: &TokenTables<'_>,
    now: DateTime<Utc>,
) -> Result<Vec<TokenSeedDocument>, SeedError> {
    let mut documents = Vec::with_capacity(symbols.len());

    for symbol in symbols {
        let raw_address = lookup(tables.addresses, TokenTable::ContractAddresses, symbol)?;
        let decimals = *lookup(tables.decimals, TokenTable::Decimals, symbol)?;
        let make_fee = *lookup(tables.make_fees, TokenTable::MakeFees, symbol)?;
        let take_fee = *lookup(tables.take_fees, TokenTable::TakeFees, symbol)?;

        let contract_address =
            checksum_address(raw_address).map_err(|source| SeedError::InvalidAddress {
                symbol: symbol.clone(),
                address: raw_address.clone(),
                source,
            })?;

        tracing::debug!(
            symbol = %symbol,
            address = %contract_address,
            decimals,
            make_fee,
            take_fee,
            "Built quote token document"
        );

        documents.push(TokenSeedDocument {
            symbol: symbol.clone(),
            contract_address,
            decimals,
            make_fee,
            take_fee,
            quote: true,
            created_at: now,
            updated_at: now,
        });
    }

    Ok(documents)
}
