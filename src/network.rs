use std::collections::HashMap;

use crate::error::SeedError;

/// Networks known without any config entry.
pub const BUILTIN_NETWORKS: &[(&str, u64)] = &[
    ("ethereum", 1),
    ("mainnet", 1),
    ("ropsten", 3),
    ("rinkeby", 4),
    ("tomochain", 88),
    ("tomochaintestnet", 89),
    ("development", 8888),
];

/// Resolve a network name (or a bare numeric id) to its network id.
/// Entries in `overrides` take precedence over the built-in table. Names match case-insensitively.
pub fn resolve_network_id(name: &str, overrides: &HashMap<String, u64>) -> Result<u64, SeedError> {
    let key = name.trim().to_ascii_lowercase();

    if let Some((_, id)) = overrides
        .iter()
        .find(|(n, _)| n.trim().eq_ignore_ascii_case(&key))
    {
        return Ok(*id);
    }

    if let Some((_, id)) = BUILTIN_NETWORKS.iter().find(|(n, _)| *n == key) {
        return Ok(*id);
    }

    key.parse::<u64>()
        .map_err(|_| SeedError::UnknownNetwork(name.to_string()))
}
