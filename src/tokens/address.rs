use alloy::primitives::{hex::FromHexError, Address};
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
pub enum AddressError {
    #[error("not a 20-byte hex address: {0}")]
    InvalidHex(#[from] FromHexError),

    #[error("bad EIP-55 checksum, expected {expected}")]
    BadChecksum { expected: String },
}

/// Normalize a hex contract address to its EIP-55 checksummed form.
///
/// All-lowercase and all-uppercase input is accepted as-is. Mixed-case input
/// is treated as already checksummed and rejected if the checksum is wrong.
pub fn checksum_address(raw: &str) -> Result<String, AddressError> {
    let trimmed = raw.trim();
    let address = Address::from_str(trimmed)?;
    let checksummed = address.to_checksum(None);

    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());

    if has_lower && has_upper && checksummed[2..] != *digits {
        return Err(AddressError::BadChecksum {
            expected: checksummed,
        });
    }

    Ok(checksummed)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHECKSUMMED: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";

    #[test]
    fn test_lowercase_is_checksummed() {
        let out = checksum_address("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed").unwrap();
        assert_eq!(out, CHECKSUMMED);
    }

    #[test]
    fn test_uppercase_and_unprefixed() {
        let out = checksum_address("0x5AAEB6053F3E94C9B9A09F33669435E7EF1BEAED").unwrap();
        assert_eq!(out, CHECKSUMMED);

        let out = checksum_address("fb6916095ca1df60bb79ce92ce3ea74c37c5d359").unwrap();
        assert_eq!(out, "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359");
    }

    #[test]
    fn test_valid_checksum_passes_through() {
        assert_eq!(checksum_address(CHECKSUMMED).unwrap(), CHECKSUMMED);
        assert_eq!(
            checksum_address(" 0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB ").unwrap(),
            "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB"
        );
    }

    #[test]
    fn test_bad_checksum_rejected() {
        let err = checksum_address("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAeD").unwrap_err();
        match err {
            AddressError::BadChecksum { expected } => assert_eq!(expected, CHECKSUMMED),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_malformed_rejected() {
        assert!(matches!(
            checksum_address("not-an-address"),
            Err(AddressError::InvalidHex(_))
        ));
        assert!(matches!(checksum_address("0x1234"), Err(AddressError::InvalidHex(_))));
        assert!(matches!(checksum_address(""), Err(AddressError::InvalidHex(_))));
    }
}
