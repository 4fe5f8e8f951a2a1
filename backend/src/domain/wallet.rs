//! Wallet address validation and canonicalisation.
//!
//! Addresses are 20-byte account identifiers written as `0x` plus 40 hex
//! digits. A fixed-length hex string with a wrong checksum is accepted by
//! naive format checks, so mixed-case input is verified against its
//! EIP-55 checksum: uppercase a hex letter exactly when the corresponding
//! nibble of `keccak256(lowercase_hex)` is 8 or above. All-lowercase and
//! all-uppercase input carries no checksum information and is accepted
//! as-is. Every accepted address is stored in the checksummed form, so
//! equality on the stored string is case-insensitive equality on the
//! underlying account.

use std::fmt;

use sha3::{Digest, Keccak256};

use super::fields::FieldError;

/// Number of hex digits in an address, excluding the `0x` prefix.
const ADDRESS_HEX_LEN: usize = 40;

/// Canonical (EIP-55 checksummed) wallet address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WalletAddress(String);

impl WalletAddress {
    /// Validate `raw` and canonicalise it to the checksummed form.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, FieldError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(FieldError::Required);
        }
        let digits = trimmed
            .strip_prefix("0x")
            .ok_or(FieldError::WalletInvalidFormat)?;
        if digits.len() != ADDRESS_HEX_LEN || !digits.chars().all(|ch| ch.is_ascii_hexdigit()) {
            return Err(FieldError::WalletInvalidFormat);
        }

        let lower = digits.to_ascii_lowercase();
        let checksummed = checksum_digits(&lower);
        let has_upper = digits.chars().any(|ch| ch.is_ascii_uppercase());
        let has_lower = digits.chars().any(|ch| ch.is_ascii_lowercase());
        if has_upper && has_lower && digits != checksummed {
            return Err(FieldError::WalletChecksumMismatch);
        }

        Ok(Self(format!("0x{checksummed}")))
    }
}

impl AsRef<str> for WalletAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<WalletAddress> for String {
    fn from(value: WalletAddress) -> Self {
        value.0
    }
}

/// Apply the EIP-55 case pattern to lowercase hex digits.
fn checksum_digits(lower: &str) -> String {
    let digest = Keccak256::digest(lower.as_bytes());
    lower
        .chars()
        .enumerate()
        .map(|(index, ch)| {
            let byte = digest.get(index / 2).copied().unwrap_or_default();
            let nibble = if index % 2 == 0 { byte >> 4 } else { byte & 0x0f };
            if nibble >= 8 {
                ch.to_ascii_uppercase()
            } else {
                ch
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    // Checksummed reference addresses from the EIP-55 text.
    const CHECKSUMMED: [&str; 4] = [
        "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
        "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
        "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB",
        "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb",
    ];

    #[test]
    fn checksummed_addresses_are_accepted_verbatim() {
        for raw in CHECKSUMMED {
            let address = WalletAddress::new(raw).expect("checksummed address accepted");
            assert_eq!(address.as_ref(), raw);
        }
    }

    #[test]
    fn lowercase_input_is_canonicalised() {
        for raw in CHECKSUMMED {
            let address =
                WalletAddress::new(raw.to_ascii_lowercase()).expect("lowercase address accepted");
            assert_eq!(address.as_ref(), raw);
        }
    }

    #[test]
    fn uppercase_input_is_canonicalised() {
        let raw = "0x5AAEB6053F3E94C9B9A09F33669435E7EF1BEAED";
        let address = WalletAddress::new(raw).expect("uppercase address accepted");
        assert_eq!(address.as_ref(), CHECKSUMMED.first().copied().unwrap_or_default());
    }

    #[test]
    fn single_case_flip_fails_checksum() {
        // Lowercase the leading 'A' of a checksummed address.
        let raw = "0x5aaeb6053F3E94C9b9A09f33669435E7Ef1BeAed";
        assert_eq!(
            WalletAddress::new(raw),
            Err(FieldError::WalletChecksumMismatch)
        );
    }

    #[rstest]
    #[case::missing_prefix("5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed")]
    #[case::short("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAe")]
    #[case::long("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed0")]
    #[case::non_hex("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAeg")]
    fn malformed_addresses_are_format_errors(#[case] raw: &str) {
        assert_eq!(WalletAddress::new(raw), Err(FieldError::WalletInvalidFormat));
    }

    #[test]
    fn empty_address_is_required_not_format() {
        assert_eq!(WalletAddress::new("  "), Err(FieldError::Required));
    }
}
