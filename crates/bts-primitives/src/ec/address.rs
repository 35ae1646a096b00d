//! Graphene public-key address strings.
//!
//! An address is the chain prefix followed by the Base58 encoding of the
//! compressed public key with a 4-byte RIPEMD-160 checksum appended, e.g.
//! `BTS73MTSWz2Nks4Eaf8G8F7Nr6jbHorZSM774HFmtrdEuahXqi1ff`.

use std::fmt;

use crate::base58;
use crate::ec::public_key::{PublicKey, COMPRESSED_LEN};
use crate::PrimitivesError;

/// Address prefix of the BitShares main network.
pub const DEFAULT_ADDRESS_PREFIX: &str = "BTS";

/// A public key bound to a chain address prefix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Address {
    prefix: String,
    public_key: PublicKey,
}

impl Address {
    /// Create an address for `public_key` under `prefix`.
    pub fn new(public_key: PublicKey, prefix: &str) -> Self {
        Address {
            prefix: prefix.to_string(),
            public_key,
        }
    }

    /// Parse an address string, requiring the given prefix.
    ///
    /// # Arguments
    /// * `s` - The address string.
    /// * `prefix` - The expected chain prefix.
    ///
    /// # Returns
    /// `Ok(Address)` on success, or an error for a missing prefix, bad Base58,
    /// wrong key length, checksum mismatch or invalid point.
    pub fn parse(s: &str, prefix: &str) -> Result<Self, PrimitivesError> {
        let encoded = s.strip_prefix(prefix).ok_or_else(|| {
            PrimitivesError::InvalidAddress(format!("expected prefix {:?} in {:?}", prefix, s))
        })?;
        let key_bytes = base58::ripemd_check_decode(encoded)?;
        if key_bytes.len() != COMPRESSED_LEN {
            return Err(PrimitivesError::InvalidAddress(format!(
                "expected {} key bytes, got {}",
                COMPRESSED_LEN,
                key_bytes.len()
            )));
        }
        Ok(Address {
            prefix: prefix.to_string(),
            public_key: PublicKey::from_bytes(&key_bytes)?,
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            self.prefix,
            base58::ripemd_check_encode(&self.public_key.to_compressed())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SENDER_PUB: &str = "031b84c5567b126440995d3ed5aaba0565d71e1834604819ff9c17f5e9d5dd078f";
    const RECIPIENT_PUB: &str = "024d4b6cd1361032ca9bd2aeb9d900aa4d45d9ead80ac9423374c451a7254d0766";

    #[test]
    fn test_known_addresses() {
        let sender = PublicKey::from_hex(SENDER_PUB).unwrap();
        let recipient = PublicKey::from_hex(RECIPIENT_PUB).unwrap();
        assert_eq!(
            Address::new(sender, DEFAULT_ADDRESS_PREFIX).to_string(),
            "BTS73MTSWz2Nks4Eaf8G8F7Nr6jbHorZSM774HFmtrdEuahXqi1ff"
        );
        assert_eq!(
            Address::new(recipient, DEFAULT_ADDRESS_PREFIX).to_string(),
            "BTS5UXjwf1qXw1cAF6GLT4w5RjH48Rn8Y6xLPZwwVDWh3D3aap86N"
        );
    }

    #[test]
    fn test_parse_round_trip() {
        let address = "BTS5UXjwf1qXw1cAF6GLT4w5RjH48Rn8Y6xLPZwwVDWh3D3aap86N";
        let parsed = Address::parse(address, "BTS").unwrap();
        assert_eq!(parsed.prefix(), "BTS");
        assert_eq!(parsed.public_key().to_hex(), RECIPIENT_PUB);
        assert_eq!(parsed.to_string(), address);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        // wrong prefix
        assert!(matches!(
            Address::parse("TEST5UXjwf1qXw1cAF6GLT4w5RjH48Rn8Y6xLPZwwVDWh3D3aap86N", "BTS"),
            Err(PrimitivesError::InvalidAddress(_))
        ));
        // corrupted checksum
        assert!(Address::parse("BTS5UXjwf1qXw1cAF6GLT4w5RjH48Rn8Y6xLPZwwVDWh3D3aap86M", "BTS").is_err());
        // too short to hold a key
        assert!(Address::parse("BTS2g", "BTS").is_err());
    }
}
