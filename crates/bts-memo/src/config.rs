//! Memo configuration and wire-format limits.

use bts_primitives::ec::DEFAULT_ADDRESS_PREFIX;

/// Largest ciphertext the one-byte binary length field can describe.
pub const MAX_CIPHERTEXT_LEN: usize = u8::MAX as usize;

/// Binary version byte of the empty memo. Nothing follows it.
pub const MEMO_VERSION_EMPTY: u8 = 0x00;

/// Binary version byte of a fully-formed memo.
pub const MEMO_VERSION_FULL: u8 = 0x01;

/// Length of the SHA-256 integrity prefix stored ahead of the plaintext.
pub const CHECKSUM_LEN: usize = 4;

/// Address prefix of the public test network.
pub const TESTNET_ADDRESS_PREFIX: &str = "TEST";

/// Chain-specific settings used when rendering and parsing memo addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoConfig {
    /// Prefix of `from`/`to` address strings, e.g. `BTS`.
    pub address_prefix: String,
}

impl MemoConfig {
    /// BitShares main network (`BTS`).
    pub fn mainnet() -> Self {
        Self::with_prefix(DEFAULT_ADDRESS_PREFIX)
    }

    /// BitShares public testnet (`TEST`).
    pub fn testnet() -> Self {
        Self::with_prefix(TESTNET_ADDRESS_PREFIX)
    }

    /// Any other Graphene chain.
    pub fn with_prefix(prefix: &str) -> Self {
        MemoConfig {
            address_prefix: prefix.to_string(),
        }
    }
}

impl Default for MemoConfig {
    fn default() -> Self {
        Self::mainnet()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_configs() {
        assert_eq!(MemoConfig::default(), MemoConfig::mainnet());
        assert_eq!(MemoConfig::mainnet().address_prefix, "BTS");
        assert_eq!(MemoConfig::testnet().address_prefix, "TEST");
        assert_eq!(MemoConfig::with_prefix("GPH").address_prefix, "GPH");
        assert_eq!(MAX_CIPHERTEXT_LEN, 255);
    }
}
