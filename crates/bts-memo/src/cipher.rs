//! The symmetric cipher seam used by the memo codec.

use bts_primitives::aes::CbcKey;
use bts_primitives::PrimitivesError;

use crate::MemoError;

/// Deterministic symmetric encryption keyed by raw key material.
///
/// For memos the key material is `shared_secret || nonce`. Implementations
/// must return the same output for the same inputs, and should report a
/// payload that fails to decrypt cleanly as `IntegrityMismatch`.
pub trait MemoCipher {
    /// Encrypt `payload` under `key_material`.
    fn encrypt(&self, payload: &[u8], key_material: &[u8]) -> Result<Vec<u8>, MemoError>;

    /// Decrypt `ciphertext` under `key_material`.
    fn decrypt(&self, ciphertext: &[u8], key_material: &[u8]) -> Result<Vec<u8>, MemoError>;
}

/// AES-256-CBC with PKCS#7 padding, key and IV taken from `SHA-512(key_material)`.
///
/// This is the cipher Graphene nodes and wallets use for memos.
#[derive(Debug, Clone, Copy, Default)]
pub struct AesCbcCipher;

impl MemoCipher for AesCbcCipher {
    fn encrypt(&self, payload: &[u8], key_material: &[u8]) -> Result<Vec<u8>, MemoError> {
        Ok(CbcKey::from_seed(key_material).encrypt(payload))
    }

    fn decrypt(&self, ciphertext: &[u8], key_material: &[u8]) -> Result<Vec<u8>, MemoError> {
        CbcKey::from_seed(key_material)
            .decrypt(ciphertext)
            .map_err(|e| match e {
                PrimitivesError::InvalidPadding => MemoError::IntegrityMismatch,
                other => MemoError::Primitives(other),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aes_cbc_is_deterministic() {
        let cipher = AesCbcCipher;
        let a = cipher.encrypt(b"payload", b"key material").unwrap();
        let b = cipher.encrypt(b"payload", b"key material").unwrap();
        assert_eq!(a, b);
        assert_eq!(cipher.decrypt(&a, b"key material").unwrap(), b"payload");
    }

    #[test]
    fn test_aes_cbc_error_mapping() {
        let cipher = AesCbcCipher;
        assert!(matches!(
            cipher.decrypt(&[0u8; 15], b"k"),
            Err(MemoError::Primitives(PrimitivesError::DecryptionError(_)))
        ));

        // Most arbitrary blocks decrypt to invalid padding.
        let key = CbcKey::from_seed(b"k");
        let mut block = [0u8; 16];
        for candidate in 0u8..=255 {
            block[0] = candidate;
            if let Err(PrimitivesError::InvalidPadding) = key.decrypt(&block) {
                assert!(matches!(
                    cipher.decrypt(&block, b"k"),
                    Err(MemoError::IntegrityMismatch)
                ));
                return;
            }
        }
        panic!("no block with invalid padding found");
    }
}
