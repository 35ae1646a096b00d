//! Memo encryption and decryption.
//!
//! Encoding:
//! 1. resolve the nonce (explicit, or generated from the global strengthener
//!    mixed with the current time),
//! 2. `secret = ECDH(sender_priv, recipient_pub)`,
//! 3. `key_material = secret || nonce`,
//! 4. `payload = SHA-256(plaintext)[..4] || plaintext`,
//! 5. `ciphertext = cipher.encrypt(payload, key_material)`.
//!
//! Decoding reverses the steps with either party's private key and verifies
//! the 4-byte prefix before handing back the plaintext.

use bts_primitives::ec::{PrivateKey, PublicKey};
use bts_primitives::hash::sha256;
use tracing::{debug, warn};
use zeroize::Zeroize;

use crate::cipher::{AesCbcCipher, MemoCipher};
use crate::config::{MemoConfig, CHECKSUM_LEN};
use crate::ecdh::{derive_shared_secret, SHARED_SECRET_LEN};
use crate::memo::Memo;
use crate::nonce::{Nonce, NONCE_LEN};
use crate::MemoError;

const KEY_MATERIAL_LEN: usize = SHARED_SECRET_LEN + NONCE_LEN;

/// Encrypts and decrypts memos with a pluggable cipher.
#[derive(Debug, Clone)]
pub struct MemoCodec<C: MemoCipher = AesCbcCipher> {
    config: MemoConfig,
    cipher: C,
}

impl MemoCodec<AesCbcCipher> {
    /// A codec using the standard AES-256-CBC memo cipher.
    pub fn new(config: MemoConfig) -> Self {
        MemoCodec {
            config,
            cipher: AesCbcCipher,
        }
    }
}

impl Default for MemoCodec<AesCbcCipher> {
    fn default() -> Self {
        Self::new(MemoConfig::default())
    }
}

impl<C: MemoCipher> MemoCodec<C> {
    /// A codec using a custom cipher.
    pub fn with_cipher(config: MemoConfig, cipher: C) -> Self {
        MemoCodec { config, cipher }
    }

    /// The chain settings used for address rendering.
    pub fn config(&self) -> &MemoConfig {
        &self.config
    }

    /// Encrypt `plaintext` from `sender` to `recipient`.
    ///
    /// # Arguments
    /// * `sender` - The sender's private key; its public key is stored in the memo.
    /// * `recipient` - The recipient's public key.
    /// * `plaintext` - Message bytes.
    /// * `nonce` - An explicit nonce, or `None`/`Some(0)` to generate one.
    ///
    /// # Returns
    /// A fully-formed `Memo`, or the first error raised by key agreement or
    /// the cipher. No memo is produced on failure.
    pub fn encode(
        &self,
        sender: &PrivateKey,
        recipient: &PublicKey,
        plaintext: &[u8],
        nonce: Option<u64>,
    ) -> Result<Memo, MemoError> {
        let generated = matches!(nonce, None | Some(0));
        let nonce = Nonce::resolve(nonce);

        let mut secret = derive_shared_secret(sender, recipient)?;
        let mut key_material = key_material(&secret, &nonce);
        secret.zeroize();

        let mut payload = Vec::with_capacity(CHECKSUM_LEN + plaintext.len());
        payload.extend_from_slice(&checksum(plaintext));
        payload.extend_from_slice(plaintext);

        let result = self.cipher.encrypt(&payload, &key_material);
        payload.zeroize();
        key_material.zeroize();
        let ciphertext = result?;

        debug!(
            to = %recipient.to_address(&self.config.address_prefix),
            generated_nonce = generated,
            ciphertext_len = ciphertext.len(),
            "memo encoded"
        );
        Ok(Memo::from_parts(sender.pub_key(), recipient.clone(), nonce, ciphertext))
    }

    /// Decrypt a memo and return the raw plaintext bytes.
    ///
    /// `key` may belong to either the sender or the recipient.
    ///
    /// # Returns
    /// The plaintext, `IncompleteMemo` for the empty memo, `KeyMismatch` when
    /// `key` belongs to neither party, or `IntegrityMismatch` when the
    /// ciphertext was tampered with.
    pub fn decode_bytes(&self, memo: &Memo, key: &PrivateKey) -> Result<Vec<u8>, MemoError> {
        let (sender, recipient, nonce, ciphertext) = match (
            memo.sender(),
            memo.recipient(),
            memo.nonce(),
            memo.ciphertext(),
        ) {
            (Some(s), Some(r), Some(n), Some(c)) => (s, r, n, c),
            _ => return Err(MemoError::IncompleteMemo),
        };

        let own = key.pub_key();
        let counterparty = if &own == recipient {
            sender
        } else if &own == sender {
            recipient
        } else {
            return Err(MemoError::KeyMismatch {
                key: own.to_address(&self.config.address_prefix),
            });
        };

        let mut secret = derive_shared_secret(key, counterparty)?;
        let mut key_material = key_material(&secret, nonce);
        secret.zeroize();
        let result = self.cipher.decrypt(ciphertext, &key_material);
        key_material.zeroize();

        let mut payload = match result {
            Ok(payload) => payload,
            Err(MemoError::IntegrityMismatch) => {
                warn!(nonce = %nonce, "memo failed to decrypt cleanly");
                return Err(MemoError::IntegrityMismatch);
            }
            Err(e) => return Err(e),
        };

        if payload.len() < CHECKSUM_LEN
            || checksum(&payload[CHECKSUM_LEN..]) != payload[..CHECKSUM_LEN]
        {
            payload.zeroize();
            warn!(nonce = %nonce, "memo checksum mismatch");
            return Err(MemoError::IntegrityMismatch);
        }

        debug!(
            from = %counterparty.to_address(&self.config.address_prefix),
            ciphertext_len = ciphertext.len(),
            "memo decoded"
        );
        Ok(payload.split_off(CHECKSUM_LEN))
    }

    /// Decrypt a memo and return the plaintext as text.
    ///
    /// # Returns
    /// The plaintext, any error from [`MemoCodec::decode_bytes`], or
    /// `InvalidUtf8` if the verified plaintext is not UTF-8.
    pub fn decode(&self, memo: &Memo, key: &PrivateKey) -> Result<String, MemoError> {
        let bytes = self.decode_bytes(memo, key)?;
        String::from_utf8(bytes).map_err(|_| MemoError::InvalidUtf8)
    }
}

fn key_material(secret: &[u8; SHARED_SECRET_LEN], nonce: &Nonce) -> [u8; KEY_MATERIAL_LEN] {
    let mut out = [0u8; KEY_MATERIAL_LEN];
    out[..SHARED_SECRET_LEN].copy_from_slice(secret);
    out[SHARED_SECRET_LEN..].copy_from_slice(nonce.as_bytes());
    out
}

fn checksum(plaintext: &[u8]) -> [u8; CHECKSUM_LEN] {
    let digest = sha256(plaintext);
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&digest[..CHECKSUM_LEN]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> (PrivateKey, PrivateKey) {
        (
            PrivateKey::from_bytes(&[0x01; 32]).unwrap(),
            PrivateKey::from_bytes(&[0x02; 32]).unwrap(),
        )
    }

    #[test]
    fn test_checksum_prefix() {
        assert_eq!(hex::encode(checksum(b"hello")), "2cf24dba");
    }

    #[test]
    fn test_key_material_layout() {
        let secret = [0xaa; SHARED_SECRET_LEN];
        let km = key_material(&secret, &Nonce::from_u64(42));
        assert_eq!(&km[..32], &secret[..]);
        assert_eq!(&km[32..], &[0, 0, 0, 0, 0, 0, 0, 42]);
    }

    #[test]
    fn test_golden_ciphertext() {
        let (sender, recipient) = keys();
        let codec = MemoCodec::new(MemoConfig::default());
        let memo = codec
            .encode(&sender, &recipient.pub_key(), b"hello", Some(42))
            .unwrap();
        assert_eq!(hex::encode(memo.ciphertext().unwrap()), "e751bef11ff2192cf9038089fdeadcaf");
        assert_eq!(codec.decode(&memo, &recipient).unwrap(), "hello");
        assert_eq!(codec.decode(&memo, &sender).unwrap(), "hello");
    }

    #[test]
    fn test_decode_with_unrelated_key() {
        let (sender, recipient) = keys();
        let codec = MemoCodec::new(MemoConfig::default());
        let memo = codec
            .encode(&sender, &recipient.pub_key(), b"hello", Some(42))
            .unwrap();
        let stranger = PrivateKey::from_bytes(&[0x03; 32]).unwrap();
        match codec.decode(&memo, &stranger) {
            Err(MemoError::KeyMismatch { key }) => assert!(key.starts_with("BTS")),
            other => panic!("expected KeyMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_empty_memo() {
        let (_, recipient) = keys();
        assert!(matches!(
            MemoCodec::new(MemoConfig::default()).decode(&Memo::empty(), &recipient),
            Err(MemoError::IncompleteMemo)
        ));
    }

    #[test]
    fn test_non_utf8_plaintext() {
        let (sender, recipient) = keys();
        let codec = MemoCodec::new(MemoConfig::testnet());
        let memo = codec
            .encode(&sender, &recipient.pub_key(), &[0xff, 0xfe, 0x00], Some(7))
            .unwrap();
        assert_eq!(codec.decode_bytes(&memo, &recipient).unwrap(), vec![0xff, 0xfe, 0x00]);
        assert!(matches!(codec.decode(&memo, &recipient), Err(MemoError::InvalidUtf8)));
    }
}
