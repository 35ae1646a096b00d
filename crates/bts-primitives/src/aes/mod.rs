//! AES-256-CBC encryption keyed from arbitrary seed material.
//!
//! Graphene memos derive both the AES key and the IV from a single seed:
//! `SHA-512(seed)` supplies the 32-byte key (bytes 0..32) and the 16-byte IV
//! (bytes 32..48). Plaintext is padded with PKCS#7, so ciphertext is always a
//! whole number of 16-byte blocks.
//!
//! CBC chaining and padding are implemented directly over the `aes` block
//! primitive.

use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use aes::Aes256;
use zeroize::Zeroize;

use crate::hash::sha512;
use crate::PrimitivesError;

/// AES block size in bytes.
pub const BLOCK_SIZE: usize = 16;

/// AES-256 key length in bytes.
pub const KEY_LEN: usize = 32;

/// CBC initialization vector length in bytes.
pub const IV_LEN: usize = 16;

/// An AES-256 key and CBC initialization vector pair.
///
/// The key material is wiped when the value is dropped.
pub struct CbcKey {
    key: [u8; KEY_LEN],
    iv: [u8; IV_LEN],
}

impl CbcKey {
    /// Create a key from an explicit AES key and IV.
    pub fn new(key: [u8; KEY_LEN], iv: [u8; IV_LEN]) -> Self {
        CbcKey { key, iv }
    }

    /// Derive the key and IV from seed material.
    ///
    /// # Arguments
    /// * `seed` - Arbitrary-length key material (for memos: `shared_secret || nonce`).
    ///
    /// # Returns
    /// A `CbcKey` with key = `SHA-512(seed)[0..32]` and IV = `SHA-512(seed)[32..48]`.
    pub fn from_seed(seed: &[u8]) -> Self {
        let mut digest = sha512(seed);
        let mut key = [0u8; KEY_LEN];
        let mut iv = [0u8; IV_LEN];
        key.copy_from_slice(&digest[..KEY_LEN]);
        iv.copy_from_slice(&digest[KEY_LEN..KEY_LEN + IV_LEN]);
        digest.zeroize();
        CbcKey { key, iv }
    }

    /// Encrypt `plaintext` with AES-256-CBC and PKCS#7 padding.
    ///
    /// # Returns
    /// The ciphertext, `(plaintext.len() / 16 + 1) * 16` bytes long.
    pub fn encrypt(&self, plaintext: &[u8]) -> Vec<u8> {
        let cipher = Aes256::new(GenericArray::from_slice(&self.key));

        let pad = BLOCK_SIZE - plaintext.len() % BLOCK_SIZE;
        let mut padded = Vec::with_capacity(plaintext.len() + pad);
        padded.extend_from_slice(plaintext);
        padded.resize(plaintext.len() + pad, pad as u8);

        let mut chain = self.iv;
        let mut ciphertext = Vec::with_capacity(padded.len());
        for chunk in padded.chunks_exact(BLOCK_SIZE) {
            let mut block = GenericArray::clone_from_slice(chunk);
            xor_in_place(&mut block, &chain);
            cipher.encrypt_block(&mut block);
            chain.copy_from_slice(&block);
            ciphertext.extend_from_slice(&block);
        }

        padded.zeroize();
        ciphertext
    }

    /// Decrypt AES-256-CBC ciphertext and strip PKCS#7 padding.
    ///
    /// # Returns
    /// The plaintext, a `DecryptionError` if the ciphertext is not a positive
    /// multiple of the block size, or `InvalidPadding` if the padding is malformed
    /// (wrong key or tampered ciphertext).
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, PrimitivesError> {
        if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
            return Err(PrimitivesError::DecryptionError(format!(
                "ciphertext length {} is not a positive multiple of {}",
                ciphertext.len(),
                BLOCK_SIZE
            )));
        }

        let cipher = Aes256::new(GenericArray::from_slice(&self.key));

        let mut chain = self.iv;
        let mut plaintext = Vec::with_capacity(ciphertext.len());
        for chunk in ciphertext.chunks_exact(BLOCK_SIZE) {
            let mut block = GenericArray::clone_from_slice(chunk);
            cipher.decrypt_block(&mut block);
            xor_in_place(&mut block, &chain);
            chain.copy_from_slice(chunk);
            plaintext.extend_from_slice(&block);
        }

        let pad = plaintext[plaintext.len() - 1] as usize;
        if pad == 0
            || pad > BLOCK_SIZE
            || plaintext[plaintext.len() - pad..].iter().any(|&b| b as usize != pad)
        {
            plaintext.zeroize();
            return Err(PrimitivesError::InvalidPadding);
        }
        plaintext.truncate(plaintext.len() - pad);
        Ok(plaintext)
    }
}

impl Drop for CbcKey {
    fn drop(&mut self) {
        self.key.zeroize();
        self.iv.zeroize();
    }
}

fn xor_in_place(block: &mut [u8], other: &[u8; BLOCK_SIZE]) {
    for (b, o) in block.iter_mut().zip(other.iter()) {
        *b ^= o;
    }
}
