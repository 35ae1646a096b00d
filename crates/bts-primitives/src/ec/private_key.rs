//! secp256k1 private key with Graphene-specific functionality.
//!
//! Wraps a k256 secret key and adds WIF encoding and ECDH
//! shared-point computation.

use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{Scalar, SecretKey};
use rand::rngs::OsRng;

use crate::base58;
use crate::ec::public_key::PublicKey;
use crate::PrimitivesError;

/// A secp256k1 private key used for memo key agreement.
#[derive(Clone, Debug)]
pub struct PrivateKey {
    /// The underlying k256 secret key.
    inner: SecretKey,
}

/// Length of a serialized private key in bytes.
const PRIVATE_KEY_BYTES_LEN: usize = 32;

/// WIF version byte used by Graphene chains.
const WIF_PREFIX: u8 = 0x80;

/// Compression flag byte some wallets append to WIF payloads.
const COMPRESS_MAGIC: u8 = 0x01;

impl PrivateKey {
    /// Generate a new random private key using the OS random number generator.
    pub fn new() -> Self {
        PrivateKey {
            inner: SecretKey::random(&mut OsRng),
        }
    }

    /// Create a private key from raw 32-byte scalar.
    ///
    /// # Arguments
    /// * `bytes` - A 32-byte slice representing the private key scalar.
    ///
    /// # Returns
    /// `Ok(PrivateKey)` if the bytes represent a valid scalar on secp256k1,
    /// or an error if the scalar is zero or out of range.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != PRIVATE_KEY_BYTES_LEN {
            return Err(PrimitivesError::InvalidKeyLength {
                expected: PRIVATE_KEY_BYTES_LEN,
                got: bytes.len(),
            });
        }
        let secret_key = SecretKey::from_slice(bytes)
            .map_err(|e| PrimitivesError::InvalidPrivateKey(e.to_string()))?;
        Ok(PrivateKey { inner: secret_key })
    }

    /// Create a private key from a hexadecimal string.
    ///
    /// # Arguments
    /// * `hex_str` - A 64-character hex string representing the 32-byte scalar.
    ///
    /// # Returns
    /// `Ok(PrivateKey)` on success, or an error if the hex or the scalar is invalid.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        if hex_str.is_empty() {
            return Err(PrimitivesError::InvalidPrivateKey(
                "private key hex is empty".to_string(),
            ));
        }
        let bytes = hex::decode(hex_str)?;
        Self::from_bytes(&bytes)
    }

    /// Create a private key from a WIF (Wallet Import Format) string.
    ///
    /// Graphene wallets export uncompressed WIF (`0x80 || key || checksum`);
    /// the compressed variant with a trailing `0x01` flag is accepted too.
    ///
    /// # Arguments
    /// * `wif` - A Base58Check-encoded WIF string.
    ///
    /// # Returns
    /// `Ok(PrivateKey)` on success, or an error for a bad checksum, prefix or length.
    pub fn from_wif(wif: &str) -> Result<Self, PrimitivesError> {
        let payload = base58::check_decode(wif).map_err(|e| match e {
            PrimitivesError::ChecksumMismatch => e,
            other => PrimitivesError::InvalidWif(other.to_string()),
        })?;

        let key_bytes = match payload.len() {
            // prefix + key + compression flag
            34 => {
                if payload[33] != COMPRESS_MAGIC {
                    return Err(PrimitivesError::InvalidWif(
                        "malformed private key: invalid compression flag".to_string(),
                    ));
                }
                &payload[1..1 + PRIVATE_KEY_BYTES_LEN]
            }
            33 => &payload[1..],
            n => {
                return Err(PrimitivesError::InvalidWif(format!(
                    "malformed private key: invalid length {}",
                    n
                )));
            }
        };

        if payload[0] != WIF_PREFIX {
            return Err(PrimitivesError::InvalidWif(format!(
                "unexpected version byte 0x{:02x}",
                payload[0]
            )));
        }

        Self::from_bytes(key_bytes)
    }

    /// Encode the private key as an uncompressed WIF string, the form Graphene wallets use.
    pub fn to_wif(&self) -> String {
        let mut payload = Vec::with_capacity(1 + PRIVATE_KEY_BYTES_LEN);
        payload.push(WIF_PREFIX);
        payload.extend_from_slice(&self.to_bytes());
        base58::check_encode(&payload)
    }

    /// Serialize the private key as a 32-byte big-endian array.
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        out.copy_from_slice(&self.inner.to_bytes());
        out
    }

    /// Serialize the private key as a lowercase hexadecimal string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Derive the corresponding public key for this private key.
    pub fn pub_key(&self) -> PublicKey {
        PublicKey::from_k256_public_key(self.inner.public_key())
    }

    /// Compute an ECDH shared point with another public key.
    ///
    /// Multiplies the other party's public key by this private key's scalar
    /// and normalizes the result to affine coordinates. The x-coordinate of the
    /// returned point is the Graphene shared secret.
    ///
    /// # Arguments
    /// * `pub_key` - The other party's public key.
    ///
    /// # Returns
    /// `Ok(PublicKey)` representing the shared point, or an error if the
    /// public key is not on the curve.
    pub fn derive_shared_secret(&self, pub_key: &PublicKey) -> Result<PublicKey, PrimitivesError> {
        let their_point = pub_key.to_projective_point();
        let shared_point = their_point * self.to_scalar();

        let affine = shared_point.to_affine();
        let encoded = affine.to_encoded_point(true);
        PublicKey::from_bytes(encoded.as_bytes())
    }

    /// The raw private scalar for arithmetic operations.
    pub(crate) fn to_scalar(&self) -> Scalar {
        *self.inner.to_nonzero_scalar().as_ref()
    }
}

impl Default for PrivateKey {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for PrivateKey {}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test that the well-known `01..01` key maps to its public key.
    #[test]
    fn test_known_public_key() {
        let pk = PrivateKey::from_bytes(&[0x01; 32]).unwrap();
        assert_eq!(
            pk.pub_key().to_hex(),
            "031b84c5567b126440995d3ed5aaba0565d71e1834604819ff9c17f5e9d5dd078f"
        );
    }

    /// Test private key serialization and deserialization via bytes, hex, and WIF.
    #[test]
    fn test_private_key_serialization_and_deserialization() {
        let pk = PrivateKey::new();

        let deserialized = PrivateKey::from_bytes(&pk.to_bytes()).unwrap();
        assert_eq!(pk, deserialized);

        let deserialized = PrivateKey::from_hex(&pk.to_hex()).unwrap();
        assert_eq!(pk, deserialized);

        let deserialized = PrivateKey::from_wif(&pk.to_wif()).unwrap();
        assert_eq!(pk, deserialized);
    }

    /// Test that the compressed WIF form (trailing 0x01 flag) is also accepted.
    #[test]
    fn test_private_key_from_compressed_wif() {
        let pk = PrivateKey::new();
        let mut payload = vec![WIF_PREFIX];
        payload.extend_from_slice(&pk.to_bytes());
        payload.push(COMPRESS_MAGIC);
        let wif = base58::check_encode(&payload);
        assert_eq!(PrivateKey::from_wif(&wif).unwrap(), pk);
    }

    #[test]
    fn test_private_key_invalid_inputs() {
        assert!(PrivateKey::from_hex("").is_err());
        assert!(PrivateKey::from_hex("zz").is_err());
        // zero scalar
        assert!(PrivateKey::from_bytes(&[0u8; 32]).is_err());
        assert!(matches!(
            PrivateKey::from_bytes(&[1u8; 31]),
            Err(PrimitivesError::InvalidKeyLength { expected: 32, got: 31 })
        ));
    }

    #[test]
    fn test_private_key_from_invalid_wif() {
        let wif = PrivateKey::from_bytes(&[0x01; 32]).unwrap().to_wif();
        // truncated
        assert!(PrivateKey::from_wif(&wif[..wif.len() - 1]).is_err());
        // wrong version byte
        let mut payload = vec![0xef];
        payload.extend_from_slice(&[0x01; 32]);
        assert!(PrivateKey::from_wif(&base58::check_encode(&payload)).is_err());
    }

    /// ECDH shared points agree from both sides.
    #[test]
    fn test_derive_shared_secret_symmetry() {
        let a = PrivateKey::new();
        let b = PrivateKey::new();
        let ab = a.derive_shared_secret(&b.pub_key()).unwrap();
        let ba = b.derive_shared_secret(&a.pub_key()).unwrap();
        assert_eq!(ab, ba);
    }
}
