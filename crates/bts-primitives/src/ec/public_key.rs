//! secp256k1 public key with Graphene-specific functionality.
//!
//! Parses compressed or uncompressed SEC1, serializes compressed, and handles hex encoding and
//! conversion to and from Graphene address strings.

use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::ProjectivePoint;
use std::fmt;

use crate::ec::address::Address;
use crate::PrimitivesError;

/// Length of a compressed public key in bytes (prefix + 32 byte x-coordinate).
pub const COMPRESSED_LEN: usize = 33;

/// A secp256k1 public key.
///
/// Wraps a k256 `PublicKey`, which is guaranteed to be a valid, non-identity
/// point on the curve.
#[derive(Clone, Debug)]
pub struct PublicKey {
    inner: k256::PublicKey,
}

impl PublicKey {
    /// Create a PublicKey from raw SEC1 encoded bytes.
    ///
    /// Accepts both compressed (33-byte) and uncompressed (65-byte) formats.
    ///
    /// # Arguments
    /// * `bytes` - SEC1-encoded public key bytes.
    ///
    /// # Returns
    /// `Ok(PublicKey)` on success, or an error if the bytes don't represent a valid point.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.is_empty() {
            return Err(PrimitivesError::InvalidPublicKey(
                "pubkey bytes are empty".to_string(),
            ));
        }
        let inner = k256::PublicKey::from_sec1_bytes(bytes)
            .map_err(|_| PrimitivesError::PointNotOnCurve)?;
        Ok(PublicKey { inner })
    }

    /// Create a PublicKey from a hex-encoded SEC1 string.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        let bytes = hex::decode(hex_str)?;
        Self::from_bytes(&bytes)
    }

    /// Parse a Graphene address string (e.g. `BTS6M...`) with the given prefix.
    ///
    /// # Arguments
    /// * `address` - The address string.
    /// * `prefix` - The chain's address prefix, such as `BTS`.
    ///
    /// # Returns
    /// `Ok(PublicKey)` on success, or an error for a wrong prefix, bad Base58,
    /// a checksum mismatch or an invalid point.
    pub fn from_address(address: &str, prefix: &str) -> Result<Self, PrimitivesError> {
        Ok(Address::parse(address, prefix)?.public_key().clone())
    }

    /// Serialize the public key in compressed SEC1 format (33 bytes).
    ///
    /// The first byte is 0x02 (even Y) or 0x03 (odd Y), followed by the 32-byte X coordinate.
    /// This is the canonical encoding used on the wire.
    pub fn to_compressed(&self) -> [u8; COMPRESSED_LEN] {
        let point = self.inner.to_encoded_point(true);
        let mut out = [0u8; COMPRESSED_LEN];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// Serialize the public key as a lowercase hexadecimal string (compressed format).
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_compressed())
    }

    /// Derive the Graphene address string for this key.
    ///
    /// # Arguments
    /// * `prefix` - The chain's address prefix, such as `BTS`.
    ///
    /// # Returns
    /// `prefix || base58(compressed || RIPEMD-160(compressed)[..4])`.
    pub fn to_address(&self, prefix: &str) -> String {
        Address::new(self.clone(), prefix).to_string()
    }

    /// Construct a PublicKey from a k256 `PublicKey`.
    pub(crate) fn from_k256_public_key(inner: k256::PublicKey) -> Self {
        PublicKey { inner }
    }

    /// Convert this public key to a k256 `ProjectivePoint` for EC arithmetic.
    pub(crate) fn to_projective_point(&self) -> ProjectivePoint {
        self.inner.to_projective()
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_compressed() == other.to_compressed()
    }
}

impl Eq for PublicKey {}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
