//! Base58 encoding and decoding with checksum support.
//!
//! Graphene uses two checksum flavours on top of raw Base58:
//! - Base58Check with a double-SHA-256 checksum, for WIF private keys.
//! - Base58 with a RIPEMD-160 checksum, for public-key address strings
//!   (`BTS...`).

use crate::hash::{ripemd160, sha256d};
use crate::PrimitivesError;

/// Length of the checksum appended by both checksum flavours.
pub const CHECKSUM_LEN: usize = 4;

/// Encode a byte slice to a Base58 string.
///
/// Uses Bitcoin's Base58 alphabet. Leading zero bytes
/// are encoded as leading '1' characters.
///
/// # Arguments
/// * `data` - The bytes to encode.
///
/// # Returns
/// A Base58-encoded string.
pub fn encode(data: &[u8]) -> String {
    bs58::encode(data).with_alphabet(bs58::Alphabet::BITCOIN).into_string()
}

/// Decode a Base58 string to a byte vector.
///
/// # Arguments
/// * `s` - The Base58 string to decode.
///
/// # Returns
/// `Ok(Vec<u8>)` on success, or an error for invalid characters.
pub fn decode(s: &str) -> Result<Vec<u8>, PrimitivesError> {
    bs58::decode(s)
        .with_alphabet(bs58::Alphabet::BITCOIN)
        .into_vec()
        .map_err(|e| PrimitivesError::InvalidBase58(e.to_string()))
}

/// Encode a byte slice with a 4-byte double-SHA-256 checksum appended (Base58Check).
///
/// # Arguments
/// * `data` - The bytes to encode (typically version byte + payload).
///
/// # Returns
/// A Base58Check-encoded string.
pub fn check_encode(data: &[u8]) -> String {
    let checksum = sha256d(data);
    let mut payload = data.to_vec();
    payload.extend_from_slice(&checksum[..CHECKSUM_LEN]);
    encode(&payload)
}

/// Decode a Base58Check string, verifying the 4-byte double-SHA-256 checksum.
///
/// # Arguments
/// * `s` - The Base58Check string to decode.
///
/// # Returns
/// `Ok(Vec<u8>)` of the payload (without checksum) on success, or an
/// error for invalid encoding or checksum mismatch.
pub fn check_decode(s: &str) -> Result<Vec<u8>, PrimitivesError> {
    let decoded = decode(s)?;
    split_checksum(&decoded, |payload| sha256d(payload)[..CHECKSUM_LEN].to_vec())
}

/// Encode a byte slice with a 4-byte RIPEMD-160 checksum appended.
///
/// This is the encoding used for the key part of Graphene address strings.
///
/// # Arguments
/// * `data` - The bytes to encode (a compressed public key).
///
/// # Returns
/// A Base58 string of `data || RIPEMD-160(data)[..4]`.
pub fn ripemd_check_encode(data: &[u8]) -> String {
    let checksum = ripemd160(data);
    let mut payload = data.to_vec();
    payload.extend_from_slice(&checksum[..CHECKSUM_LEN]);
    encode(&payload)
}

/// Decode a Base58 string carrying a trailing 4-byte RIPEMD-160 checksum.
///
/// # Arguments
/// * `s` - The Base58 string to decode.
///
/// # Returns
/// `Ok(Vec<u8>)` of the payload (without checksum), or an error for invalid
/// encoding or checksum mismatch.
pub fn ripemd_check_decode(s: &str) -> Result<Vec<u8>, PrimitivesError> {
    let decoded = decode(s)?;
    split_checksum(&decoded, |payload| ripemd160(payload)[..CHECKSUM_LEN].to_vec())
}

fn split_checksum(
    decoded: &[u8],
    checksum_of: impl Fn(&[u8]) -> Vec<u8>,
) -> Result<Vec<u8>, PrimitivesError> {
    if decoded.len() < CHECKSUM_LEN {
        return Err(PrimitivesError::InvalidBase58(
            "data too short for checksum".to_string(),
        ));
    }
    let (payload, checksum) = decoded.split_at(decoded.len() - CHECKSUM_LEN);
    if checksum != checksum_of(payload).as_slice() {
        return Err(PrimitivesError::ChecksumMismatch);
    }
    Ok(payload.to_vec())
}
