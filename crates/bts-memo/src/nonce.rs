//! The 8-byte memo nonce.
//!
//! In memory the nonce is big-endian, which is also how it is mixed into the
//! key material and rendered as a decimal in JSON. The binary wire format
//! carries it byte-reversed (little-endian); [`Nonce::to_wire_bytes`] and
//! [`Nonce::from_wire_bytes`] are the only places that reversal happens.

use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use bts_primitives::entropy::RandomStrengthener;

use crate::MemoError;

/// Nonce length in bytes.
pub const NONCE_LEN: usize = 8;

/// A single-use memo nonce, stored big-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Nonce([u8; NONCE_LEN]);

impl Nonce {
    /// Generate a fresh nonce.
    ///
    /// Eight bytes are drawn from the global [`RandomStrengthener`], then
    /// bytes 1..=7 are overwritten with the low seven bytes of the current
    /// Unix time in milliseconds, big-endian. Only byte 0 stays random.
    pub fn generate() -> Self {
        let mut bytes = [0u8; NONCE_LEN];
        RandomStrengthener::fill_bytes_global(&mut bytes);

        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;
        bytes[1..].copy_from_slice(&millis.to_be_bytes()[1..]);
        Nonce(bytes)
    }

    /// Use `explicit` if it is a non-zero value, otherwise generate one.
    pub fn resolve(explicit: Option<u64>) -> Self {
        match explicit {
            None | Some(0) => Self::generate(),
            Some(n) => Self::from_u64(n),
        }
    }

    /// An explicit nonce, stored big-endian.
    pub fn from_u64(value: u64) -> Self {
        Nonce(value.to_be_bytes())
    }

    /// The nonce read as a big-endian integer.
    pub fn to_u64(&self) -> u64 {
        u64::from_be_bytes(self.0)
    }

    /// Wrap big-endian in-memory bytes as they are.
    pub fn from_bytes(bytes: [u8; NONCE_LEN]) -> Self {
        Nonce(bytes)
    }

    /// The big-endian in-memory bytes (the form mixed into key material).
    pub fn as_bytes(&self) -> &[u8; NONCE_LEN] {
        &self.0
    }

    /// The byte-reversed form written to the binary wire.
    pub fn to_wire_bytes(&self) -> [u8; NONCE_LEN] {
        let mut out = self.0;
        out.reverse();
        out
    }

    /// Inverse of [`Nonce::to_wire_bytes`].
    pub fn from_wire_bytes(mut bytes: [u8; NONCE_LEN]) -> Self {
        bytes.reverse();
        Nonce(bytes)
    }

    /// Parse the unsigned decimal form used in JSON.
    ///
    /// Values narrower than 8 bytes are zero-padded on the left; values that do
    /// not fit in 8 bytes are rejected.
    ///
    /// # Returns
    /// The nonce, or `InvalidNonceEncoding` for empty, non-decimal or
    /// over-wide input.
    pub fn from_decimal(s: &str) -> Result<Self, MemoError> {
        if s.is_empty() {
            return Err(MemoError::InvalidNonceEncoding("empty nonce".to_string()));
        }
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(MemoError::InvalidNonceEncoding(format!(
                "{:?} is not an unsigned decimal integer",
                s
            )));
        }
        let value = s.parse::<u64>().map_err(|_| {
            MemoError::InvalidNonceEncoding(format!("{} does not fit in {} bytes", s, NONCE_LEN))
        })?;
        Ok(Self::from_u64(value))
    }

    /// The unsigned decimal form used in JSON.
    pub fn to_decimal(&self) -> String {
        self.to_u64().to_string()
    }
}

impl fmt::Display for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_u64())
    }
}

impl FromStr for Nonce {
    type Err = MemoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_decimal(s)
    }
}

impl From<u64> for Nonce {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}
