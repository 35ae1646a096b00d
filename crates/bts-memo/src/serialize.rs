//! Binary and JSON serialization capabilities.
//!
//! The two traits are independent; [`Memo`] implements both.
//!
//! JSON shape:
//!
//! ```json
//! { "from": "BTS...", "to": "BTS...", "nonce": "42", "message": "e751bef1..." }
//! ```
//!
//! The empty memo has no JSON form and serializes to `None`.

use bts_primitives::ec::public_key::COMPRESSED_LEN;
use bts_primitives::ec::PublicKey;
use bts_primitives::util::{ByteReader, ByteWriter};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::MemoConfig;
use crate::memo::{decode_hex_padded, Memo};
use crate::nonce::{Nonce, NONCE_LEN};
use crate::MemoError;

/// Types with a canonical binary wire encoding.
pub trait ByteSerializable: Sized {
    /// Encode to bytes.
    fn to_bytes(&self) -> Result<Vec<u8>, MemoError>;

    /// Decode from exactly one encoded value; trailing bytes are an error.
    fn from_bytes(bytes: &[u8]) -> Result<Self, MemoError>;
}

/// Types with a JSON wire encoding that embeds chain-prefixed addresses.
pub trait JsonSerializable: Sized {
    /// Encode to a JSON value, or `None` if the value has no JSON form.
    fn to_json_with(&self, config: &MemoConfig) -> Result<Option<Value>, MemoError>;

    /// Decode from a JSON value.
    fn from_json_with(config: &MemoConfig, value: &Value) -> Result<Self, MemoError>;

    /// [`JsonSerializable::to_json_with`] using main network addresses.
    fn to_json(&self) -> Result<Option<Value>, MemoError> {
        self.to_json_with(&MemoConfig::default())
    }

    /// [`JsonSerializable::from_json_with`] using main network addresses.
    fn from_json(value: &Value) -> Result<Self, MemoError> {
        Self::from_json_with(&MemoConfig::default(), value)
    }

    /// Compact JSON text; `null` when there is no JSON form.
    fn to_json_string(&self) -> Result<String, MemoError> {
        Ok(self.to_json()?.unwrap_or(Value::Null).to_string())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct MemoJson {
    from: String,
    to: String,
    nonce: NonceField,
    message: String,
}

/// Nodes emit the nonce as a decimal string; some tools emit a bare number.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum NonceField {
    Text(String),
    Number(serde_json::Number),
}

impl NonceField {
    fn into_nonce(self) -> Result<Nonce, MemoError> {
        match self {
            NonceField::Text(s) => Nonce::from_decimal(&s),
            NonceField::Number(n) => n.as_u64().map(Nonce::from_u64).ok_or_else(|| {
                MemoError::InvalidNonceEncoding(format!("{} is not an 8-byte unsigned integer", n))
            }),
        }
    }
}

impl ByteSerializable for Memo {
    fn to_bytes(&self) -> Result<Vec<u8>, MemoError> {
        let mut writer = ByteWriter::with_capacity(
            1 + 2 * COMPRESSED_LEN + NONCE_LEN + 1 + self.ciphertext().map_or(0, |c| c.len()),
        );
        self.write_to(&mut writer)?;
        Ok(writer.into_bytes())
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, MemoError> {
        let mut reader = ByteReader::new(bytes);
        let memo = Memo::read_from(&mut reader)?;
        if reader.remaining() != 0 {
            return Err(MemoError::Malformed(format!(
                "{} trailing bytes after memo",
                reader.remaining()
            )));
        }
        Ok(memo)
    }
}

impl JsonSerializable for Memo {
    fn to_json_with(&self, config: &MemoConfig) -> Result<Option<Value>, MemoError> {
        let (sender, recipient, nonce, ciphertext) =
            match (self.sender(), self.recipient(), self.nonce(), self.ciphertext()) {
                (Some(s), Some(r), Some(n), Some(c)) => (s, r, n, c),
                _ => return Ok(None),
            };
        let json = MemoJson {
            from: sender.to_address(&config.address_prefix),
            to: recipient.to_address(&config.address_prefix),
            nonce: NonceField::Text(nonce.to_decimal()),
            message: hex::encode(ciphertext),
        };
        Ok(Some(serde_json::to_value(json)?))
    }

    fn from_json_with(config: &MemoConfig, value: &Value) -> Result<Self, MemoError> {
        if value.is_null() {
            return Ok(Memo::empty());
        }
        let json = MemoJson::deserialize(value)?;
        Ok(Memo::from_parts(
            PublicKey::from_address(&json.from, &config.address_prefix)?,
            PublicKey::from_address(&json.to, &config.address_prefix)?,
            json.nonce.into_nonce()?,
            decode_hex_padded(&json.message)?,
        ))
    }
}
