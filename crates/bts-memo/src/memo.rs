//! The memo envelope.
//!
//! A [`Memo`] is either empty or fully formed: sender key, recipient key,
//! nonce and ciphertext are held together in one optional record so that no
//! partially-populated state exists. Memos are never mutated after
//! construction.
//!
//! Binary layout of a fully-formed memo:
//!
//! ```text
//! 0x01 || sender (33, compressed) || recipient (33) || nonce (8, reversed) || len (1) || ciphertext
//! ```
//!
//! The empty memo is the single byte `0x00`.

use bts_primitives::ec::public_key::COMPRESSED_LEN;
use bts_primitives::ec::{PrivateKey, PublicKey};
use bts_primitives::util::{ByteReader, ByteWriter};
use bts_primitives::PrimitivesError;
use tracing::trace;

use crate::codec::MemoCodec;
use crate::config::{MemoConfig, MAX_CIPHERTEXT_LEN, MEMO_VERSION_EMPTY, MEMO_VERSION_FULL};
use crate::nonce::{Nonce, NONCE_LEN};
use crate::MemoError;

#[derive(Debug, Clone, PartialEq, Eq)]
struct MemoParts {
    sender: PublicKey,
    recipient: PublicKey,
    nonce: Nonce,
    ciphertext: Vec<u8>,
}

/// An encrypted transaction memo.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Memo {
    parts: Option<MemoParts>,
}

impl Memo {
    /// The empty memo.
    pub fn empty() -> Self {
        Memo { parts: None }
    }

    /// Assemble a memo from already-encrypted parts.
    pub fn from_parts(
        sender: PublicKey,
        recipient: PublicKey,
        nonce: Nonce,
        ciphertext: Vec<u8>,
    ) -> Self {
        Memo {
            parts: Some(MemoParts {
                sender,
                recipient,
                nonce,
                ciphertext,
            }),
        }
    }

    /// Encrypt `message` for `recipient` with a freshly generated nonce.
    ///
    /// # Arguments
    /// * `sender` - The sender's private key.
    /// * `recipient` - The recipient's public key.
    /// * `message` - The plaintext.
    ///
    /// # Returns
    /// A fully-formed memo, or the error that stopped encryption.
    pub fn new(sender: &PrivateKey, recipient: &PublicKey, message: &str) -> Result<Self, MemoError> {
        MemoCodec::default().encode(sender, recipient, message.as_bytes(), None)
    }

    /// Encrypt `message` with an explicit nonce.
    ///
    /// The same keys, message and nonce always give the same ciphertext. A
    /// nonce of `0` means "generate one", as in [`Memo::new`].
    pub fn with_nonce(
        sender: &PrivateKey,
        recipient: &PublicKey,
        message: &str,
        nonce: u64,
    ) -> Result<Self, MemoError> {
        MemoCodec::default().encode(sender, recipient, message.as_bytes(), Some(nonce))
    }

    /// Rebuild a received memo from its string fields on the main network.
    ///
    /// See [`Memo::from_received_with`].
    pub fn from_received(
        from: &str,
        to: &str,
        message_hex: &str,
        nonce_decimal: &str,
    ) -> Result<Self, MemoError> {
        Self::from_received_with(&MemoConfig::default(), from, to, message_hex, nonce_decimal)
    }

    /// Rebuild a received memo from its string fields.
    ///
    /// # Arguments
    /// * `config` - Supplies the expected address prefix.
    /// * `from` - Sender address, e.g. `BTS6M...`.
    /// * `to` - Recipient address.
    /// * `message_hex` - Ciphertext as hex; an odd-length string is left-padded with `0`.
    /// * `nonce_decimal` - The nonce as an unsigned decimal.
    ///
    /// # Returns
    /// The memo, or an error for a bad address, bad hex or a nonce that does
    /// not fit in 8 bytes.
    pub fn from_received_with(
        config: &MemoConfig,
        from: &str,
        to: &str,
        message_hex: &str,
        nonce_decimal: &str,
    ) -> Result<Self, MemoError> {
        let sender = PublicKey::from_address(from, &config.address_prefix)?;
        let recipient = PublicKey::from_address(to, &config.address_prefix)?;
        let ciphertext = decode_hex_padded(message_hex)?;
        let nonce = Nonce::from_decimal(nonce_decimal)?;
        Ok(Self::from_parts(sender, recipient, nonce, ciphertext))
    }

    /// True for the empty memo.
    pub fn is_empty(&self) -> bool {
        self.parts.is_none()
    }

    /// The sender's public key, if the memo is fully formed.
    pub fn sender(&self) -> Option<&PublicKey> {
        self.parts.as_ref().map(|p| &p.sender)
    }

    /// The recipient's public key, if the memo is fully formed.
    pub fn recipient(&self) -> Option<&PublicKey> {
        self.parts.as_ref().map(|p| &p.recipient)
    }

    /// The nonce, if the memo is fully formed.
    pub fn nonce(&self) -> Option<&Nonce> {
        self.parts.as_ref().map(|p| &p.nonce)
    }

    /// The encrypted `checksum || plaintext`, if the memo is fully formed.
    pub fn ciphertext(&self) -> Option<&[u8]> {
        self.parts.as_ref().map(|p| p.ciphertext.as_slice())
    }

    /// Decrypt the memo as text with either party's private key.
    pub fn decode_message(&self, key: &PrivateKey) -> Result<String, MemoError> {
        MemoCodec::default().decode(self, key)
    }

    /// Decrypt the memo to raw bytes with either party's private key.
    pub fn decode_bytes(&self, key: &PrivateKey) -> Result<Vec<u8>, MemoError> {
        MemoCodec::default().decode_bytes(self, key)
    }

    /// Append the binary encoding of this memo to `writer`.
    ///
    /// # Returns
    /// `OversizedCiphertext` if the ciphertext does not fit the one-byte
    /// length field. Nothing is written in that case.
    pub fn write_to(&self, writer: &mut ByteWriter) -> Result<(), MemoError> {
        let parts = match &self.parts {
            None => {
                writer.write_u8(MEMO_VERSION_EMPTY);
                return Ok(());
            }
            Some(parts) => parts,
        };

        let len = parts.ciphertext.len();
        if len > MAX_CIPHERTEXT_LEN {
            return Err(MemoError::OversizedCiphertext {
                len,
                max: MAX_CIPHERTEXT_LEN,
            });
        }

        writer.write_u8(MEMO_VERSION_FULL);
        writer.write_bytes(&parts.sender.to_compressed());
        writer.write_bytes(&parts.recipient.to_compressed());
        writer.write_bytes(&parts.nonce.to_wire_bytes());
        writer.write_u8(len as u8);
        writer.write_bytes(&parts.ciphertext);
        Ok(())
    }

    /// Read one binary-encoded memo from `reader`, leaving any following
    /// bytes unread.
    ///
    /// # Returns
    /// The memo, `Malformed` for an unknown version byte or truncated input,
    /// or a key error for an invalid embedded public key.
    pub fn read_from(reader: &mut ByteReader<'_>) -> Result<Self, MemoError> {
        let version = reader.read_u8().map_err(truncated)?;
        match version {
            MEMO_VERSION_EMPTY => Ok(Memo::empty()),
            MEMO_VERSION_FULL => {
                let sender = reader.read_array::<COMPRESSED_LEN>().map_err(truncated)?;
                let recipient = reader.read_array::<COMPRESSED_LEN>().map_err(truncated)?;
                let nonce = reader.read_array::<NONCE_LEN>().map_err(truncated)?;
                let len = reader.read_u8().map_err(truncated)? as usize;
                let ciphertext = reader.read_bytes(len).map_err(truncated)?.to_vec();
                trace!(ciphertext_len = len, "binary memo read");

                Ok(Self::from_parts(
                    PublicKey::from_bytes(&sender)?,
                    PublicKey::from_bytes(&recipient)?,
                    Nonce::from_wire_bytes(nonce),
                    ciphertext,
                ))
            }
            other => Err(MemoError::Malformed(format!(
                "unknown memo version 0x{:02x}",
                other
            ))),
        }
    }
}

fn truncated(_: PrimitivesError) -> MemoError {
    MemoError::Malformed("truncated memo".to_string())
}

/// Decode hex ciphertext, left-padding an odd-length string with one `0`.
pub(crate) fn decode_hex_padded(s: &str) -> Result<Vec<u8>, MemoError> {
    if s.len() % 2 == 1 {
        Ok(hex::decode(format!("0{}", s)).map_err(PrimitivesError::from)?)
    } else {
        Ok(hex::decode(s).map_err(PrimitivesError::from)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SENDER_ADDRESS: &str = "BTS73MTSWz2Nks4Eaf8G8F7Nr6jbHorZSM774HFmtrdEuahXqi1ff";
    const RECIPIENT_ADDRESS: &str = "BTS5UXjwf1qXw1cAF6GLT4w5RjH48Rn8Y6xLPZwwVDWh3D3aap86N";

    #[test]
    fn test_empty_memo() {
        let memo = Memo::empty();
        assert!(memo.is_empty());
        assert_eq!(memo, Memo::default());
        assert!(memo.sender().is_none());
        assert!(memo.ciphertext().is_none());
    }

    #[test]
    fn test_from_received() {
        let memo = Memo::from_received(
            SENDER_ADDRESS,
            RECIPIENT_ADDRESS,
            "e751bef11ff2192cf9038089fdeadcaf",
            "42",
        )
        .unwrap();
        assert_eq!(memo.nonce().unwrap().to_u64(), 42);
        let recipient = PrivateKey::from_bytes(&[0x02; 32]).unwrap();
        assert_eq!(memo.decode_message(&recipient).unwrap(), "hello");
    }

    #[test]
    fn test_from_received_rejects_bad_fields() {
        assert!(matches!(
            Memo::from_received(SENDER_ADDRESS, RECIPIENT_ADDRESS, "00", "18446744073709551616"),
            Err(MemoError::InvalidNonceEncoding(_))
        ));
        assert!(matches!(
            Memo::from_received(SENDER_ADDRESS, RECIPIENT_ADDRESS, "zz", "1"),
            Err(MemoError::Primitives(PrimitivesError::InvalidHex(_)))
        ));
        assert!(matches!(
            Memo::from_received_with(&MemoConfig::testnet(), SENDER_ADDRESS, RECIPIENT_ADDRESS, "00", "1"),
            Err(MemoError::Primitives(PrimitivesError::InvalidAddress(_)))
        ));
    }

    #[test]
    fn test_odd_length_hex_is_left_padded() {
        assert_eq!(decode_hex_padded("abc").unwrap(), vec![0x0a, 0xbc]);
        assert_eq!(decode_hex_padded("").unwrap(), Vec::<u8>::new());
        assert_eq!(decode_hex_padded("0abc").unwrap(), vec![0x0a, 0xbc]);
    }

    #[test]
    fn test_read_from_leaves_trailing_bytes() {
        let mut w = ByteWriter::new();
        Memo::empty().write_to(&mut w).unwrap();
        w.write_u8(0xee);
        let bytes = w.into_bytes();

        let mut r = ByteReader::new(&bytes);
        assert!(Memo::read_from(&mut r).unwrap().is_empty());
        assert_eq!(r.remaining(), 1);
    }

    #[test]
    fn test_read_from_rejects_unknown_version_and_truncation() {
        assert!(matches!(
            Memo::read_from(&mut ByteReader::new(&[0x02])),
            Err(MemoError::Malformed(_))
        ));
        assert!(matches!(
            Memo::read_from(&mut ByteReader::new(&[])),
            Err(MemoError::Malformed(_))
        ));
        assert!(matches!(
            Memo::read_from(&mut ByteReader::new(&[MEMO_VERSION_FULL, 0x02, 0x03])),
            Err(MemoError::Malformed(_))
        ));
    }

    #[test]
    fn test_oversized_write_leaves_writer_untouched() {
        let key = PrivateKey::from_bytes(&[0x01; 32]).unwrap().pub_key();
        let memo = Memo::from_parts(key.clone(), key, Nonce::from_u64(1), vec![0u8; 256]);
        let mut w = ByteWriter::new();
        assert!(matches!(
            memo.write_to(&mut w),
            Err(MemoError::OversizedCiphertext { len: 256, max: 255 })
        ));
        assert!(w.into_bytes().is_empty());
    }
}
