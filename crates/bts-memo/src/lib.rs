#![deny(missing_docs)]

//! Graphene/BitShares SDK - encrypted transaction memos.
//!
//! A memo is a short message attached to a transfer that only the sender and
//! the named recipient can read. Both sides derive the same ECDH secret, mix
//! it with a per-memo nonce and run AES-256-CBC over a checksummed payload.
//!
//! ```no_run
//! use bts_memo::{JsonSerializable, Memo};
//! use bts_primitives::ec::PrivateKey;
//!
//! # fn main() -> Result<(), bts_memo::MemoError> {
//! let alice = PrivateKey::new();
//! let bob = PrivateKey::new();
//!
//! let memo = Memo::new(&alice, &bob.pub_key(), "thanks for lunch")?;
//! let json = memo.to_json()?;
//! assert_eq!(memo.decode_message(&bob)?, "thanks for lunch");
//! # let _ = json;
//! # Ok(())
//! # }
//! ```

mod error;
pub mod cipher;
pub mod codec;
pub mod config;
pub mod ecdh;
pub mod memo;
pub mod nonce;
pub mod serialize;

pub use error::MemoError;
pub use cipher::{AesCbcCipher, MemoCipher};
pub use codec::MemoCodec;
pub use config::MemoConfig;
pub use memo::Memo;
pub use nonce::Nonce;
pub use serialize::{ByteSerializable, JsonSerializable};
