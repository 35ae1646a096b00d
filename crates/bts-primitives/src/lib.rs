/// Graphene/BitShares SDK - Cryptographic primitives, hashing, and utilities.
///
/// This crate provides the foundational building blocks for the SDK:
/// - Hash functions (SHA-256, SHA-256d, SHA-512, RIPEMD-160)
/// - Base58 encoding/decoding
/// - Elliptic curve cryptography (secp256k1 keys, ECDH, Graphene addresses)
/// - AES-256-CBC encryption keyed from arbitrary seed material
/// - A process-wide, strengthened random number source
/// - Byte reader/writer helpers for wire serialization

pub mod hash;
pub mod util;
pub mod base58;
pub mod ec;
pub mod aes;
pub mod entropy;

mod error;
pub use error::PrimitivesError;
