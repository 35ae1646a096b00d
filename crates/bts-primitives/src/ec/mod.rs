/// Elliptic curve cryptography on secp256k1.
///
/// Provides private keys, public keys, ECDH shared points and
/// Graphene public-key address strings.

pub mod private_key;
pub mod public_key;
pub mod address;

pub use private_key::PrivateKey;
pub use public_key::PublicKey;
pub use address::{Address, DEFAULT_ADDRESS_PREFIX};
