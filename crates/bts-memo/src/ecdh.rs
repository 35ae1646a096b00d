//! Memo shared-secret derivation.
//!
//! The secret is the 32-byte big-endian x-coordinate of `their_pub * my_priv`.
//! Both parties arrive at the same value: `derive(a, B) == derive(b, A)`.

use bts_primitives::ec::{PrivateKey, PublicKey};

use crate::MemoError;

/// Length of the derived shared secret in bytes.
pub const SHARED_SECRET_LEN: usize = 32;

/// Derive the memo shared secret between `private_key` and `public_key`.
///
/// # Arguments
/// * `private_key` - This party's private key.
/// * `public_key` - The counterparty's public key.
///
/// # Returns
/// The x-coordinate of the ECDH point, or the curve library's error wrapped as
/// `MemoError::Primitives`.
pub fn derive_shared_secret(
    private_key: &PrivateKey,
    public_key: &PublicKey,
) -> Result<[u8; SHARED_SECRET_LEN], MemoError> {
    let point = private_key.derive_shared_secret(public_key)?;
    let compressed = point.to_compressed();
    let mut secret = [0u8; SHARED_SECRET_LEN];
    secret.copy_from_slice(&compressed[1..]);
    Ok(secret)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_shared_secret() {
        let sender = PrivateKey::from_bytes(&[0x01; 32]).unwrap();
        let recipient = PrivateKey::from_bytes(&[0x02; 32]).unwrap();
        let secret = derive_shared_secret(&sender, &recipient.pub_key()).unwrap();
        assert_eq!(
            hex::encode(secret),
            "d0158a38faf6118af133af12d9bfa388eab4a08d1a2088ea6e6ec1269e03567f"
        );
    }

    #[test]
    fn test_shared_secret_symmetry() {
        let a = PrivateKey::new();
        let b = PrivateKey::new();
        assert_eq!(
            derive_shared_secret(&a, &b.pub_key()).unwrap(),
            derive_shared_secret(&b, &a.pub_key()).unwrap()
        );
    }

    #[test]
    fn test_distinct_counterparties_give_distinct_secrets() {
        let a = PrivateKey::new();
        let b = PrivateKey::new();
        let c = PrivateKey::new();
        assert_ne!(
            derive_shared_secret(&a, &b.pub_key()).unwrap(),
            derive_shared_secret(&a, &c.pub_key()).unwrap()
        );
    }
}
