/// Error types for memo operations.
#[derive(Debug, thiserror::Error)]
pub enum MemoError {
    /// A digest required by the cipher is not available.
    #[error("unsupported hash algorithm: {0}")]
    UnsupportedHashAlgorithm(String),

    /// The decrypted payload does not carry a matching SHA-256 prefix
    /// (tampered ciphertext or wrong key).
    #[error("memo integrity check failed")]
    IntegrityMismatch,

    /// The ciphertext does not fit the one-byte length field.
    #[error("ciphertext of {len} bytes exceeds the maximum of {max}")]
    OversizedCiphertext {
        /// Actual ciphertext length.
        len: usize,
        /// Largest length the wire format allows.
        max: usize,
    },

    /// A nonce string cannot be reduced to 8 bytes.
    #[error("invalid nonce encoding: {0}")]
    InvalidNonceEncoding(String),

    /// The operation needs a fully-formed memo but got the empty one.
    #[error("memo is empty")]
    IncompleteMemo,

    /// The decoding key belongs to neither the sender nor the recipient.
    #[error("key {key} is neither the memo sender nor the recipient")]
    KeyMismatch {
        /// Address of the key that was offered.
        key: String,
    },

    /// Structurally invalid binary or JSON input.
    #[error("malformed memo: {0}")]
    Malformed(String),

    /// The decrypted plaintext is not valid UTF-8.
    #[error("memo plaintext is not valid UTF-8")]
    InvalidUtf8,

    /// Key, encoding or cipher failure from the primitives crate.
    #[error("{0}")]
    Primitives(#[from] bts_primitives::PrimitivesError),

    /// JSON (de)serialization failure.
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}
