//! Repository public key and the encrypted payload written with it.

use serde::{Deserialize, Serialize};

use crate::core::types::KeyId;

/// A repository's current secret-encryption key.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PublicKey {
    /// Identifier the remote uses to check which key sealed a value.
    pub key_id: KeyId,
    /// Base64-encoded 32-byte Curve25519 public key.
    pub key: String,
}

/// Body of an upsert request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EncryptedSecret {
    /// Base64 sealed-box ciphertext.
    pub encrypted_value: String,
    /// Id of the key the value was sealed under.
    pub key_id: KeyId,
}
