//! Cryptographic operations.
//!
//! Secret values are sealed to the repository's public key before they
//! leave the process. The remote store only accepts sealed boxes, so
//! [`SealedBox`] is the one production backend; the [`Cipher`] trait is the
//! seam the synchronizer is generic over.

mod sealed_box;

pub use sealed_box::{decode_public_key, SealedBox, PUBLIC_KEY_LEN};

use crate::core::types::Ciphertext;
use crate::error::CipherError;

/// Cryptographic backend trait.
pub trait Cipher: Send + Sync {
    /// Encrypt plaintext for the holder of `public_key`.
    ///
    /// # Arguments
    ///
    /// * `plaintext` - The secret value
    /// * `public_key` - Base64-encoded 32-byte public key
    ///
    /// # Returns
    ///
    /// Base64-encoded ciphertext. Output differs between calls with the same
    /// input.
    ///
    /// # Errors
    ///
    /// Returns `CipherError` if the key is malformed or encryption fails.
    fn seal(&self, plaintext: &str, public_key: &str) -> Result<Ciphertext, CipherError>;

    /// Backend name for display.
    fn name(&self) -> &'static str;
}

/// Seal a plaintext with the default backend.
///
/// This is a convenience wrapper around `SealedBox::seal`.
///
/// # Errors
///
/// Returns `CipherError` if the key is malformed or encryption fails.
pub fn seal(plaintext: &str, public_key: &str) -> Result<Ciphertext, CipherError> {
    SealedBox.seal(plaintext, public_key)
}
