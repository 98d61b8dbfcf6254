//! Sealed-box encryption backend.
//!
//! Anonymous public-key encryption compatible with libsodium's
//! `crypto_box_seal`: an ephemeral X25519 key pair per call, XSalsa20-Poly1305
//! for the payload, and the ephemeral public key prepended to the output.
//! Only the holder of the matching private key can open it.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use crypto_box::aead::OsRng;
use tracing::trace;

use super::Cipher;
use crate::core::types::Ciphertext;
use crate::error::CipherError;

/// Length of a Curve25519 public key in bytes.
pub const PUBLIC_KEY_LEN: usize = 32;

/// Sealed-box cryptographic backend
#[derive(Debug, Clone, Copy, Default)]
pub struct SealedBox;

impl Cipher for SealedBox {
    fn name(&self) -> &'static str {
        "sealed-box"
    }

    fn seal(&self, plaintext: &str, public_key: &str) -> Result<Ciphertext, CipherError> {
        trace!(plaintext_len = plaintext.len(), "sealing");

        let key = decode_public_key(public_key)?;
        let sealed = key
            .seal(&mut OsRng, plaintext.as_bytes())
            .map_err(|_| CipherError::EncryptionFailed)?;

        trace!(ciphertext_len = sealed.len(), "sealed");

        Ok(BASE64.encode(sealed))
    }
}

/// Decode a base64 public key into a Curve25519 key.
///
/// # Errors
///
/// Returns `CipherError::InvalidBase64` if the input is not base64, or
/// `CipherError::InvalidKeyLength` if it does not decode to 32 bytes.
pub fn decode_public_key(public_key: &str) -> Result<crypto_box::PublicKey, CipherError> {
    let bytes = BASE64
        .decode(public_key.trim())
        .map_err(|_| CipherError::InvalidBase64)?;

    let bytes: [u8; PUBLIC_KEY_LEN] = bytes
        .try_into()
        .map_err(|b: Vec<u8>| CipherError::InvalidKeyLength(b.len()))?;

    Ok(crypto_box::PublicKey::from(bytes))
}
