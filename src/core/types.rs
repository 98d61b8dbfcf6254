//! Type aliases for domain concepts.
//!
//! Provides semantic type aliases to make function signatures more descriptive.

/// A secret name (e.g., DATABASE_URL, API_KEY).
///
/// Upper-case letters, digits and underscore; see `validation::validate_name`.
pub type SecretName = String;

/// Identifier of a repository public key.
pub type KeyId = String;

/// A base64-encoded sealed-box ciphertext.
pub type Ciphertext = String;
