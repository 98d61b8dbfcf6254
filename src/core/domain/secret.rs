//! Desired secret type.
//!
//! A name/value pair the caller wants present in the remote store.

use std::fmt;

use zeroize::Zeroizing;

use crate::core::types::SecretName;

/// A secret the caller wants to exist remotely.
///
/// The name is trimmed and upper-cased on construction, matching the form
/// the remote store lists. The value is kept exactly as given, wrapped in
/// `Zeroizing` so plaintext is wiped when dropped.
#[derive(Clone, PartialEq, Eq)]
pub struct DesiredSecret {
    name: SecretName,
    value: Zeroizing<String>,
}

impl DesiredSecret {
    /// Create a desired secret from a name and plaintext value.
    pub fn new(name: impl AsRef<str>, value: impl Into<String>) -> Self {
        Self {
            name: name.as_ref().trim().to_ascii_uppercase(),
            value: Zeroizing::new(value.into()),
        }
    }

    /// A named entry without a value.
    ///
    /// Keeps an existing remote secret in place without rewriting it.
    pub fn retain(name: impl AsRef<str>) -> Self {
        Self::new(name, String::new())
    }

    /// Secret name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Plaintext value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Both trimmed name and trimmed value are non-empty.
    pub fn is_ready(&self) -> bool {
        !self.name.is_empty() && !self.value.trim().is_empty()
    }

    /// Named, but with no value to write.
    pub fn is_retained(&self) -> bool {
        !self.name.is_empty() && self.value.trim().is_empty()
    }
}

impl fmt::Debug for DesiredSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DesiredSecret")
            .field("name", &self.name)
            .field("value", &"<redacted>")
            .finish()
    }
}

impl fmt::Display for DesiredSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
