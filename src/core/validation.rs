//! Input validation for sync operations.
//!
//! Checks secret names against the remote store's rules and desired lists
//! for uniqueness.

use std::collections::HashSet;

use crate::core::constants::RESERVED_NAME_PREFIX;
use crate::core::domain::DesiredSecret;
use crate::error::{Result, ValidationError};

/// Validate a secret name.
///
/// Secret names must follow the remote store's rules:
/// - Only A-Z, 0-9, and underscore
/// - Cannot start with a digit
/// - Cannot start with the reserved `GITHUB_` prefix
/// - Cannot be empty
///
/// Lower case is rejected here; [`DesiredSecret`] upper-cases names before
/// they reach this check.
///
/// # Errors
///
/// Returns `ValidationError::InvalidName` if the name is invalid.
pub fn validate_name(name: &str) -> std::result::Result<(), ValidationError> {
    let invalid = |reason: String| ValidationError::InvalidName {
        name: name.to_string(),
        reason,
    };

    if name.is_empty() {
        return Err(invalid("cannot be empty".to_string()));
    }

    if name.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(invalid("cannot start with a digit".to_string()));
    }

    if name.starts_with(RESERVED_NAME_PREFIX) {
        return Err(invalid(format!("cannot start with {}", RESERVED_NAME_PREFIX)));
    }

    for (i, ch) in name.chars().enumerate() {
        if !(ch.is_ascii_uppercase() || ch.is_ascii_digit() || ch == '_') {
            return Err(invalid(format!(
                "invalid character '{}' at position {}. Only A-Z, 0-9, and underscore are allowed",
                ch,
                i + 1
            )));
        }
    }

    Ok(())
}

/// Check that no non-empty name appears twice in a desired list.
///
/// Names that break the naming rules are not an error here; the
/// synchronizer reports them per secret.
///
/// # Errors
///
/// Returns the first `ValidationError::DuplicateName` found.
pub fn validate_desired(desired: &[DesiredSecret]) -> Result<()> {
    let mut seen = HashSet::new();

    for secret in desired.iter().filter(|d| !d.name().is_empty()) {
        if !seen.insert(secret.name()) {
            return Err(ValidationError::DuplicateName(secret.name().to_string()).into());
        }
    }

    Ok(())
}
