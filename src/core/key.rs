//! Key checks for encrypted entries.

use subtle::ConstantTimeEq;

/// Compare a supplied key against the stored one.
///
/// Runs in constant time over equal-length inputs; only the length can leak.
#[must_use]
pub fn keys_match(supplied: &str, stored: &str) -> bool {
    supplied.as_bytes().ct_eq(stored.as_bytes()).into()
}
