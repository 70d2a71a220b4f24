//! Platform account identifiers.
//!
//! # Responsibility
//! - Define the `AccountId` alias used as the registry key.
//! - Validate identifiers against the platform account grammar.
//!
//! # Invariants
//! - A valid account id is 2..=64 characters of lowercase alphanumeric
//!   segments separated by `.`, `_` or `-` (e.g. `alice.testnet`).

use once_cell::sync::Lazy;
use regex::Regex;

/// Account identifier used as the unique registry key.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type AccountId = String;

pub const MIN_ACCOUNT_ID_LEN: usize = 2;
pub const MAX_ACCOUNT_ID_LEN: usize = 64;

static ACCOUNT_ID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9]+([._-][a-z0-9]+)*$").expect("account id pattern must compile")
});

/// Returns whether `value` is a well-formed platform account identifier.
///
/// Length bounds are checked on bytes; the grammar is ASCII-only, so byte
/// and character counts agree for every accepted value.
pub fn is_valid_account_id(value: &str) -> bool {
    (MIN_ACCOUNT_ID_LEN..=MAX_ACCOUNT_ID_LEN).contains(&value.len())
        && ACCOUNT_ID_RE.is_match(value)
}
