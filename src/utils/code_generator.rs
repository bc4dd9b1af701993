//! Short code generation and custom alias validation.
//!
//! Generated codes are a pure function of the original URL: the SHA-256 digest of its
//! canonical string, truncated to a byte prefix and base-62 encoded. Re-shortening the
//! same URL therefore proposes the same candidates in the same order.

use crate::error::AppError;
use crate::utils::base62;
use regex::Regex;
use serde_json::json;
use sha2::{Digest, Sha256};
use std::sync::LazyLock;
use url::Url;

static ALIAS_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]+$").unwrap());

/// Byte width of the digest; the upper bound on a code's byte prefix.
pub const DIGEST_WIDTH: usize = 32;

/// Derives the candidate code for `original` from the first `length` digest bytes.
///
/// `length` is capped at [`DIGEST_WIDTH`].
///
/// # Examples
///
/// ```ignore
/// let url = Url::parse("https://example.com/a").unwrap();
/// assert_eq!(generate_code(&url, 4), generate_code(&url, 4));
/// ```
pub fn generate_code(original: &Url, length: usize) -> String {
    let digest = Sha256::digest(original.as_str().as_bytes());
    let length = length.min(DIGEST_WIDTH);
    base62::encode(&digest[..length])
}

/// Validates a user-provided custom alias.
///
/// # Rules
///
/// - Length: `min_len..=max_len` characters
/// - Allowed characters: ASCII letters and digits only
///
/// # Errors
///
/// Returns [`AppError::InvalidAlias`] if any rule is violated.
pub fn validate_alias(alias: &str, min_len: usize, max_len: usize) -> Result<(), AppError> {
    let len = alias.chars().count();
    if len < min_len || len > max_len {
        return Err(AppError::invalid_alias(
            format!("Custom alias must be {}-{} characters", min_len, max_len),
            json!({ "provided_length": len, "min": min_len, "max": max_len }),
        ));
    }

    if !ALIAS_REGEX.is_match(alias) {
        return Err(AppError::invalid_alias(
            "Custom alias can only contain letters and digits",
            json!({ "alias": alias }),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_generate_code_is_deterministic() {
        let u = url("https://example.com/a");
        for len in [1, 4, 8, DIGEST_WIDTH] {
            assert_eq!(generate_code(&u, len), generate_code(&u, len));
        }
    }

    #[test]
    fn test_generate_code_matches_digest_prefix() {
        let u = url("https://example.com/a");
        let digest = Sha256::digest(b"https://example.com/a");
        assert_eq!(generate_code(&u, 4), base62::encode(&digest[..4]));
    }

    #[test]
    fn test_generate_code_differs_per_length() {
        let u = url("https://example.com/a");
        assert_ne!(generate_code(&u, 4), generate_code(&u, 5));
    }

    #[test]
    fn test_generate_code_differs_per_url() {
        assert_ne!(
            generate_code(&url("https://example.com/a"), 6),
            generate_code(&url("https://example.com/b"), 6)
        );
    }

    #[test]
    fn test_generate_code_is_alphanumeric() {
        let code = generate_code(&url("https://rust-lang.org/learn"), DIGEST_WIDTH);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generate_code_caps_at_digest_width() {
        let u = url("https://example.com/a");
        assert_eq!(generate_code(&u, DIGEST_WIDTH + 10), generate_code(&u, DIGEST_WIDTH));
    }

    #[test]
    fn test_validate_alias_bounds_are_inclusive() {
        assert!(validate_alias("abcd", 4, 8).is_ok());
        assert!(validate_alias("abcd1234", 4, 8).is_ok());
    }

    #[test]
    fn test_validate_alias_too_short() {
        let err = validate_alias("abc", 4, 8).unwrap_err();
        assert!(matches!(err, AppError::InvalidAlias { .. }));
        assert!(err.to_string().contains("4-8 characters"));
    }

    #[test]
    fn test_validate_alias_too_long() {
        assert!(matches!(
            validate_alias("abcdefghi", 4, 8),
            Err(AppError::InvalidAlias { .. })
        ));
    }

    #[test]
    fn test_validate_alias_empty() {
        assert!(validate_alias("", 1, 8).is_err());
    }

    #[test]
    fn test_validate_alias_mixed_case_and_digits() {
        assert!(validate_alias("AbC0129z", 4, 8).is_ok());
    }

    #[test]
    fn test_validate_alias_rejects_separators() {
        for alias in ["ab-cd", "ab_cd", "ab cd", "ab/cd", "ab.cd", "abçd"] {
            let err = validate_alias(alias, 1, 10).unwrap_err();
            assert!(
                err.to_string().contains("letters and digits"),
                "{alias} should be rejected"
            );
        }
    }
}
