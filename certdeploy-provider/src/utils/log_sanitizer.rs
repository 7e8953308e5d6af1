//! Log sanitization utilities
//!
//! Keeps certificate bodies, private keys and access keys out of debug/error
//! logs: response bodies are truncated, credentials are masked.

/// Maximum number of characters to include in truncated log output.
const TRUNCATE_LIMIT: usize = 256;

/// Characters of a credential left visible by [`mask_secret`].
const VISIBLE_PREFIX: usize = 4;

/// MSRV-compatible replacement for `str::floor_char_boundary` (stable since 1.91.0).
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Truncate a string for safe logging.
///
/// Returns the original string if it's within the limit,
/// otherwise returns the first `TRUNCATE_LIMIT` characters with a suffix
/// indicating the total length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// Mask a credential (access key id, API key) for logging.
///
/// 短于 8 字节的值整体隐藏
pub fn mask_secret(secret: &str) -> String {
    if secret.len() < VISIBLE_PREFIX * 2 {
        "****".to_string()
    } else {
        format!("{}****", &secret[..floor_char_boundary(secret, VISIBLE_PREFIX)])
    }
}
