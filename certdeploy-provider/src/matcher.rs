//! 证书域名匹配
//!
//! Decides whether a provider resource (a CDN domain, a Key Vault entry, a
//! binding group) is served by a certificate. All comparisons are ASCII
//! case-insensitive and a trailing root dot is ignored on either side.
//!
//! A wildcard pattern `*.example.com` covers exactly one extra label:
//! `a.example.com` matches, `example.com` and `a.b.example.com` do not.

/// Lowercase and drop the trailing root dot.
fn normalize(name: &str) -> String {
    name.trim().trim_end_matches('.').to_ascii_lowercase()
}

/// Whether the certificate name `pattern` covers `candidate`.
///
/// Exact names compare for equality. Wildcards require `candidate` to end in
/// `.<base>` with a non-empty, dot-free prefix in front, so a bare `.<base>`
/// candidate is not covered. Only `*.` is a wildcard marker: a pattern such as
/// `*example.com` is compared literally and matches nothing but itself.
pub fn matches(pattern: &str, candidate: &str) -> bool {
    let pattern = normalize(pattern);
    let candidate = normalize(candidate);
    if pattern.is_empty() || candidate.is_empty() {
        return false;
    }

    match pattern.strip_prefix("*.") {
        Some(base) if !base.is_empty() => candidate
            .strip_suffix(base)
            .and_then(|rest| rest.strip_suffix('.'))
            .is_some_and(|label| !label.is_empty() && !label.contains('.')),
        Some(_) => false,
        None => pattern == candidate,
    }
}

/// Whether any certificate domain covers `candidate`.
pub fn matches_any<S: AsRef<str>>(patterns: &[S], candidate: &str) -> bool {
    patterns.iter().any(|p| matches(p.as_ref(), candidate))
}

/// Group match: every candidate must be covered by the certificate.
///
/// An empty group is vacuously covered; callers that bind groups skip empty
/// ones before asking.
pub fn match_group<S: AsRef<str>, C: AsRef<str>>(patterns: &[S], candidates: &[C]) -> bool {
    candidates
        .iter()
        .all(|c| matches_any(patterns, c.as_ref()))
}
