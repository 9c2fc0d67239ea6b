//! Literal prefix comparisons used to classify tokens.
//!
//! Both functions are case-sensitive and compare bytes exactly. Neither
//! allocates.

/// Return the remainder of `target` after `prefix`, if `target` starts with it.
///
/// An empty `prefix` matches every target and returns it whole. A `prefix`
/// longer than `target` never matches.
pub fn prefix_match<'a>(target: &'a str, prefix: &str) -> Option<&'a str> {
    target.strip_prefix(prefix)
}

/// Whether `candidate` starts with the first `max_len` bytes of `typed`.
///
/// When `typed` is shorter than `max_len`, all of `typed` must be a prefix of
/// `candidate`. `max_len == 0` always matches.
pub fn bounded_prefix_match(candidate: &str, typed: &str, max_len: usize) -> bool {
    let typed = &typed.as_bytes()[..max_len.min(typed.len())];
    candidate.as_bytes().starts_with(typed)
}
