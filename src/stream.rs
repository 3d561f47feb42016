//! Low-level probes over the remaining source text.
//!
//! These are the only functions in the crate that look at raw bytes/chars
//! directly; every combinator in [`crate::primitive`] is built on top of
//! them. Kept separate so the `simd` feature's `memchr` fast path stays in
//! one place instead of leaking into `primitive`.

/// The outcome of probing a single character at an offset.
///
/// Named rather than the `-1`/`-2`/offset integer sentinels of the original
/// char-probe API this crate's design notes trace back to: `EndOfInput` and
/// `Mismatch` each correspond to one of those sentinel values, `Found` to the
/// non-negative offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CharProbe {
    /// The input is exhausted.
    EndOfInput,
    /// A character was present but did not satisfy the predicate.
    Mismatch,
    /// A character was present, satisfied the predicate, and consuming it
    /// lands at this new byte offset.
    Found(usize),
}

/// Probes the character at `remaining`'s start against `predicate`.
pub(crate) fn probe_char(remaining: &str, predicate: impl FnOnce(char) -> bool) -> CharProbe {
    match remaining.chars().next() {
        None => CharProbe::EndOfInput,
        Some(c) => {
            if predicate(c) {
                CharProbe::Found(c.len_utf8())
            } else {
                CharProbe::Mismatch
            }
        }
    }
}

/// Returns the byte length of the longest prefix of `remaining` made up of
/// characters satisfying `predicate`, walking left to right.
pub(crate) fn match_while(remaining: &str, mut predicate: impl FnMut(char) -> bool) -> usize {
    let mut len = 0;
    for c in remaining.chars() {
        if predicate(c) {
            len += c.len_utf8();
        } else {
            break;
        }
    }
    len
}

/// Whether `remaining` starts with the literal `needle`. `token`/`keyword`
/// use this directly; it is a thin wrapper so callers never reach for
/// `str::starts_with` themselves and forget the empty-literal precondition
/// enforced by [`crate::error::Token::new`].
pub(crate) fn match_literal(remaining: &str, needle: &str) -> bool {
    remaining.starts_with(needle)
}

/// Finds the byte offset of the first occurrence of `needle` in
/// `remaining`, or `None` if absent. Accelerated by `memchr` for
/// single-byte-first-char needles when the `simd` feature is enabled;
/// falls back to `str::find` otherwise.
pub(crate) fn find_substring(remaining: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    #[cfg(feature = "simd")]
    {
        find_substring_memchr(remaining, needle)
    }
    #[cfg(not(feature = "simd"))]
    {
        remaining.find(needle)
    }
}

#[cfg(feature = "simd")]
fn find_substring_memchr(remaining: &str, needle: &str) -> Option<usize> {
    let first = needle.as_bytes()[0];
    let haystack = remaining.as_bytes();
    let mut start = 0;
    while let Some(found) = memchr::memchr(first, &haystack[start..]) {
        let at = start + found;
        if haystack[at..].starts_with(needle.as_bytes()) {
            return Some(at);
        }
        start = at + 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_char_end_of_input() {
        assert_eq!(probe_char("", |_| true), CharProbe::EndOfInput);
    }

    #[test]
    fn probe_char_mismatch() {
        assert_eq!(probe_char("a", |c| c == 'b'), CharProbe::Mismatch);
    }

    #[test]
    fn probe_char_found_counts_utf8_bytes() {
        assert_eq!(probe_char("é", |_| true), CharProbe::Found('é'.len_utf8()));
    }

    #[test]
    fn match_while_stops_at_first_mismatch() {
        assert_eq!(match_while("aaab", |c| c == 'a'), 3);
    }

    #[test]
    fn match_literal_checks_prefix() {
        assert!(match_literal("lettuce", "let"));
        assert!(!match_literal("le", "let"));
    }

    #[test]
    fn find_substring_locates_needle() {
        assert_eq!(find_substring("abc*/def", "*/"), Some(3));
        assert_eq!(find_substring("abc", "*/"), None);
    }

    #[test]
    fn find_substring_empty_needle_is_zero() {
        assert_eq!(find_substring("abc", ""), Some(0));
    }
}
