//! Wildcard pattern matching.
//!
//! # Responsibilities
//! - Match a candidate string against a `*`-wildcard pattern
//!
//! # Design Decisions
//! - Greedy left-to-right scan, always taking the *first* occurrence of each
//!   literal segment; the tie-break is observable (e.g. `*foo*foo`) and must
//!   not change
//! - A pattern without any wildcard is an exact comparison, never a substring
//!   match
//! - No backtracking, so matching stays linear in the candidate length

/// Test a candidate string against a wildcard pattern.
pub fn matches(pattern: &str, candidate: &str) -> bool {
    if pattern.is_empty() {
        return candidate == pattern;
    }

    if pattern == "*" {
        return true;
    }

    let parts: Vec<&str> = pattern.split('*').collect();

    if parts.len() == 1 {
        return candidate == pattern;
    }

    let leading_wildcard = pattern.starts_with('*');
    let trailing_wildcard = pattern.ends_with('*');
    let last = parts.len() - 1;

    let mut remaining = candidate;
    for (i, part) in parts[..last].iter().enumerate() {
        // An empty segment is found at the cursor with zero length, which
        // also covers patterns made of consecutive wildcards.
        match remaining.find(part) {
            Some(idx) => {
                if i == 0 && !leading_wildcard && idx != 0 {
                    return false;
                }
                remaining = &remaining[idx + part.len()..];
            }
            None => return false,
        }
    }

    trailing_wildcard || remaining.ends_with(parts[last])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lone_wildcard_matches_everything() {
        assert!(matches("*", "anything"));
        assert!(matches("*", ""));
    }

    #[test]
    fn test_empty_pattern_matches_only_empty() {
        assert!(matches("", ""));
        assert!(!matches("", "x"));
    }

    #[test]
    fn test_no_wildcard_is_exact_match() {
        assert!(matches("abc", "abc"));
        assert!(!matches("abc", "abcd"));
        assert!(!matches("abc", "xabc"));
        assert!(!matches("bc", "abc"));
    }

    #[test]
    fn test_middle_wildcard() {
        assert!(matches("a*c", "abc"));
        assert!(matches("a*c", "ac"));
        assert!(matches("a*c", "aXXXc"));
        assert!(!matches("a*c", "abcd"));
    }

    #[test]
    fn test_anchoring() {
        // No trailing wildcard, so the candidate must end with the last segment.
        assert!(matches("*a*b", "xaxb"));
        assert!(!matches("*a*b", "xaxbx"));
        // No leading wildcard, so the first segment must sit at offset zero.
        assert!(matches("a*", "abc"));
        assert!(!matches("a*b", "xab"));
    }

    #[test]
    fn test_only_wildcards() {
        assert!(matches("***", "anything"));
        assert!(matches("***", ""));
        assert!(matches("**", "x"));
    }

    #[test]
    fn test_first_occurrence_tie_break() {
        // Consuming the *first* "foo" leaves "foo" as the required suffix.
        // A last-occurrence scan would consume the suffix and fail here.
        assert!(matches("*foo*foo", "foofoo"));
        assert!(matches("*foo*foo", "xfooyfoo"));
        assert!(!matches("*foo*foo", "foo"));
        assert!(!matches("*foo*foo", "foofoox"));
    }

    #[test]
    fn test_domain_shapes() {
        assert!(matches("*.example.com", "api.example.com"));
        assert!(!matches("*.example.com", "example.com"));
        assert!(matches("api-*.example.com", "api-v2.example.com"));
    }
}
