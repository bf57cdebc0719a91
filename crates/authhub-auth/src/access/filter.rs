//! Path authorization filter.
//!
//! Decides, per request path, whether the caller must present proof of
//! authentication. The filter is a pure function over the path and the
//! configured exclusion list and fails closed on missing input.

/// Returns `true` when the given path requires authentication.
///
/// Exclusion entries are checked in list order and the first match wins:
///
/// - an entry ending in `*` excludes every path starting with the prefix
///   before the `*`, compared against the path exactly as received;
/// - any other entry excludes the path whose trailing-slash-normalized
///   form equals the entry;
/// - empty entries are skipped.
///
/// A missing path, an empty path, or an absent/empty exclusion list always
/// requires authentication. Note the asymmetry: exact entries match the
/// normalized path, wildcard entries match the raw path.
pub fn requires_auth(path: Option<&str>, exclusions: &[String]) -> bool {
    let Some(path) = path else {
        return true;
    };
    if exclusions.is_empty() || path.is_empty() {
        return true;
    }

    let normalized = if path.ends_with('/') {
        path.to_string()
    } else {
        format!("{path}/")
    };

    for pattern in exclusions {
        if pattern.is_empty() {
            continue;
        }

        match pattern.strip_suffix('*') {
            Some(prefix) => {
                if path.starts_with(prefix) {
                    return false;
                }
            }
            None => {
                if normalized == *pattern {
                    return false;
                }
            }
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn excl(patterns: &[&str]) -> Vec<String> {
        patterns.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn fails_closed_on_missing_input() {
        assert!(requires_auth(None, &excl(&["/api/v1/status/"])));
        assert!(requires_auth(Some("/api/v1/x"), &[]));
        assert!(requires_auth(Some(""), &excl(&["/api/v1/status/"])));
    }

    #[test]
    fn exact_entry_matches_normalized_path() {
        let exclusions = excl(&["/api/v1/status/"]);
        assert!(!requires_auth(Some("/api/v1/status"), &exclusions));
        assert!(!requires_auth(Some("/api/v1/status/"), &exclusions));
        assert!(requires_auth(Some("/api/v1/stats"), &exclusions));
    }

    #[test]
    fn exact_entry_without_trailing_slash_never_matches() {
        // The normalized path always carries a trailing slash, so an
        // entry without one cannot equal it.
        assert!(requires_auth(
            Some("/api/v1/status"),
            &excl(&["/api/v1/status"])
        ));
    }

    #[test]
    fn wildcard_entry_matches_raw_prefix() {
        let exclusions = excl(&["/api/v1/users/*"]);
        assert!(!requires_auth(Some("/api/v1/users/55"), &exclusions));
        assert!(!requires_auth(Some("/api/v1/users/"), &exclusions));
        assert!(requires_auth(Some("/api/v1/other"), &exclusions));
        // Raw comparison: the unnormalized path has no trailing slash and
        // is shorter than the prefix, so it stays protected.
        assert!(requires_auth(Some("/api/v1/users"), &exclusions));
    }

    #[test]
    fn bare_star_excludes_everything() {
        assert!(!requires_auth(Some("/anything/at/all"), &excl(&["*"])));
    }

    #[test]
    fn empty_entries_are_skipped() {
        let exclusions = excl(&["", "/api/v1/status/"]);
        assert!(!requires_auth(Some("/api/v1/status"), &exclusions));
    }

    #[test]
    fn first_match_wins_in_list_order() {
        let exclusions = excl(&["/api/v1/users/*", "/api/v1/status/"]);
        assert!(!requires_auth(Some("/api/v1/users/55"), &exclusions));
        assert!(!requires_auth(Some("/api/v1/status"), &exclusions));
        assert!(requires_auth(Some("/api/v1/profile"), &exclusions));
    }
}
