//! URL validation for hyperlink detection

/// Check whether `s` is an absolute URL with a scheme and an authority.
///
/// Never fails: anything malformed is simply not a URL. The authority is
/// the text between `//` and the first `/`, `?` or `#`; only its presence
/// is checked, so hosts, ports and userinfo are not validated and
/// `https://google` or `http://localhost:99999` are accepted.
pub fn valid_url(s: &str) -> bool {
    let Some((scheme, rest)) = s.split_once(':') else {
        return false;
    };
    if !is_scheme(scheme) {
        return false;
    }

    match rest.strip_prefix("//") {
        Some(after) => {
            let authority = after
                .find(['/', '?', '#'])
                .map_or(after, |end| &after[..end]);
            !authority.is_empty() && balanced_brackets(authority)
        }
        None => false,
    }
}

/// RFC 3986 scheme: ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
fn is_scheme(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        _ => false,
    }
}

/// An IPv6 literal must open and close its brackets
fn balanced_brackets(authority: &str) -> bool {
    authority.contains('[') == authority.contains(']')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_url() {
        assert!(!valid_url("http"));
        assert!(!valid_url("https://"));
        assert!(valid_url("https://google"));
        assert!(valid_url("https://google.com"));
    }

    #[test]
    fn test_valid_url_with_path_and_query() {
        assert!(valid_url("https://example.com/a/b?c=d#frag"));
        assert!(valid_url("http://localhost:8001/db/table"));
        assert!(valid_url("http://127.0.0.1/"));
    }

    #[test]
    fn test_missing_authority() {
        assert!(!valid_url("http:example.com"));
        assert!(!valid_url("https:/example.com"));
        assert!(!valid_url("httpnot"));
        assert!(!valid_url("http:"));
    }

    #[test]
    fn test_bad_scheme() {
        assert!(!valid_url("://example.com"));
        assert!(!valid_url("1http://example.com"));
        assert!(!valid_url("ht tp://example.com"));
    }

    #[test]
    fn test_authority_is_not_validated() {
        assert!(valid_url("https://:80"));
        assert!(valid_url("http://localhost:99999"));
        assert!(valid_url("http://999.999.999.999"));
        assert!(valid_url("http://a^b.com"));
        assert!(valid_url("http://user@"));
        assert!(valid_url("http://exa%20mple.com"));
        assert!(valid_url("http://[::1]:8001/"));
    }

    #[test]
    fn test_empty_authority() {
        assert!(!valid_url("http:///path"));
        assert!(!valid_url("http://?q=1"));
        assert!(!valid_url("http://#frag"));
    }

    #[test]
    fn test_malformed_never_panics() {
        assert!(!valid_url("http://[::1"));
        assert!(!valid_url("http://::1]"));
        assert!(!valid_url(""));
        assert!(!valid_url(":"));
    }
}
