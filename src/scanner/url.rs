/// True when `text`, trimmed, is `http://` or `https://` followed by at least
/// one character and no whitespace.
pub fn is_url(text: &str) -> bool {
    let text = text.trim();
    let rest = text
        .strip_prefix("https://")
        .or_else(|| text.strip_prefix("http://"));
    match rest {
        Some(rest) => !rest.is_empty() && !rest.chars().any(char::is_whitespace),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        assert!(is_url("https://example.com"));
        assert!(is_url("http://a"));
        assert!(is_url("  https://example.com/path?q=1  "));
    }

    #[test]
    fn test_non_urls() {
        assert!(!is_url("example.com"));
        assert!(!is_url("http://a b"));
        assert!(!is_url("https://"));
        assert!(!is_url("ftp://example.com"));
        assert!(!is_url("HTTPS://EXAMPLE.COM"));
        assert!(!is_url(""));
    }
}
