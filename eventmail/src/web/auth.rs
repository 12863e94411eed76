//! Webhook Basic-auth verification.
//!
//! Rocketlane webhook subscriptions are configured with a username and
//! password which arrive on every delivery as an HTTP Basic Authorization
//! header: `Basic base64(username:password)`.

use base64::Engine as _;

/// Verify a Basic Authorization header against the expected credentials.
///
/// Fails closed: a missing header, a non-Basic scheme, malformed base64,
/// non-UTF-8 credential bytes, or a missing `:` separator all return
/// `false`. Comparison is exact string equality on both fields.
pub fn verify_basic_auth(
    auth_header: Option<&str>,
    expected_username: &str,
    expected_password: &str,
) -> bool {
    let Some(header) = auth_header else {
        return false;
    };

    let Some(encoded) = header.strip_prefix("Basic ") else {
        return false;
    };

    let Ok(decoded) = base64::engine::general_purpose::STANDARD.decode(encoded.trim()) else {
        return false;
    };

    let Ok(credentials) = String::from_utf8(decoded) else {
        return false;
    };

    let Some((username, password)) = credentials.split_once(':') else {
        return false;
    };

    username == expected_username && password == expected_password
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic_header(username: &str, password: &str) -> String {
        let encoded = base64::engine::general_purpose::STANDARD
            .encode(format!("{}:{}", username, password));
        format!("Basic {}", encoded)
    }

    #[test]
    fn test_verify_missing_header() {
        assert!(!verify_basic_auth(None, "bot", "secret"));
    }

    #[test]
    fn test_verify_wrong_scheme() {
        assert!(!verify_basic_auth(Some("Bearer abc123"), "bot", "secret"));
        assert!(!verify_basic_auth(Some("basic abc123"), "bot", "secret"));
    }

    #[test]
    fn test_verify_malformed_base64() {
        assert!(!verify_basic_auth(Some("Basic !!!not-base64!!!"), "bot", "secret"));
    }

    #[test]
    fn test_verify_missing_separator() {
        let encoded = base64::engine::general_purpose::STANDARD.encode("no-colon-here");
        let header = format!("Basic {}", encoded);
        assert!(!verify_basic_auth(Some(&header), "bot", "secret"));
    }

    #[test]
    fn test_verify_wrong_username() {
        let header = basic_header("other", "secret");
        assert!(!verify_basic_auth(Some(&header), "bot", "secret"));
    }

    #[test]
    fn test_verify_wrong_password() {
        let header = basic_header("bot", "wrong");
        assert!(!verify_basic_auth(Some(&header), "bot", "secret"));
    }

    #[test]
    fn test_verify_case_sensitive() {
        let header = basic_header("Bot", "Secret");
        assert!(!verify_basic_auth(Some(&header), "bot", "secret"));
    }

    #[test]
    fn test_verify_valid_credentials() {
        let header = basic_header("bot", "secret");
        assert!(verify_basic_auth(Some(&header), "bot", "secret"));
    }

    #[test]
    fn test_verify_password_containing_colon() {
        let header = basic_header("bot", "se:cret");
        assert!(verify_basic_auth(Some(&header), "bot", "se:cret"));
    }

    #[test]
    fn test_verify_empty_credentials() {
        let header = basic_header("", "");
        assert!(!verify_basic_auth(Some(&header), "bot", "secret"));
        assert!(verify_basic_auth(Some(&header), "", ""));
    }
}
