//! URL validation and normalization for the link creation path.
//!
//! Validation happens once, at creation time; the redirect path never
//! re-validates stored URLs. Normalization keeps stored URLs canonical:
//! lowercase host, default ports stripped, fragments removed.

use url::Url;

/// Errors that can occur during URL validation.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Scheme '{0}' is not allowed")]
    DisallowedScheme(String),

    #[error("Failed to normalize URL: {0}")]
    NormalizationFailed(String),
}

/// Validates an absolute URL against the allowed scheme list and returns its
/// normalized form.
///
/// # Normalization Rules
///
/// 1. **Scheme**: must be in `allowed_schemes` (matched case-insensitively)
/// 2. **Hostname**: converted to lowercase
/// 3. **Default ports**: removed (80 for HTTP, 443 for HTTPS)
/// 4. **Fragments**: removed (e.g., `#section`)
/// 5. **Query parameters**: preserved as-is
/// 6. **Path**: preserved with case sensitivity
///
/// # Security
///
/// Rejects dangerous schemes like `javascript:`, `data:`, `file:` as long as
/// they are not in the allow-list (they are not, by default).
///
/// # Errors
///
/// Returns [`UrlValidationError::InvalidFormat`] for malformed or relative
/// URLs and [`UrlValidationError::DisallowedScheme`] for schemes outside the
/// allow-list.
pub fn validate_url(input: &str, allowed_schemes: &[String]) -> Result<String, UrlValidationError> {
    let mut url =
        Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    if !allowed_schemes
        .iter()
        .any(|s| s.eq_ignore_ascii_case(url.scheme()))
    {
        return Err(UrlValidationError::DisallowedScheme(
            url.scheme().to_string(),
        ));
    }

    if let Some(host) = url.host_str() {
        let host_lowercase = host.to_ascii_lowercase();
        url.set_host(Some(&host_lowercase)).map_err(|_| {
            UrlValidationError::NormalizationFailed("Failed to set normalized host".to_string())
        })?;
    }

    url.set_fragment(None);

    let is_default_port = matches!(
        (url.scheme(), url.port()),
        ("http", Some(80)) | ("https", Some(443))
    );
    if is_default_port {
        url.set_port(None).map_err(|_| {
            UrlValidationError::NormalizationFailed("Failed to remove default port".to_string())
        })?;
    }

    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http_https() -> Vec<String> {
        vec!["http".to_string(), "https".to_string()]
    }

    #[test]
    fn test_validate_simple_http() {
        let result = validate_url("http://example.com", &http_https());
        assert_eq!(result.unwrap(), "http://example.com/");
    }

    #[test]
    fn test_validate_simple_https() {
        let result = validate_url("https://example.com", &http_https());
        assert_eq!(result.unwrap(), "https://example.com/");
    }

    #[test]
    fn test_validate_uppercase_host() {
        let result = validate_url("https://EXAMPLE.COM/path", &http_https());
        assert_eq!(result.unwrap(), "https://example.com/path");
    }

    #[test]
    fn test_validate_remove_default_ports() {
        assert_eq!(
            validate_url("http://example.com:80/path", &http_https()).unwrap(),
            "http://example.com/path"
        );
        assert_eq!(
            validate_url("https://example.com:443/path", &http_https()).unwrap(),
            "https://example.com/path"
        );
    }

    #[test]
    fn test_validate_keep_custom_port() {
        let result = validate_url("http://example.com:8080/path", &http_https());
        assert_eq!(result.unwrap(), "http://example.com:8080/path");
    }

    #[test]
    fn test_validate_remove_fragment() {
        let result = validate_url("https://example.com/page#section", &http_https());
        assert_eq!(result.unwrap(), "https://example.com/page");
    }

    #[test]
    fn test_validate_preserve_query_params() {
        let result = validate_url("https://example.com/search?q=rust&lang=en", &http_https());
        assert_eq!(result.unwrap(), "https://example.com/search?q=rust&lang=en");
    }

    #[test]
    fn test_validate_complex_url() {
        let result = validate_url("HTTPS://EXAMPLE.COM:443/Path?key=VALUE#anchor", &http_https());
        assert_eq!(result.unwrap(), "https://example.com/Path?key=VALUE");
    }

    #[test]
    fn test_validate_not_a_url() {
        let result = validate_url("not-a-url", &http_https());
        assert!(matches!(
            result.unwrap_err(),
            UrlValidationError::InvalidFormat(_)
        ));
    }

    #[test]
    fn test_validate_relative_url() {
        let result = validate_url("/relative/path", &http_https());
        assert!(matches!(
            result.unwrap_err(),
            UrlValidationError::InvalidFormat(_)
        ));
    }

    #[test]
    fn test_validate_empty_string() {
        let result = validate_url("", &http_https());
        assert!(matches!(
            result.unwrap_err(),
            UrlValidationError::InvalidFormat(_)
        ));
    }

    #[test]
    fn test_validate_missing_scheme() {
        let result = validate_url("example.com", &http_https());
        assert!(matches!(
            result.unwrap_err(),
            UrlValidationError::InvalidFormat(_)
        ));
    }

    #[test]
    fn test_validate_rejects_dangerous_schemes() {
        for input in [
            "javascript:alert('xss')",
            "data:text/plain,Hello",
            "file:///etc/passwd",
            "ftp://example.com/file.txt",
            "mailto:test@example.com",
        ] {
            let result = validate_url(input, &http_https());
            assert!(
                matches!(result, Err(UrlValidationError::DisallowedScheme(_))),
                "{} should be rejected",
                input
            );
        }
    }

    #[test]
    fn test_validate_custom_scheme_allow_list() {
        let schemes = vec!["ftp".to_string()];
        assert!(validate_url("ftp://example.com/file.txt", &schemes).is_ok());
        assert!(matches!(
            validate_url("https://example.com", &schemes),
            Err(UrlValidationError::DisallowedScheme(_))
        ));
    }

    #[test]
    fn test_validate_scheme_case_insensitive() {
        let result = validate_url("HTTPS://example.com", &http_https());
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_very_long_url() {
        let long_path = "a".repeat(2000);
        let url = format!("https://example.com/{}", long_path);
        let result = validate_url(&url, &http_https());
        assert!(result.unwrap().len() > 2000);
    }

    #[test]
    fn test_validate_encoded_characters() {
        let result = validate_url("https://example.com/path%20with%20spaces", &http_https());
        assert!(result.unwrap().contains("path%20with%20spaces"));
    }
}
