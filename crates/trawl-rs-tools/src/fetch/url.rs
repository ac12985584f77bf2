//! Pre-flight URL validation for the fetch client.

use crate::UrlError;
use url::{ParseError, Url};

/// Accept only absolute `http`/`https` URLs that name a host.
pub fn validate_url(raw: &str) -> Result<Url, UrlError> {
    let parsed = Url::parse(raw.trim()).map_err(|err| match err {
        ParseError::RelativeUrlWithoutBase | ParseError::EmptyHost => UrlError::MissingDomain,
        other => UrlError::Malformed(other.to_string()),
    })?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(UrlError::UnsupportedScheme(other.to_string())),
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(UrlError::MissingDomain);
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::validate_url;
    use crate::UrlError;
    use pretty_assertions::assert_eq;

    #[test]
    fn accepts_http_and_https() {
        let url = validate_url("https://example.com/docs?q=1").expect("valid");
        assert_eq!(url.host_str(), Some("example.com"));
        assert!(validate_url("http://localhost:8080").is_ok());
    }

    #[test]
    fn rejects_other_schemes() {
        assert_eq!(
            validate_url("ftp://example.com").expect_err("scheme"),
            UrlError::UnsupportedScheme("ftp".to_string())
        );
        assert_eq!(
            validate_url("file:///etc/passwd").expect_err("scheme"),
            UrlError::UnsupportedScheme("file".to_string())
        );
        assert!(matches!(
            validate_url("javascript:alert(1)"),
            Err(UrlError::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn rejects_missing_domain() {
        assert_eq!(
            validate_url("not-a-url").expect_err("domain"),
            UrlError::MissingDomain
        );
        assert_eq!(
            validate_url("http://").expect_err("domain"),
            UrlError::MissingDomain
        );
    }

    #[test]
    fn rejects_malformed_hosts() {
        assert!(matches!(
            validate_url("http://exa mple.com"),
            Err(UrlError::Malformed(_))
        ));
    }
}
