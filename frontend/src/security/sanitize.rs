//! Escaping and URL/email checks for anything typed by a visitor.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

static EMAIL_LOCAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9!#$%&'*+/=?^_`{|}~.-]+$").expect("valid email local regex"));
static DOMAIN_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?$").expect("valid domain label regex"));
static DANGEROUS_SCHEME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(javascript|data|vbscript):").expect("valid scheme regex"));

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            '/' => out.push_str("&#x2F;"),
            '`' => out.push_str("&#x60;"),
            '=' => out.push_str("&#x3D;"),
            _ => out.push(c),
        }
    }
    out
}

/// Trim then escape. Missing input becomes the empty string.
pub fn sanitize_input(input: Option<&str>) -> String {
    match input {
        Some(text) if !text.is_empty() => escape_html(text.trim()),
        _ => String::new(),
    }
}

pub fn is_valid_email(email: &str) -> bool {
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || email.chars().count() > 254 || local.chars().count() > 64 {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    EMAIL_LOCAL.is_match(local) && labels.iter().all(|label| label.len() <= 63 && DOMAIN_LABEL.is_match(label))
}

/// Only absolute http(s) URLs count.
pub fn is_valid_url(candidate: &str) -> bool {
    Url::parse(candidate)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

/// Blanks out script-capable schemes; anything else passes through untouched.
pub fn sanitize_url(candidate: &str) -> String {
    if candidate.is_empty() || DANGEROUS_SCHEME.is_match(candidate.trim()) {
        return String::new();
    }
    candidate.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn escapes_every_special_character() {
        assert_eq!(
            escape_html(r#"<script>alert("XSS")</script>"#),
            "&lt;script&gt;alert(&quot;XSS&quot;)&lt;&#x2F;script&gt;"
        );
        assert_eq!(escape_html("a=`b` & 'c'"), "a&#x3D;&#x60;b&#x60; &amp; &#039;c&#039;");
    }

    #[test]
    fn sanitize_trims_before_escaping() {
        assert_eq!(sanitize_input(Some("  Hello <b>World</b> ")), "Hello &lt;b&gt;World&lt;&#x2F;b&gt;");
        assert_eq!(sanitize_input(Some("")), "");
        assert_eq!(sanitize_input(None), "");
    }

    #[test]
    fn email_rules() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last+tag@mail.example.co"));
        assert!(!is_valid_email("invalid.email"));
        assert!(!is_valid_email("a@b@example.com"));
        assert!(!is_valid_email("user@localhost"));
        assert!(!is_valid_email("user@-bad.com"));
        assert!(!is_valid_email("user@bad-.com"));
        assert!(!is_valid_email("user@exa mple.com"));
        assert!(!is_valid_email(&format!("{}@example.com", "a".repeat(65))));
        assert!(!is_valid_email(&format!("user@{}.com", "a".repeat(64))));
    }

    #[test]
    fn url_checks() {
        assert!(is_valid_url("https://acaistack.com/contact"));
        assert!(is_valid_url("http://localhost:8080"));
        assert!(!is_valid_url("ftp://example.com"));
        assert!(!is_valid_url("not a url"));

        assert_eq!(sanitize_url(" JavaScript:alert(1)"), "");
        assert_eq!(sanitize_url("data:text/html,hi"), "");
        assert_eq!(sanitize_url("vbscript:msgbox"), "");
        assert_eq!(sanitize_url("/pages/contact.html"), "/pages/contact.html");
    }
}
