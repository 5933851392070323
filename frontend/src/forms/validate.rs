use once_cell::sync::Lazy;
use regex::Regex;

use crate::security::sanitize;

static PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+]?[(]?[0-9]{1,4}[)]?[-\s.]?[(]?[0-9]{1,4}[)]?[-\s.]?[0-9]{1,9}$").expect("valid phone regex")
});

pub fn required(value: &str) -> bool {
    !value.trim().is_empty()
}

pub fn min_length(value: &str, min: usize) -> bool {
    value.trim().chars().count() >= min
}

/// Empty values pass; only over-long input fails.
pub fn max_length(value: &str, max: usize) -> bool {
    value.chars().count() <= max
}

pub fn email(value: &str) -> bool {
    !value.is_empty() && sanitize::is_valid_email(value)
}

pub fn phone(value: &str) -> bool {
    !value.is_empty() && PHONE.is_match(value.trim())
}

pub fn url(value: &str) -> bool {
    !value.is_empty() && sanitize::is_valid_url(value.trim())
}

/// Matches against a caller-supplied pattern. A pattern that does not compile never matches.
pub fn pattern(value: &str, pattern: &str) -> bool {
    if value.is_empty() || pattern.is_empty() {
        return false;
    }
    match Regex::new(pattern) {
        Ok(re) => re.is_match(value),
        Err(e) => {
            log::error!("Invalid regex pattern: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_ignores_whitespace() {
        assert!(required(" x "));
        assert!(!required("   "));
        assert!(!required(""));
    }

    #[test]
    fn length_bounds() {
        assert!(min_length(" ab ", 2));
        assert!(!min_length(" a ", 2));
        assert!(max_length("", 3));
        assert!(max_length("abc", 3));
        assert!(!max_length("abcd", 3));
    }

    #[test]
    fn phone_formats() {
        assert!(phone("+49 170 1234567"));
        assert!(phone("(030) 123-4567"));
        assert!(phone("0301234567"));
        assert!(!phone("call me maybe"));
        assert!(!phone(""));
    }

    #[test]
    fn pattern_and_url() {
        assert!(pattern("AB-12", r"^[A-Z]{2}-\d+$"));
        assert!(!pattern("ab-12", r"^[A-Z]{2}-\d+$"));
        assert!(!pattern("anything", "("));
        assert!(url(" https://example.com "));
        assert!(!url("example.com"));
        assert!(email("user@example.com"));
        assert!(!email(""));
    }
}
