use wasm_bindgen::JsCast;
use web_sys::HtmlMetaElement;

use crate::config::CSRF_TOKEN_NAME;
use crate::dom;
use crate::error::AppError;

const TOKEN_BYTES: usize = 32;

/// Token issued by the server through `<meta name="csrf-token">`, if any.
fn meta_token() -> Option<String> {
    let selector = format!("meta[name=\"{}\"]", CSRF_TOKEN_NAME);
    dom::document()
        .ok()?
        .query_selector(&selector)
        .ok()
        .flatten()?
        .dyn_into::<HtmlMetaElement>()
        .ok()
        .map(|meta| meta.content())
}

fn random_bytes() -> Option<[u8; TOKEN_BYTES]> {
    let crypto = web_sys::window()?.crypto().ok()?;
    let mut bytes = [0u8; TOKEN_BYTES];
    crypto.get_random_values_with_u8_array(&mut bytes).ok()?;
    Some(bytes)
}

/// Prefers the server token, otherwise hex-encodes fresh random bytes.
pub fn token_from(meta: Option<String>, random: impl FnOnce() -> Option<[u8; TOKEN_BYTES]>) -> Result<String, AppError> {
    if let Some(token) = meta.filter(|t| !t.trim().is_empty()) {
        return Ok(token);
    }
    random().map(hex::encode).ok_or(AppError::MissingCsrfToken)
}

pub fn generate_token() -> Result<String, AppError> {
    token_from(meta_token(), random_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn meta_token_wins() {
        let token = token_from(Some("server-issued".into()), || panic!("should not generate")).unwrap();
        assert_eq!(token, "server-issued");
    }

    #[test]
    fn random_token_is_64_hex_chars() {
        let token = token_from(None, || Some([0xab; TOKEN_BYTES])).unwrap();
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(token.starts_with("abab"));
    }

    #[test]
    fn blank_meta_falls_back_and_no_entropy_is_an_error() {
        assert_eq!(token_from(Some("  ".into()), || None), Err(AppError::MissingCsrfToken));
    }
}
