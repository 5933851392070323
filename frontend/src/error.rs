use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppError {
    #[error("element not found: {0}")]
    MissingElement(String),
    #[error("storage unavailable: {0}")]
    Storage(String),
    #[error("{0}")]
    Js(String),
    #[error("slide set must contain at least one slide")]
    EmptySlideSet,
    #[error("duplicate slide id: {0}")]
    DuplicateSlide(String),
    #[error("CSRF token missing")]
    MissingCsrfToken,
    #[error("Message too long. Maximum {max} characters.")]
    MessageTooLong { max: usize },
    #[error("Network error. Please try again.")]
    Network,
}

impl AppError {
    pub fn missing(what: impl Into<String>) -> Self {
        AppError::MissingElement(what.into())
    }
}

impl From<JsValue> for AppError {
    fn from(value: JsValue) -> Self {
        AppError::Js(describe_js(&value))
    }
}

/// Best-effort human readable text for a thrown JS value.
pub fn describe_js(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<web_sys::js_sys::Error>() {
        return String::from(err.message());
    }
    match value.as_string() {
        Some(text) if !text.is_empty() => text,
        _ => "An error occurred. Please try again.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn messages_match_what_users_see() {
        assert_eq!(
            AppError::MessageTooLong { max: 500 }.to_string(),
            "Message too long. Maximum 500 characters."
        );
        assert_eq!(AppError::MissingCsrfToken.to_string(), "CSRF token missing");
        assert_eq!(
            AppError::missing(".hero-section").to_string(),
            "element not found: .hero-section"
        );
    }
}
