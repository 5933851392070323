//! Small helpers over `web_sys` shared by the widgets.

use web_sys::{window, Document, Element, HtmlElement, Storage};

use crate::error::AppError;

pub fn document() -> Result<Document, AppError> {
    window()
        .and_then(|w| w.document())
        .ok_or_else(|| AppError::missing("document"))
}

pub fn root_element() -> Result<Element, AppError> {
    document()?
        .document_element()
        .ok_or_else(|| AppError::missing("<html>"))
}

pub fn body() -> Result<HtmlElement, AppError> {
    document()?.body().ok_or_else(|| AppError::missing("<body>"))
}

/// Writes an attribute on `<html>`, e.g. `data-color-scheme`.
pub fn set_root_attribute(name: &str, value: &str) -> Result<(), AppError> {
    root_element()?.set_attribute(name, value)?;
    Ok(())
}

pub fn toggle_body_class(class: &str, on: bool) -> Result<(), AppError> {
    let list = body()?.class_list();
    if on {
        list.add_1(class)?;
    } else {
        list.remove_1(class)?;
    }
    Ok(())
}

/// Whether a media query currently matches. Unsupported queries count as false.
pub fn media_matches(query: &str) -> bool {
    window()
        .and_then(|w| w.match_media(query).ok().flatten())
        .map(|mql| mql.matches())
        .unwrap_or(false)
}

pub fn prefers_reduced_motion() -> bool {
    media_matches("(prefers-reduced-motion: reduce)")
}

pub fn local_storage() -> Result<Storage, AppError> {
    window()
        .ok_or_else(|| AppError::missing("window"))?
        .local_storage()
        .map_err(|e| AppError::Storage(crate::error::describe_js(&e)))?
        .ok_or_else(|| AppError::Storage("localStorage disabled".to_string()))
}

pub fn inner_width() -> f64 {
    window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

pub fn scroll_y() -> f64 {
    window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0)
}

pub fn now_ms() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

/// Sets a list of inline style properties on an element.
pub fn set_styles(el: &HtmlElement, props: &[(&str, String)]) {
    let style = el.style();
    for (name, value) in props {
        let _ = style.set_property(name, value);
    }
}

pub fn clear_styles(el: &HtmlElement, names: &[&str]) {
    let style = el.style();
    for name in names {
        let _ = style.remove_property(name);
    }
}
