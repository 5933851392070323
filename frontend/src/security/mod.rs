pub mod csrf;
pub mod sanitize;
