use log::Level;

pub const APP_VERSION: &str = "2.0.0";

/// Delay before the canned chat reply shows up.
pub const CHAT_RESPONSE_DELAY_MS: u32 = 500;
pub const CHAT_MAX_MESSAGE_LEN: usize = 500;

pub const NOTIFICATION_DURATION_MS: u32 = 5000;
pub const ANNOUNCEMENT_DURATION_MS: u32 = 1000;

pub const CONTACT_MESSAGE_MAX_LEN: usize = 2000;
pub const FORM_SUBMIT_DELAY_MS: u32 = 1500;
pub const FORM_BUTTON_RESET_MS: u32 = 2000;

pub const HERO_AUTOPLAY_DELAY_MS: u32 = 6000;
pub const TESTIMONIAL_AUTOPLAY_DELAY_MS: u32 = 5000;
pub const MIN_SWIPE_DISTANCE_PX: f64 = 50.0;
pub const RESIZE_DEBOUNCE_MS: u32 = 100;

pub const MOBILE_BREAKPOINT_PX: f64 = 768.0;
pub const NAV_SCROLLED_THRESHOLD_PX: i32 = 600;
pub const SECTION_ACTIVATION_OFFSET_PX: f64 = 200.0;

pub const DARK_MODE_STORAGE_KEY: &str = "acaistack-dark-mode";
pub const CSRF_TOKEN_NAME: &str = "csrf-token";

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}
