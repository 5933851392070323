use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::MediaQueryListEvent;
use yew::prelude::*;

use crate::components::notification::use_notifier;
use crate::config::DARK_MODE_STORAGE_KEY;
use crate::dom;
use crate::error::AppError;

const DARK_QUERY: &str = "(prefers-color-scheme: dark)";

/// Somewhere to keep a string preference between visits.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError>;
    fn set(&self, key: &str, value: &str) -> Result<(), AppError>;
}

/// `window.localStorage`.
pub struct LocalStore;

impl PreferenceStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        dom::local_storage()?
            .get_item(key)
            .map_err(|e| AppError::Storage(crate::error::describe_js(&e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        dom::local_storage()?
            .set_item(key, value)
            .map_err(|e| AppError::Storage(crate::error::describe_js(&e)))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DarkMode {
    pub enabled: bool,
}

impl DarkMode {
    /// Stored `"true"`/`"false"` wins; otherwise follow the OS.
    pub fn resolve_initial(store: &dyn PreferenceStore, system_dark: bool) -> Self {
        let enabled = match store.get(DARK_MODE_STORAGE_KEY) {
            Ok(Some(saved)) => saved == "true",
            Ok(None) => system_dark,
            Err(e) => {
                log::warn!("Could not read dark mode preference: {}", e);
                system_dark
            }
        };
        Self { enabled }
    }

    /// Flips the mode and persists it. A failed write only logs.
    pub fn toggle(self, store: &dyn PreferenceStore) -> Self {
        let next = Self {
            enabled: !self.enabled,
        };
        if let Err(e) = store.set(DARK_MODE_STORAGE_KEY, if next.enabled { "true" } else { "false" }) {
            log::warn!("Could not save dark mode preference: {}", e);
        }
        next
    }

    /// OS scheme changes only matter while the user never chose explicitly.
    pub fn on_system_change(store: &dyn PreferenceStore, system_dark: bool) -> Option<Self> {
        match store.get(DARK_MODE_STORAGE_KEY) {
            Ok(None) => Some(Self {
                enabled: system_dark,
            }),
            _ => None,
        }
    }

    pub fn scheme(self) -> &'static str {
        if self.enabled {
            "dark"
        } else {
            "light"
        }
    }

    pub fn log_context(self) -> serde_json::Value {
        serde_json::json!({ "isEnabled": self.enabled })
    }

    pub fn announcement(self) -> &'static str {
        if self.enabled {
            "Dark mode enabled"
        } else {
            "Light mode enabled"
        }
    }
}

fn apply(mode: DarkMode) {
    if let Err(e) = dom::set_root_attribute("data-color-scheme", mode.scheme()) {
        log::warn!("could not apply color scheme: {}", e);
    }
}

#[function_component(ThemeToggle)]
pub fn theme_toggle() -> Html {
    let notifier = use_notifier();
    let mode = use_state(|| DarkMode::resolve_initial(&LocalStore, dom::media_matches(DARK_QUERY)));

    use_effect_with_deps(
        |current: &DarkMode| {
            apply(*current);
            log::debug!("color scheme applied: {}", current.scheme());
            || ()
        },
        *mode,
    );

    {
        let mode = mode.clone();
        use_effect_with_deps(
            move |_| {
                let initial = *mode;
                let query = web_sys::window().and_then(|w| w.match_media(DARK_QUERY).ok().flatten());
                let listener = Closure::wrap(Box::new(move |e: MediaQueryListEvent| {
                    if let Some(next) = DarkMode::on_system_change(&LocalStore, e.matches()) {
                        mode.set(next);
                    }
                }) as Box<dyn FnMut(MediaQueryListEvent)>);
                if let Some(query) = &query {
                    let _ = query.add_event_listener_with_callback("change", listener.as_ref().unchecked_ref());
                }
                log::info!("Dark mode initialized: {}", initial.log_context());
                move || {
                    if let Some(query) = query {
                        let _ = query.remove_event_listener_with_callback("change", listener.as_ref().unchecked_ref());
                    }
                }
            },
            (),
        );
    }

    let onclick = {
        let mode = mode.clone();
        Callback::from(move |_: MouseEvent| {
            let next = mode.toggle(&LocalStore);
            if let Some(notifier) = &notifier {
                notifier.announce(next.announcement());
            }
            log::info!("Dark mode toggled: {}", next.log_context());
            mode.set(next);
        })
    };

    html! {
        <button
            id="bwModeToggle"
            class="bw-mode-toggle"
            aria-label="Toggle dark mode"
            aria-pressed={if mode.enabled { "true" } else { "false" }}
            {onclick}
        >
            <span class="bw-mode-icon" aria-hidden="true">{ if mode.enabled { "☀" } else { "☾" } }</span>
        </button>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryStore {
        items: RefCell<HashMap<String, String>>,
        fail_writes: bool,
    }

    impl PreferenceStore for MemoryStore {
        fn get(&self, key: &str) -> Result<Option<String>, AppError> {
            Ok(self.items.borrow().get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
            if self.fail_writes {
                return Err(AppError::Storage("quota exceeded".to_string()));
            }
            self.items.borrow_mut().insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    #[test]
    fn no_preference_follows_system_dark_then_toggle_persists() {
        let store = MemoryStore::default();
        let mode = DarkMode::resolve_initial(&store, true);
        assert!(mode.enabled);
        assert_eq!(mode.scheme(), "dark");

        let mode = mode.toggle(&store);
        assert!(!mode.enabled);
        assert_eq!(store.get(DARK_MODE_STORAGE_KEY).unwrap(), Some("false".to_string()));

        let mode = mode.toggle(&store);
        assert!(mode.enabled);
        assert_eq!(store.get(DARK_MODE_STORAGE_KEY).unwrap(), Some("true".to_string()));
    }

    #[test]
    fn stored_preference_beats_system() {
        let store = MemoryStore::default();
        store.set(DARK_MODE_STORAGE_KEY, "false").unwrap();
        assert!(!DarkMode::resolve_initial(&store, true).enabled);
        store.set(DARK_MODE_STORAGE_KEY, "true").unwrap();
        assert!(DarkMode::resolve_initial(&store, false).enabled);
    }

    #[test]
    fn system_changes_ignored_once_user_chose() {
        let store = MemoryStore::default();
        let mode = DarkMode::resolve_initial(&store, false);
        assert_eq!(DarkMode::on_system_change(&store, true), Some(DarkMode { enabled: true }));

        let mode = mode.toggle(&store);
        assert!(mode.enabled);
        assert_eq!(DarkMode::on_system_change(&store, false), None);
    }

    #[test]
    fn log_context_reports_current_mode() {
        let store = MemoryStore::default();
        let initial = DarkMode::resolve_initial(&store, true);
        assert_eq!(initial.log_context(), serde_json::json!({ "isEnabled": true }));
        assert_eq!(initial.toggle(&store).log_context()["isEnabled"], false);
    }

    #[test]
    fn failed_write_still_flips_mode() {
        let store = MemoryStore {
            fail_writes: true,
            ..Default::default()
        };
        let mode = DarkMode { enabled: false }.toggle(&store);
        assert!(mode.enabled);
        assert_eq!(mode.announcement(), "Dark mode enabled");
        assert_eq!(store.get(DARK_MODE_STORAGE_KEY).unwrap(), None);
    }
}
