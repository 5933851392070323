use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlElement, KeyboardEvent, ScrollBehavior, ScrollIntoViewOptions};
use yew::prelude::*;
use yew_hooks::prelude::*;
use yew_router::prelude::*;

use crate::components::notification::use_notifier;
use crate::components::theme_toggle::ThemeToggle;
use crate::config::{MOBILE_BREAKPOINT_PX, NAV_SCROLLED_THRESHOLD_PX, SECTION_ACTIVATION_OFFSET_PX};
use crate::dom;
use crate::Route;

/// In-page anchors that should scroll smoothly. Skip links and the top anchors keep browser behaviour.
pub fn scroll_target(href: &str) -> Option<&str> {
    match href {
        "#" | "#main-content" | "#home" => None,
        _ => href.strip_prefix('#').filter(|id| !id.is_empty()),
    }
}

/// Last section whose top is within the activation offset of the scroll position.
pub fn active_section<'a>(scroll_y: f64, sections: &[(&'a str, f64)]) -> Option<&'a str> {
    sections
        .iter()
        .filter(|(_, top)| scroll_y >= top - SECTION_ACTIVATION_OFFSET_PX)
        .last()
        .map(|(id, _)| *id)
}

/// Whether a nav anchor points at the section currently in view.
pub fn is_anchor_active(href: &str, active: Option<&str>) -> bool {
    matches!((scroll_target(href), active), (Some(id), Some(current)) if id == current)
}

fn section_offsets() -> Vec<(String, f64)> {
    let Ok(document) = dom::document() else {
        return Vec::new();
    };
    let Ok(list) = document.query_selector_all("section[id]") else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .map(|el| (el.id(), el.offset_top() as f64))
        .collect()
}

fn scroll_to(id: &str) -> bool {
    let Some(target) = dom::document().ok().and_then(|d| d.get_element_by_id(id)) else {
        log::debug!("no section #{} to scroll to", id);
        return false;
    };
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    target.scroll_into_view_with_scroll_into_view_options(&options);
    true
}

const ANCHORS: [(&str, &str); 4] = [
    ("#services", "Services"),
    ("#portfolio", "Portfolio"),
    ("#roi", "ROI"),
    ("#testimonials", "Testimonials"),
];

#[function_component(Nav)]
pub fn nav() -> Html {
    let notifier = use_notifier();
    let menu_open = use_state(|| false);
    let is_scrolled = use_state(|| false);
    let active = use_state(|| None::<String>);
    let toggle_ref = use_node_ref();

    let set_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |open: bool| {
            if *menu_open == open {
                return;
            }
            if let Err(e) = dom::toggle_body_class("menu-open", open) {
                log::debug!("menu-open class not applied: {}", e);
            }
            if let Some(notifier) = &notifier {
                notifier.announce(if open { "Navigation menu opened" } else { "Navigation menu closed" });
            }
            log::info!("Mobile menu {}", if open { "opened" } else { "closed" });
            menu_open.set(open);
        })
    };

    {
        let is_scrolled = is_scrolled.clone();
        let active = active.clone();
        use_event_with_window("scroll", move |_: Event| {
            let y = dom::scroll_y();
            let scrolled = y > NAV_SCROLLED_THRESHOLD_PX as f64;
            if *is_scrolled != scrolled {
                is_scrolled.set(scrolled);
            }
            let sections = section_offsets();
            let borrowed: Vec<(&str, f64)> = sections.iter().map(|(id, top)| (id.as_str(), *top)).collect();
            let current = active_section(y, &borrowed).map(str::to_string);
            if *active != current {
                active.set(current);
            }
        });
    }

    {
        let set_menu = set_menu.clone();
        let menu_open = menu_open.clone();
        let toggle_ref = toggle_ref.clone();
        use_event_with_window("keydown", move |e: KeyboardEvent| {
            if e.key() == "Escape" && *menu_open {
                set_menu.emit(false);
                if let Some(toggle) = toggle_ref.cast::<HtmlElement>() {
                    let _ = toggle.focus();
                }
            }
        });
    }

    {
        let set_menu = set_menu.clone();
        let menu_open = menu_open.clone();
        use_event_with_window("resize", move |_: Event| {
            if *menu_open && dom::inner_width() > MOBILE_BREAKPOINT_PX {
                set_menu.emit(false);
            }
        });
    }

    let toggle_menu = {
        let set_menu = set_menu.clone();
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            set_menu.emit(!*menu_open);
        })
    };
    let close_menu = {
        let set_menu = set_menu.clone();
        Callback::from(move |_: MouseEvent| set_menu.emit(false))
    };

    let anchor = |href: &'static str, label: &'static str| {
        let is_active = is_anchor_active(href, active.as_deref());
        let set_menu = set_menu.clone();
        let active = active.clone();
        let onclick = Callback::from(move |e: MouseEvent| {
            set_menu.emit(false);
            if let Some(id) = scroll_target(href) {
                if scroll_to(id) {
                    e.prevent_default();
                    active.set(Some(id.to_string()));
                }
            }
        });
        html! {
            <li>
                <a href={href} class={classes!("navbar-link", is_active.then_some("active"))} {onclick}>{label}</a>
            </li>
        }
    };

    html! {
        <header class={classes!("navbar", (*is_scrolled).then(|| "scrolled"))} role="banner">
            <div class="navbar-content container">
                <Link<Route> to={Route::Home} classes="navbar-brand">
                    <img src="/assets/favicon.svg" alt="AcaiStack Logo" class="brand-logo" />
                    <span class="brand-text">{"AcaiStack"}</span>
                </Link<Route>>

                <button
                    id="mobileMenuToggle"
                    ref={toggle_ref}
                    class="mobile-menu-toggle"
                    type="button"
                    aria-label="Toggle navigation menu"
                    aria-expanded={menu_open.to_string()}
                    aria-controls="navbarMenu"
                    onclick={toggle_menu}
                >
                    <span class="hamburger-line"></span>
                    <span class="hamburger-line"></span>
                    <span class="hamburger-line"></span>
                </button>

                <nav role="navigation" aria-label="Main navigation">
                    <ul id="navbarMenu" class={classes!("navbar-menu", (*menu_open).then(|| "open"))}>
                        <li onclick={close_menu.clone()}>
                            <Link<Route> to={Route::Home} classes="navbar-link">{"Home"}</Link<Route>>
                        </li>
                        { for ANCHORS.iter().map(|&(href, label)| anchor(href, label)) }
                        <li onclick={close_menu.clone()}>
                            <Link<Route> to={Route::Faq} classes="navbar-link">{"FAQ"}</Link<Route>>
                        </li>
                        <li><ThemeToggle /></li>
                        <li onclick={close_menu.clone()}>
                            <Link<Route> to={Route::Contact} classes="navbar-cta">{"Get Started"}</Link<Route>>
                        </li>
                    </ul>
                </nav>
            </div>
            <div
                class={classes!("mobile-menu-overlay", (*menu_open).then(|| "active"))}
                aria-hidden="true"
                onclick={close_menu}
            ></div>
        </header>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn skip_and_top_anchors_are_not_intercepted() {
        assert_eq!(scroll_target("#"), None);
        assert_eq!(scroll_target("#main-content"), None);
        assert_eq!(scroll_target("#home"), None);
        assert_eq!(scroll_target("/contact"), None);
        assert_eq!(scroll_target("#services"), Some("services"));
    }

    #[test]
    fn active_section_is_last_one_reached() {
        let sections = [("hero", 0.0), ("services", 800.0), ("portfolio", 1600.0)];
        assert_eq!(active_section(0.0, &sections), Some("hero"));
        assert_eq!(active_section(599.0, &sections), Some("hero"));
        assert_eq!(active_section(600.0, &sections), Some("services"));
        assert_eq!(active_section(5000.0, &sections), Some("portfolio"));
        assert_eq!(active_section(0.0, &[("late", 500.0)]), None);
    }

    #[test]
    fn anchor_highlight_follows_active_section() {
        assert!(is_anchor_active("#services", Some("services")));
        assert!(!is_anchor_active("#services", Some("portfolio")));
        assert!(!is_anchor_active("#services", None));
        // skip links never light up even when their id is active
        assert!(!is_anchor_active("#main-content", Some("main-content")));
    }
}
