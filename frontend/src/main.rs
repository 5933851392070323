use yew::prelude::*;
use yew_router::prelude::*;
use log::info;
use web_sys::{ErrorEvent, PromiseRejectionEvent};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

mod config;
mod dom;
mod error;
mod forms;
mod security;
mod slider;
mod components {
    pub mod carousel;
    pub mod chat_widget;
    pub mod contact_form;
    pub mod footer;
    pub mod nav;
    pub mod notification;
    pub mod roi_calculator;
    pub mod scroll_reveal;
    pub mod theme_toggle;
}
mod pages {
    pub mod contact;
    pub mod faq;
    pub mod home;
    pub mod not_found;
}

use components::{
    chat_widget::ChatWidget,
    footer::Footer,
    nav::Nav,
    notification::{use_notifier, NotificationProvider},
};
use error::{describe_js, AppError};
use pages::{contact::Contact, faq::Faq, home::Home, not_found::NotFound};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/faq")]
    Faq,
    #[at("/contact")]
    Contact,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering Home page");
            html! { <Home /> }
        }
        Route::Faq => {
            info!("Rendering FAQ page");
            html! { <Faq /> }
        }
        Route::Contact => {
            info!("Rendering Contact page");
            html! { <Contact /> }
        }
        Route::NotFound => {
            info!("Rendering 404 page");
            html! { <NotFound /> }
        }
    }
}

/// Routes uncaught script errors and rejected promises into the toast stack.
#[function_component(GlobalErrorBridge)]
fn global_error_bridge() -> Html {
    let notifier = use_notifier();

    use_effect_with_deps(
        move |_| {
            let window = web_sys::window();

            let on_error = {
                let notifier = notifier.clone();
                Closure::wrap(Box::new(move |e: ErrorEvent| {
                    let err = AppError::Js(if e.message().is_empty() {
                        describe_js(&e.error())
                    } else {
                        e.message()
                    });
                    match &notifier {
                        Some(notifier) => notifier.report(&err, "window"),
                        None => log::error!("Error in window: {}", err),
                    }
                }) as Box<dyn FnMut(ErrorEvent)>)
            };
            let on_rejection = {
                let notifier = notifier.clone();
                Closure::wrap(Box::new(move |e: PromiseRejectionEvent| {
                    let err = AppError::Js(describe_js(&e.reason()));
                    match &notifier {
                        Some(notifier) => notifier.report(&err, "promise"),
                        None => log::error!("Error in promise: {}", err),
                    }
                }) as Box<dyn FnMut(PromiseRejectionEvent)>)
            };

            if let Some(window) = &window {
                let _ = window.add_event_listener_with_callback("error", on_error.as_ref().unchecked_ref());
                let _ = window.add_event_listener_with_callback("unhandledrejection", on_rejection.as_ref().unchecked_ref());
            }

            if let Some(notifier) = &notifier {
                notifier.announce("AcaiStack website loaded. Welcome!");
            }
            // performance.now() counts from navigation start
            info!("AcaiStack Application initialized in {}ms", dom::now_ms().round());

            move || {
                if let Some(window) = window {
                    let _ = window.remove_event_listener_with_callback("error", on_error.as_ref().unchecked_ref());
                    let _ = window.remove_event_listener_with_callback("unhandledrejection", on_rejection.as_ref().unchecked_ref());
                }
            }
        },
        (),
    );

    html! {}
}

#[function_component]
fn App() -> Html {
    html! {
        <BrowserRouter>
            <NotificationProvider>
                <GlobalErrorBridge />
                <a href="#main-content" class="skip-link">{"Skip to content"}</a>
                <Nav />
                <Switch<Route> render={switch} />
                <Footer />
                <ChatWidget />
            </NotificationProvider>
        </BrowserRouter>
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    if let Err(e) = console_log::init_with_level(config::log_level()) {
        gloo_console::error!(format!("error initializing log: {}", e));
    }

    info!("Initializing AcaiStack Application v{}", config::APP_VERSION);
    yew::Renderer::<App>::new().render();
}
