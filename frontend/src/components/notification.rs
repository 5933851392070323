use std::rc::Rc;

use gloo_timers::callback::Timeout;
use yew::prelude::*;

use crate::config::{ANNOUNCEMENT_DURATION_MS, NOTIFICATION_DURATION_MS};
use crate::error::AppError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Success,
    Warning,
    Error,
}

impl Tone {
    fn class(self) -> &'static str {
        match self {
            Tone::Success => "alert-success",
            Tone::Warning => "alert-warning",
            Tone::Error => "alert-error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub tone: Tone,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Announcement {
    pub id: u64,
    pub message: String,
}

pub enum NoticeAction {
    Push(String, Tone),
    Dismiss(u64),
    Announce(String),
    Expire(u64),
}

/// Toasts on screen plus live-region messages for screen readers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Notices {
    next_id: u64,
    pub toasts: Vec<Toast>,
    pub announcements: Vec<Announcement>,
}

impl Notices {
    pub fn apply(&mut self, action: NoticeAction) {
        match action {
            NoticeAction::Push(message, tone) => {
                self.next_id += 1;
                // newest first, like inserting at the top of <body>
                self.toasts.insert(
                    0,
                    Toast {
                        id: self.next_id,
                        message,
                        tone,
                    },
                );
            }
            NoticeAction::Dismiss(id) => self.toasts.retain(|t| t.id != id),
            NoticeAction::Announce(message) => {
                self.next_id += 1;
                self.announcements.push(Announcement {
                    id: self.next_id,
                    message,
                });
            }
            NoticeAction::Expire(id) => self.announcements.retain(|a| a.id != id),
        }
    }
}

impl Reducible for Notices {
    type Action = NoticeAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        Rc::new(next)
    }
}

/// Handle shared through context by every widget that needs to talk to the user.
#[derive(Clone, PartialEq)]
pub struct Notifier {
    dispatch: Callback<NoticeAction>,
}

impl Notifier {
    pub fn notify(&self, message: impl Into<String>, tone: Tone) {
        self.dispatch.emit(NoticeAction::Push(message.into(), tone));
    }

    pub fn announce(&self, message: impl Into<String>) {
        self.dispatch.emit(NoticeAction::Announce(message.into()));
    }

    /// Logs the failure with its context and raises an error toast.
    pub fn report(&self, error: &AppError, context: &str) {
        log::error!("Error in {}: {}", context, error);
        self.notify(error.to_string(), Tone::Error);
    }
}

#[hook]
pub fn use_notifier() -> Option<Notifier> {
    use_context::<Notifier>()
}

#[derive(Properties, PartialEq)]
pub struct NotificationProviderProps {
    #[prop_or_default]
    pub children: Children,
}

#[function_component(NotificationProvider)]
pub fn notification_provider(props: &NotificationProviderProps) -> Html {
    let notices = use_reducer(Notices::default);
    let notifier = {
        let notices = notices.clone();
        Notifier {
            dispatch: Callback::from(move |action| notices.dispatch(action)),
        }
    };
    let on_dismiss = {
        let notices = notices.clone();
        Callback::from(move |id| notices.dispatch(NoticeAction::Dismiss(id)))
    };
    let on_expire = {
        let notices = notices.clone();
        Callback::from(move |id| notices.dispatch(NoticeAction::Expire(id)))
    };

    html! {
        <ContextProvider<Notifier> context={notifier}>
            <div class="alert-stack">
                { for notices.toasts.iter().map(|toast| html! {
                    <ToastView key={toast.id} toast={toast.clone()} on_dismiss={on_dismiss.clone()} />
                }) }
            </div>
            { props.children.clone() }
            { for notices.announcements.iter().map(|a| html! {
                <LiveRegion key={a.id} announcement={a.clone()} on_expire={on_expire.clone()} />
            }) }
            <style>{NOTIFICATION_CSS}</style>
        </ContextProvider<Notifier>>
    }
}

#[derive(Properties, PartialEq)]
struct ToastViewProps {
    toast: Toast,
    on_dismiss: Callback<u64>,
}

#[function_component(ToastView)]
fn toast_view(props: &ToastViewProps) -> Html {
    {
        let id = props.toast.id;
        let on_dismiss = props.on_dismiss.clone();
        use_effect_with_deps(
            move |_| {
                let timeout = Timeout::new(NOTIFICATION_DURATION_MS, move || on_dismiss.emit(id));
                move || drop(timeout)
            },
            id,
        );
    }

    html! {
        <div class={classes!("alert", props.toast.tone.class())} role="alert">
            { &props.toast.message }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct LiveRegionProps {
    announcement: Announcement,
    on_expire: Callback<u64>,
}

#[function_component(LiveRegion)]
fn live_region(props: &LiveRegionProps) -> Html {
    {
        let id = props.announcement.id;
        let on_expire = props.on_expire.clone();
        use_effect_with_deps(
            move |_| {
                let timeout = Timeout::new(ANNOUNCEMENT_DURATION_MS, move || on_expire.emit(id));
                move || drop(timeout)
            },
            id,
        );
    }

    html! {
        <div class="sr-only" role="status" aria-live="polite">
            { &props.announcement.message }
        </div>
    }
}

const NOTIFICATION_CSS: &str = r#"
.alert-stack { position: fixed; top: 1rem; right: 1rem; z-index: 2000; display: flex; flex-direction: column; gap: 0.5rem; max-width: 360px; }
.alert { padding: 0.875rem 1.25rem; border-radius: 8px; font-size: 0.95rem; box-shadow: 0 8px 24px rgba(0, 0, 0, 0.15); }
.alert-success { background: #e6f6ec; color: #1d5b34; }
.alert-warning { background: #fff6e0; color: #6b4b00; }
.alert-error { background: #fdeaea; color: #7a1f1f; }
.sr-only { position: absolute; width: 1px; height: 1px; padding: 0; margin: -1px; overflow: hidden; clip: rect(0, 0, 0, 0); border: 0; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn newest_toast_is_first() {
        let mut notices = Notices::default();
        notices.apply(NoticeAction::Push("first".into(), Tone::Success));
        notices.apply(NoticeAction::Push("second".into(), Tone::Error));
        let messages: Vec<_> = notices.toasts.iter().map(|t| t.message.as_str()).collect();
        assert_eq!(messages, vec!["second", "first"]);
    }

    #[test]
    fn dismiss_removes_only_that_toast() {
        let mut notices = Notices::default();
        notices.apply(NoticeAction::Push("a".into(), Tone::Success));
        notices.apply(NoticeAction::Push("b".into(), Tone::Warning));
        let id = notices.toasts[1].id;
        notices.apply(NoticeAction::Dismiss(id));
        assert_eq!(notices.toasts.len(), 1);
        assert_eq!(notices.toasts[0].message, "b");
        // unknown ids are harmless
        notices.apply(NoticeAction::Dismiss(999));
        assert_eq!(notices.toasts.len(), 1);
    }

    #[test]
    fn announcements_expire_independently() {
        let mut notices = Notices::default();
        notices.apply(NoticeAction::Announce("Navigation menu opened".into()));
        notices.apply(NoticeAction::Announce("Navigation menu closed".into()));
        let first = notices.announcements[0].id;
        notices.apply(NoticeAction::Expire(first));
        assert_eq!(notices.announcements.len(), 1);
        assert_eq!(notices.announcements[0].message, "Navigation menu closed");
    }
}
