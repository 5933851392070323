use std::collections::BTreeMap;

use gloo_timers::future::TimeoutFuture;
use serde::Serialize;
use wasm_bindgen::JsCast;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::components::notification::{Notifier, Tone};
use crate::config::{CONTACT_MESSAGE_MAX_LEN, CSRF_TOKEN_NAME, FORM_BUTTON_RESET_MS, FORM_SUBMIT_DELAY_MS};
use crate::error::AppError;
use crate::forms::validate;
use crate::security::{csrf, sanitize};

const SIMULATED_FAILURE_RATE: f64 = 0.1;
/// A name needs at least one letter in any script.
const NAME_PATTERN: &str = r"\p{L}";

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    Name,
    Email,
    Company,
    Phone,
    Service,
    Message,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Name,
        Field::Email,
        Field::Company,
        Field::Phone,
        Field::Service,
        Field::Message,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Company => "company",
            Field::Phone => "phone",
            Field::Service => "service",
            Field::Message => "message",
        }
    }

    fn required(self) -> bool {
        !matches!(self, Field::Company | Field::Phone)
    }
}

/// First failing rule for a field, if any.
pub fn validate_field(field: Field, value: &str) -> Option<&'static str> {
    let value = value.trim();
    if field.required() && !validate::required(value) {
        return Some(match field {
            Field::Service => "Please select an option",
            _ => "This field is required",
        });
    }
    if value.is_empty() {
        return None;
    }
    match field {
        Field::Email if !validate::email(value) => Some("Please enter a valid email address"),
        Field::Phone if !validate::phone(value) => Some("Please enter a valid phone number"),
        Field::Name if !validate::min_length(value, 2) => Some("Please enter at least 2 characters"),
        Field::Name if !validate::pattern(value, NAME_PATTERN) => Some("Please enter a valid name"),
        Field::Message if !validate::max_length(value, CONTACT_MESSAGE_MAX_LEN) => {
            Some("Please keep your message under 2000 characters")
        }
        _ => None,
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub company: String,
    pub phone: String,
    pub service: String,
    pub message: String,
    /// Honeypot. Humans never see it, so anything here came from a bot.
    pub website: String,
}

impl ContactDraft {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Company => &self.company,
            Field::Phone => &self.phone,
            Field::Service => &self.service,
            Field::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Company => self.company = value,
            Field::Phone => self.phone = value,
            Field::Service => self.service = value,
            Field::Message => self.message = value,
        }
    }

    pub fn errors(&self) -> BTreeMap<Field, &'static str> {
        Field::ALL
            .iter()
            .filter_map(|&f| validate_field(f, self.value(f)).map(|e| (f, e)))
            .collect()
    }
}

/// What leaves the browser. The honeypot is never part of it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ContactPayload {
    pub name: String,
    pub email: String,
    pub company: String,
    pub phone: String,
    pub service: String,
    pub message: String,
    pub csrf_token: String,
}

impl ContactPayload {
    fn from_draft(draft: &ContactDraft, csrf_token: &str) -> Self {
        Self {
            name: sanitize::sanitize_input(Some(&draft.name)),
            email: draft.email.trim().to_string(),
            company: sanitize::sanitize_input(Some(&draft.company)),
            phone: sanitize::sanitize_input(Some(&draft.phone)),
            service: sanitize::sanitize_input(Some(&draft.service)),
            message: sanitize::sanitize_input(Some(&draft.message)),
            csrf_token: csrf_token.to_string(),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum Prepared {
    Spam,
    Invalid(BTreeMap<Field, &'static str>),
    Ready(ContactPayload),
}

pub fn prepare(draft: &ContactDraft, csrf_token: Option<&str>) -> Result<Prepared, AppError> {
    if !draft.website.is_empty() {
        return Ok(Prepared::Spam);
    }
    let errors = draft.errors();
    if !errors.is_empty() {
        return Ok(Prepared::Invalid(errors));
    }
    let token = csrf_token.filter(|t| !t.is_empty()).ok_or(AppError::MissingCsrfToken)?;
    Ok(Prepared::Ready(ContactPayload::from_draft(draft, token)))
}

/// Stand-in for the real endpoint: fails for rolls at or below the failure rate.
pub fn simulate_submission(roll: f64) -> Result<(), AppError> {
    if roll > SIMULATED_FAILURE_RATE {
        Ok(())
    } else {
        Err(AppError::Network)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Sending,
    Sent,
}

impl SubmitState {
    pub fn label(self) -> &'static str {
        match self {
            SubmitState::Idle => "Send message",
            SubmitState::Sending => "Sending...",
            SubmitState::Sent => "Message sent!",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FieldState {
    Error(&'static str),
    Success,
}

pub enum ContactMsg {
    Input(Field, String),
    Honeypot(String),
    Blur(Field),
    Submit,
    Submitted(Result<(), AppError>),
    ResetButton,
}

pub struct ContactForm {
    draft: ContactDraft,
    states: BTreeMap<Field, FieldState>,
    submit: SubmitState,
    csrf_token: Option<String>,
    notifier: Option<Notifier>,
}

impl ContactForm {
    fn toast(&self, message: &str, tone: Tone) {
        if let Some(notifier) = &self.notifier {
            notifier.notify(message, tone);
        }
    }

    fn field_view(&self, field: Field, label: &'static str, control: Html) -> Html {
        let state = self.states.get(&field).copied();
        let class = classes!(
            "contact-form-group",
            matches!(state, Some(FieldState::Error(_))).then_some("error"),
            matches!(state, Some(FieldState::Success)).then_some("success"),
        );
        let message = match state {
            Some(FieldState::Error(msg)) => msg,
            _ => "",
        };
        html! {
            <div {class}>
                <label for={field.name()}>{label}{ if field.required() { " *" } else { "" } }</label>
                { control }
                <div class="contact-form-error" role="alert">{message}</div>
            </div>
        }
    }
}

impl Component for ContactForm {
    type Message = ContactMsg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let notifier = ctx
            .link()
            .context::<Notifier>(Callback::from(|_| ()))
            .map(|(notifier, _)| notifier);
        let csrf_token = match csrf::generate_token() {
            Ok(token) => Some(token),
            Err(e) => {
                log::warn!("contact form has no CSRF token: {}", e);
                None
            }
        };
        Self {
            draft: ContactDraft::default(),
            states: BTreeMap::new(),
            submit: SubmitState::Idle,
            csrf_token,
            notifier,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            ContactMsg::Input(field, value) => {
                self.draft.set(field, value);
                if matches!(self.states.get(&field), Some(FieldState::Error(_))) {
                    self.states.remove(&field);
                    return true;
                }
                false
            }
            ContactMsg::Honeypot(value) => {
                self.draft.website = value;
                false
            }
            ContactMsg::Blur(field) => {
                let value = self.draft.value(field);
                match validate_field(field, value) {
                    Some(error) => {
                        self.states.insert(field, FieldState::Error(error));
                    }
                    None if !value.trim().is_empty() => {
                        self.states.insert(field, FieldState::Success);
                    }
                    None => {
                        self.states.remove(&field);
                    }
                }
                true
            }
            ContactMsg::Submit => {
                if self.submit != SubmitState::Idle {
                    return false;
                }
                match prepare(&self.draft, self.csrf_token.as_deref()) {
                    Ok(Prepared::Spam) => {
                        log::warn!("Spam submission detected");
                        false
                    }
                    Ok(Prepared::Invalid(errors)) => {
                        for (field, error) in errors {
                            self.states.insert(field, FieldState::Error(error));
                        }
                        self.toast("Please fix the errors above", Tone::Error);
                        true
                    }
                    Ok(Prepared::Ready(payload)) => {
                        log::info!(
                            "Contact form submitted: {}",
                            serde_json::json!({
                                "hasCompany": !payload.company.is_empty(),
                                "nameLength": payload.name.chars().count(),
                                "messageLength": payload.message.chars().count(),
                            })
                        );
                        match serde_json::to_string(&payload) {
                            Ok(body) => log::debug!("contact payload ready ({} bytes)", body.len()),
                            Err(e) => log::warn!("contact payload not serialisable: {}", e),
                        }
                        self.submit = SubmitState::Sending;
                        ctx.link().send_future(async {
                            TimeoutFuture::new(FORM_SUBMIT_DELAY_MS).await;
                            ContactMsg::Submitted(simulate_submission(web_sys::js_sys::Math::random()))
                        });
                        true
                    }
                    Err(e) => {
                        match &self.notifier {
                            Some(notifier) => notifier.report(&e, "form submission"),
                            None => log::error!("Error in form submission: {}", e),
                        }
                        false
                    }
                }
            }
            ContactMsg::Submitted(Ok(())) => {
                self.submit = SubmitState::Sent;
                self.draft = ContactDraft::default();
                self.states.clear();
                self.toast("Thanks for reaching out! We'll be in touch soon.", Tone::Success);
                ctx.link().send_future(async {
                    TimeoutFuture::new(FORM_BUTTON_RESET_MS).await;
                    ContactMsg::ResetButton
                });
                true
            }
            ContactMsg::Submitted(Err(e)) => {
                log::warn!("contact form submission failed: {}", e);
                self.submit = SubmitState::Idle;
                self.toast(&e.to_string(), Tone::Error);
                true
            }
            ContactMsg::ResetButton => {
                self.submit = SubmitState::Idle;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let on_input = |field: Field| {
            link.callback(move |e: InputEvent| {
                let target = e.target();
                let value = target
                    .as_ref()
                    .and_then(|t| t.dyn_ref::<HtmlInputElement>().map(|i| i.value()))
                    .or_else(|| target.as_ref().and_then(|t| t.dyn_ref::<HtmlTextAreaElement>().map(|t| t.value())))
                    .unwrap_or_default();
                ContactMsg::Input(field, value)
            })
        };
        let on_blur = |field: Field| link.callback(move |_: FocusEvent| ContactMsg::Blur(field));
        let on_service = link.batch_callback(|e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            vec![
                ContactMsg::Input(Field::Service, select.value()),
                ContactMsg::Blur(Field::Service),
            ]
        });
        let on_honeypot = link.callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            ContactMsg::Honeypot(input.value())
        });
        let onsubmit = link.callback(|e: SubmitEvent| {
            e.prevent_default();
            ContactMsg::Submit
        });
        let text_input = |field: Field, kind: &'static str, autocomplete: &'static str| {
            html! {
                <input
                    id={field.name()}
                    name={field.name()}
                    class="contact-form-input"
                    type={kind}
                    {autocomplete}
                    required={field.required()}
                    value={self.draft.value(field).to_string()}
                    oninput={on_input(field)}
                    onblur={on_blur(field)}
                />
            }
        };

        html! {
            <form id="contactForm" class="contact-form" novalidate=true {onsubmit}>
                <input type="hidden" name={CSRF_TOKEN_NAME} value={self.csrf_token.clone().unwrap_or_default()} />
                { self.field_view(Field::Name, "Name", text_input(Field::Name, "text", "name")) }
                { self.field_view(Field::Email, "Email", text_input(Field::Email, "email", "email")) }
                { self.field_view(Field::Company, "Company", text_input(Field::Company, "text", "organization")) }
                { self.field_view(Field::Phone, "Phone", text_input(Field::Phone, "tel", "tel")) }
                { self.field_view(Field::Service, "Service", html! {
                    <select id="service" name="service" class="contact-form-select" required=true onchange={on_service}>
                        <option value="" selected={self.draft.service.is_empty()}>{"Select a service"}</option>
                        { for SERVICES.iter().map(|(value, label)| html! {
                            <option value={*value} selected={self.draft.service == *value}>{*label}</option>
                        }) }
                    </select>
                }) }
                { self.field_view(Field::Message, "Message", html! {
                    <textarea
                        id="message"
                        name="message"
                        class="contact-form-textarea"
                        rows="5"
                        required=true
                        value={self.draft.message.clone()}
                        oninput={on_input(Field::Message)}
                        onblur={on_blur(Field::Message)}
                    />
                }) }
                <div aria-hidden="true" style="position: absolute; left: -9999px; top: -9999px;">
                    <label for="website">{"Website"}</label>
                    <input type="text" id="website" name="website" data-honeypot="" tabindex="-1" autocomplete="off" value={self.draft.website.clone()} oninput={on_honeypot} />
                </div>
                <button
                    type="submit"
                    class={classes!(
                        "btn", "btn-primary", "contact-form-submit",
                        (self.submit == SubmitState::Sending).then_some("btn-loading"),
                        (self.submit == SubmitState::Sent).then_some("btn-success"),
                    )}
                    disabled={self.submit != SubmitState::Idle}
                    aria-busy={(self.submit == SubmitState::Sending).to_string()}
                >
                    { self.submit.label() }
                </button>
            </form>
        }
    }
}

const SERVICES: [(&str, &str); 4] = [
    ("ai-agents", "AI agents"),
    ("web-development", "Web development"),
    ("automation", "Process automation"),
    ("consulting", "Consulting"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn filled() -> ContactDraft {
        ContactDraft {
            name: " Ada ".into(),
            email: "ada@example.com".into(),
            service: "consulting".into(),
            message: "Hello <team>".into(),
            ..Default::default()
        }
    }

    #[test]
    fn field_rules() {
        assert_eq!(validate_field(Field::Name, "  "), Some("This field is required"));
        assert_eq!(validate_field(Field::Name, "A"), Some("Please enter at least 2 characters"));
        assert_eq!(validate_field(Field::Email, "nope"), Some("Please enter a valid email address"));
        assert_eq!(validate_field(Field::Phone, ""), None);
        assert_eq!(validate_field(Field::Phone, "abc"), Some("Please enter a valid phone number"));
        assert_eq!(validate_field(Field::Service, ""), Some("Please select an option"));
        assert_eq!(validate_field(Field::Company, ""), None);
    }

    #[test]
    fn name_needs_a_letter_and_message_has_a_ceiling() {
        assert_eq!(validate_field(Field::Name, "42"), Some("Please enter a valid name"));
        assert_eq!(validate_field(Field::Name, "Zoë"), None);
        assert_eq!(validate_field(Field::Name, "李雷"), None);
        let long = "a".repeat(CONTACT_MESSAGE_MAX_LEN + 1);
        assert_eq!(
            validate_field(Field::Message, &long),
            Some("Please keep your message under 2000 characters")
        );
        assert_eq!(validate_field(Field::Message, &long[1..]), None);
    }

    #[test]
    fn honeypot_wins_over_everything() {
        let draft = ContactDraft {
            website: "http://spam.example".into(),
            ..Default::default()
        };
        assert_eq!(prepare(&draft, None), Ok(Prepared::Spam));
    }

    #[test]
    fn invalid_draft_lists_every_error() {
        let Ok(Prepared::Invalid(errors)) = prepare(&ContactDraft::default(), Some("t")) else {
            panic!("expected validation errors");
        };
        let fields: Vec<_> = errors.keys().copied().collect();
        assert_eq!(fields, vec![Field::Name, Field::Email, Field::Service, Field::Message]);
    }

    #[test]
    fn missing_token_is_an_error() {
        assert_eq!(prepare(&filled(), None), Err(AppError::MissingCsrfToken));
        assert_eq!(prepare(&filled(), Some("")), Err(AppError::MissingCsrfToken));
    }

    #[test]
    fn payload_is_sanitised_and_skips_honeypot() {
        let Ok(Prepared::Ready(payload)) = prepare(&filled(), Some("abc123")) else {
            panic!("expected a payload");
        };
        assert_eq!(payload.name, "Ada");
        assert_eq!(payload.message, "Hello &lt;team&gt;");
        assert_eq!(payload.csrf_token, "abc123");
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("website").is_none());
        assert_eq!(json["email"], "ada@example.com");
    }

    #[test]
    fn simulated_network_fails_one_time_in_ten() {
        assert_eq!(simulate_submission(0.05), Err(AppError::Network));
        assert_eq!(simulate_submission(0.1), Err(AppError::Network));
        assert_eq!(simulate_submission(0.5), Ok(()));
    }

    #[test]
    fn button_labels() {
        assert_eq!(SubmitState::Sending.label(), "Sending...");
        assert_eq!(SubmitState::Sent.label(), "Message sent!");
    }
}
