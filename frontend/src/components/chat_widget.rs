use chrono::{DateTime, Utc};
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement, KeyboardEvent};
use yew::prelude::*;

use crate::components::notification::{Notifier, Tone};
use crate::config::{CHAT_MAX_MESSAGE_LEN, CHAT_RESPONSE_DELAY_MS};
use crate::error::AppError;

const WELCOME: &str = "Hello! How can we help you today?";

const CANNED_REPLIES: [&str; 4] = [
    "That's a great question! Our team would love to discuss this further.",
    "Thanks for reaching out! Email us at hello@acaistack.dev for detailed information.",
    "We're here to help. Schedule a call at calendly.com/acaistack",
    "Interesting! Our experts specialize in exactly that. Let's chat soon!",
];

/// Picks a canned reply from a roll in `[0, 1)`.
pub fn bot_reply(roll: f64) -> &'static str {
    let index = (roll.clamp(0.0, 0.999_999) * CANNED_REPLIES.len() as f64) as usize;
    CANNED_REPLIES[index.min(CANNED_REPLIES.len() - 1)]
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Author {
    Bot,
    User,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub author: Author,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
}

impl ChatLog {
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage {
                author: Author::Bot,
                text: WELCOME.to_string(),
                sent_at: Utc::now(),
            }],
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Appends the visitor's message. `Ok(None)` means there was nothing to send.
    pub fn submit(&mut self, raw: &str) -> Result<Option<String>, AppError> {
        if raw.trim().is_empty() {
            log::warn!("Empty chat message submitted");
            return Ok(None);
        }
        if raw.chars().count() > CHAT_MAX_MESSAGE_LEN {
            return Err(AppError::MessageTooLong {
                max: CHAT_MAX_MESSAGE_LEN,
            });
        }
        let text = raw.trim().to_string();
        self.messages.push(ChatMessage {
            author: Author::User,
            text: text.clone(),
            sent_at: Utc::now(),
        });
        Ok(Some(text))
    }

    pub fn reply(&mut self, text: &str) {
        self.messages.push(ChatMessage {
            author: Author::Bot,
            text: text.to_string(),
            sent_at: Utc::now(),
        });
    }
}

impl Default for ChatLog {
    fn default() -> Self {
        Self::new()
    }
}

pub enum ChatMsg {
    Toggle,
    Close,
    SetDraft(String),
    Submit,
    BotReply(f64),
}

pub struct ChatWidget {
    open: bool,
    draft: String,
    log: ChatLog,
    messages_ref: NodeRef,
    input_ref: NodeRef,
    focus_input: bool,
    notifier: Option<Notifier>,
    keydown: Option<Closure<dyn FnMut(KeyboardEvent)>>,
}

impl Component for ChatWidget {
    type Message = ChatMsg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let notifier = ctx
            .link()
            .context::<Notifier>(Callback::from(|_| ()))
            .map(|(notifier, _)| notifier);

        let keydown = {
            let link = ctx.link().clone();
            Closure::wrap(Box::new(move |e: KeyboardEvent| {
                if e.key() == "Escape" {
                    link.send_message(ChatMsg::Close);
                }
            }) as Box<dyn FnMut(KeyboardEvent)>)
        };
        let keydown = match web_sys::window().and_then(|w| w.document()) {
            Some(document) => document
                .add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())
                .map(|_| keydown)
                .ok(),
            None => None,
        };
        log::info!("Chat widget initialized");

        Self {
            open: false,
            draft: String::new(),
            log: ChatLog::new(),
            messages_ref: NodeRef::default(),
            input_ref: NodeRef::default(),
            focus_input: false,
            notifier,
            keydown,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            ChatMsg::Toggle => {
                self.open = !self.open;
                self.focus_input = self.open;
                true
            }
            ChatMsg::Close => {
                if !self.open {
                    return false;
                }
                self.open = false;
                true
            }
            ChatMsg::SetDraft(draft) => {
                self.draft = draft;
                false
            }
            ChatMsg::Submit => match self.log.submit(&self.draft) {
                Ok(Some(text)) => {
                    self.draft.clear();
                    log::info!("Chat message sent: {}", serde_json::json!({ "messageLength": text.chars().count() }));
                    ctx.link().send_future(async {
                        TimeoutFuture::new(CHAT_RESPONSE_DELAY_MS).await;
                        ChatMsg::BotReply(web_sys::js_sys::Math::random())
                    });
                    true
                }
                Ok(None) => false,
                Err(e) => {
                    if let Some(notifier) = &self.notifier {
                        notifier.notify(e.to_string(), Tone::Warning);
                    }
                    false
                }
            },
            ChatMsg::BotReply(roll) => {
                self.log.reply(bot_reply(roll));
                true
            }
        }
    }

    fn rendered(&mut self, _ctx: &Context<Self>, _first_render: bool) {
        if let Some(list) = self.messages_ref.cast::<Element>() {
            list.set_scroll_top(list.scroll_height());
        }
        if self.focus_input {
            self.focus_input = false;
            if let Some(input) = self.input_ref.cast::<HtmlInputElement>() {
                let _ = input.focus();
            }
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        if let (Some(keydown), Some(document)) = (self.keydown.take(), web_sys::window().and_then(|w| w.document())) {
            let _ = document.remove_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref());
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let toggle = link.callback(|_: MouseEvent| ChatMsg::Toggle);
        let close = link.callback(|_: MouseEvent| ChatMsg::Close);
        let oninput = link.callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            ChatMsg::SetDraft(input.value())
        });
        let onsubmit = link.callback(|e: SubmitEvent| {
            e.prevent_default();
            ChatMsg::Submit
        });

        html! {
            <>
                <button id="chatToggle" class="chat-toggle" aria-label="Open chat" aria-expanded={self.open.to_string()} onclick={toggle}>
                    { if self.open { "✕" } else { "💬" } }
                </button>
                <div
                    id="chatWidget"
                    class={classes!("chat-widget", self.open.then_some("open"))}
                    aria-hidden={(!self.open).to_string()}
                >
                    <div class="chat-header">
                        <span>{"Chat with us"}</span>
                        <button id="closeChatBtn" class="chat-close" aria-label="Close chat" onclick={close}>{"✕"}</button>
                    </div>
                    <div id="chatMessages" class="chat-messages" ref={self.messages_ref.clone()}>
                        { for self.log.messages().iter().map(|m| {
                            let (class, role) = match m.author {
                                Author::Bot => ("bot", "article"),
                                Author::User => ("user", "status"),
                            };
                            html! {
                                <div class={classes!("chat-message", class)} {role} title={m.sent_at.format("%H:%M").to_string()}>
                                    { &m.text }
                                </div>
                            }
                        }) }
                    </div>
                    <form id="chatForm" class="chat-form" {onsubmit}>
                        <input
                            id="chatInput"
                            ref={self.input_ref.clone()}
                            type="text"
                            placeholder="Type your message..."
                            aria-label="Chat message"
                            value={self.draft.clone()}
                            {oninput}
                        />
                        <button type="submit" class="chat-send">{"Send"}</button>
                    </form>
                </div>
            </>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn starts_with_welcome() {
        let log = ChatLog::new();
        assert_eq!(log.messages().len(), 1);
        assert_eq!(log.messages()[0].author, Author::Bot);
        assert_eq!(log.messages()[0].text, WELCOME);
    }

    #[test]
    fn empty_and_whitespace_are_ignored() {
        let mut log = ChatLog::new();
        assert_eq!(log.submit(""), Ok(None));
        assert_eq!(log.submit("   "), Ok(None));
        assert_eq!(log.messages().len(), 1);
    }

    #[test]
    fn over_long_message_is_rejected() {
        let mut log = ChatLog::new();
        let long = "x".repeat(CHAT_MAX_MESSAGE_LEN + 1);
        assert_eq!(log.submit(&long), Err(AppError::MessageTooLong { max: 500 }));
        assert!(log.submit(&"x".repeat(CHAT_MAX_MESSAGE_LEN)).unwrap().is_some());
    }

    #[test]
    fn markup_stays_plain_text() {
        let mut log = ChatLog::new();
        let sent = log.submit("  <img src=x onerror=alert(1)>  ").unwrap();
        assert_eq!(sent.as_deref(), Some("<img src=x onerror=alert(1)>"));
        assert_eq!(log.messages()[1].author, Author::User);
    }

    #[test]
    fn reply_roll_maps_onto_every_canned_answer() {
        assert_eq!(bot_reply(0.0), CANNED_REPLIES[0]);
        assert_eq!(bot_reply(0.26), CANNED_REPLIES[1]);
        assert_eq!(bot_reply(0.99), CANNED_REPLIES[3]);
        assert_eq!(bot_reply(1.0), CANNED_REPLIES[3]);
    }
}
