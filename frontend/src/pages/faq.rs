use yew::prelude::*;
use web_sys::{KeyboardEvent, MouseEvent};

use crate::components::scroll_reveal::ScrollReveal;

/// Single-open accordion: opening one item closes the rest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Accordion {
    open: Option<usize>,
}

impl Accordion {
    pub fn is_open(&self, index: usize) -> bool {
        self.open == Some(index)
    }

    pub fn toggle(self, index: usize) -> Self {
        Self {
            open: if self.is_open(index) { None } else { Some(index) },
        }
    }
}

#[derive(Properties, PartialEq)]
struct FaqItemProps {
    index: usize,
    question: String,
    open: bool,
    on_toggle: Callback<usize>,
    children: Children,
}

#[function_component(FaqItem)]
fn faq_item(props: &FaqItemProps) -> Html {
    let index = props.index;
    let toggle = {
        let on_toggle = props.on_toggle.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            on_toggle.emit(index);
        })
    };
    let onkeydown = {
        let on_toggle = props.on_toggle.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" || e.key() == " " {
                e.prevent_default();
                on_toggle.emit(index);
            }
        })
    };
    let answer_id = format!("faq-answer-{}", index);

    html! {
        <div class={classes!("faq-item", if props.open { "active" } else { "" })}>
            <button
                class="faq-question"
                aria-expanded={props.open.to_string()}
                aria-controls={answer_id.clone()}
                onclick={toggle}
                {onkeydown}
            >
                <span class="question-text">{&props.question}</span>
                <span class="toggle-icon">{if props.open { "−" } else { "+" }}</span>
            </button>
            <div id={answer_id} class="faq-answer" aria-hidden={(!props.open).to_string()}>
                { for props.children.iter() }
            </div>
        </div>
    }
}

const QUESTIONS: [(&str, &str); 6] = [
    (
        "What does AcaiStack build?",
        "We design and build fast marketing websites and pair them with AI agents that answer visitors, qualify leads and hand warm conversations to your team.",
    ),
    (
        "How long does a project take?",
        "Most websites go live within four to six weeks. Agent integrations add one to two weeks depending on how many of your tools they need to talk to.",
    ),
    (
        "Do I keep control over the AI agents?",
        "Yes. Every agent works from content you approve, and you can review conversations, adjust answers and switch an agent off at any time.",
    ),
    (
        "What does it cost?",
        "Projects are quoted at a fixed price after a free discovery call. Hosting and agent usage are billed monthly with no long lock-in.",
    ),
    (
        "Can you work with my existing website?",
        "Often, yes. We can add agents to an existing site, or migrate your content into a new build if the current platform holds you back.",
    ),
    (
        "Where is my data stored?",
        "Data is hosted in the EU. Contact details from forms and chats are only used to answer your visitors and are never sold or shared.",
    ),
];

#[function_component(Faq)]
pub fn faq() -> Html {
    let accordion = use_state(Accordion::default);
    let on_toggle = {
        let accordion = accordion.clone();
        Callback::from(move |index: usize| accordion.set(accordion.toggle(index)))
    };

    html! {
        <main id="main-content" class="faq-page">
            <section class="faq-hero">
                <h1>{"Frequently Asked Questions"}</h1>
                <p>{"Everything you need to know about working with AcaiStack"}</p>
            </section>

            <ScrollReveal class="faq-section">
                { for QUESTIONS.iter().enumerate().map(|(i, (question, answer))| html! {
                    <FaqItem
                        index={i}
                        question={question.to_string()}
                        open={accordion.is_open(i)}
                        on_toggle={on_toggle.clone()}
                    >
                        <p>{*answer}</p>
                    </FaqItem>
                }) }
            </ScrollReveal>

            <style>
                {r#"
                    .faq-page { max-width: 800px; margin: 0 auto; padding: 8rem 1.5rem 4rem; }
                    .faq-hero { text-align: center; margin-bottom: 3rem; }
                    .faq-item { border-bottom: 1px solid var(--color-border, rgba(0, 0, 0, 0.1)); }
                    .faq-question { width: 100%; display: flex; justify-content: space-between; align-items: center; padding: 1.25rem 0; background: none; border: none; font: inherit; text-align: left; cursor: pointer; }
                    .faq-answer { max-height: 0; overflow: hidden; transition: max-height 0.3s ease; }
                    .faq-item.active .faq-answer { max-height: 500px; padding-bottom: 1.25rem; }
                "#}
            </style>
        </main>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn only_one_item_open() {
        let acc = Accordion::default().toggle(1);
        assert!(acc.is_open(1));
        let acc = acc.toggle(3);
        assert!(acc.is_open(3));
        assert!(!acc.is_open(1));
    }

    #[test]
    fn toggling_open_item_closes_it() {
        let acc = Accordion::default().toggle(2).toggle(2);
        assert_eq!(acc, Accordion::default());
    }
}
