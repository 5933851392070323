use yew::prelude::*;

use crate::components::contact_form::ContactForm;
use crate::components::scroll_reveal::ScrollReveal;

#[function_component(Contact)]
pub fn contact() -> Html {
    html! {
        <main id="main-content" class="contact-page">
            <section class="contact-hero">
                <h1>{"Let's talk"}</h1>
                <p>{"Tell us about your project and we'll get back to you within one business day."}</p>
            </section>
            <ScrollReveal class="contact-layout">
                <ContactForm />
                <aside class="contact-details">
                    <h3>{"Prefer email?"}</h3>
                    <a href="mailto:hello@acaistack.dev">{"hello@acaistack.dev"}</a>
                    <h3 id="careers">{"Careers"}</h3>
                    <p>{"We are always happy to hear from designers and engineers who care about fast, friendly websites."}</p>
                </aside>
            </ScrollReveal>
        </main>
    }
}
