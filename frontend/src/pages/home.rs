use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::carousel::{PortfolioItem, PortfolioSlider, Testimonial, TestimonialCarousel};
use crate::components::notification::use_notifier;
use crate::components::roi_calculator::RoiCalculator;
use crate::components::scroll_reveal::{CountUp, ScrollReveal};
use crate::slider::{HeroSlider, SlideSet};
use crate::Route;

const SERVICES: [(&str, &str); 3] = [
    (
        "Websites that convert",
        "Fast, accessible marketing sites built around the one thing your visitors came to do.",
    ),
    (
        "AI agents on duty",
        "Agents that answer questions, qualify leads and book calls while your team sleeps.",
    ),
    (
        "Automation behind the scenes",
        "Forms, CRMs and inboxes wired together so no enquiry falls through the cracks.",
    ),
];

fn testimonials() -> Vec<Testimonial> {
    vec![
        Testimonial {
            quote: "Our new site paid for itself in the first month. The chat agent answers the questions we used to answer twenty times a day.",
            author: "Katrin Feuerstein",
            role: "Imkerei Feuerstein",
        },
        Testimonial {
            quote: "Clear process, fixed price and a launch that landed exactly on the date they promised.",
            author: "Jonas Weber",
            role: "Managing Director, Weber Logistik",
        },
        Testimonial {
            quote: "We finally know which leads are worth a call before we pick up the phone.",
            author: "Mira Hoffmann",
            role: "Head of Sales, Nordlicht Consulting",
        },
    ]
}

fn portfolio() -> Vec<PortfolioItem> {
    vec![
        PortfolioItem {
            title: "AcaiStack",
            image: "/assets/portfolio/acaistack.svg",
            url: "https://acaistack.dev",
        },
        PortfolioItem {
            title: "Imkerei Feuerstein",
            image: "/assets/portfolio/imkerei.svg",
            url: "https://imkerei-feuerstein.de",
        },
    ]
}

#[function_component]
pub fn Home() -> Html {
    let notifier = use_notifier();
    let slides = use_memo(|_| SlideSet::showcase(), ());

    {
        let slides = slides.clone();
        use_effect_with_deps(
            move |_| {
                if let Err(e) = &*slides {
                    match &notifier {
                        Some(notifier) => notifier.report(e, "HeroSlider.init"),
                        None => log::error!("Error in HeroSlider.init: {}", e),
                    }
                }
                || ()
            },
            (),
        );
    }

    let hero = match &*slides {
        Ok(set) => html! { <HeroSlider slides={set.clone()} /> },
        Err(_) => html! {},
    };

    html! {
        <main id="main-content" class="home">
            { hero }

            <section id="services" class="section services">
                <ScrollReveal class="container">
                    <h2 class="section-title">{"What we do"}</h2>
                    <div class="services-grid">
                        { for SERVICES.iter().map(|(title, body)| html! {
                            <article class="service-card">
                                <h3>{*title}</h3>
                                <p>{*body}</p>
                            </article>
                        }) }
                    </div>
                </ScrollReveal>
            </section>

            <section id="stats" class="section stats">
                <div class="container stats-grid">
                    <CountUp target={40} suffix="+" label="Websites launched" />
                    <CountUp target={24} suffix="/7" label="Agent availability" />
                    <CountUp target={30} suffix="%" label="Average lead uplift" />
                    <CountUp target={6} label="Weeks to launch" />
                </div>
            </section>

            <section id="portfolio" class="section portfolio">
                <ScrollReveal class="container">
                    <h2 class="section-title">{"Recent work"}</h2>
                    <PortfolioSlider items={portfolio()} />
                </ScrollReveal>
            </section>

            <section id="roi" class="section roi">
                <ScrollReveal class="container">
                    <h2 class="section-title">{"What could agents earn you?"}</h2>
                    <RoiCalculator />
                </ScrollReveal>
            </section>

            <section id="testimonials" class="section testimonials">
                <ScrollReveal class="container">
                    <h2 class="section-title">{"What clients say"}</h2>
                    <TestimonialCarousel testimonials={testimonials()} />
                </ScrollReveal>
            </section>

            <section id="cta" class="section cta">
                <ScrollReveal class="container cta-inner">
                    <h2>{"Ready to put your website to work?"}</h2>
                    <Link<Route> to={Route::Contact} classes="btn btn-primary">{"Start a project"}</Link<Route>>
                </ScrollReveal>
            </section>
        </main>
    }
}
