use std::rc::Rc;

use gloo_timers::callback::Interval;
use web_sys::{KeyboardEvent, TouchEvent};
use yew::prelude::*;

use crate::config::{MIN_SWIPE_DISTANCE_PX, TESTIMONIAL_AUTOPLAY_DELAY_MS};
use crate::forms::validate;
use crate::security::sanitize::sanitize_url;

/// Index into a fixed-size ring of slides.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cycle {
    len: usize,
    index: usize,
}

impl Cycle {
    pub fn new(len: usize) -> Self {
        Self { len, index: 0 }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn next(self) -> Self {
        if self.len == 0 {
            return self;
        }
        Self {
            index: (self.index + 1) % self.len,
            ..self
        }
    }

    pub fn prev(self) -> Self {
        if self.len == 0 {
            return self;
        }
        Self {
            index: (self.index + self.len - 1) % self.len,
            ..self
        }
    }

    /// Dot navigation: out-of-range targets are ignored.
    pub fn go_to(self, index: usize) -> Self {
        if index < self.len {
            Self { index, ..self }
        } else {
            self
        }
    }

    /// Arrow navigation on a looping track: any offset folds back into range.
    pub fn wrap_to(self, index: isize) -> Self {
        Self {
            index: wrap_index(index, self.len),
            ..self
        }
    }
}

pub fn wrap_index(index: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    index.rem_euclid(len as isize) as usize
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Swipe {
    Next,
    Prev,
}

/// `start - end` in px. Swiping left (positive) advances.
pub fn swipe_from(distance: f64) -> Option<Swipe> {
    if distance.abs() < MIN_SWIPE_DISTANCE_PX {
        None
    } else if distance > 0.0 {
        Some(Swipe::Next)
    } else {
        Some(Swipe::Prev)
    }
}

pub enum CycleAction {
    Next,
    Prev,
    GoTo(usize),
}

impl Reducible for Cycle {
    type Action = CycleAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let next = match action {
            CycleAction::Next => self.next(),
            CycleAction::Prev => self.prev(),
            CycleAction::GoTo(i) => self.go_to(i),
        };
        Rc::new(next)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Testimonial {
    pub quote: &'static str,
    pub author: &'static str,
    pub role: &'static str,
}

#[derive(Properties, PartialEq)]
pub struct TestimonialCarouselProps {
    pub testimonials: Vec<Testimonial>,
    #[prop_or(TESTIMONIAL_AUTOPLAY_DELAY_MS)]
    pub autoplay_delay_ms: u32,
}

#[function_component(TestimonialCarousel)]
pub fn testimonial_carousel(props: &TestimonialCarouselProps) -> Html {
    let cycle = use_reducer(|| Cycle::new(props.testimonials.len()));
    let paused = use_mut_ref(|| false);
    let touch_start = use_mut_ref(|| 0.0_f64);
    // bumped on manual navigation so the autoplay interval starts over
    let epoch = use_state(|| 0u32);

    {
        let cycle = cycle.clone();
        let paused = paused.clone();
        let delay = props.autoplay_delay_ms;
        use_effect_with_deps(
            move |_| {
                let interval = Interval::new(delay, move || {
                    if !*paused.borrow() {
                        cycle.dispatch(CycleAction::Next);
                    }
                });
                move || drop(interval)
            },
            *epoch,
        );
    }

    let navigate = {
        let cycle = cycle.clone();
        let epoch = epoch.clone();
        let paused = paused.clone();
        Callback::from(move |action: CycleAction| {
            cycle.dispatch(action);
            if !*paused.borrow() {
                epoch.set(epoch.wrapping_add(1));
            }
        })
    };

    let onmouseenter = {
        let paused = paused.clone();
        Callback::from(move |_: MouseEvent| *paused.borrow_mut() = true)
    };
    let onmouseleave = {
        let paused = paused.clone();
        Callback::from(move |_: MouseEvent| *paused.borrow_mut() = false)
    };
    let ontouchstart = {
        let touch_start = touch_start.clone();
        Callback::from(move |e: TouchEvent| {
            if let Some(touch) = e.changed_touches().get(0) {
                *touch_start.borrow_mut() = touch.screen_x() as f64;
            }
        })
    };
    let ontouchend = {
        let navigate = navigate.clone();
        Callback::from(move |e: TouchEvent| {
            let Some(touch) = e.changed_touches().get(0) else {
                return;
            };
            match swipe_from(*touch_start.borrow() - touch.screen_x() as f64) {
                Some(Swipe::Next) => navigate.emit(CycleAction::Next),
                Some(Swipe::Prev) => navigate.emit(CycleAction::Prev),
                None => {}
            }
        })
    };
    let onkeydown = {
        let navigate = navigate.clone();
        Callback::from(move |e: KeyboardEvent| match e.key().as_str() {
            "ArrowLeft" => {
                e.prevent_default();
                navigate.emit(CycleAction::Prev);
            }
            "ArrowRight" => {
                e.prevent_default();
                navigate.emit(CycleAction::Next);
            }
            _ => {}
        })
    };
    let on_prev = navigate.reform(|_: MouseEvent| CycleAction::Prev);
    let on_next = navigate.reform(|_: MouseEvent| CycleAction::Next);

    let current = cycle.index();
    html! {
        <div class="testimonial-carousel" tabindex="0" {onmouseenter} {onmouseleave} {ontouchstart} {ontouchend} {onkeydown}>
            <div class="testimonial-carousel-viewport">
                <div class="testimonial-carousel-slides" style={format!("transform: translateX(-{}%)", current * 100)}>
                    { for props.testimonials.iter().map(|t| html! {
                        <figure class="testimonial-slide">
                            <blockquote>{t.quote}</blockquote>
                            <figcaption>
                                <strong>{t.author}</strong>
                                <span>{t.role}</span>
                            </figcaption>
                        </figure>
                    }) }
                </div>
            </div>
            <div class="testimonial-nav">
                <button class="testimonial-nav-arrow" data-direction="prev" aria-label="Previous testimonial" onclick={on_prev}>{"←"}</button>
                <div class="testimonial-nav-dots" role="tablist">
                    { for (0..props.testimonials.len()).map(|i| {
                        let onclick = navigate.reform(move |_: MouseEvent| CycleAction::GoTo(i));
                        html! {
                            <button
                                class={classes!("testimonial-nav-dot", (i == current).then_some("active"))}
                                role="tab"
                                aria-label={format!("Go to testimonial {}", i + 1)}
                                aria-selected={(i == current).to_string()}
                                {onclick}
                            ></button>
                        }
                    }) }
                </div>
                <button class="testimonial-nav-arrow" data-direction="next" aria-label="Next testimonial" onclick={on_next}>{"→"}</button>
            </div>
        </div>
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PortfolioItem {
    pub title: &'static str,
    pub image: &'static str,
    pub url: &'static str,
}

impl PortfolioItem {
    /// Safe href, and whether it leaves the site (absolute http/https).
    pub fn link(&self) -> (String, bool) {
        let href = sanitize_url(self.url);
        let external = validate::url(&href);
        (href, external)
    }
}

#[derive(Properties, PartialEq)]
pub struct PortfolioSliderProps {
    pub items: Vec<PortfolioItem>,
}

#[function_component(PortfolioSlider)]
pub fn portfolio_slider(props: &PortfolioSliderProps) -> Html {
    let cycle = use_state(|| Cycle::new(props.items.len()));
    if props.items.is_empty() {
        log::warn!("Portfolio slider: no slides found");
        return html! {};
    }

    let step = |delta: isize| {
        let cycle = cycle.clone();
        Callback::from(move |_: MouseEvent| {
            cycle.set(cycle.wrap_to(cycle.index() as isize + delta));
        })
    };
    let current = cycle.index();

    html! {
        <div class="portfolio-slider" data-portfolio-slider="">
            <button class="portfolio-arrow" data-portfolio-prev="" aria-label="Previous website" onclick={step(-1)}>{"‹"}</button>
            <div class="portfolio-slider-viewport">
                <div class="portfolio-slider-track" style={format!("transform: translateX({}%)", -(current as i64) * 100)}>
                    { for props.items.iter().enumerate().map(|(i, item)| {
                        let (href, external) = item.link();
                        html! {
                            <a
                                class={classes!("portfolio-slide", (i == current).then_some("is-active"))}
                                {href}
                                target={external.then_some("_blank")}
                                rel={external.then_some("noopener noreferrer")}
                            >
                                <img src={item.image} alt={item.title} loading="lazy" />
                                <span class="portfolio-slide-title">{item.title}</span>
                            </a>
                        }
                    }) }
                </div>
            </div>
            <button class="portfolio-arrow" data-portfolio-next="" aria-label="Next website" onclick={step(1)}>{"›"}</button>
            <div class="portfolio-dots" role="tablist">
                { for (0..props.items.len()).map(|i| {
                    let active = i == current;
                    let onclick = {
                        let cycle = cycle.clone();
                        Callback::from(move |_: MouseEvent| cycle.set(cycle.wrap_to(i as isize)))
                    };
                    html! {
                        <button
                            class={classes!("portfolio-dot", active.then_some("is-active"))}
                            data-portfolio-dot=""
                            role="tab"
                            aria-label={format!("Show website {}", i + 1)}
                            aria-selected={active.to_string()}
                            tabindex={if active { "0" } else { "-1" }}
                            {onclick}
                        ></button>
                    }
                }) }
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn next_and_prev_wrap() {
        let c = Cycle::new(3);
        assert_eq!(c.prev().index(), 2);
        assert_eq!(c.next().next().next().index(), 0);
    }

    #[test]
    fn dots_ignore_out_of_range() {
        let c = Cycle::new(3).go_to(2);
        assert_eq!(c.index(), 2);
        assert_eq!(c.go_to(3).index(), 2);
    }

    #[test]
    fn wrap_index_normalises_negative_and_large() {
        assert_eq!(wrap_index(-1, 4), 3);
        assert_eq!(wrap_index(-5, 4), 3);
        assert_eq!(wrap_index(9, 4), 1);
        assert_eq!(wrap_index(3, 0), 0);
    }

    #[test]
    fn swipe_threshold_is_inclusive() {
        assert_eq!(swipe_from(50.0), Some(Swipe::Next));
        assert_eq!(swipe_from(-80.0), Some(Swipe::Prev));
        assert_eq!(swipe_from(49.9), None);
    }

    #[test]
    fn portfolio_links_are_sanitised() {
        let item = |url| PortfolioItem {
            title: "Site",
            image: "/assets/portfolio/acaistack.svg",
            url,
        };
        assert_eq!(item("https://acaistack.dev").link(), ("https://acaistack.dev".to_string(), true));
        assert_eq!(item("/contact").link(), ("/contact".to_string(), false));
        assert_eq!(item("javascript:alert(1)").link(), (String::new(), false));
    }

    #[test]
    fn empty_cycle_stays_put() {
        let c = Cycle::new(0);
        assert_eq!(c.next().index(), 0);
        assert_eq!(c.prev().index(), 0);
    }
}
