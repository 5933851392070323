use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, KeyboardEvent, TouchEvent};
use yew::prelude::*;

use super::animator::{select_animator, AnimationHandle, Animator, TransitionStage};
use super::autoplay::{AutoplayTimer, TickId};
use super::controller::{Command, Input, NavKey, SliderController};
use super::machine::SlideVisibility;
use super::slides::{Slide, SlideSet, Visual};
use crate::components::notification::Notifier;
use crate::config::{HERO_AUTOPLAY_DELAY_MS, RESIZE_DEBOUNCE_MS};
use crate::dom;
use crate::error::AppError;
use crate::security::sanitize::sanitize_url;

#[derive(Properties, PartialEq)]
pub struct HeroSliderProps {
    pub slides: SlideSet,
    #[prop_or(HERO_AUTOPLAY_DELAY_MS)]
    pub autoplay_delay_ms: u32,
}

pub enum HeroMsg {
    Input(Input),
    TouchStart(f64),
    TouchEnd(f64),
    ArrowsVisible(bool),
    Resize,
    MeasureHeight,
}

pub struct HeroSlider {
    controller: SliderController,
    slide_refs: Vec<NodeRef>,
    section_ref: NodeRef,
    container_ref: NodeRef,
    animator: Box<dyn Animator>,
    timer: AutoplayTimer,
    animation: Option<AnimationHandle>,
    pending: Option<super::machine::Transition>,
    touch_start_x: f64,
    arrows_visible: bool,
    hovered: Rc<Cell<bool>>,
    theme: &'static str,
    resize_debounce: Option<Timeout>,
    keydown: Option<Closure<dyn FnMut(KeyboardEvent)>>,
    resize: Option<Closure<dyn FnMut()>>,
    observer: Option<(IntersectionObserver, Closure<dyn FnMut(web_sys::js_sys::Array, IntersectionObserver)>)>,
    notifier: Option<Notifier>,
}

impl Component for HeroSlider {
    type Message = HeroMsg;
    type Properties = HeroSliderProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let notifier = ctx
            .link()
            .context::<Notifier>(Callback::from(|_| ()))
            .map(|(notifier, _)| notifier);
        Self {
            controller: SliderController::new(props.slides.clone(), props.autoplay_delay_ms),
            slide_refs: props.slides.iter().map(|_| NodeRef::default()).collect(),
            section_ref: NodeRef::default(),
            container_ref: NodeRef::default(),
            animator: select_animator(dom::prefers_reduced_motion()),
            timer: AutoplayTimer::default(),
            animation: None,
            pending: None,
            touch_start_x: 0.0,
            arrows_visible: false,
            hovered: Rc::new(Cell::new(false)),
            theme: props.slides.theme(0),
            resize_debounce: None,
            keydown: None,
            resize: None,
            observer: None,
            notifier,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            HeroMsg::Input(input) => {
                match input {
                    Input::PointerEnter => self.hovered.set(true),
                    Input::PointerLeave => self.hovered.set(false),
                    _ => {}
                }
                let refs = &self.slide_refs;
                let commands = self
                    .controller
                    .handle(input, |i| refs.get(i).map_or(false, |r| r.get().is_some()));
                if commands.is_empty() {
                    return false;
                }
                self.execute(ctx, commands);
                true
            }
            HeroMsg::TouchStart(x) => {
                self.touch_start_x = x;
                false
            }
            HeroMsg::TouchEnd(x) => {
                let distance = x - self.touch_start_x;
                ctx.link().send_message(HeroMsg::Input(Input::Swipe(distance)));
                false
            }
            HeroMsg::ArrowsVisible(visible) => {
                let changed = self.arrows_visible != visible;
                self.arrows_visible = visible;
                changed
            }
            HeroMsg::Resize => {
                let link = ctx.link().clone();
                self.resize_debounce = Some(Timeout::new(RESIZE_DEBOUNCE_MS, move || {
                    link.send_message(HeroMsg::MeasureHeight)
                }));
                false
            }
            HeroMsg::MeasureHeight => {
                self.update_container_height();
                false
            }
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render {
            if let Err(e) = self.mount(ctx) {
                self.report(&e, "HeroSlider.init");
            }
            self.update_container_height();
            ctx.link().send_message(HeroMsg::Input(Input::Start));
            log::info!("ProjectThemeSlider initialized");
        }

        if let Some(transition) = self.pending.take() {
            let outgoing = self.slide_refs[transition.from].cast::<HtmlElement>();
            let incoming = self.slide_refs[transition.to].cast::<HtmlElement>();
            match (outgoing, incoming) {
                (Some(outgoing), Some(incoming)) => {
                    let stage = TransitionStage {
                        outgoing,
                        incoming,
                        direction: transition.direction,
                    };
                    let done = ctx.link().callback(|_| HeroMsg::Input(Input::TransitionDone));
                    self.animation = Some(self.animator.run(stage, done));
                }
                // nodes vanished after the check; settle immediately
                _ => ctx.link().send_message(HeroMsg::Input(Input::TransitionDone)),
            }
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.timer.cancel();
        self.animation = None;
        self.resize_debounce = None;
        if let Some(window) = web_sys::window() {
            if let Some(keydown) = self.keydown.take() {
                if let Some(document) = window.document() {
                    let _ = document.remove_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref());
                }
            }
            if let Some(resize) = self.resize.take() {
                let _ = window.remove_event_listener_with_callback("resize", resize.as_ref().unchecked_ref());
            }
        }
        if let Some((observer, _)) = self.observer.take() {
            observer.disconnect();
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let state = self.controller.state();
        let slides = self.controller.slides();
        let hovered = self.controller.autoplay().is_hovered();
        let armed = self.controller.autoplay().armed();

        let onmouseenter = link.callback(|_: MouseEvent| HeroMsg::Input(Input::PointerEnter));
        let onmouseleave = link.callback(|_: MouseEvent| HeroMsg::Input(Input::PointerLeave));
        let ontouchstart = link.batch_callback(|e: TouchEvent| first_touch_x(&e).map(HeroMsg::TouchStart));
        let ontouchend = link.batch_callback(|e: TouchEvent| first_touch_x(&e).map(HeroMsg::TouchEnd));
        let on_prev = link.callback(|_: MouseEvent| HeroMsg::Input(Input::Prev));
        let on_next = link.callback(|_: MouseEvent| HeroMsg::Input(Input::Next));
        let arrow_class = |side: &'static str| classes!("slider-arrow", side, self.arrows_visible.then_some("visible"));

        html! {
            <section
                class="hero-section"
                data-project-theme={self.theme}
                ref={self.section_ref.clone()}
                {onmouseenter}
                {onmouseleave}
            >
                <button class={arrow_class("slider-arrow-left")} aria-label="Previous project" onclick={on_prev}>{"‹"}</button>
                <div
                    class="hero-slides-container"
                    ref={self.container_ref.clone()}
                    {ontouchstart}
                    {ontouchend}
                >
                    { for slides.iter().enumerate().map(|(i, slide)| {
                        render_slide(slide, state.visibility(i), self.slide_refs[i].clone())
                    }) }
                </div>
                <button class={arrow_class("slider-arrow-right")} aria-label="Next project" onclick={on_next}>{"›"}</button>

                <div class="project-nav" role="tablist" aria-label="Showcase projects">
                    { for slides.iter().enumerate().map(|(i, slide)| {
                        let active = i == state.current();
                        let onclick = link.callback(move |_: MouseEvent| HeroMsg::Input(Input::Select(i)));
                        html! {
                            <button
                                class={classes!("project-nav-btn", active.then_some("active"))}
                                role="tab"
                                data-project={slide.id}
                                aria-selected={if active { "true" } else { "false" }}
                                aria-controls={format!("slide-{}", slide.id)}
                                {onclick}
                            >
                                <span class="nav-dot"></span>
                                <span class="nav-label">{slide.name}</span>
                                { progress_bar(active, armed, hovered, self.controller.autoplay().delay_ms()) }
                            </button>
                        }
                    }) }
                </div>
                <style>{HERO_CSS}</style>
            </section>
        }
    }
}

impl HeroSlider {
    fn execute(&mut self, ctx: &Context<Self>, commands: Vec<Command>) {
        for command in commands {
            match command {
                Command::CancelAutoplay => self.timer.cancel(),
                Command::ArmAutoplay { tick, delay_ms } => {
                    let link = ctx.link().clone();
                    self.timer.schedule(delay_ms, move || {
                        link.send_message(HeroMsg::Input(Input::Tick(tick)))
                    });
                }
                Command::Animate(transition) => self.pending = Some(transition),
                Command::ApplyTheme(theme) => {
                    self.theme = theme;
                    if let Err(e) = dom::set_root_attribute("data-project-theme", theme) {
                        log::warn!("could not apply project theme {}: {}", theme, e);
                    }
                }
            }
        }
    }

    /// Installs document/window listeners and the arrow visibility observer.
    fn mount(&mut self, ctx: &Context<Self>) -> Result<(), AppError> {
        let window = web_sys::window().ok_or_else(|| AppError::missing("window"))?;
        let document = dom::document()?;

        let keydown = {
            let link = ctx.link().clone();
            let hovered = self.hovered.clone();
            Closure::wrap(Box::new(move |e: KeyboardEvent| {
                if !hovered.get() {
                    return;
                }
                if let Some(key) = NavKey::from_key(&e.key()) {
                    e.prevent_default();
                    link.send_message(HeroMsg::Input(Input::Key(key)));
                }
            }) as Box<dyn FnMut(KeyboardEvent)>)
        };
        document.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())?;
        self.keydown = Some(keydown);

        let resize = {
            let link = ctx.link().clone();
            Closure::wrap(Box::new(move || link.send_message(HeroMsg::Resize)) as Box<dyn FnMut()>)
        };
        window.add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())?;
        self.resize = Some(resize);

        let section = self
            .section_ref
            .cast::<HtmlElement>()
            .ok_or_else(|| AppError::missing(".hero-section"))?;
        let on_intersect = {
            let link = ctx.link().clone();
            Closure::wrap(Box::new(move |entries: web_sys::js_sys::Array, _: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    link.send_message(HeroMsg::ArrowsVisible(entry.is_intersecting()));
                }
            }) as Box<dyn FnMut(web_sys::js_sys::Array, IntersectionObserver)>)
        };
        let options = IntersectionObserverInit::new();
        options.set_root_margin("-100px 0px -100px 0px");
        options.set_threshold(&JsValue::from_f64(0.3));
        let observer = IntersectionObserver::new_with_options(on_intersect.as_ref().unchecked_ref(), &options)?;
        observer.observe(&section);
        self.observer = Some((observer, on_intersect));
        Ok(())
    }

    /// Pins the container to the tallest slide so transitions never shift layout.
    fn update_container_height(&self) {
        let Some(container) = self.container_ref.cast::<HtmlElement>() else {
            return;
        };
        let mut max_height = 0;
        for slide in self.slide_refs.iter().filter_map(|r| r.cast::<HtmlElement>()) {
            let was_hidden = slide.hidden();
            slide.set_hidden(false);
            max_height = max_height.max(slide.scroll_height());
            slide.set_hidden(was_hidden);
        }
        if max_height > 0 {
            dom::set_styles(&container, &[("min-height", format!("{}px", max_height))]);
        }
    }

    fn report(&self, error: &AppError, context: &str) {
        match &self.notifier {
            Some(notifier) => notifier.report(error, context),
            None => log::error!("Error in {}: {}", context, error),
        }
    }
}

fn first_touch_x(e: &TouchEvent) -> Option<f64> {
    e.changed_touches().get(0).map(|t| t.screen_x() as f64)
}

fn progress_bar(active: bool, armed: Option<TickId>, hovered: bool, delay_ms: u32) -> Html {
    if !active {
        return html! { <div class="nav-progress"></div> };
    }
    // a new key restarts the CSS animation for every fresh countdown
    let key = armed.map(|t| format!("{:?}", t)).unwrap_or_else(|| "idle".to_string());
    html! {
        <div
            key={key}
            class={classes!("nav-progress", armed.is_some().then_some("running"), hovered.then_some("paused"))}
            style={format!("animation-duration: {}ms", delay_ms)}
        ></div>
    }
}

fn render_slide(slide: &Slide, visibility: SlideVisibility, node_ref: NodeRef) -> Html {
    let content = &slide.content;
    let class = classes!(
        "hero-slide",
        matches!(visibility, SlideVisibility::Active).then_some("active"),
        matches!(visibility, SlideVisibility::Entering).then_some("is-entering"),
        matches!(visibility, SlideVisibility::Leaving).then_some("is-leaving"),
    );
    html! {
        <article
            id={format!("slide-{}", slide.id)}
            {class}
            ref={node_ref}
            hidden={!visibility.is_shown()}
            aria-hidden={if visibility == SlideVisibility::Active { "false" } else { "true" }}
        >
            <div class="hero-text-content">
                <span class="hero-badge">{content.eyebrow}</span>
                <h1 class="hero-title">
                    { for content.title_lines.iter().map(|line| html! { <span class="title-line">{*line}</span> }) }
                </h1>
                <p class="hero-subtitle">{content.subtitle}</p>
                <div class="hero-cta">
                    { for content.ctas.iter().enumerate().map(|(i, (label, href))| html! {
                        <a class={classes!("btn", if i == 0 { "btn-primary" } else { "btn-secondary" })} href={sanitize_url(href)}>{*label}</a>
                    }) }
                </div>
                <ul class="hero-trust-badges">
                    { for content.badges.iter().map(|b| html! { <li>{*b}</li> }) }
                </ul>
            </div>
            <div class="hero-visual-showcase">
                { render_visual(slide, content.visual) }
            </div>
        </article>
    }
}

fn render_visual(slide: &Slide, visual: Visual) -> Html {
    match visual {
        Visual::Showcase { image, url } => html! {
            <div class="portfolio-showcase-frame">
                <div class="browser-bar">
                    <span class="browser-dots">
                        <span class="dot"></span><span class="dot"></span><span class="dot"></span>
                    </span>
                    <span class="browser-url">{url}</span>
                </div>
                <img class="portfolio-showcase-image" src={image} alt={format!("{} website", slide.name)} loading="lazy" />
                <span class="portfolio-showcase-badge">{"Live"}</span>
            </div>
        },
        Visual::Emblem { image } => html! {
            <div class="emblem-frame">
                <img src={image} alt={format!("{} emblem", slide.name)} loading="lazy" />
                <span class="emblem-badge">{"Client"}</span>
            </div>
        },
        Visual::Placeholder { label } => html! {
            <div class="placeholder-content">
                <span>{label}</span>
            </div>
        },
    }
}

const HERO_CSS: &str = r#"
.hero-section { position: relative; overflow: hidden; padding: 6rem 1.5rem 3rem; }
.hero-slides-container { position: relative; max-width: 1200px; margin: 0 auto; }
.hero-slide { display: grid; grid-template-columns: 1fr 1fr; gap: 3rem; align-items: center; }
.hero-slide.is-leaving { position: absolute; inset: 0; z-index: 1; }
.hero-slide.is-entering { z-index: 3; }
.hero-slide.active { z-index: 2; }
.title-line { display: block; }
.slider-arrow { position: absolute; top: 50%; opacity: 0; pointer-events: none; transition: opacity 0.3s ease; }
.slider-arrow.visible { opacity: 1; pointer-events: auto; }
.slider-arrow-left { left: 1rem; }
.slider-arrow-right { right: 1rem; }
.project-nav { display: flex; justify-content: center; gap: 0.75rem; margin-top: 2rem; }
.project-nav-btn { position: relative; overflow: hidden; }
.project-nav-btn.active .nav-dot { transform: scale(1.3); }
.nav-progress { position: absolute; left: 0; bottom: 0; height: 2px; width: 100%; transform: scaleX(0); transform-origin: left; }
.nav-progress.running { animation-name: nav-progress-fill; animation-timing-function: linear; animation-fill-mode: forwards; }
.nav-progress.paused { animation-play-state: paused; }
@keyframes nav-progress-fill { from { transform: scaleX(0); } to { transform: scaleX(1); } }
@media (max-width: 768px) { .hero-slide { grid-template-columns: 1fr; } }
"#;
