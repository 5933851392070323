use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{js_sys::Array, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};
use yew::prelude::*;

use crate::dom;

const REVEAL_THRESHOLD: f64 = 0.1;
const REVEAL_ROOT_MARGIN: &str = "0px 0px -100px 0px";
const COUNT_UP_DURATION_MS: f64 = 2000.0;
const COUNT_UP_FRAME_MS: u32 = 16;

/// power2 ease-out.
pub fn ease_out_quad(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Displayed counter value `elapsed_ms` into the animation, snapped to whole numbers.
pub fn count_at(target: u32, elapsed_ms: f64, duration_ms: f64) -> u32 {
    if duration_ms <= 0.0 {
        return target;
    }
    (target as f64 * ease_out_quad(elapsed_ms / duration_ms)).round() as u32
}

/// Flips to true the first time the node scrolls into view, then stops observing.
#[hook]
pub fn use_reveal(node: NodeRef) -> bool {
    let revealed = use_state(|| false);
    {
        let revealed = revealed.clone();
        use_effect_with_deps(
            move |node: &NodeRef| {
                let mut installed = None;
                if let Some(el) = node.cast::<Element>() {
                    let on_reveal = revealed.clone();
                    let on_intersect = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
                        for entry in entries.iter() {
                            let entry: IntersectionObserverEntry = entry.unchecked_into();
                            if entry.is_intersecting() {
                                observer.unobserve(&entry.target());
                                on_reveal.set(true);
                            }
                        }
                    }) as Box<dyn FnMut(Array, IntersectionObserver)>);
                    let options = IntersectionObserverInit::new();
                    options.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
                    options.set_root_margin(REVEAL_ROOT_MARGIN);
                    match IntersectionObserver::new_with_options(on_intersect.as_ref().unchecked_ref(), &options) {
                        Ok(observer) => {
                            observer.observe(&el);
                            installed = Some((observer, on_intersect));
                        }
                        Err(e) => {
                            // no observer support: just show the content
                            log::warn!("IntersectionObserver unavailable: {}", crate::error::describe_js(&e));
                            revealed.set(true);
                        }
                    }
                }
                move || {
                    if let Some((observer, _closure)) = installed {
                        observer.disconnect();
                    }
                }
            },
            node,
        );
    }
    *revealed
}

#[derive(Properties, PartialEq)]
pub struct ScrollRevealProps {
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(ScrollReveal)]
pub fn scroll_reveal(props: &ScrollRevealProps) -> Html {
    let node = use_node_ref();
    let visible = use_reveal(node.clone());
    html! {
        <div ref={node} class={classes!("scroll-reveal", props.class.clone(), visible.then_some("is-visible"))}>
            { props.children.clone() }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct CountUpProps {
    pub target: u32,
    #[prop_or_default]
    pub suffix: AttrValue,
    pub label: AttrValue,
}

#[function_component(CountUp)]
pub fn count_up(props: &CountUpProps) -> Html {
    let node = use_node_ref();
    let revealed = use_reveal(node.clone());
    let value = use_state(|| 0u32);

    {
        let value = value.clone();
        let target = props.target;
        use_effect_with_deps(
            move |&(revealed, target): &(bool, u32)| {
                let cancelled = Rc::new(Cell::new(false));
                if revealed {
                    if dom::prefers_reduced_motion() {
                        value.set(target);
                    } else {
                        let cancelled = cancelled.clone();
                        spawn_local(async move {
                            let start = dom::now_ms();
                            loop {
                                if cancelled.get() {
                                    break;
                                }
                                let elapsed = dom::now_ms() - start;
                                value.set(count_at(target, elapsed, COUNT_UP_DURATION_MS));
                                if elapsed >= COUNT_UP_DURATION_MS {
                                    break;
                                }
                                TimeoutFuture::new(COUNT_UP_FRAME_MS).await;
                            }
                        });
                    }
                }
                move || cancelled.set(true)
            },
            (revealed, target),
        );
    }

    html! {
        <div class="stat" ref={node}>
            <span class="stat-number" data-target={props.target.to_string()}>
                { format!("{}{}", *value, props.suffix) }
            </span>
            <span class="stat-label">{ props.label.clone() }</span>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn easing_hits_both_ends() {
        assert_eq!(ease_out_quad(0.0), 0.0);
        assert_eq!(ease_out_quad(1.0), 1.0);
        assert_eq!(ease_out_quad(0.5), 0.75);
        assert_eq!(ease_out_quad(3.0), 1.0);
    }

    #[test]
    fn counter_rises_fast_then_settles() {
        assert_eq!(count_at(100, 0.0, 2000.0), 0);
        assert_eq!(count_at(100, 1000.0, 2000.0), 75);
        assert_eq!(count_at(100, 2000.0, 2000.0), 100);
        assert_eq!(count_at(100, 9999.0, 2000.0), 100);
        assert_eq!(count_at(42, 10.0, 0.0), 42);
    }

    #[test]
    fn counter_never_goes_backwards() {
        let values: Vec<u32> = (0..=20).map(|i| count_at(250, i as f64 * 100.0, 2000.0)).collect();
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(values.last(), Some(&250));
    }
}
