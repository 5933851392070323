//! Visual handoff between two slides.
//!
//! A transition is a list of [`Cue`]s: per-element from/to poses with start
//! offsets. [`Choreographed`] staggers background imagery, text and calls to
//! action; [`CssFallback`] is a two-step opacity + position swap used when the
//! user asks for reduced motion. Both share the same runner, so every touched
//! element ends with its inline styles cleared.

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;
use yew::Callback;

use super::machine::Direction;
use crate::dom;

const X_OFFSET: f64 = 120.0;
const PARALLAX_RATIO: f64 = 0.5;
const MASTER_MS: u32 = 700;
const FALLBACK_OFFSET: f64 = 60.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub opacity: f64,
    pub scale: f64,
}

impl Pose {
    pub const NATURAL: Pose = Pose {
        x: 0.0,
        y: 0.0,
        opacity: 1.0,
        scale: 1.0,
    };

    pub const fn hidden() -> Pose {
        Pose {
            opacity: 0.0,
            ..Pose::NATURAL
        }
    }

    fn shifted(x: f64, y: f64, scale: f64) -> Pose {
        Pose {
            x,
            y,
            opacity: 0.0,
            scale,
        }
    }

    pub fn transform(&self) -> String {
        format!(
            "translate3d({}px, {}px, 0) scale({})",
            self.x, self.y, self.scale
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Easing {
    Smooth,
    Smoother,
    Bounce,
    Elastic,
    InOut,
    In,
}

impl Easing {
    pub fn css(self) -> &'static str {
        match self {
            Easing::Smooth => "cubic-bezier(0.215, 0.61, 0.355, 1)",
            Easing::Smoother => "cubic-bezier(0.165, 0.84, 0.44, 1)",
            Easing::Bounce => "cubic-bezier(0.34, 1.56, 0.64, 1)",
            Easing::Elastic => "cubic-bezier(0.5, 1.8, 0.4, 0.8)",
            Easing::InOut => "cubic-bezier(0.455, 0.03, 0.515, 0.955)",
            Easing::In => "cubic-bezier(0.55, 0.085, 0.68, 0.53)",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Outgoing,
    Incoming,
}

/// One timed tween. An empty selector targets the slide itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cue {
    pub side: Side,
    pub selector: &'static str,
    pub from: Pose,
    pub to: Pose,
    pub at_ms: u32,
    pub duration_ms: u32,
    pub stagger_ms: u32,
    pub easing: Easing,
}

impl Cue {
    fn new(side: Side, selector: &'static str, from: Pose, to: Pose, at_ms: u32, duration_ms: u32, easing: Easing) -> Self {
        Self {
            side,
            selector,
            from,
            to,
            at_ms,
            duration_ms,
            stagger_ms: 0,
            easing,
        }
    }

    fn stagger(mut self, stagger_ms: u32) -> Self {
        self.stagger_ms = stagger_ms;
        self
    }

    pub fn delay_for(&self, nth: usize) -> u32 {
        self.at_ms + self.stagger_ms * nth as u32
    }

    /// When the last of `count` matched elements settles.
    pub fn end_ms(&self, count: usize) -> u32 {
        self.delay_for(count.saturating_sub(1)) + self.duration_ms
    }
}

/// Staggered exit/entrance for the hero slides.
pub fn choreography(direction: Direction) -> Vec<Cue> {
    use Easing::*;
    use Side::*;

    let x_out = -direction.sign() * X_OFFSET;
    let x_in = direction.sign() * X_OFFSET;
    let d = MASTER_MS;
    let n = Pose::NATURAL;

    vec![
        // old slide out: visual leaves faster than text
        Cue::new(Outgoing, ".hero-visual-showcase", n, Pose::shifted(x_out * 1.2, 0.0, 0.95), 0, d * 8 / 10, InOut),
        Cue::new(Outgoing, ".hero-text-content", n, Pose::shifted(x_out * PARALLAX_RATIO, 0.0, 1.0), 50, d * 7 / 10, InOut),
        Cue::new(Outgoing, "", n, Pose::hidden(), 100, d / 2, In),
        // new slide in
        Cue::new(Incoming, "", Pose::shifted(x_in, 0.0, 1.0), n, 200, d, Smooth),
        Cue::new(Incoming, ".hero-text-content", Pose::shifted(x_in * PARALLAX_RATIO, 0.0, 1.0), n, 250, d * 9 / 10, Smoother),
        Cue::new(Incoming, ".hero-visual-showcase", Pose::shifted(x_in * 1.2, 0.0, 0.95), n, 300, d, Smoother),
        Cue::new(Incoming, ".title-line", Pose::shifted(0.0, 30.0, 1.0), n, 350, 600, Smoother).stagger(100),
        Cue::new(Incoming, ".hero-subtitle", Pose::shifted(0.0, 20.0, 1.0), n, 550, 500, Smooth),
        Cue::new(Incoming, ".hero-cta .btn", Pose::shifted(0.0, 15.0, 0.95), n, 650, 400, Bounce).stagger(80),
        Cue::new(Incoming, ".hero-trust-badges", Pose::shifted(0.0, 10.0, 1.0), n, 750, 400, Smooth),
        // showcase furniture
        Cue::new(Incoming, ".emblem-frame", Pose::shifted(0.0, 0.0, 0.7), n, 350, 900, Elastic),
        Cue::new(Incoming, ".portfolio-showcase-frame", Pose::shifted(0.0, 0.0, 0.9), n, 400, 800, Smoother),
        Cue::new(Incoming, ".placeholder-content", Pose::shifted(0.0, 0.0, 0.9), n, 400, 600, Smooth),
        Cue::new(Incoming, ".portfolio-showcase-image", Pose::shifted(0.0, 0.0, 1.1), n, 500, 600, Smooth),
        Cue::new(Incoming, ".browser-dots .dot", Pose::shifted(0.0, 0.0, 0.0), n, 700, 300, Elastic).stagger(60),
        Cue::new(Incoming, ".portfolio-showcase-badge, .emblem-badge", Pose::shifted(0.0, -20.0, 0.7), n, 800, 500, Bounce),
    ]
}

/// Opacity + position swap without per-element staggering.
pub fn fallback(direction: Direction) -> Vec<Cue> {
    let sign = direction.sign();
    vec![
        Cue::new(Side::Outgoing, "", Pose::NATURAL, Pose::shifted(-sign * FALLBACK_OFFSET, 0.0, 1.0), 0, 400, Easing::Smooth),
        Cue::new(Side::Incoming, "", Pose::shifted(sign * FALLBACK_OFFSET, 0.0, 1.0), Pose::NATURAL, 0, 500, Easing::Smooth),
    ]
}

/// Both slides, mounted and visible, at the moment the handoff starts.
pub struct TransitionStage {
    pub outgoing: HtmlElement,
    pub incoming: HtmlElement,
    pub direction: Direction,
}

/// Keeps the completion timer alive. Dropping it cancels the pending `done`.
pub struct AnimationHandle {
    _finish: Timeout,
}

pub trait Animator {
    fn cues(&self, direction: Direction) -> Vec<Cue>;

    /// Plays the cues and emits `done` once, after every element settled
    /// and had its inline styles cleared.
    fn run(&self, stage: TransitionStage, done: Callback<()>) -> AnimationHandle {
        let mut tweens: Vec<(HtmlElement, Cue, usize)> = Vec::new();
        let mut total_ms = 0;

        for cue in self.cues(stage.direction) {
            let root = match cue.side {
                Side::Outgoing => &stage.outgoing,
                Side::Incoming => &stage.incoming,
            };
            let targets = select(root, cue.selector);
            if targets.is_empty() {
                continue;
            }
            total_ms = total_ms.max(cue.end_ms(targets.len()));
            for (nth, el) in targets.into_iter().enumerate() {
                dom::set_styles(
                    &el,
                    &[
                        ("transition", "none".to_string()),
                        ("transform", cue.from.transform()),
                        ("opacity", cue.from.opacity.to_string()),
                    ],
                );
                tweens.push((el, cue, nth));
            }
        }

        // force a style flush so the from-poses take effect before transitions start
        let _ = stage.incoming.offset_width();

        for (el, cue, nth) in &tweens {
            let delay = cue.delay_for(*nth);
            let ease = cue.easing.css();
            dom::set_styles(
                el,
                &[
                    (
                        "transition",
                        format!(
                            "transform {d}ms {ease} {delay}ms, opacity {d}ms {ease} {delay}ms",
                            d = cue.duration_ms
                        ),
                    ),
                    ("transform", cue.to.transform()),
                    ("opacity", cue.to.opacity.to_string()),
                ],
            );
        }

        let touched: Vec<HtmlElement> = tweens.into_iter().map(|(el, _, _)| el).collect();
        let finish = Timeout::new(total_ms, move || {
            for el in &touched {
                dom::clear_styles(el, &["transition", "transform", "opacity"]);
            }
            done.emit(());
        });
        AnimationHandle { _finish: finish }
    }
}

pub struct Choreographed;

impl Animator for Choreographed {
    fn cues(&self, direction: Direction) -> Vec<Cue> {
        choreography(direction)
    }
}

pub struct CssFallback;

impl Animator for CssFallback {
    fn cues(&self, direction: Direction) -> Vec<Cue> {
        fallback(direction)
    }
}

/// Picked once at mount; never re-evaluated mid-transition.
pub fn select_animator(reduced_motion: bool) -> Box<dyn Animator> {
    if reduced_motion {
        log::info!("reduced motion requested, using simplified slide transitions");
        Box::new(CssFallback)
    } else {
        Box::new(Choreographed)
    }
}

fn select(root: &HtmlElement, selector: &str) -> Vec<HtmlElement> {
    if selector.is_empty() {
        return vec![root.clone()];
    }
    let Ok(list) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn total(cues: &[Cue]) -> u32 {
        cues.iter().map(|c| c.end_ms(1)).max().unwrap_or(0)
    }

    #[test]
    fn every_element_converges_to_a_terminal_pose() {
        for direction in [Direction::Next, Direction::Prev] {
            for cue in choreography(direction).into_iter().chain(fallback(direction)) {
                match cue.side {
                    Side::Incoming => assert_eq!(cue.to, Pose::NATURAL, "{}", cue.selector),
                    Side::Outgoing => {
                        assert_eq!(cue.from, Pose::NATURAL, "{}", cue.selector);
                        assert_eq!(cue.to.opacity, 0.0, "{}", cue.selector);
                    }
                }
            }
        }
    }

    #[test]
    fn offsets_mirror_with_direction() {
        let next = choreography(Direction::Next);
        let prev = choreography(Direction::Prev);
        for (a, b) in next.iter().zip(prev.iter()) {
            assert_eq!(a.from.x, -b.from.x);
            assert_eq!(a.to.x, -b.to.x);
            assert_eq!(a.at_ms, b.at_ms);
        }
        let incoming_root = next
            .iter()
            .find(|c| c.side == Side::Incoming && c.selector.is_empty())
            .unwrap();
        assert_eq!(incoming_root.from.x, X_OFFSET);
    }

    #[test]
    fn stagger_extends_the_end() {
        let titles = choreography(Direction::Next)
            .into_iter()
            .find(|c| c.selector == ".title-line")
            .unwrap();
        assert_eq!(titles.end_ms(1), 950);
        assert_eq!(titles.end_ms(3), 1150);
        assert_eq!(titles.delay_for(2), 550);
        assert_eq!(titles.end_ms(0), 950);
    }

    #[test]
    fn fallback_is_short_and_unstaggered() {
        let cues = fallback(Direction::Next);
        assert_eq!(total(&cues), 500);
        assert!(cues.iter().all(|c| c.stagger_ms == 0 && c.selector.is_empty()));
    }

    #[test]
    fn full_choreography_outlasts_the_master_tween() {
        assert!(total(&choreography(Direction::Prev)) >= MASTER_MS + 200);
    }

    #[test]
    fn transform_renders_css() {
        assert_eq!(
            Pose::shifted(-60.0, 0.0, 1.0).transform(),
            "translate3d(-60px, 0px, 0) scale(1)"
        );
    }
}
