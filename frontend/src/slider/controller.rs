//! Hero slider controller.
//!
//! Turns user input and timer ticks into [`Command`]s for the view layer.
//! Holds no DOM handles, so every behaviour here is testable on the host.

use crate::config::MIN_SWIPE_DISTANCE_PX;

use super::autoplay::{Autoplay, TickId};
use super::machine::{SliderState, Transition};
use super::slides::SlideSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavKey {
    Left,
    Right,
}

impl NavKey {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(NavKey::Left),
            "ArrowRight" => Some(NavKey::Right),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Input {
    /// Mounted: apply the initial theme and start the countdown.
    Start,
    Select(usize),
    Next,
    Prev,
    /// Horizontal touch distance, `end - start`, in px.
    Swipe(f64),
    Key(NavKey),
    Tick(TickId),
    TransitionDone,
    PointerEnter,
    PointerLeave,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Animate(Transition),
    ApplyTheme(&'static str),
    ArmAutoplay { tick: TickId, delay_ms: u32 },
    CancelAutoplay,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SliderController {
    slides: SlideSet,
    state: SliderState,
    autoplay: Autoplay,
}

impl SliderController {
    pub fn new(slides: SlideSet, autoplay_delay_ms: u32) -> Self {
        let state = SliderState::new(slides.len());
        Self {
            slides,
            state,
            autoplay: Autoplay::new(autoplay_delay_ms),
        }
    }

    pub fn slides(&self) -> &SlideSet {
        &self.slides
    }

    pub fn state(&self) -> &SliderState {
        &self.state
    }

    pub fn autoplay(&self) -> &Autoplay {
        &self.autoplay
    }

    /// Keyboard navigation only applies while the pointer is over the hero.
    pub fn accepts_keys(&self) -> bool {
        self.autoplay.is_hovered() && !self.state.is_transitioning()
    }

    pub fn handle(&mut self, input: Input, nodes_present: impl Fn(usize) -> bool) -> Vec<Command> {
        match input {
            Input::Start => {
                let mut commands = vec![Command::ApplyTheme(self.slides.theme(self.state.current()))];
                commands.extend(self.rearm());
                commands
            }
            Input::Select(target) => self.navigate(target, nodes_present),
            Input::Next => self.navigate(self.state.next_index(), nodes_present),
            Input::Prev => self.navigate(self.state.prev_index(), nodes_present),
            Input::Swipe(distance) => {
                if distance.abs() <= MIN_SWIPE_DISTANCE_PX {
                    return Vec::new();
                }
                let target = if distance > 0.0 {
                    self.state.prev_index()
                } else {
                    self.state.next_index()
                };
                self.navigate(target, nodes_present)
            }
            Input::Key(key) => {
                if !self.accepts_keys() {
                    return Vec::new();
                }
                let target = match key {
                    NavKey::Left => self.state.prev_index(),
                    NavKey::Right => self.state.next_index(),
                };
                self.navigate(target, nodes_present)
            }
            Input::Tick(tick) => {
                if !self.autoplay.accept(tick) {
                    return Vec::new();
                }
                let commands = self.navigate(self.state.next_index(), nodes_present);
                if commands.is_empty() {
                    // nothing to animate, keep the rotation going
                    return self.rearm();
                }
                commands
            }
            Input::TransitionDone => match self.state.complete() {
                Some(t) => {
                    let mut commands = vec![Command::ApplyTheme(self.slides.theme(t.to))];
                    commands.extend(self.rearm());
                    commands
                }
                None => Vec::new(),
            },
            Input::PointerEnter => {
                self.autoplay.set_hovered(true);
                self.autoplay.cancel();
                vec![Command::CancelAutoplay]
            }
            Input::PointerLeave => {
                self.autoplay.set_hovered(false);
                self.rearm()
            }
        }
    }

    fn navigate(&mut self, target: usize, nodes_present: impl Fn(usize) -> bool) -> Vec<Command> {
        match self.state.navigate(target, nodes_present) {
            Some(transition) => {
                self.autoplay.cancel();
                vec![Command::CancelAutoplay, Command::Animate(transition)]
            }
            None => Vec::new(),
        }
    }

    /// Fresh full-length countdown, unless hovered or mid-transition.
    fn rearm(&mut self) -> Vec<Command> {
        if self.autoplay.is_hovered() || self.state.is_transitioning() {
            return Vec::new();
        }
        let tick = self.autoplay.arm();
        vec![Command::ArmAutoplay {
            tick,
            delay_ms: self.autoplay.delay_ms(),
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slider::machine::{Direction, SlideVisibility};
    use crate::slider::slides::named;
    use pretty_assertions::assert_eq;

    const DELAY: u32 = 6000;

    fn present(_: usize) -> bool {
        true
    }

    fn abcd() -> SliderController {
        SliderController::new(named(&["a", "b", "c", "d"]), DELAY)
    }

    fn current_id(c: &SliderController) -> &'static str {
        c.slides().get(c.state().current()).unwrap().id
    }

    fn armed_tick(commands: &[Command]) -> Option<TickId> {
        commands.iter().find_map(|c| match c {
            Command::ArmAutoplay { tick, .. } => Some(*tick),
            _ => None,
        })
    }

    /// Runs an input and, when it starts a transition, lets it finish.
    fn settle(c: &mut SliderController, input: Input) -> Vec<Command> {
        let mut out = c.handle(input, present);
        if out.iter().any(|cmd| matches!(cmd, Command::Animate(_))) {
            out.extend(c.handle(Input::TransitionDone, present));
        }
        out
    }

    #[test]
    fn start_applies_theme_and_arms() {
        let mut c = abcd();
        let out = c.handle(Input::Start, present);
        assert_eq!(out[0], Command::ApplyTheme("a"));
        assert!(matches!(out[1], Command::ArmAutoplay { delay_ms: DELAY, .. }));
    }

    #[test]
    fn next_three_times_then_wraps() {
        let mut c = abcd();
        c.handle(Input::Start, present);
        for _ in 0..3 {
            settle(&mut c, Input::Next);
        }
        assert_eq!(current_id(&c), "d");
        settle(&mut c, Input::Next);
        assert_eq!(current_id(&c), "a");
        assert!(!c.state().is_transitioning());
    }

    #[test]
    fn second_request_mid_transition_is_dropped() {
        let mut c = abcd();
        c.handle(Input::Start, present);
        let first = c.handle(Input::Select(2), present);
        assert_eq!(
            first,
            vec![
                Command::CancelAutoplay,
                Command::Animate(Transition {
                    from: 0,
                    to: 2,
                    direction: Direction::Next
                })
            ]
        );
        assert_eq!(c.handle(Input::Select(1), present), Vec::new());
        c.handle(Input::TransitionDone, present);
        assert_eq!(current_id(&c), "c");
        assert!(!c.state().is_transitioning());
    }

    #[test]
    fn completion_shows_only_the_target() {
        let mut c = abcd();
        settle(&mut c, Input::Select(3));
        let shown: Vec<_> = (0..4)
            .filter(|&i| c.state().visibility(i) == SlideVisibility::Active)
            .collect();
        assert_eq!(shown, vec![3]);
        assert!((0..4).filter(|&i| i != 3).all(|i| !c.state().visibility(i).is_shown()));
    }

    #[test]
    fn theme_changes_on_completion_not_before() {
        let mut c = abcd();
        let started = c.handle(Input::Select(1), present);
        assert!(!started.iter().any(|cmd| matches!(cmd, Command::ApplyTheme(_))));
        let done = c.handle(Input::TransitionDone, present);
        assert_eq!(done[0], Command::ApplyTheme("b"));
    }

    #[test]
    fn autoplay_cycles_and_wraps() {
        let mut c = abcd();
        let mut tick = armed_tick(&c.handle(Input::Start, present)).unwrap();
        let mut seen = vec![current_id(&c)];
        for _ in 0..4 {
            let out = settle(&mut c, Input::Tick(tick));
            seen.push(current_id(&c));
            tick = armed_tick(&out).expect("countdown re-armed after each transition");
        }
        assert_eq!(seen, vec!["a", "b", "c", "d", "a"]);
    }

    #[test]
    fn transition_cancels_pending_tick_and_rearms_after() {
        let mut c = abcd();
        let tick = armed_tick(&c.handle(Input::Start, present)).unwrap();
        c.handle(Input::Next, present);
        assert_eq!(c.autoplay().armed(), None);
        // the old countdown firing mid-transition does nothing
        assert_eq!(c.handle(Input::Tick(tick), present), Vec::new());
        let done = c.handle(Input::TransitionDone, present);
        let fresh = armed_tick(&done).unwrap();
        assert_ne!(fresh, tick);
        assert!(done.contains(&Command::ArmAutoplay {
            tick: fresh,
            delay_ms: DELAY
        }));
    }

    #[test]
    fn pause_then_resume_restarts_from_zero() {
        let mut c = abcd();
        let original = armed_tick(&c.handle(Input::Start, present)).unwrap();
        assert_eq!(c.handle(Input::PointerEnter, present), vec![Command::CancelAutoplay]);
        let resumed = c.handle(Input::PointerLeave, present);
        let fresh = armed_tick(&resumed).unwrap();
        assert_eq!(
            resumed,
            vec![Command::ArmAutoplay {
                tick: fresh,
                delay_ms: DELAY
            }]
        );
        // the countdown that was running before the pause never fires a navigation
        assert_eq!(c.handle(Input::Tick(original), present), Vec::new());
        assert_eq!(current_id(&c), "a");
    }

    #[test]
    fn hovered_completion_does_not_rearm() {
        let mut c = abcd();
        c.handle(Input::Start, present);
        c.handle(Input::PointerEnter, present);
        c.handle(Input::Next, present);
        let done = c.handle(Input::TransitionDone, present);
        assert_eq!(done, vec![Command::ApplyTheme("b")]);
        assert_eq!(c.autoplay().armed(), None);
    }

    #[test]
    fn leave_mid_transition_waits_for_completion() {
        let mut c = abcd();
        c.handle(Input::PointerEnter, present);
        c.handle(Input::Next, present);
        assert_eq!(c.handle(Input::PointerLeave, present), Vec::new());
        let done = c.handle(Input::TransitionDone, present);
        assert!(armed_tick(&done).is_some());
    }

    #[test]
    fn keys_only_while_hovered() {
        let mut c = abcd();
        assert_eq!(c.handle(Input::Key(NavKey::Right), present), Vec::new());
        c.handle(Input::PointerEnter, present);
        settle(&mut c, Input::Key(NavKey::Left));
        assert_eq!(current_id(&c), "d");
        assert_eq!(NavKey::from_key("ArrowRight"), Some(NavKey::Right));
        assert_eq!(NavKey::from_key("Enter"), None);
    }

    #[test]
    fn swipe_needs_minimum_distance() {
        let mut c = abcd();
        assert_eq!(c.handle(Input::Swipe(-50.0), present), Vec::new());
        settle(&mut c, Input::Swipe(-80.0));
        assert_eq!(current_id(&c), "b");
        settle(&mut c, Input::Swipe(120.0));
        assert_eq!(current_id(&c), "a");
    }

    #[test]
    fn missing_nodes_make_navigation_a_noop() {
        let mut c = abcd();
        c.handle(Input::Start, present);
        let out = c.handle(Input::Select(2), |i| i != 2);
        assert_eq!(out, Vec::new());
        assert_eq!(current_id(&c), "a");
        assert!(!c.state().is_transitioning());
        // countdown untouched
        assert!(c.autoplay().armed().is_some());
    }

    #[test]
    fn tick_with_missing_nodes_keeps_rotating() {
        let mut c = abcd();
        let tick = armed_tick(&c.handle(Input::Start, present)).unwrap();
        let out = c.handle(Input::Tick(tick), |i| i != 1);
        assert!(armed_tick(&out).is_some());
        assert_eq!(current_id(&c), "a");
    }

    #[test]
    fn single_slide_never_transitions() {
        let mut c = SliderController::new(named(&["solo"]), DELAY);
        let tick = armed_tick(&c.handle(Input::Start, present)).unwrap();
        assert!(!c.handle(Input::Next, present).iter().any(|cmd| matches!(cmd, Command::Animate(_))));
        let out = c.handle(Input::Tick(tick), present);
        assert!(armed_tick(&out).is_some());
        assert_eq!(c.state().current(), 0);
    }
}
