//! Slide selection state: `Idle(i) -> Transitioning(i -> j) -> Idle(j)`.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

impl Direction {
    pub fn between(from: usize, to: usize) -> Self {
        if to > from {
            Direction::Next
        } else {
            Direction::Prev
        }
    }

    /// Sign applied to horizontal offsets: incoming slides enter from the
    /// right when moving forward.
    pub fn sign(self) -> f64 {
        match self {
            Direction::Next => 1.0,
            Direction::Prev => -1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from: usize,
    pub to: usize,
    pub direction: Direction,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Transitioning(Transition),
}

/// How a slide should render for the current phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlideVisibility {
    Active,
    Entering,
    Leaving,
    Hidden,
}

impl SlideVisibility {
    pub fn is_shown(self) -> bool {
        !matches!(self, SlideVisibility::Hidden)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SliderState {
    len: usize,
    current: usize,
    phase: Phase,
}

impl SliderState {
    /// `len` must be non-zero; `SlideSet` guarantees it.
    pub fn new(len: usize) -> Self {
        debug_assert!(len > 0);
        Self {
            len: len.max(1),
            current: 0,
            phase: Phase::Idle,
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Index of the selected slide. While a transition is in flight this is
    /// already the target.
    pub fn current(&self) -> usize {
        self.current
    }

    #[cfg(test)]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.phase, Phase::Transitioning(_))
    }

    pub fn next_index(&self) -> usize {
        (self.current + 1) % self.len
    }

    pub fn prev_index(&self) -> usize {
        (self.current + self.len - 1) % self.len
    }

    /// Starts a transition to `target`. Dropped (returns `None`) when the
    /// target is the current slide, out of range, a transition is already in
    /// flight, or `nodes_present` reports a slide without DOM nodes.
    pub fn navigate(
        &mut self,
        target: usize,
        nodes_present: impl Fn(usize) -> bool,
    ) -> Option<Transition> {
        if self.is_transitioning() || target >= self.len || target == self.current {
            return None;
        }
        if !nodes_present(self.current) || !nodes_present(target) {
            log::debug!("slide nodes missing for {} -> {}", self.current, target);
            return None;
        }
        let transition = Transition {
            from: self.current,
            to: target,
            direction: Direction::between(self.current, target),
        };
        self.current = target;
        self.phase = Phase::Transitioning(transition);
        Some(transition)
    }

    /// Finishes the in-flight transition. No-op while idle.
    pub fn complete(&mut self) -> Option<Transition> {
        match self.phase {
            Phase::Transitioning(t) => {
                self.phase = Phase::Idle;
                Some(t)
            }
            Phase::Idle => None,
        }
    }

    pub fn visibility(&self, index: usize) -> SlideVisibility {
        match self.phase {
            Phase::Transitioning(t) if index == t.to => SlideVisibility::Entering,
            Phase::Transitioning(t) if index == t.from => SlideVisibility::Leaving,
            Phase::Idle if index == self.current => SlideVisibility::Active,
            _ => SlideVisibility::Hidden,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn all(_: usize) -> bool {
        true
    }

    #[test]
    fn direction_follows_slide_order() {
        assert_eq!(Direction::between(0, 2), Direction::Next);
        assert_eq!(Direction::between(3, 1), Direction::Prev);
        // wrap from last to first moves backwards in slide order
        assert_eq!(Direction::between(3, 0), Direction::Prev);
    }

    #[test]
    fn navigate_then_complete() {
        let mut state = SliderState::new(4);
        let t = state.navigate(2, all).unwrap();
        assert_eq!(
            t,
            Transition {
                from: 0,
                to: 2,
                direction: Direction::Next
            }
        );
        assert!(state.is_transitioning());
        assert_eq!(state.visibility(0), SlideVisibility::Leaving);
        assert_eq!(state.visibility(2), SlideVisibility::Entering);
        assert_eq!(state.visibility(1), SlideVisibility::Hidden);

        assert_eq!(state.complete(), Some(t));
        assert_eq!(state.phase(), Phase::Idle);
        let shown: Vec<_> = (0..4).filter(|&i| state.visibility(i).is_shown()).collect();
        assert_eq!(shown, vec![2]);
        assert_eq!(state.visibility(2), SlideVisibility::Active);
    }

    #[test]
    fn navigate_is_dropped_mid_transition() {
        let mut state = SliderState::new(4);
        state.navigate(2, all).unwrap();
        let before = state.clone();
        assert_eq!(state.navigate(1, all), None);
        assert_eq!(state, before);
    }

    #[test]
    fn same_target_and_out_of_range_are_ignored() {
        let mut state = SliderState::new(3);
        assert_eq!(state.navigate(0, all), None);
        assert_eq!(state.navigate(3, all), None);
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[test]
    fn missing_nodes_keep_state_idle() {
        let mut state = SliderState::new(3);
        assert_eq!(state.navigate(2, |i| i != 2), None);
        assert_eq!(state.current(), 0);
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.navigate(1, |i| i != 0), None);
        assert_eq!(state.current(), 0);
    }

    #[test]
    fn complete_while_idle_is_noop() {
        let mut state = SliderState::new(2);
        assert_eq!(state.complete(), None);
        assert_eq!(state.current(), 0);
    }

    #[test]
    fn neighbours_wrap() {
        let mut state = SliderState::new(4);
        assert_eq!(state.prev_index(), 3);
        state.navigate(3, all);
        state.complete();
        assert_eq!(state.next_index(), 0);
    }

    #[test]
    fn current_stays_in_range_over_long_sequences() {
        let mut state = SliderState::new(5);
        // deterministic pseudo-random walk of targets, completions and drops
        let mut seed = 7u64;
        for step in 0..500 {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let target = (seed >> 33) as usize % 7;
            state.navigate(target, all);
            if step % 3 != 0 {
                state.complete();
            }
            assert!(state.current() < state.len());
        }
    }
}
