use gloo_timers::callback::Timeout;

/// Identifies one armed countdown. A tick carrying an id that is no longer
/// armed is stale and must be ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TickId(u64);

/// Autoplay bookkeeping. Pure: the view layer owns the actual timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Autoplay {
    delay_ms: u32,
    armed: Option<TickId>,
    issued: u64,
    hovered: bool,
}

impl Autoplay {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            delay_ms,
            armed: None,
            issued: 0,
            hovered: false,
        }
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    pub fn armed(&self) -> Option<TickId> {
        self.armed
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    /// Arms a fresh full-length countdown, superseding any armed one.
    pub fn arm(&mut self) -> TickId {
        self.issued += 1;
        let id = TickId(self.issued);
        self.armed = Some(id);
        id
    }

    /// Disarms. Safe to call any number of times.
    pub fn cancel(&mut self) {
        self.armed = None;
    }

    /// Consumes a fired tick; true only for the currently armed one.
    pub fn accept(&mut self, tick: TickId) -> bool {
        if self.armed == Some(tick) {
            self.armed = None;
            true
        } else {
            false
        }
    }
}

/// Browser side of the countdown: at most one pending `Timeout`.
#[derive(Default)]
pub struct AutoplayTimer {
    pending: Option<Timeout>,
}

impl AutoplayTimer {
    pub fn schedule(&mut self, delay_ms: u32, fire: impl FnOnce() + 'static) {
        self.cancel();
        self.pending = Some(Timeout::new(delay_ms, fire));
    }

    /// Cancelling twice is fine: the second call finds nothing pending.
    pub fn cancel(&mut self) {
        if let Some(timeout) = self.pending.take() {
            timeout.cancel();
        }
    }

    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
