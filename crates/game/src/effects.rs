//! Travel transition effects.
//!
//! When the galaxy accepts a travel request it hands the effect a
//! [`PendingTransition`] token. The effect plays for as long as it likes and then
//! returns the token from [`TransitionEffect::poll`]; the galaxy commits the system
//! swap only when it gets the token back. The token cannot be cloned, so a
//! transition is committed at most once.

/// Proof that a travel request was accepted and is waiting for its effect.
#[derive(Debug, PartialEq, Eq)]
pub struct PendingTransition {
    id: u64,
    from: usize,
    to: usize,
}

impl PendingTransition {
    pub(crate) fn new(id: u64, from: usize, to: usize) -> Self {
        Self { id, from, to }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn from(&self) -> usize {
        self.from
    }

    pub fn to(&self) -> usize {
        self.to
    }
}

/// Visual sequence that gates a system swap.
pub trait TransitionEffect {
    /// Begin the sequence. The effect holds `pending` until it finishes.
    fn start(&mut self, pending: PendingTransition);

    /// Advance by `dt` seconds. Returns the token exactly once, when finished.
    fn poll(&mut self, dt: f32) -> Option<PendingTransition>;

    /// Progress of the running sequence in `[0, 1]`, or `None` when idle.
    fn progress(&self) -> Option<f32> {
        None
    }
}

/// Warp tunnel: a timed sequence of `duration` seconds.
#[derive(Debug)]
pub struct WarpEffect {
    duration: f32,
    timer: f32,
    pending: Option<PendingTransition>,
}

impl WarpEffect {
    pub fn new(duration: f32) -> Self {
        Self {
            duration: duration.max(0.0),
            timer: 0.0,
            pending: None,
        }
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Streak intensity for the tunnel: ramps up, holds, ramps down.
    pub fn intensity(&self) -> f32 {
        match self.progress() {
            Some(p) if p < 0.2 => p / 0.2,
            Some(p) if p > 0.8 => (1.0 - p) / 0.2,
            Some(_) => 1.0,
            None => 0.0,
        }
    }
}

impl TransitionEffect for WarpEffect {
    fn start(&mut self, pending: PendingTransition) {
        log::debug!("Warp effect started toward system {}", pending.to());
        self.timer = 0.0;
        self.pending = Some(pending);
    }

    fn poll(&mut self, dt: f32) -> Option<PendingTransition> {
        self.pending.as_ref()?;
        self.timer += dt.max(0.0);
        if self.timer >= self.duration {
            self.pending.take()
        } else {
            None
        }
    }

    fn progress(&self) -> Option<f32> {
        self.pending.as_ref().map(|_| {
            if self.duration <= 0.0 {
                1.0
            } else {
                (self.timer / self.duration).clamp(0.0, 1.0)
            }
        })
    }
}
