//! Galaxy: the ordered set of solar systems and travel between them.
//!
//! Travel is a two-state machine. `Idle` accepts a request, hands a
//! [`PendingTransition`] to the transition effect and moves to `Transitioning`;
//! requests arriving while transitioning are dropped. Only when the effect returns
//! the token does the galaxy swap the active system, go back to `Idle`, and notify
//! listeners.

use procgen::{generate_system_configs, GalaxyConfig};
use rand::Rng;

use crate::effects::{PendingTransition, TransitionEffect};
use crate::solar_system::{EvolutionEvent, SolarSystem, SystemSettings};

/// Travel state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelState {
    Idle,
    Transitioning { id: u64, from: usize, to: usize },
}

/// Delivered to listeners after a committed travel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemChange {
    pub from: usize,
    pub to: usize,
    pub name: String,
}

pub type SystemChangeListener = Box<dyn FnMut(&SystemChange)>;

pub struct Galaxy {
    config: GalaxyConfig,
    systems: Vec<SolarSystem>,
    current: usize,
    travel: TravelState,
    next_transition_id: u64,
    effect: Box<dyn TransitionEffect>,
    listeners: Vec<SystemChangeListener>,
}

impl Galaxy {
    /// Generate every system eagerly and activate system 0.
    ///
    /// A galaxy always has at least one system; a config asking for zero gets one.
    pub fn create<R: Rng>(
        config: GalaxyConfig,
        settings: SystemSettings,
        effect: Box<dyn TransitionEffect>,
        rng: &mut R,
    ) -> Self {
        let config = if config.system_count == 0 {
            log::warn!("Galaxy config asked for 0 systems, generating 1");
            GalaxyConfig {
                system_count: 1,
                ..config
            }
        } else {
            config
        };

        let mut systems: Vec<SolarSystem> = generate_system_configs(&config)
            .into_iter()
            .map(|system| SolarSystem::create(system, settings, rng))
            .collect();
        systems[0].set_active(true);

        log::info!(
            "Galaxy created: {} systems from seed {}, starting in {}",
            systems.len(),
            config.seed,
            systems[0].name()
        );

        Self {
            config,
            systems,
            current: 0,
            travel: TravelState::Idle,
            next_transition_id: 1,
            effect,
            listeners: Vec::new(),
        }
    }

    /// Advance one tick: let the transition effect run (committing travel when it
    /// finishes), then update the active system.
    pub fn update(&mut self, dt: f32) -> Vec<EvolutionEvent> {
        if let Some(done) = self.effect.poll(dt) {
            self.complete_transition(done);
        }
        self.systems[self.current].update()
    }

    /// Request travel to system `index`. Returns true when the request was accepted.
    pub fn travel_to_system(&mut self, index: usize) -> bool {
        if index >= self.systems.len() || index == self.current {
            log::debug!("Ignoring travel request to system {}", index);
            return false;
        }
        if let TravelState::Transitioning { to, .. } = self.travel {
            log::debug!(
                "Dropping travel request to system {} while warping to {}",
                index,
                to
            );
            return false;
        }

        let id = self.next_transition_id;
        self.next_transition_id += 1;
        self.travel = TravelState::Transitioning {
            id,
            from: self.current,
            to: index,
        };
        log::debug!("Travel accepted: system {} -> {}", self.current, index);
        self.effect
            .start(PendingTransition::new(id, self.current, index));
        true
    }

    pub fn travel_to_next_system(&mut self) -> bool {
        let next = (self.current + 1) % self.systems.len();
        self.travel_to_system(next)
    }

    pub fn travel_to_previous_system(&mut self) -> bool {
        let count = self.systems.len();
        let previous = (self.current + count - 1) % count;
        self.travel_to_system(previous)
    }

    /// Commit the transition identified by `done`. Tokens that do not match the
    /// in-flight transition are ignored.
    pub fn complete_transition(&mut self, done: PendingTransition) -> bool {
        let (from, to) = match self.travel {
            TravelState::Transitioning { id, from, to } if id == done.id() => (from, to),
            _ => {
                log::warn!("Ignoring stale transition token {}", done.id());
                return false;
            }
        };

        self.systems[from].set_active(false);
        self.systems[to].set_active(true);
        self.current = to;
        self.travel = TravelState::Idle;

        let change = SystemChange {
            from,
            to,
            name: self.systems[to].name().to_string(),
        };
        log::info!("Arrived at {} (system {})", change.name, to);
        for listener in &mut self.listeners {
            listener(&change);
        }
        true
    }

    /// Register a listener called, in registration order, after every committed
    /// travel.
    pub fn on_system_change(&mut self, listener: impl FnMut(&SystemChange) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn config(&self) -> &GalaxyConfig {
        &self.config
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_system(&self) -> &SolarSystem {
        &self.systems[self.current]
    }

    pub fn current_system_mut(&mut self) -> &mut SolarSystem {
        &mut self.systems[self.current]
    }

    pub fn system(&self, index: usize) -> Option<&SolarSystem> {
        self.systems.get(index)
    }

    pub fn systems(&self) -> &[SolarSystem] {
        &self.systems
    }

    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    pub fn travel_state(&self) -> TravelState {
        self.travel
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.travel, TravelState::Transitioning { .. })
    }

    /// Progress of the running transition effect.
    pub fn transition_progress(&self) -> Option<f32> {
        if self.is_transitioning() {
            self.effect.progress()
        } else {
            None
        }
    }
}
