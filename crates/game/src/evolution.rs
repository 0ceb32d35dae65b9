//! Planet lifecycle: dormant worlds are seeded with life and advance, one stage at a
//! time, to an intelligent civilization.
//!
//! Stages only move forward. Every request that does not apply to the current state
//! is a no-op reported through the return value, never an error: these calls come
//! from UI state that may be one frame stale.

/// Lifecycle phase of life on a planet, in progression order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EvolutionStage {
    Dormant,
    Microbial,
    PlantLife,
    AnimalLife,
    Intelligent,
}

impl EvolutionStage {
    pub const ALL: [EvolutionStage; 5] = [
        EvolutionStage::Dormant,
        EvolutionStage::Microbial,
        EvolutionStage::PlantLife,
        EvolutionStage::AnimalLife,
        EvolutionStage::Intelligent,
    ];

    /// The following stage, or `None` at the terminal stage.
    pub fn next(&self) -> Option<Self> {
        match self {
            EvolutionStage::Dormant => Some(EvolutionStage::Microbial),
            EvolutionStage::Microbial => Some(EvolutionStage::PlantLife),
            EvolutionStage::PlantLife => Some(EvolutionStage::AnimalLife),
            EvolutionStage::AnimalLife => Some(EvolutionStage::Intelligent),
            EvolutionStage::Intelligent => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        *self == EvolutionStage::Intelligent
    }

    /// Position in the progression (0 = dormant, 4 = intelligent).
    pub fn ordinal(&self) -> usize {
        *self as usize
    }

    pub fn key(&self) -> &'static str {
        match self {
            EvolutionStage::Dormant => "dormant",
            EvolutionStage::Microbial => "microbial",
            EvolutionStage::PlantLife => "plant_life",
            EvolutionStage::AnimalLife => "animal_life",
            EvolutionStage::Intelligent => "intelligent",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EvolutionStage::Dormant => "Dormant",
            EvolutionStage::Microbial => "Microbial",
            EvolutionStage::PlantLife => "Plant Life",
            EvolutionStage::AnimalLife => "Animal Life",
            EvolutionStage::Intelligent => "Intelligent",
        }
    }

    /// Rough population figure shown next to the stage.
    pub fn population_label(&self) -> &'static str {
        match self {
            EvolutionStage::Dormant => "None",
            EvolutionStage::Microbial => "Trillions of microbes",
            EvolutionStage::PlantLife => "Spreading forests",
            EvolutionStage::AnimalLife => "Millions of species",
            EvolutionStage::Intelligent => "~8 billion sentients",
        }
    }
}

/// Lifecycle state of one planet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lifecycle {
    habitable: bool,
    stage: EvolutionStage,
    ignited: bool,
    evolving: bool,
}

impl Lifecycle {
    pub fn new(habitable: bool) -> Self {
        Self {
            habitable,
            stage: EvolutionStage::Dormant,
            ignited: false,
            evolving: false,
        }
    }

    pub fn stage(&self) -> EvolutionStage {
        self.stage
    }

    pub fn is_habitable(&self) -> bool {
        self.habitable
    }

    /// True once life has been seeded. Never reverts.
    pub fn is_ignited(&self) -> bool {
        self.ignited
    }

    pub fn is_evolving(&self) -> bool {
        self.evolving
    }

    /// Whether a player may start evolution now.
    pub fn can_evolve(&self) -> bool {
        self.habitable && !self.stage.is_terminal() && !self.evolving
    }

    /// Seed life and start progressing. Returns false when not allowed.
    pub fn start(&mut self) -> bool {
        if !self.can_evolve() {
            return false;
        }
        self.ignited = true;
        self.evolving = true;
        true
    }

    /// Move to the next stage. Returns the new stage, or `None` when nothing changed.
    pub fn advance(&mut self) -> Option<EvolutionStage> {
        if !(self.evolving || self.ignited) {
            return None;
        }
        let next = self.stage.next()?;
        self.stage = next;
        if next.is_terminal() {
            self.evolving = false;
        }
        Some(next)
    }

    /// Stop progressing without changing the stage.
    pub fn pause(&mut self) -> bool {
        if !self.evolving {
            return false;
        }
        self.evolving = false;
        true
    }

    /// Continue a paused evolution. No-op at the terminal stage or before ignition.
    pub fn resume(&mut self) -> bool {
        if !self.ignited || self.evolving || self.stage.is_terminal() {
            return false;
        }
        self.evolving = true;
        true
    }
}
