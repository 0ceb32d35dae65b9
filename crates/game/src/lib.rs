//! Galaxy Ignition: explore procedurally generated solar systems, seed life on
//! habitable worlds, and watch it evolve.

pub mod asteroid;
pub mod camera;
pub mod comet;
pub mod config;
pub mod effects;
pub mod evolution;
pub mod galaxy;
pub mod game;
pub mod hud;
pub mod planet;
pub mod solar_system;
pub mod state;

pub use camera::CameraRig;
pub use config::GameConfig;
pub use effects::{PendingTransition, TransitionEffect, WarpEffect};
pub use evolution::{EvolutionStage, Lifecycle};
pub use galaxy::{Galaxy, SystemChange, TravelState};
pub use game::{Game, TravelRequest};
pub use hud::{GameMessage, GameMessages, MessageLevel, PlanetInfo, StatsInfo, SystemInfo};
pub use planet::{Moon, Planet};
pub use solar_system::{BodyGroup, EvolutionEvent, SolarSystem, SystemSettings};
pub use state::{BodyKind, BodyRecord, GameState, SaveData};
