//! Game orchestrator: wires the galaxy, game state, camera, and notifications
//! together and runs the fixed-tick update loop.
//!
//! All player actions enter through the methods here. Stale or impossible requests
//! are dropped quietly (at most a notification); nothing here returns an error.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use engine_core::{KeyValueStore, Time};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::camera::CameraRig;
use crate::config::GameConfig;
use crate::effects::WarpEffect;
use crate::evolution::EvolutionStage;
use crate::galaxy::{Galaxy, SystemChange};
use crate::hud::{GameMessages, PlanetInfo, StatsInfo, SystemInfo};
use crate::solar_system::{EvolutionEvent, SolarSystem};
use crate::state::{BodyRecord, GameState};

/// Longest frame the simulation will catch up on; longer stalls are dropped.
const MAX_FRAME_DT: f32 = 0.05;

/// Where the player wants to go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelRequest {
    Next,
    Previous,
    Index(usize),
}

/// Ledger key of a body. Names are unique within a system, so system id plus name
/// identifies every body in the galaxy.
pub fn body_key(system: &SolarSystem, name: &str) -> String {
    format!("{}:{}", system.id(), name)
}

pub struct Game {
    config: GameConfig,
    galaxy: Galaxy,
    state: GameState,
    time: Time,
    camera: CameraRig,
    messages: GameMessages,
    selected: Option<usize>,
    arrivals: Rc<RefCell<Vec<SystemChange>>>,
}

impl Game {
    pub fn new(config: GameConfig, store: Box<dyn KeyValueStore>) -> Self {
        let mut rng = match config.cosmetic_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut galaxy = Galaxy::create(
            config.galaxy(),
            config.system_settings(),
            Box::new(WarpEffect::new(config.warp_duration)),
            &mut rng,
        );
        let arrivals = Rc::new(RefCell::new(Vec::new()));
        let queue = arrivals.clone();
        galaxy.on_system_change(move |change| queue.borrow_mut().push(change.clone()));

        let mut game = Self {
            time: Time::with_tick_rate(config.tick_rate),
            config,
            galaxy,
            state: GameState::load(store),
            camera: CameraRig::new(),
            messages: GameMessages::new(),
            selected: None,
            arrivals,
        };
        game.discover_current_system();
        let name = game.galaxy.current_system().name().to_string();
        game.messages.info(format!("Welcome to {}", name));
        game
    }

    /// Advance by one frame of `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        let dt = if dt.is_nan() { 0.0 } else { dt.clamp(0.0, MAX_FRAME_DT) };
        self.time.advance(Duration::from_secs_f32(dt));
        let tick = self.time.fixed_timestep_seconds();
        while self.time.should_fixed_update() {
            let events = self.galaxy.update(tick);
            self.handle_evolution_events(&events);
            self.handle_arrivals();
        }

        if let Some(position) = self.selected_planet().map(|p| p.position()) {
            self.camera.follow(position);
        }
        self.messages.update(dt);
    }

    fn handle_evolution_events(&mut self, events: &[EvolutionEvent]) {
        for event in events {
            let Some(planet) = self.galaxy.current_system().planet(event.planet) else {
                continue;
            };
            let name = planet.name().to_string();
            if event.stage == EvolutionStage::Intelligent {
                self.messages
                    .success(format!("{} has given rise to a civilization!", name));
            } else {
                self.messages
                    .info(format!("{} reached {}", name, event.stage.label()));
            }
        }
    }

    fn handle_arrivals(&mut self) {
        let arrivals: Vec<SystemChange> = self.arrivals.borrow_mut().drain(..).collect();
        for change in arrivals {
            self.selected = None;
            self.camera.reset();
            self.discover_current_system();
            let habitable = self.galaxy.current_system().habitable_indices().len();
            self.messages.info(format!(
                "Arrived at {} ({} habitable)",
                change.name, habitable
            ));
        }
    }

    /// Record the current star and all its planets in the ledger.
    fn discover_current_system(&mut self) {
        let system = self.galaxy.current_system();
        let mut records = vec![(
            body_key(system, system.name()),
            BodyRecord::star(system.star().size),
        )];
        records.extend(system.planets().iter().map(|planet| {
            (
                body_key(system, planet.name()),
                BodyRecord::planet(planet.orbit_distance(), planet.size()),
            )
        }));
        let mut new_bodies = 0;
        for (key, record) in records {
            if self.state.add_discovered_body(&key, record) {
                new_bodies += 1;
            }
        }
        if new_bodies > 0 {
            self.state.save();
        }
    }

    // ── Player actions ─────────────────────────────────────────────────────

    /// Select planet `index` of the current system. Returns false for bad indices.
    pub fn select_planet(&mut self, index: usize) -> bool {
        if self.galaxy.current_system().planet(index).is_none() {
            return false;
        }
        self.clear_selection();
        let Some(planet) = self.galaxy.current_system_mut().planet_mut(index) else {
            return false;
        };
        planet.selected = true;
        let position = planet.position();
        let size = planet.size();
        let record = BodyRecord::planet(planet.orbit_distance(), size);
        let name = planet.name().to_string();

        self.selected = Some(index);
        self.camera.focus_on(position, size);
        let key = body_key(self.galaxy.current_system(), &name);
        if self.state.add_discovered_body(&key, record) {
            self.state.save();
        }
        true
    }

    pub fn clear_selection(&mut self) {
        let Some(index) = self.selected.take() else {
            return;
        };
        if let Some(planet) = self.galaxy.current_system_mut().planet_mut(index) {
            planet.selected = false;
        }
    }

    /// Ignite the selected planet, or resume it when paused. Refusals post a notice.
    pub fn trigger_ignite_or_evolve_on_selected(&mut self) -> bool {
        let Some(index) = self.selected else {
            self.messages.warning("Select a planet first");
            return false;
        };
        let Some(planet) = self.galaxy.current_system_mut().planet_mut(index) else {
            return false;
        };
        let name = planet.name().to_string();

        if !planet.is_habitable() {
            self.messages.warning(format!("{} cannot support life", name));
            return false;
        }
        if planet.evolution_stage().is_terminal() {
            self.messages
                .info(format!("{} is already home to a civilization", name));
            return false;
        }
        if planet.is_evolving() {
            self.messages.info(format!("{} is already evolving", name));
            return false;
        }

        if planet.is_ignited() {
            let resumed = planet.resume_evolution();
            if resumed {
                self.messages.info(format!("Evolution resumed on {}", name));
            }
            return resumed;
        }

        if !planet.start_evolution() {
            return false;
        }
        let key = body_key(self.galaxy.current_system(), &name);
        match self.state.ignite_planet(&key) {
            Some(points) => self
                .messages
                .success(format!("Life ignited on {}! +{} points", name, points)),
            None => self.messages.success(format!("Life ignited on {}!", name)),
        }
        true
    }

    /// Pause evolution on the selected planet.
    pub fn pause_selected(&mut self) -> bool {
        let Some(index) = self.selected else {
            return false;
        };
        self.galaxy
            .current_system_mut()
            .planet_mut(index)
            .map(|planet| planet.pause_evolution())
            .unwrap_or(false)
    }

    /// Select the next habitable planet after the current selection, wrapping.
    pub fn focus_next_habitable(&mut self) -> Option<usize> {
        let habitable = self.galaxy.current_system().habitable_indices();
        if habitable.is_empty() {
            self.messages.warning("No habitable planets in this system");
            return None;
        }
        let next = match self.selected {
            Some(current) => habitable
                .iter()
                .copied()
                .find(|&i| i > current)
                .unwrap_or(habitable[0]),
            None => habitable[0],
        };
        self.select_planet(next);
        Some(next)
    }

    /// Ask to travel. Dropped silently while a warp is already running.
    pub fn request_travel(&mut self, request: TravelRequest) -> bool {
        let accepted = match request {
            TravelRequest::Next => self.galaxy.travel_to_next_system(),
            TravelRequest::Previous => self.galaxy.travel_to_previous_system(),
            TravelRequest::Index(index) => self.galaxy.travel_to_system(index),
        };
        if accepted {
            self.clear_selection();
            self.messages.info("Engaging warp drive...");
        }
        accepted
    }

    pub fn request_camera_reset(&mut self) {
        self.clear_selection();
        self.camera.reset();
    }

    /// Wipe all progress and re-record the current system.
    pub fn reset_progress(&mut self) {
        self.state.reset_state();
        self.discover_current_system();
        self.messages.info("Progress reset");
    }

    pub fn save(&mut self) -> bool {
        self.state.save()
    }

    // ── Snapshots ──────────────────────────────────────────────────────────

    pub fn planet_info(&self, index: usize) -> Option<PlanetInfo> {
        self.galaxy
            .current_system()
            .planet(index)
            .map(PlanetInfo::from_planet)
    }

    pub fn selected_planet_info(&self) -> Option<PlanetInfo> {
        self.selected_planet().map(PlanetInfo::from_planet)
    }

    pub fn system_info(&self) -> SystemInfo {
        SystemInfo::new(
            self.galaxy.current_system(),
            self.galaxy.current_index(),
            self.galaxy.system_count(),
            self.galaxy.is_transitioning(),
        )
    }

    pub fn stats(&self) -> StatsInfo {
        StatsInfo::from_state(&self.state)
    }

    fn selected_planet(&self) -> Option<&crate::planet::Planet> {
        self.selected
            .and_then(|i| self.galaxy.current_system().planet(i))
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn galaxy(&self) -> &Galaxy {
        &self.galaxy
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut CameraRig {
        &mut self.camera
    }

    pub fn messages(&self) -> &GameMessages {
        &self.messages
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn time(&self) -> &Time {
        &self.time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::MemoryStore;

    fn config() -> GameConfig {
        GameConfig {
            galaxy_seed: 42,
            system_count: 8,
            tick_rate: 60.0,
            warp_duration: 0.5,
            evolution_stage_seconds: 1.0,
            cosmetic_seed: Some(1),
            ..GameConfig::default()
        }
    }

    fn game() -> Game {
        Game::new(config(), Box::new(MemoryStore::new()))
    }

    /// Travel until the current system has a planet matching `wanted`; returns its index.
    fn travel_until(game: &mut Game, wanted: impl Fn(&crate::planet::Planet) -> bool) -> usize {
        for _ in 0..game.galaxy().system_count() {
            let system = game.galaxy().current_system();
            if let Some(index) = system.planets().iter().position(|p| wanted(p)) {
                return index;
            }
            assert!(game.request_travel(TravelRequest::Next));
            for _ in 0..60 {
                game.update(1.0 / 60.0);
            }
        }
        panic!("no matching planet anywhere in the test galaxy");
    }

    fn go_to_habitable(game: &mut Game) -> usize {
        travel_until(game, |p| p.is_habitable())
    }

    #[test]
    fn new_game_discovers_starting_system() {
        let game = game();
        let system = game.galaxy().current_system();
        assert_eq!(game.state().total_planets() as usize, system.planets().len());
        assert_eq!(game.state().bodies().len(), system.planets().len() + 1);
        assert_eq!(game.stats().progress, 0);
        assert_eq!(game.system_info().index, 0);
        assert_eq!(game.system_info().total, 8);
    }

    #[test]
    fn ignite_selected_awards_score_once() {
        let mut game = game();
        let index = go_to_habitable(&mut game);
        assert!(game.select_planet(index));
        let planet = &game.galaxy().current_system().planets()[index];
        let expected = BodyRecord::planet(planet.orbit_distance(), planet.size()).ignition_score();

        assert!(game.trigger_ignite_or_evolve_on_selected());
        assert_eq!(game.stats().score, expected);
        assert_eq!(game.stats().ignited, 1);
        assert!(!game.trigger_ignite_or_evolve_on_selected(), "already evolving");
        assert_eq!(game.stats().score, expected);

        let info = game.selected_planet_info().unwrap();
        assert!(info.ignited && info.evolving && info.habitable);
    }

    #[test]
    fn evolution_progresses_with_time() {
        let mut game = game();
        let index = go_to_habitable(&mut game);
        game.select_planet(index);
        game.trigger_ignite_or_evolve_on_selected();
        // One stage per second at the test config; run a little past four seconds.
        for _ in 0..(60 * 4 + 10) {
            game.update(1.0 / 60.0);
        }
        let info = game.planet_info(index).unwrap();
        assert_eq!(info.stage, EvolutionStage::Intelligent);
        assert!(!info.evolving);
        assert_eq!(info.status, "Civilization");
    }

    #[test]
    fn paused_planet_resumes_without_new_score() {
        let mut game = game();
        let index = go_to_habitable(&mut game);
        game.select_planet(index);
        game.trigger_ignite_or_evolve_on_selected();
        let score = game.stats().score;
        assert!(game.pause_selected());
        assert!(game.trigger_ignite_or_evolve_on_selected());
        assert_eq!(game.stats().score, score);
        assert!(game.selected_planet_info().unwrap().evolving);
    }

    #[test]
    fn uninhabitable_selection_is_refused() {
        let mut game = game();
        let barren = travel_until(&mut game, |p| !p.is_habitable());
        game.select_planet(barren);
        assert!(!game.trigger_ignite_or_evolve_on_selected());
        assert_eq!(game.stats().ignited, 0);
        assert!(!game.planet_info(barren).unwrap().ignited);
    }

    #[test]
    fn trigger_without_selection_is_noop() {
        let mut game = game();
        assert!(!game.trigger_ignite_or_evolve_on_selected());
        assert!(!game.select_planet(999));
        assert_eq!(game.selected(), None);
    }

    #[test]
    fn travel_commits_after_warp_and_drops_repeats() {
        let mut game = game();
        assert!(game.request_travel(TravelRequest::Index(3)));
        assert!(!game.request_travel(TravelRequest::Index(1)));
        assert!(game.system_info().transitioning);

        game.update(0.1);
        assert_eq!(game.galaxy().current_index(), 0, "still warping");

        for _ in 0..40 {
            game.update(1.0 / 60.0);
        }
        assert_eq!(game.galaxy().current_index(), 3);
        assert!(!game.system_info().transitioning);
        let arrived = game
            .messages()
            .messages
            .iter()
            .filter(|m| m.text.starts_with("Arrived at"))
            .count();
        assert_eq!(arrived, 1);
    }

    #[test]
    fn arrival_discovers_new_system_and_resets_camera() {
        let mut game = game();
        let before = game.state().total_planets();
        game.select_planet(0);
        assert_ne!(game.camera(), &CameraRig::default());

        game.request_travel(TravelRequest::Next);
        for _ in 0..60 {
            game.update(1.0 / 60.0);
        }
        let planets = game.galaxy().current_system().planets().len() as u32;
        assert_eq!(game.state().total_planets(), before + planets);
        assert_eq!(game.selected(), None);
        assert_eq!(game.camera(), &CameraRig::default());
    }

    #[test]
    fn focus_next_habitable_cycles() {
        let mut game = game();
        go_to_habitable(&mut game);
        let habitable = game.galaxy().current_system().habitable_indices();
        let first = game.focus_next_habitable();
        assert_eq!(first, Some(habitable[0]));
        let second = game.focus_next_habitable();
        let expected = habitable.get(1).copied().unwrap_or(habitable[0]);
        assert_eq!(second, Some(expected));
    }

    #[test]
    fn camera_reset_clears_selection() {
        let mut game = game();
        game.select_planet(0);
        game.request_camera_reset();
        assert_eq!(game.selected(), None);
        assert_eq!(game.camera(), &CameraRig::default());
        assert!(!game.galaxy().current_system().planets()[0].selected);
    }

    #[test]
    fn reset_progress_keeps_current_system_discovered() {
        let mut game = game();
        let index = go_to_habitable(&mut game);
        game.select_planet(index);
        game.trigger_ignite_or_evolve_on_selected();
        game.reset_progress();
        assert_eq!(game.stats().score, 0);
        assert_eq!(game.stats().ignited, 0);
        assert_eq!(
            game.state().total_planets() as usize,
            game.galaxy().current_system().planets().len()
        );
    }

    #[test]
    fn same_config_same_galaxy() {
        let a = game();
        let b = Game::new(
            GameConfig {
                cosmetic_seed: Some(777),
                ..config()
            },
            Box::new(MemoryStore::new()),
        );
        for (sa, sb) in a.galaxy().systems().iter().zip(b.galaxy().systems()) {
            assert_eq!(sa.name(), sb.name());
            for (pa, pb) in sa.planets().iter().zip(sb.planets()) {
                assert_eq!(pa.config(), pb.config());
            }
        }
    }

    #[test]
    fn long_frames_are_capped() {
        let mut game = game();
        game.update(600.0);
        assert!(game.time().tick_count() <= 3, "ran {} ticks", game.time().tick_count());
        game.update(f32::INFINITY);
        game.update(f32::NAN);
        game.update(-1.0);
        assert!(game.time().tick_count() <= 6);
        assert!(game.time().elapsed_seconds() <= 2.0 * MAX_FRAME_DT + 1e-6);
    }

    #[test]
    fn repeated_planet_names_are_separate_ledger_entries() {
        let mut game = game();
        let (system_index, twin) = game
            .galaxy()
            .systems()
            .iter()
            .enumerate()
            .find_map(|(i, s)| {
                s.planets()
                    .iter()
                    .position(|p| p.name().ends_with(" II"))
                    .map(|twin| (i, twin))
            })
            .expect("the test galaxy draws a repeated planet name");
        if system_index != game.galaxy().current_index() {
            assert!(game.request_travel(TravelRequest::Index(system_index)));
            for _ in 0..60 {
                game.update(1.0 / 60.0);
            }
        }
        assert_eq!(game.galaxy().current_index(), system_index);

        let system = game.galaxy().current_system();
        let twin_name = system.planets()[twin].name().to_string();
        let base_name = twin_name.trim_end_matches(" II").to_string();
        assert!(system.planets().iter().any(|p| p.name() == base_name));
        let keys = [body_key(system, &base_name), body_key(system, &twin_name)];
        assert_ne!(keys[0], keys[1]);

        let discovered: usize = game.galaxy().systems()[..=system_index]
            .iter()
            .filter(|s| s.id() == "system_0" || s.id() == game.galaxy().current_system().id())
            .map(|s| s.planets().len())
            .sum();
        assert_eq!(game.state().total_planets() as usize, discovered);

        for key in &keys {
            assert!(game.state.ignite_planet(key).is_some(), "{} was not in the ledger", key);
        }
        assert_eq!(game.stats().ignited, 2);
    }
}
