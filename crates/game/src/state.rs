//! Game state: the ledger of discovered bodies, ignition counts, and score.
//!
//! The ledger is a value snapshot keyed by body name. It does not own planets, so it
//! survives a galaxy being regenerated. Every change that matters is persisted
//! through a [`KeyValueStore`]; storage trouble is logged and play continues on the
//! in-memory state.

use std::time::{SystemTime, UNIX_EPOCH};

use engine_core::{format_playtime, KeyValueStore};
use serde::{Deserialize, Serialize};

/// Storage key of the save blob.
pub const SAVE_KEY: &str = "galaxy_explorer_state";

/// What kind of body a ledger entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyKind {
    Star,
    Planet,
    Moon,
    Comet,
}

/// Discovery facts about one body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyRecord {
    pub kind: BodyKind,
    pub distance: f32,
    pub size: f32,
    #[serde(default)]
    pub ignited: bool,
}

impl BodyRecord {
    pub fn planet(distance: f32, size: f32) -> Self {
        Self {
            kind: BodyKind::Planet,
            distance,
            size,
            ignited: false,
        }
    }

    pub fn star(size: f32) -> Self {
        Self {
            kind: BodyKind::Star,
            distance: 0.0,
            size,
            ignited: false,
        }
    }

    /// Points awarded for igniting this body.
    pub fn ignition_score(&self) -> u64 {
        (self.distance as f64 * 100.0 + self.size as f64 * 500.0)
            .floor()
            .max(0.0) as u64
    }
}

/// Serialized form of the game state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    /// Ledger in discovery order.
    #[serde(default)]
    pub bodies: Vec<(String, BodyRecord)>,
    #[serde(default)]
    pub ignited_count: u32,
    #[serde(default)]
    pub total_planets: u32,
    #[serde(default)]
    pub score: u64,
    /// Unix seconds when this session's progress started.
    #[serde(default)]
    pub start_time: u64,
}

impl SaveData {
    fn fresh() -> Self {
        Self {
            start_time: unix_now(),
            ..Default::default()
        }
    }

    fn find(&self, name: &str) -> Option<usize> {
        self.bodies.iter().position(|(n, _)| n == name)
    }
}

pub struct GameState {
    data: SaveData,
    store: Box<dyn KeyValueStore>,
}

impl GameState {
    /// Load state from `store`. Missing or unreadable saves start a fresh ledger.
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        let data = match store.read(SAVE_KEY) {
            Ok(Some(blob)) => match ron::from_str::<SaveData>(&blob) {
                Ok(data) => {
                    log::info!(
                        "Loaded save: {} bodies, {} ignited, score {}",
                        data.bodies.len(),
                        data.ignited_count,
                        data.score
                    );
                    data
                }
                Err(e) => {
                    log::warn!("Corrupt save data, starting fresh: {}", e);
                    SaveData::fresh()
                }
            },
            Ok(None) => SaveData::fresh(),
            Err(e) => {
                log::warn!("Could not read save data, starting fresh: {}", e);
                SaveData::fresh()
            }
        };
        Self { data, store }
    }

    /// Record a body. The first record for a name wins; later calls are no-ops.
    /// Returns true when the body was new.
    pub fn add_discovered_body(&mut self, name: &str, record: BodyRecord) -> bool {
        if self.data.find(name).is_some() {
            return false;
        }
        if record.kind == BodyKind::Planet {
            self.data.total_planets += 1;
        }
        log::debug!("Discovered {} ({:?})", name, record.kind);
        self.data.bodies.push((name.to_string(), record));
        true
    }

    /// Mark a known body ignited and award its score. Returns the points awarded, or
    /// `None` for unknown or already ignited bodies.
    pub fn ignite_planet(&mut self, name: &str) -> Option<u64> {
        let index = self.data.find(name)?;
        let record = &mut self.data.bodies[index].1;
        if record.ignited {
            return None;
        }
        record.ignited = true;
        let points = record.ignition_score();
        self.data.ignited_count += 1;
        self.data.score += points;
        log::info!("{} ignited for {} points (score {})", name, points, self.data.score);
        self.save();
        Some(points)
    }

    /// Percentage of discovered planets that are ignited, rounded down.
    pub fn progress(&self) -> u32 {
        if self.data.total_planets == 0 {
            return 0;
        }
        let percent =
            self.data.ignited_count as u64 * 100 / self.data.total_planets as u64;
        percent.min(100) as u32
    }

    /// Forget everything and restart the clock.
    pub fn reset_state(&mut self) {
        self.data = SaveData::fresh();
        log::info!("Game state reset");
        self.save();
    }

    /// Persist the current state. Returns false (after logging) when storage fails.
    pub fn save(&mut self) -> bool {
        let blob = match ron::to_string(&self.data) {
            Ok(blob) => blob,
            Err(e) => {
                log::warn!("Could not serialize game state: {}", e);
                return false;
            }
        };
        match self.store.write(SAVE_KEY, &blob) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Could not save game state: {}", e);
                false
            }
        }
    }

    pub fn body(&self, name: &str) -> Option<&BodyRecord> {
        self.data.find(name).map(|i| &self.data.bodies[i].1)
    }

    pub fn bodies(&self) -> &[(String, BodyRecord)] {
        &self.data.bodies
    }

    pub fn ignited_count(&self) -> u32 {
        self.data.ignited_count
    }

    pub fn total_planets(&self) -> u32 {
        self.data.total_planets
    }

    pub fn score(&self) -> u64 {
        self.data.score
    }

    pub fn start_time(&self) -> u64 {
        self.data.start_time
    }

    pub fn snapshot(&self) -> &SaveData {
        &self.data
    }

    /// Seconds played as of `now`.
    pub fn playtime_seconds(&self, now: SystemTime) -> u64 {
        let now = now
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        now.saturating_sub(self.data.start_time)
    }

    /// Formatted play time as of the wall clock.
    pub fn playtime_label(&self) -> String {
        format_playtime(self.playtime_seconds(SystemTime::now()))
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::{MemoryStore, StorageError};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    /// Store shared with the test so saved blobs can be inspected.
    #[derive(Clone, Default)]
    struct SharedStore(Rc<RefCell<MemoryStore>>);

    impl KeyValueStore for SharedStore {
        fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.0.borrow().read(key)
        }
        fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            self.0.borrow_mut().write(key, value)
        }
        fn remove(&mut self, key: &str) -> Result<(), StorageError> {
            self.0.borrow_mut().remove(key)
        }
    }

    /// Store whose every operation fails.
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("disk on fire".into()))
        }
        fn write(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disk on fire".into()))
        }
        fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disk on fire".into()))
        }
    }

    fn fresh_state() -> GameState {
        GameState::load(Box::new(MemoryStore::new()))
    }

    #[test]
    fn progress_without_planets_is_zero() {
        let state = fresh_state();
        assert_eq!(state.total_planets(), 0);
        assert_eq!(state.progress(), 0);
    }

    #[test]
    fn progress_rounds_down() {
        let mut state = fresh_state();
        for name in ["a", "b", "c", "d"] {
            state.add_discovered_body(name, BodyRecord::planet(10.0, 1.0));
        }
        for name in ["a", "b", "c"] {
            state.ignite_planet(name);
        }
        assert_eq!(state.ignited_count(), 3);
        assert_eq!(state.total_planets(), 4);
        assert_eq!(state.progress(), 75);

        state.add_discovered_body("e", BodyRecord::planet(10.0, 1.0));
        state.add_discovered_body("f", BodyRecord::planet(10.0, 1.0));
        state.add_discovered_body("g", BodyRecord::planet(10.0, 1.0));
        // 3 / 7 = 42.86
        assert_eq!(state.progress(), 42);
    }

    #[test]
    fn ignition_score_and_idempotence() {
        let mut state = fresh_state();
        state.add_discovered_body("Vega Prime", BodyRecord::planet(20.0, 1.5));
        assert_eq!(state.ignite_planet("Vega Prime"), Some(2750));
        assert_eq!(state.score(), 2750);
        assert_eq!(state.ignite_planet("Vega Prime"), None);
        assert_eq!(state.score(), 2750);
        assert_eq!(state.ignited_count(), 1);
    }

    #[test]
    fn unknown_body_cannot_ignite() {
        let mut state = fresh_state();
        assert_eq!(state.ignite_planet("Nowhere"), None);
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn first_discovery_wins() {
        let mut state = fresh_state();
        assert!(state.add_discovered_body("Lyra Deep", BodyRecord::planet(12.0, 1.0)));
        assert!(!state.add_discovered_body("Lyra Deep", BodyRecord::planet(99.0, 4.0)));
        assert_eq!(state.total_planets(), 1);
        assert_eq!(state.body("Lyra Deep").unwrap().distance, 12.0);
    }

    #[test]
    fn only_planets_count_toward_total() {
        let mut state = fresh_state();
        state.add_discovered_body("Solaris", BodyRecord::star(5.0));
        state.add_discovered_body("Mira Vale", BodyRecord::planet(14.0, 0.8));
        assert_eq!(state.bodies().len(), 2);
        assert_eq!(state.total_planets(), 1);
    }

    #[test]
    fn state_survives_reload() {
        let store = SharedStore::default();
        let mut state = GameState::load(Box::new(store.clone()));
        state.add_discovered_body("Nyx Haven", BodyRecord::planet(30.0, 1.2));
        state.add_discovered_body("Rhea Drift", BodyRecord::planet(40.0, 0.9));
        state.ignite_planet("Nyx Haven");

        let reloaded = GameState::load(Box::new(store));
        assert_eq!(reloaded.snapshot(), state.snapshot());
        let names: Vec<&str> = reloaded.bodies().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["Nyx Haven", "Rhea Drift"], "discovery order kept");
        assert!(reloaded.body("Nyx Haven").unwrap().ignited);
    }

    #[test]
    fn corrupt_save_starts_fresh() {
        let mut store = MemoryStore::new();
        store.write(SAVE_KEY, "{not ron at all").unwrap();
        let state = GameState::load(Box::new(store));
        assert!(state.bodies().is_empty());
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn broken_storage_is_not_fatal() {
        let mut state = GameState::load(Box::new(BrokenStore));
        state.add_discovered_body("Orion Rex", BodyRecord::planet(18.0, 1.0));
        assert_eq!(state.ignite_planet("Orion Rex"), Some(2300));
        assert!(!state.save());
    }

    #[test]
    fn reset_clears_everything() {
        let mut state = fresh_state();
        state.add_discovered_body("Juno Beta", BodyRecord::planet(25.0, 1.0));
        state.ignite_planet("Juno Beta");
        state.reset_state();
        assert!(state.bodies().is_empty());
        assert_eq!(state.score(), 0);
        assert_eq!(state.ignited_count(), 0);
        assert_eq!(state.progress(), 0);
        assert!(state.start_time() > 0);
    }

    #[test]
    fn playtime_counts_from_start() {
        let state = fresh_state();
        let later = UNIX_EPOCH + Duration::from_secs(state.start_time() + 125);
        assert_eq!(state.playtime_seconds(later), 125);
        assert_eq!(state.playtime_seconds(UNIX_EPOCH), 0);
    }
}
