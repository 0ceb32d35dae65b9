//! Galaxy Ignition - headless driver. Runs the simulation at a fixed frame rate with
//! a simple autopilot standing in for the player.

use anyhow::Result;
use engine_core::{FileStore, KeyValueStore, MemoryStore};
use game::{Game, GameConfig, TravelRequest};

const FRAME_DT: f32 = 1.0 / 60.0;
/// Seconds between autopilot decisions.
const AUTOPILOT_INTERVAL: f32 = 3.0;
/// Seconds between stats log lines.
const REPORT_INTERVAL: f32 = 10.0;

/// One autopilot decision: seed the next habitable world if there is one worth
/// seeding, otherwise warp onward.
fn autopilot(game: &mut Game) {
    if game.galaxy().is_transitioning() {
        return;
    }
    let fresh = game
        .galaxy()
        .current_system()
        .planets()
        .iter()
        .any(|p| p.can_evolve() && !p.is_ignited());
    if fresh {
        // Cycle until we land on one not yet ignited.
        for _ in 0..game.galaxy().current_system().planets().len() {
            if game.focus_next_habitable().is_none() {
                break;
            }
            if game.selected_planet_info().is_some_and(|p| !p.ignited) {
                game.trigger_ignite_or_evolve_on_selected();
                return;
            }
        }
    }
    game.request_travel(TravelRequest::Next);
}

fn report(game: &Game) {
    let system = game.system_info();
    let stats = game.stats();
    log::info!(
        "{} [{}] {} | discovered {} planets, ignited {} ({}%), score {}, playtime {}",
        system.position_label(),
        system.star_label,
        system.name,
        stats.total_planets,
        stats.ignited,
        stats.progress,
        stats.score,
        stats.playtime
    );
}

fn open_store(config: &GameConfig) -> Box<dyn KeyValueStore> {
    match FileStore::open(&config.save_dir) {
        Ok(store) => Box::new(store),
        Err(e) => {
            log::warn!("Save storage unavailable ({}), progress will not persist", e);
            Box::new(MemoryStore::new())
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║                        Galaxy Ignition                           ║");
    println!("╠══════════════════════════════════════════════════════════════════╣");
    println!("║  Explore star systems, ignite life on habitable worlds, and      ║");
    println!("║  watch it evolve from microbes to civilization.                  ║");
    println!("║                                                                  ║");
    println!("║  Headless run: an autopilot picks worlds and warps onward.       ║");
    println!("║  Tune the run in config.ron; RUST_LOG=debug for detail.          ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");

    let config = GameConfig::load();
    log::info!(
        "Starting Galaxy Ignition: seed {}, {} systems, {:.0}s run",
        config.galaxy_seed,
        config.system_count,
        config.demo_seconds
    );

    let store = open_store(&config);
    let demo_seconds = config.demo_seconds.max(0.0);
    let mut game = Game::new(config, store);

    let mut elapsed = 0.0_f32;
    let mut next_decision = 0.0_f32;
    let mut next_report = 0.0_f32;
    while elapsed < demo_seconds {
        if elapsed >= next_decision {
            autopilot(&mut game);
            next_decision += AUTOPILOT_INTERVAL;
        }
        if elapsed >= next_report {
            report(&game);
            next_report += REPORT_INTERVAL;
        }
        game.update(FRAME_DT);
        elapsed += FRAME_DT;
    }

    report(&game);
    if !game.save() {
        log::warn!("Final save failed");
    }
    for message in game.messages().visible() {
        log::debug!("[{:?}] {}", message.level, message.text);
    }
    Ok(())
}
