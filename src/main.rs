//! Goal Rush entry point
//!
//! The browser build is driven from JavaScript through `platform::web`.
//! Natively this runs a headless race on a generated track and logs the result.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Goal Rush (native) starting...");

    // Usage: goal-rush [settings.json] [seed]
    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => match load_settings(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Cannot use settings from {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => goal_rush::RaceSettings::default(),
    };
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(goal_rush::platform::fresh_seed);

    headless::run(&settings, seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn load_settings(path: &str) -> Result<goal_rush::RaceSettings, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)?;
    Ok(goal_rush::RaceSettings::from_json(&json)?)
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use goal_rush::sim::WalkabilityMap;
    use goal_rush::{RacePhase, RaceSession, RaceSettings};

    const FIELD_WIDTH: u32 = 800;
    const FIELD_HEIGHT: u32 = 600;
    /// Give up on races that wander forever
    const MAX_FRAMES: u64 = 500_000;

    /// Walled field with a central block and a barrier the racers must go around
    fn generated_track() -> WalkabilityMap {
        WalkabilityMap::from_fn(FIELD_WIDTH, FIELD_HEIGHT, |x, y| {
            let border = x < 20 || y < 20 || x >= FIELD_WIDTH - 20 || y >= FIELD_HEIGHT - 20;
            let block = (300..500).contains(&x) && (220..380).contains(&y);
            let barrier = (560..580).contains(&x) && y < 420;
            !(border || block || barrier)
        })
    }

    pub fn run(settings: &RaceSettings, seed: u64) {
        let map = generated_track();
        // No one is watching a countdown here
        let settings = RaceSettings {
            countdown_secs: 0,
            ..settings.clone()
        };
        let mut session = RaceSession::new(map, &settings, seed);
        log::info!("Seed {}; lineup: {}", seed, session.roster_lines().join(", "));

        let mut frames = 0;
        while session.phase() != RacePhase::Finished && frames < MAX_FRAMES {
            if let Some(events) = session.frame(1.0 / 60.0) {
                if events.pair_contacts > 0 {
                    log::trace!("tick {}: {} contacts", session.state().time_ticks, events.pair_contacts);
                }
            }
            frames += 1;
        }

        match session.banner() {
            Some(banner) => println!("{} (after {} ticks)", banner, session.state().time_ticks),
            None => println!("No winner after {} frames", frames),
        }
    }
}
