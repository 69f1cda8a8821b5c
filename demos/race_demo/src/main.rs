//! Race Demo
//!
//! Runs a headless session: loads races from RON, gives two players a race,
//! ticks the hub and levels them up. Subject calls are logged instead of being
//! sent to a game engine.
//!
//! ```text
//! cargo run -p race_demo [races.ron] [hub.ron]
//! ```
//!
//! Set `RUST_LOG=debug` to see level-up buffs.

use evolve_core::{EffectKind, Subject, SubjectId, Tick};
use evolve_hub::{Hub, HubConfig};
use evolve_script::Loader;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// A player that logs every mutation it receives
struct ConsoleSubject {
    name: String,
}

impl ConsoleSubject {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

impl Subject for ConsoleSubject {
    fn set_health_scale(&mut self, health: f64) {
        tracing::info!(player = %self.name, health, "Health scale set");
    }

    fn set_walk_speed(&mut self, speed: f64) {
        tracing::info!(player = %self.name, speed, "Walk speed set");
    }

    fn apply_effect(&mut self, effect: EffectKind, duration: Tick, intensity: i32) {
        tracing::info!(player = %self.name, %effect, duration, intensity, "Effect applied");
    }
}

fn data_file(arg: Option<String>, default: &str) -> PathBuf {
    arg.map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join(default))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let races_path = data_file(args.next(), "races.ron");
    let hub_path = data_file(args.next(), "hub.ron");

    println!("=== Evolve Race Demo ===\n");

    let mut loader = Loader::new();
    loader.load_file(&races_path)?;
    let defs = loader.finish();
    for rejection in &defs.rejected {
        println!("Skipped {}: {}", rejection.source, rejection.error);
    }

    let config = HubConfig::from_ron_str(&std::fs::read_to_string(&hub_path)?)?;
    let interval = config.effect_interval();
    let mut hub = Hub::new(config);
    hub.register_templates(defs.races.into_values())?;

    println!("Loaded races:");
    for template in hub.templates() {
        println!("{}\n", template);
    }

    let alice = SubjectId::new(1);
    let bob = SubjectId::new(2);
    hub.assign_race(alice, ConsoleSubject::new("alice"), "elf", None)?;
    hub.assign_race(bob, ConsoleSubject::new("bob"), "dwarf", Some(0))?;

    // Two refresh cycles, leveling both players up after the first one.
    for _ in 0..interval * 2 {
        let report = hub.tick();
        if report.refreshed {
            println!(
                "Tick {}: refreshed {} effects on {} players",
                report.tick, report.effects, report.instances
            );
            if report.tick == interval {
                let level = hub.level_up(alice, 2)?;
                println!("alice reached level {}", level);
                let level = hub.level_up(bob, 1)?;
                println!("bob reached level {}", level);
            }
        }
    }

    if let Err(e) = hub.level_up(alice, 1) {
        println!("alice cannot level up further: {}", e);
    }

    hub.switch_race(bob, "merfolk")?;
    if let Some(race) = hub.instance(bob) {
        println!("\nbob is now:\n{}", race);
    }

    hub.disable(alice)?;
    let report = hub.tick_until_refresh();
    println!(
        "\nTick {}: refreshed {} effects with alice disabled",
        report.tick, report.effects
    );

    for player in [alice, bob] {
        if let Some(race) = hub.disconnect(player) {
            println!("{} left as {} level {}", player, race.name(), race.level());
        }
    }

    Ok(())
}
