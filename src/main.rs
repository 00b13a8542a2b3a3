//! Log Splitter demo entry point
//!
//! Runs a seeded chopping session against the in-memory host and logs every
//! scene event. `RUST_LOG=debug` shows per-contact detail.
//!
//! Usage: `log-splitter [config.json] [--seed N] [--swings N] [--stick-mode MODE] [--print-config]`

use std::path::PathBuf;

use clap::Parser;
use glam::{Quat, Vec3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use log_splitter::{SceneConfig, StickMode};
use log_splitter::sim::{
    AxeSounds, AxeState, ObjectId, PhysicsHost, SandboxHost, Scene, SceneEvent, SoundId, Tag,
    Transform,
};

/// Drops allowed per stuck log before giving up on it
const MAX_DROPS: u32 = 16;

#[derive(Parser, Debug)]
#[command(name = "log-splitter")]
#[command(about = "Seeded axe vs log chopping session against the in-memory host")]
#[command(version)]
struct Args {
    /// Scene config JSON (defaults are used when missing or invalid)
    config: Option<PathBuf>,

    /// RNG seed for log yaw, swing and drop speeds
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of logs, one swing each
    #[arg(long, default_value_t = 8)]
    swings: u32,

    /// Override the config's stick mode (freeze_rotation or kinematic)
    #[arg(long, value_parser = parse_stick_mode)]
    stick_mode: Option<StickMode>,

    /// Print the effective config as JSON and exit
    #[arg(long)]
    print_config: bool,
}

fn parse_stick_mode(s: &str) -> Result<StickMode, String> {
    StickMode::from_str(s).ok_or_else(|| format!("unknown stick mode: {}", s))
}

#[derive(Default)]
struct Tally {
    stuck: u32,
    split: u32,
    skipped: u32,
}

impl Tally {
    fn record(&mut self, events: &[SceneEvent]) {
        for event in events {
            log::info!("  {:?}", event);
            match event {
                SceneEvent::AxeStuck { .. } => self.stuck += 1,
                SceneEvent::LogSplit { .. } => self.split += 1,
                SceneEvent::BreakSkipped { .. } => self.skipped += 1,
                SceneEvent::AxeReleased { .. } => {}
            }
        }
    }
}

fn main() {
    env_logger::init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SceneConfig::load_or_default(path),
        None => SceneConfig::default(),
    };
    if let Some(mode) = args.stick_mode {
        config.axe.stick_mode = mode;
    }

    if args.print_config {
        match config.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("{}", e),
        }
        return;
    }

    log::info!(
        "Log Splitter starting (seed {}, {} swings, break threshold {}, stick mode {}, ground threshold {})",
        args.seed,
        args.swings,
        config.axe.break_threshold,
        config.axe.stick_mode.as_str(),
        config.log.ground_break_threshold
    );

    let mut rng = Pcg32::seed_from_u64(args.seed);
    let mut host = SandboxHost::new();
    let mut scene = Scene::from_config(&config);

    let ground = host.spawn("Ground", Tag::Ground, Transform::default(), false);
    let prefab = host.register_prefab("BrokenLog", Tag::HalfLog, true);
    let axe_obj = host.spawn("Axe", Tag::Axe, Transform::from_position(Vec3::Y), true);
    let axe = scene.add_axe(axe_obj, host.body_of(axe_obj), config.axe.clone());
    if let Some(resolver) = scene.axe_mut(axe) {
        resolver.set_split_prefab(Some(prefab));
        resolver.set_sounds(AxeSounds {
            hit: Some(SoundId(1)),
            stuck: Some(SoundId(2)),
        });
    }

    let logs: Vec<ObjectId> = (0..args.swings)
        .map(|i| {
            let yaw = rng.random_range(-std::f32::consts::PI..std::f32::consts::PI);
            let transform = Transform::new(Vec3::new(i as f32 * 1.5, 0.0, 0.0), Quat::from_rotation_y(yaw));
            let log = host.spawn(&format!("Log {}", i), Tag::Log, transform, true);
            scene.add_log(log);
            log
        })
        .collect();

    let mut tally = Tally::default();
    let max_speed = config.axe.break_threshold * 1.6;

    for (swing, &log) in logs.iter().enumerate() {
        let speed = rng.random_range(0.5..max_speed.max(1.0));
        log::info!("Swing {}: {} at {:.2}", swing, host.object_name(log), speed);

        let Some(contact) = host.contact(axe_obj, log, Vec3::new(0.0, -speed, 0.0)) else {
            continue;
        };
        tally.record(&scene.handle_collision(&mut host, &contact));

        let mut drops = 0;
        while scene.axe_state(axe) == Some(AxeState::Stuck { log }) && drops < MAX_DROPS {
            drops += 1;
            let drop_speed = rng.random_range(1.0..(config.log.ground_break_threshold * 1.8).max(2.0));
            log::info!("  Dropping {} at {:.2}", host.object_name(log), drop_speed);
            let Some(landing) = host.contact(log, ground, Vec3::new(0.0, -drop_speed, 0.0)) else {
                break;
            };
            tally.record(&scene.handle_collision(&mut host, &landing));
            // A hard landing with no split prefab clears the log's reference; re-stick needs a new swing
            if scene.notifier(log).is_some_and(|n| n.attached_axe().is_none()) {
                break;
            }
        }
    }

    let halves = host.objects_tagged(Tag::HalfLog).count();
    log::info!(
        "Done: {} stuck, {} split, {} skipped, {} halves on the ground, {} sounds played, axe {:?}",
        tally.stuck,
        tally.split,
        tally.skipped,
        halves,
        host.sounds_played.len(),
        scene.axe_state(axe)
    );
    println!(
        "logs split: {}/{}  halves: {}  axe: {:?}",
        tally.split,
        logs.len(),
        halves,
        scene.axe_state(axe).unwrap_or(AxeState::Free)
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["log-splitter"]).unwrap();
        assert_eq!(args.config, None);
        assert_eq!(args.seed, 42);
        assert_eq!(args.swings, 8);
        assert_eq!(args.stick_mode, None);
        assert!(!args.print_config);
    }

    #[test]
    fn test_args_all_options() {
        let args = Args::try_parse_from([
            "log-splitter",
            "scene.json",
            "--seed",
            "7",
            "--swings",
            "3",
            "--stick-mode",
            "kinematic",
            "--print-config",
        ])
        .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("scene.json")));
        assert_eq!(args.seed, 7);
        assert_eq!(args.swings, 3);
        assert_eq!(args.stick_mode, Some(StickMode::Kinematic));
        assert!(args.print_config);
    }

    #[test]
    fn test_args_rejects_bad_values() {
        assert!(Args::try_parse_from(["log-splitter", "--seed", "abc"]).is_err());
        assert!(Args::try_parse_from(["log-splitter", "--wobble"]).is_err());
        assert!(Args::try_parse_from(["log-splitter", "--stick-mode", "glued"]).is_err());
    }

    #[test]
    fn test_args_definition() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
