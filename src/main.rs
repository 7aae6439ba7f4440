mod agent;
mod config;
mod debug;
mod game;

use std::process;

use anyhow::Context;
use rand::rngs::StdRng;
use rand::SeedableRng;

use agent::{decide, Decision, DecisionSlot};
use config::Config;
use game::{physics, spawn_pipe_pair, Pipe, SessionGeometry, WorldSnapshot};

// Lead-pipe x window in which the replacement pair is spawned (slightly wider
// than one frame of drift at the default pipe speed)
const PIPE_RESPAWN_WINDOW: f32 = 5.0;

/// Command line options
struct Options {
    games: Option<u32>,
    seed: Option<u64>,
    single_core: bool,
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let opts = parse_args(&args);

    debug::init(opts.debug).context("failed to initialize debug logging")?;
    debug::log("SESSION_START", "Flappilot headless shell starting");

    let config = config::load_config().context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;

    let geom = SessionGeometry::solid(&config.physics);
    let mut rng = match opts.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let episodes = opts.games.unwrap_or(config.sim.episodes);
    println!(
        "flappilot: {} episode(s), {} agent scheduling",
        episodes,
        if opts.single_core {
            "synchronous"
        } else {
            "overlapped"
        }
    );

    let mut total_score: u64 = 0;
    let mut best_score: u32 = 0;

    for episode in 1..=episodes {
        let outcome = run_episode(&config, &geom, &mut rng, opts.single_core);

        let ending = if outcome.capped {
            "frame cap reached"
        } else if outcome.ground_crash {
            "hit the ground"
        } else {
            "hit a pipe"
        };
        println!(
            "episode {:>3}: score {:>4}  ({} frames, {})",
            episode, outcome.score, outcome.frames, ending
        );
        debug::log(
            "EPISODE",
            &format!(
                "episode {} finished: score {} frames {} ground_crash {}",
                episode, outcome.score, outcome.frames, outcome.ground_crash
            ),
        );

        total_score += outcome.score as u64;
        best_score = best_score.max(outcome.score);
    }

    println!(
        "done: best {} / average {:.1} over {} episode(s)",
        best_score,
        total_score as f64 / episodes as f64,
        episodes
    );
    Ok(())
}

/// Parse command line arguments, exiting on --help or unknown flags
fn parse_args(args: &[String]) -> Options {
    let mut opts = Options {
        games: None,
        seed: None,
        single_core: false,
        debug: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--games" | "-g" => {
                i += 1;
                let value = args.get(i).and_then(|v| v.parse().ok());
                match value {
                    Some(n) => opts.games = Some(n),
                    None => {
                        eprintln!("Error: --games requires a positive number");
                        process::exit(1);
                    }
                }
            }
            "--seed" => {
                i += 1;
                let value = args.get(i).and_then(|v| v.parse().ok());
                match value {
                    Some(n) => opts.seed = Some(n),
                    None => {
                        eprintln!("Error: --seed requires a number");
                        process::exit(1);
                    }
                }
            }
            "--single-core" => opts.single_core = true,
            "--debug" => opts.debug = true,
            "--help" | "-h" => {
                print_usage(&args[0]);
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage(&args[0]);
                process::exit(1);
            }
        }
        i += 1;
    }

    opts
}

fn print_usage(program: &str) {
    println!("Flappilot - lookahead agent for a flappy obstacle course");
    println!();
    println!("Usage:");
    println!("  {} [options]", program);
    println!();
    println!("Options:");
    println!("  -g, --games <n>     Episodes to run (default: from config)");
    println!("      --seed <n>      Seed the pipe generator for reproducible runs");
    println!("      --single-core   Compute decisions synchronously in the game loop");
    println!("      --debug         Write a trace to /tmp/flappilot-debug.log");
    println!("  -h, --help          Show this help");
    println!();
    println!("Physics and search tuning live in the config file");
    println!("(see the path printed on first run).");
}

struct EpisodeOutcome {
    score: u32,
    frames: u64,
    ground_crash: bool,
    capped: bool,
}

/// Run one headless episode to its crash (or the frame cap) and report how
/// far the agent got.
fn run_episode(
    config: &Config,
    geom: &SessionGeometry,
    rng: &mut StdRng,
    single_core: bool,
) -> EpisodeOutcome {
    let physics_cfg = &config.physics;
    let search_cfg = &config.search;

    // Two pipe pairs ahead of the actor, like a fresh round of the game:
    // first pair well past the right edge, second half a screen behind it
    let (u1, l1) = spawn_pipe_pair(rng, geom);
    let (u2, l2) = spawn_pipe_pair(rng, geom);
    let first_x = geom.screen_w + 200.0;
    let second_x = first_x + geom.screen_w / 2.0;
    let mut world = WorldSnapshot::new(
        (geom.screen_h - geom.actor_h) / 2.0,
        physics_cfg.flap_impulse,
        vec![
            Pipe { x: first_x, y: u1.y },
            Pipe { x: second_x, y: u2.y },
        ],
        vec![
            Pipe { x: first_x, y: l1.y },
            Pipe { x: second_x, y: l2.y },
        ],
    );

    let mut slot = DecisionSlot::new();
    let mut decision = Decision::default();
    let mut score: u32 = 0;
    let mut frame: u64 = 0;

    loop {
        if frame >= config.sim.max_frames {
            return EpisodeOutcome {
                score,
                frames: frame,
                ground_crash: false,
                capped: true,
            };
        }

        let mut flap_now = false;
        if frame % search_cfg.decision_interval as u64 == 0 {
            if single_core {
                decision = decide(&world, physics_cfg, search_cfg, geom);
            } else {
                // Collect the overlapped result if it is ready; otherwise the
                // previous decision stands for this interval
                if let Some(done) = slot.poll() {
                    decision = done;
                }

                // Seed the next computation from the state the chosen action
                // leads to - its result arrives one decision interval later,
                // when the live world has caught up to that state
                let mut seed = world.clone();
                let _ = physics::step(&mut seed, decision.flap, physics_cfg, geom, search_cfg.frame_skip);
                slot.spawn(seed, physics_cfg.clone(), search_cfg.clone(), geom.clone());
            }

            flap_now = decision.flap;
            debug::log(
                "AGENT",
                &format!(
                    "frame {} flap {} best {:.3} path {:?}",
                    frame,
                    decision.flap,
                    decision.paths.first().map(|p| p.score).unwrap_or(0.0),
                    decision.paths.first().map(|p| p.path.as_slice()).unwrap_or(&[])
                ),
            );
        }

        // One live frame under the same stepper the search uses
        let outcome = physics::step(&mut world, flap_now, physics_cfg, geom, 1);
        frame += 1;
        if outcome.crashed {
            return EpisodeOutcome {
                score,
                frames: frame,
                ground_crash: outcome.ground_crash,
                capped: false,
            };
        }

        // Score when the actor's midpoint crosses a pipe's midpoint
        let actor_mid = geom.actor_x + geom.actor_w / 2.0;
        for pipe in &world.upper_pipes {
            let pipe_mid = pipe.x + geom.pipe_w / 2.0;
            if pipe_mid <= actor_mid && actor_mid < pipe_mid + physics_cfg.pipe_vel_x.abs() {
                score += 1;
            }
        }

        // Spawn a replacement pair as the lead pipe nears the left edge,
        // retire it once fully off screen
        if let Some(first) = world.upper_pipes.first() {
            if 0.0 < first.x && first.x < PIPE_RESPAWN_WINDOW {
                let (upper, lower) = spawn_pipe_pair(rng, geom);
                world.push_pair(upper, lower);
            }
        }
        if world.upper_pipes.first().map_or(false, |p| p.x < -geom.pipe_w) {
            world.pop_front_pair();
        }
    }
}
