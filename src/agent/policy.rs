// Top-level action choice for one decision interval

use crate::config::{PhysicsConfig, SearchConfig};
use crate::game::{physics, SessionGeometry, WorldSnapshot};

use super::search::{best_score, explore, TrajectoryResult};

/// The agent's answer for one decision interval: the action to apply now plus
/// the ranked trajectories that justified it (for an optional overlay).
/// Defaults to coasting with no paths - the fallback before the first
/// computation finishes.
#[derive(Debug, Clone, Default)]
pub struct Decision {
    pub flap: bool,
    pub paths: Vec<TrajectoryResult>,
}

/// Choose flap or coast from `start`.
///
/// Three cases, in order:
/// 1. Flapping now crashes within one tick: coast is forced. The search runs
///    from the coast state so the returned paths still look one tick ahead.
/// 2. Coasting now crashes within one tick: flap is forced, symmetrically.
/// 3. Both survive: explore both one-tick-ahead states and take the action
///    with the strictly higher best score; ties coast.
///
/// A branch already known to be a dead end is never searched, and when an
/// alternative exists the returned action never causes an avoidable
/// immediate crash. An empty search result is fine - the action stands and
/// `paths` is empty.
pub fn decide(
    start: &WorldSnapshot,
    physics_cfg: &PhysicsConfig,
    search: &SearchConfig,
    geom: &SessionGeometry,
) -> Decision {
    let mut flap_state = start.clone();
    let flap_crashes = physics::step(&mut flap_state, true, physics_cfg, geom, search.frame_skip).crashed;

    let mut coast_state = start.clone();
    let coast_crashes =
        physics::step(&mut coast_state, false, physics_cfg, geom, search.frame_skip).crashed;

    if flap_crashes {
        return Decision {
            flap: false,
            paths: explore(&coast_state, physics_cfg, search, geom),
        };
    }

    if coast_crashes {
        return Decision {
            flap: true,
            paths: explore(&flap_state, physics_cfg, search, geom),
        };
    }

    let flap_paths = explore(&flap_state, physics_cfg, search, geom);
    let coast_paths = explore(&coast_state, physics_cfg, search, geom);

    if best_score(&flap_paths) > best_score(&coast_paths) {
        Decision {
            flap: true,
            paths: flap_paths,
        }
    } else {
        Decision {
            flap: false,
            paths: coast_paths,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Pipe;

    fn setup() -> (PhysicsConfig, SearchConfig, SessionGeometry) {
        let physics = PhysicsConfig::default();
        let search = SearchConfig::default();
        let geom = SessionGeometry::solid(&physics);
        (physics, search, geom)
    }

    #[test]
    fn test_centered_actor_with_distant_pipe_coasts() {
        let (physics, mut search, geom) = setup();
        // Near-exhaustive short search so the comparison reflects true best
        // scores rather than enumeration order
        search.max_desired_depth = 4;
        search.max_results = 256;
        search.visible_paths = 8;

        // Actor resting at the screen midpoint (the pre-visibility goal),
        // one pipe pair far off screen to the right
        let world = WorldSnapshot::new(
            geom.screen_h / 2.0,
            0.0,
            vec![Pipe {
                x: geom.screen_w + 120.0,
                y: 200.0 - geom.pipe_h,
            }],
            vec![Pipe {
                x: geom.screen_w + 120.0,
                y: 300.0,
            }],
        );

        // Flapping immediately overshoots the goal; coasting stays close
        let decision = decide(&world, &physics, &search, &geom);
        assert!(!decision.flap);
        assert!(!decision.paths.is_empty());
    }

    #[test]
    fn test_forced_coast_when_flapping_crashes_immediately() {
        let (physics, search, geom) = setup();
        // Pipe bottom just above the actor: one flap tick collides, while
        // coasting falls clear of it
        let world = WorldSnapshot::new(
            150.0,
            2.0,
            vec![Pipe {
                x: geom.actor_x,
                y: 145.0 - geom.pipe_h,
            }],
            vec![Pipe {
                x: geom.actor_x,
                y: 460.0,
            }],
        );

        let decision = decide(&world, &physics, &search, &geom);
        assert!(!decision.flap);
    }

    #[test]
    fn test_forced_flap_when_coasting_crashes_immediately() {
        let (physics, search, geom) = setup();
        // Falling actor one unit above ground contact, open sky above
        let world = WorldSnapshot::new(geom.floor_y - geom.actor_h - 1.0, 5.0, vec![], vec![]);

        let decision = decide(&world, &physics, &search, &geom);
        assert!(decision.flap);
    }

    #[test]
    fn test_total_dead_end_still_returns_a_decision() {
        let (physics, search, geom) = setup();
        // Coasting grounds within a tick AND a pipe wall blocks the flap:
        // the policy must still answer (coast, forced by the flap crash)
        let world = WorldSnapshot::new(
            geom.floor_y - geom.actor_h - 1.0,
            5.0,
            vec![Pipe {
                x: geom.actor_x - 2.0,
                y: geom.floor_y + 10.0 - geom.pipe_h,
            }],
            vec![Pipe {
                x: geom.actor_x - 2.0,
                y: geom.floor_y + 60.0,
            }],
        );

        let decision = decide(&world, &physics, &search, &geom);
        assert!(!decision.flap);
        assert!(decision.paths.is_empty());
    }

    #[test]
    fn test_decide_is_deterministic() {
        let (physics, search, geom) = setup();
        let world = WorldSnapshot::new(
            geom.screen_h / 2.0,
            -2.0,
            vec![Pipe {
                x: 200.0,
                y: 220.0 - geom.pipe_h,
            }],
            vec![Pipe {
                x: 200.0,
                y: 320.0,
            }],
        );

        let a = decide(&world, &physics, &search, &geom);
        let b = decide(&world, &physics, &search, &geom);
        assert_eq!(a.flap, b.flap);
        assert_eq!(a.paths, b.paths);
    }
}
