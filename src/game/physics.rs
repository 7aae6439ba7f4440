use super::collision::check_crash;
use super::world::{SessionGeometry, WorldSnapshot};
use crate::config::PhysicsConfig;

/// Outcome of one decision-tick step. On a crash the snapshot is left in its
/// post-crash state so terminal positions can still be scored.
#[derive(Debug, Default, Clone, Copy)]
pub struct StepOutcome {
    pub crashed: bool,
    pub ground_crash: bool,
}

/// Advance the world by one decision tick of `sub_steps` physics frames.
///
/// A flap consumes exactly one impulse per tick: the first sub-step where the
/// actor is below the ceiling guard sets the upward impulse velocity and the
/// flap is spent. Every sub-step applies gravity (one-sided descent clamp),
/// advances the actor with descent capped at ground contact, drifts pipes
/// left, and re-checks collision - a crash mid-tick is reported at the
/// sub-step it occurs.
pub fn step(
    world: &mut WorldSnapshot,
    flap: bool,
    physics: &PhysicsConfig,
    geom: &SessionGeometry,
    sub_steps: u32,
) -> StepOutcome {
    let mut flap_pending = flap;

    for _ in 0..sub_steps {
        let mut flapped = false;

        // Ceiling guard: a flap has no effect while the actor is more than
        // two body heights above the top of the screen
        if flap_pending && world.actor_y > -2.0 * geom.actor_h {
            world.actor_vel_y = physics.flap_impulse;
            flap_pending = false;
            flapped = true;
        }

        // Gravity, clamped only on the descent side
        if world.actor_vel_y < physics.max_descent_vel && !flapped {
            world.actor_vel_y += physics.gravity;
        }

        // Descent is capped exactly at ground contact, never past it
        world.actor_y += world
            .actor_vel_y
            .min(geom.floor_y - world.actor_y - geom.actor_h);

        for pipe in world
            .upper_pipes
            .iter_mut()
            .chain(world.lower_pipes.iter_mut())
        {
            pipe.x += physics.pipe_vel_x;
        }

        let crash = check_crash(world, geom);
        if crash.crashed {
            return StepOutcome {
                crashed: true,
                ground_crash: crash.ground_crash,
            };
        }
    }

    StepOutcome::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::world::Pipe;

    fn setup() -> (PhysicsConfig, SessionGeometry) {
        let physics = PhysicsConfig::default();
        let geom = SessionGeometry::solid(&physics);
        (physics, geom)
    }

    fn open_air(actor_y: f32, vel: f32) -> WorldSnapshot {
        WorldSnapshot::new(actor_y, vel, vec![], vec![])
    }

    #[test]
    fn test_coasting_never_exceeds_max_descent_velocity() {
        let (physics, geom) = setup();
        let mut world = open_air(50.0, 0.0);

        for _ in 0..30 {
            let outcome = step(&mut world, false, &physics, &geom, 1);
            assert!(world.actor_vel_y <= physics.max_descent_vel);
            if outcome.crashed {
                break;
            }
        }
    }

    #[test]
    fn test_flap_applies_impulse_once_per_tick() {
        let (physics, geom) = setup();
        let mut world = open_air(200.0, 5.0);

        step(&mut world, true, &physics, &geom, 3);

        // Sub-step 1 sets the impulse (no gravity that frame); sub-steps 2-3
        // add gravity: -9, -8, -7
        assert_eq!(
            world.actor_vel_y,
            physics.flap_impulse + 2.0 * physics.gravity
        );
    }

    #[test]
    fn test_flap_is_held_while_above_ceiling_guard() {
        let (physics, geom) = setup();
        // Way above the ceiling guard: the flap must not fire this frame
        let mut world = open_air(-3.0 * geom.actor_h, 0.0);

        step(&mut world, true, &physics, &geom, 1);
        assert_eq!(world.actor_vel_y, physics.gravity);
    }

    #[test]
    fn test_pipes_drift_left_each_sub_step() {
        let (physics, geom) = setup();
        let mut world = open_air(100.0, 0.0);
        world.push_pair(Pipe { x: 400.0, y: -220.0 }, Pipe { x: 400.0, y: 200.0 });

        step(&mut world, false, &physics, &geom, 3);
        assert_eq!(world.upper_pipes[0].x, 400.0 + 3.0 * physics.pipe_vel_x);
        assert_eq!(world.lower_pipes[0].x, world.upper_pipes[0].x);
    }

    #[test]
    fn test_descent_capped_at_ground_contact() {
        let (physics, geom) = setup();
        // One unit above the forced ground crash, falling
        let mut world = open_air(geom.floor_y - geom.actor_h - 1.0, 5.0);

        let outcome = step(&mut world, false, &physics, &geom, 1);
        assert!(outcome.crashed);
        assert!(outcome.ground_crash);
        // The actor stopped exactly on the floor line, not past it
        assert_eq!(world.actor_y, geom.floor_y - geom.actor_h);
    }

    #[test]
    fn test_crash_detected_at_the_sub_step_it_occurs() {
        let (physics, geom) = setup();
        // Pipe bottom edge just above the actor: flapping up collides on the
        // very first sub-step
        let mut world = open_air(150.0, 0.0);
        world.push_pair(
            Pipe {
                x: geom.actor_x,
                y: 145.0 - geom.pipe_h,
            },
            Pipe {
                x: geom.actor_x,
                y: 450.0,
            },
        );

        let outcome = step(&mut world, true, &physics, &geom, 3);
        assert!(outcome.crashed);
        assert!(!outcome.ground_crash);
        // Pipes only advanced by the sub-steps that actually ran
        assert!(world.upper_pipes[0].x > geom.actor_x + 3.0 * physics.pipe_vel_x);
    }

    #[test]
    fn test_crashed_step_returns_post_step_snapshot() {
        let (physics, geom) = setup();
        let start_y = geom.floor_y - geom.actor_h - 1.0;
        let mut world = open_air(start_y, 5.0);

        let outcome = step(&mut world, false, &physics, &geom, 3);
        assert!(outcome.crashed);
        // Snapshot reflects the crash frame, not the starting state
        assert!(world.actor_y > start_y);
    }
}
