// Depth-limited lookahead over the flap/coast decision tree

use std::cmp::Ordering;

use crate::config::{PhysicsConfig, SearchConfig};
use crate::game::{physics, SessionGeometry, WorldSnapshot};

use super::scorer;

/// One surviving simulated future: cumulative score plus the actor's vertical
/// position after each decision tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryResult {
    pub score: f32,
    pub path: Vec<f32>,
}

/// Stack entry during exploration; consumed when expanded or finalized.
struct SearchNode {
    world: WorldSnapshot,
    depth: u32,
    score: f32,
    path: Vec<f32>,
}

/// Effective lookahead depth: the desired depth, bounded by how many decision
/// ticks the nearest pipe can still spend on screen - deeper search is wasted
/// work once the pipe has scrolled past the actor.
pub fn max_depth(physics: &PhysicsConfig, search: &SearchConfig, geom: &SessionGeometry) -> f32 {
    let visible =
        (geom.screen_w - geom.actor_x) / physics.pipe_vel_x.abs() / search.frame_skip as f32;
    (search.max_desired_depth as f32).min(visible)
}

/// Explore the binary decision tree from `start` and return the surviving
/// trajectories, best (highest score) first, truncated to the visible cap.
///
/// Depth-first with an explicit stack; each popped node below the depth limit
/// is branched into an independent flap child and coast child (deep copies -
/// branches must never alias). Children that crash are pruned outright.
/// Enumeration stops early once `max_results` trajectories have been
/// finalized; that cap bounds latency, not correctness, so an empty result is
/// a legitimate outcome when every branch dies.
pub fn explore(
    start: &WorldSnapshot,
    physics_cfg: &PhysicsConfig,
    search: &SearchConfig,
    geom: &SessionGeometry,
) -> Vec<TrajectoryResult> {
    let depth_limit = max_depth(physics_cfg, search, geom);

    let mut stack = vec![SearchNode {
        world: start.clone(),
        depth: 0,
        score: 0.0,
        path: vec![start.actor_y],
    }];
    let mut finalized: Vec<TrajectoryResult> = Vec::new();

    while let Some(node) = stack.pop() {
        if node.depth as f32 >= depth_limit {
            finalized.push(TrajectoryResult {
                score: node.score,
                path: node.path,
            });
            if finalized.len() >= search.max_results {
                break;
            }
            continue;
        }

        for flap in [true, false] {
            let mut world = node.world.clone();
            let outcome = physics::step(&mut world, flap, physics_cfg, geom, search.frame_skip);
            if outcome.crashed {
                continue;
            }

            let tick_score = scorer::score(&world, search.score_sigma, geom);
            let mut path = node.path.clone();
            path.push(world.actor_y);
            stack.push(SearchNode {
                world,
                depth: node.depth + 1,
                score: node.score + tick_score,
                path,
            });
        }
    }

    // Best first. The sort is stable, so equal scores keep insertion order.
    finalized.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    finalized.truncate(search.visible_paths);
    finalized
}

/// Best cumulative score in a ranked result list; zero when the search found
/// no surviving trajectory at all.
pub fn best_score(results: &[TrajectoryResult]) -> f32 {
    results.first().map(|r| r.score).unwrap_or(0.0)
}
