// Gap-centering score for simulated trajectories

use crate::game::{SessionGeometry, WorldSnapshot};

/// Gaussian falloff score for a displacement from the goal.
///
/// With a cutoff the score is shifted so it reaches exactly zero at
/// `displacement == cutoff` and goes negative beyond it - positions that
/// cannot clear the gap score at or below zero.
pub fn gaussian_score(displacement: f32, sigma: f32, cutoff: Option<f32>) -> f32 {
    let falloff = |d: f32| (-d * d / (2.0 * sigma * sigma)).exp();
    match cutoff {
        None => falloff(displacement),
        Some(c) => falloff(displacement) - falloff(c),
    }
}

/// Desirability of a snapshot: how close the actor sits to the vertical
/// center of the nearest upcoming gap.
///
/// The goal pipe is the left-most pair whose right edge the actor has not yet
/// passed. Before that pipe's left edge enters the screen (or when no pipe is
/// ahead at all) the goal defaults to the vertical screen midpoint. While the
/// actor laterally overlaps a pipe the zero-score cutoff tightens by half the
/// actor height, so only positions that genuinely fit the gap stay positive.
pub fn score(world: &WorldSnapshot, sigma: f32, geom: &SessionGeometry) -> f32 {
    let mut goal = geom.screen_h / 2.0;

    // Pipes are sorted by ascending x, so the first not-yet-passed pair is
    // the goal pipe
    let goal_pipe = world
        .upper_pipes
        .iter()
        .find(|p| geom.actor_x < p.x + geom.pipe_w);

    if let Some(pipe) = goal_pipe {
        if pipe.x < geom.screen_w {
            goal = pipe.y + geom.pipe_h + geom.gap_size / 2.0;
        }
    }

    let displacement = (goal - world.actor_y).abs();

    let mut cutoff = geom.gap_size / 2.0;
    let overlapping = world
        .upper_pipes
        .iter()
        .any(|p| p.x < geom.actor_x && geom.actor_x < p.x + geom.pipe_w);
    if overlapping {
        cutoff = geom.gap_size / 2.0 - geom.actor_h / 2.0;
    }

    gaussian_score(displacement, sigma, Some(cutoff))
}
