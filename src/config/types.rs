// Flappilot configuration types
// All settings with sensible defaults matching the classic playfield tuning

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub physics: PhysicsConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub sim: SimConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            physics: PhysicsConfig::default(),
            search: SearchConfig::default(),
            sim: SimConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PhysicsConfig {
    // Downward acceleration added to the actor's velocity each frame
    pub gravity: f32,

    // Velocity set by a flap (negative = upward)
    pub flap_impulse: f32,

    // Max descend speed; gravity never pushes velocity past this
    pub max_descent_vel: f32,

    // Max ascend speed (negative); sanity bound on upward impulses
    pub max_ascent_vel: f32,

    // Horizontal pipe drift per frame (negative = leftward)
    pub pipe_vel_x: f32,

    // Vertical opening between an upper/lower pipe pair
    pub gap_size: f32,

    // Playfield dimensions in pixels
    pub screen_width: f32,
    pub screen_height: f32,

    // Ground line as a fraction of screen height
    pub floor_frac: f32,

    // Actor's fixed horizontal position as a fraction of screen width
    pub actor_x_frac: f32,

    // Sprite bounding sizes (collision masks default to these, fully solid)
    pub actor_width: f32,
    pub actor_height: f32,
    pub pipe_width: f32,
    pub pipe_height: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 1.0,
            flap_impulse: -9.0,
            max_descent_vel: 10.0,
            max_ascent_vel: -8.0,
            pipe_vel_x: -4.0,
            gap_size: 100.0,
            screen_width: 288.0,
            screen_height: 512.0,
            floor_frac: 0.79,
            actor_x_frac: 0.2,
            actor_width: 34.0,
            actor_height: 24.0,
            pipe_width: 52.0,
            pipe_height: 320.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchConfig {
    // Physics frames advanced per decision tick inside the search
    pub frame_skip: u32,

    // Live frames between two agent decisions (normally equal to frame_skip)
    pub decision_interval: u32,

    // Desired lookahead depth in decision ticks; the effective depth is also
    // bounded by how long the nearest pipe stays on screen
    pub max_desired_depth: u32,

    // The search stops once this many trajectories have been finalized
    pub max_results: usize,

    // Ranked trajectories kept for the caller (display overlay)
    pub visible_paths: usize,

    // Spread of the gap-centering score distribution
    pub score_sigma: f32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            frame_skip: 3,
            decision_interval: 3,
            max_desired_depth: 15,
            max_results: 5,
            visible_paths: 5,
            // gap_size / 4 - 5 for the default 100-pixel gap
            score_sigma: 20.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SimConfig {
    // Episodes per run of the headless shell
    pub episodes: u32,

    // Frame cap per episode so a perfect agent still terminates
    pub max_frames: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            episodes: 5,
            max_frames: 20_000,
        }
    }
}

impl Config {
    /// Validate the numeric knobs once at startup. The core assumes a valid
    /// config and does no per-decision checking.
    pub fn validate(&self) -> Result<()> {
        let p = &self.physics;
        if p.gravity <= 0.0 {
            bail!("physics.gravity must be positive");
        }
        if p.flap_impulse >= 0.0 {
            bail!("physics.flap_impulse must be negative (upward)");
        }
        if p.max_descent_vel <= 0.0 || p.max_ascent_vel >= 0.0 {
            bail!("physics velocity clamps must bracket zero");
        }
        if p.pipe_vel_x >= 0.0 {
            bail!("physics.pipe_vel_x must be negative (pipes drift left)");
        }
        if p.gap_size <= 0.0 {
            bail!("physics.gap_size must be positive");
        }
        if p.screen_width <= 0.0 || p.screen_height <= 0.0 {
            bail!("screen dimensions must be positive");
        }
        if !(0.0 < p.floor_frac && p.floor_frac <= 1.0) {
            bail!("physics.floor_frac must be in (0, 1]");
        }
        if !(0.0 < p.actor_x_frac && p.actor_x_frac < 1.0) {
            bail!("physics.actor_x_frac must be in (0, 1)");
        }
        if p.actor_width <= 0.0
            || p.actor_height <= 0.0
            || p.pipe_width <= 0.0
            || p.pipe_height <= 0.0
        {
            bail!("sprite dimensions must be positive");
        }

        let s = &self.search;
        if s.frame_skip == 0 || s.decision_interval == 0 {
            bail!("search.frame_skip and search.decision_interval must be at least 1");
        }
        if s.max_desired_depth == 0 {
            bail!("search.max_desired_depth must be at least 1");
        }
        if s.max_results == 0 || s.visible_paths == 0 {
            bail!("search result caps must be at least 1");
        }
        // Floor on the spread so the score denominator can never degenerate
        if s.score_sigma < 1.0 {
            bail!("search.score_sigma must be at least 1.0");
        }

        if self.sim.episodes == 0 {
            bail!("sim.episodes must be at least 1");
        }

        Ok(())
    }
}
