use rand::Rng;

use crate::config::PhysicsConfig;

/// One pipe sprite position (top-left corner). Pipes come in upper/lower
/// pairs; the gap between a pair is what the actor flies through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pipe {
    pub x: f32,
    pub y: f32,
}

/// Per-pixel opacity bitmap standing in for a sprite's alpha channel.
/// The shell builds these once per session from loaded imagery; the headless
/// shell uses solid rectangles.
#[derive(Debug, Clone)]
pub struct Hitmask {
    width: usize,
    height: usize,
    bits: Vec<bool>,
}

impl Hitmask {
    /// Fully opaque rectangle.
    pub fn solid(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            bits: vec![true; width * height],
        }
    }

    /// Build a mask from a predicate over (x, y) pixel coordinates.
    pub fn from_fn(width: usize, height: usize, f: impl Fn(usize, usize) -> bool) -> Self {
        let mut bits = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                bits.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            bits,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Opacity at a pixel; out-of-range coordinates read as transparent so a
    /// sprite rect slightly larger than its mask never indexes past the end.
    pub fn opaque(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.bits[y * self.width + x]
    }
}

/// Read-only spatial constants for one play session: screen bounds, sprite
/// dimensions, and collision masks. Built once from config (or from loaded
/// imagery in a rendering shell) and shared by every decision computation.
#[derive(Debug, Clone)]
pub struct SessionGeometry {
    pub screen_w: f32,
    pub screen_h: f32,
    /// y of the ground line; the actor crashes when its bottom edge reaches it.
    pub floor_y: f32,
    /// Fixed horizontal position of the actor (pipes move, the actor doesn't).
    pub actor_x: f32,
    pub actor_w: f32,
    pub actor_h: f32,
    pub pipe_w: f32,
    pub pipe_h: f32,
    pub gap_size: f32,
    pub actor_mask: Hitmask,
    pub pipe_mask: Hitmask,
}

impl SessionGeometry {
    /// Geometry with fully solid collision masks, for headless play and tests.
    pub fn solid(physics: &PhysicsConfig) -> Self {
        let actor_mask = Hitmask::solid(
            physics.actor_width.round() as usize,
            physics.actor_height.round() as usize,
        );
        let pipe_mask = Hitmask::solid(
            physics.pipe_width.round() as usize,
            physics.pipe_height.round() as usize,
        );
        Self::with_masks(physics, actor_mask, pipe_mask)
    }

    /// Geometry with caller-supplied masks (e.g. extracted from sprite alpha).
    pub fn with_masks(physics: &PhysicsConfig, actor_mask: Hitmask, pipe_mask: Hitmask) -> Self {
        Self {
            screen_w: physics.screen_width,
            screen_h: physics.screen_height,
            floor_y: physics.screen_height * physics.floor_frac,
            actor_x: (physics.screen_width * physics.actor_x_frac).floor(),
            actor_w: physics.actor_width,
            actor_h: physics.actor_height,
            pipe_w: physics.pipe_width,
            pipe_h: physics.pipe_height,
            gap_size: physics.gap_size,
            actor_mask,
            pipe_mask,
        }
    }
}

/// One instant of simulated play: the actor's vertical state plus the pipe
/// field. Value semantics throughout - the lookahead search clones a snapshot
/// at every branch point, so nothing here may share mutable state.
#[derive(Debug, Clone)]
pub struct WorldSnapshot {
    /// Vertical position of the actor's top-left corner.
    pub actor_y: f32,
    pub actor_vel_y: f32,
    /// Upper/lower pipe lists are index-paired and sorted by ascending x.
    pub upper_pipes: Vec<Pipe>,
    pub lower_pipes: Vec<Pipe>,
}

impl WorldSnapshot {
    pub fn new(actor_y: f32, actor_vel_y: f32, upper_pipes: Vec<Pipe>, lower_pipes: Vec<Pipe>) -> Self {
        debug_assert_eq!(
            upper_pipes.len(),
            lower_pipes.len(),
            "upper/lower pipe lists must be index-paired"
        );
        debug_assert!(
            upper_pipes.windows(2).all(|w| w[0].x <= w[1].x),
            "pipes must be sorted by ascending x"
        );
        Self {
            actor_y,
            actor_vel_y,
            upper_pipes,
            lower_pipes,
        }
    }

    /// Append a freshly spawned pipe pair on the right edge.
    pub fn push_pair(&mut self, upper: Pipe, lower: Pipe) {
        self.upper_pipes.push(upper);
        self.lower_pipes.push(lower);
    }

    /// Retire the left-most pipe pair once it has scrolled off screen.
    pub fn pop_front_pair(&mut self) {
        if !self.upper_pipes.is_empty() {
            self.upper_pipes.remove(0);
            self.lower_pipes.remove(0);
        }
    }
}

/// Sample a new pipe pair just past the right screen edge. The gap's top is
/// uniform over the middle band of the playfield so every spawn is passable.
pub fn spawn_pipe_pair(rng: &mut impl Rng, geom: &SessionGeometry) -> (Pipe, Pipe) {
    let band = (geom.floor_y * 0.6 - geom.gap_size).max(1.0);
    let gap_top = geom.floor_y * 0.2 + rng.gen_range(0.0..band).floor();
    let x = geom.screen_w + 10.0;

    (
        Pipe {
            x,
            y: gap_top - geom.pipe_h,
        },
        Pipe {
            x,
            y: gap_top + geom.gap_size,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_hitmask_solid_is_fully_opaque() {
        let mask = Hitmask::solid(4, 3);
        for y in 0..3 {
            for x in 0..4 {
                assert!(mask.opaque(x, y));
            }
        }
        // Out-of-range reads are transparent, not a panic
        assert!(!mask.opaque(4, 0));
        assert!(!mask.opaque(0, 3));
    }

    #[test]
    fn test_hitmask_from_fn_follows_predicate() {
        // Left half opaque, right half transparent
        let mask = Hitmask::from_fn(6, 2, |x, _| x < 3);
        assert!(mask.opaque(2, 1));
        assert!(!mask.opaque(3, 1));
    }

    #[test]
    fn test_spawned_pair_is_passable_and_off_screen_right() {
        let physics = PhysicsConfig::default();
        let geom = SessionGeometry::solid(&physics);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..100 {
            let (upper, lower) = spawn_pipe_pair(&mut rng, &geom);
            assert_eq!(upper.x, lower.x);
            assert!(upper.x > geom.screen_w);

            // Gap must sit fully between the top of the screen and the floor
            let gap_top = upper.y + geom.pipe_h;
            let gap_bottom = lower.y;
            assert!((gap_bottom - gap_top - geom.gap_size).abs() < 1e-3);
            assert!(gap_top >= geom.floor_y * 0.2 - 1.0);
            assert!(gap_bottom <= geom.floor_y);
        }
    }

    #[test]
    fn test_snapshot_push_and_pop_keep_lists_paired() {
        let mut world = WorldSnapshot::new(100.0, 0.0, vec![], vec![]);
        world.push_pair(Pipe { x: 300.0, y: -200.0 }, Pipe { x: 300.0, y: 220.0 });
        world.push_pair(Pipe { x: 440.0, y: -180.0 }, Pipe { x: 440.0, y: 240.0 });
        assert_eq!(world.upper_pipes.len(), 2);

        world.pop_front_pair();
        assert_eq!(world.upper_pipes.len(), 1);
        assert_eq!(world.lower_pipes.len(), 1);
        assert_eq!(world.upper_pipes[0].x, 440.0);
    }
}
