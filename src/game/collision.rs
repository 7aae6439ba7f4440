use super::world::{Hitmask, SessionGeometry, WorldSnapshot};

/// Outcome of one collision query. Ground crashes are reported separately so
/// the shell can attribute the end of an episode.
#[derive(Debug, Default, Clone, Copy)]
pub struct CrashTest {
    pub crashed: bool,
    pub ground_crash: bool,
}

/// Integer pixel rectangle used for overlap clipping.
#[derive(Debug, Clone, Copy)]
struct Rect {
    x: i32,
    y: i32,
    w: i32,
    h: i32,
}

impl Rect {
    fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            x: x.round() as i32,
            y: y.round() as i32,
            w: w.round() as i32,
            h: h.round() as i32,
        }
    }

    /// Intersection of two rects; zero-area when they don't overlap.
    fn clip(&self, other: &Rect) -> Rect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let w = ((self.x + self.w).min(other.x + other.w) - x).max(0);
        let h = ((self.y + self.h).min(other.y + other.h) - y).max(0);
        Rect { x, y, w, h }
    }
}

/// Check the actor at its fixed x against the ground and every pipe pair.
/// Pure: identical geometry always yields the identical answer.
pub fn check_crash(world: &WorldSnapshot, geom: &SessionGeometry) -> CrashTest {
    // Ground check first; a grounded actor never reaches the pipe checks
    if world.actor_y + geom.actor_h >= geom.floor_y - 1.0 {
        return CrashTest {
            crashed: true,
            ground_crash: true,
        };
    }

    let actor_rect = Rect::new(geom.actor_x, world.actor_y, geom.actor_w, geom.actor_h);

    for (upper, lower) in world.upper_pipes.iter().zip(world.lower_pipes.iter()) {
        let upper_rect = Rect::new(upper.x, upper.y, geom.pipe_w, geom.pipe_h);
        let lower_rect = Rect::new(lower.x, lower.y, geom.pipe_w, geom.pipe_h);

        if pixel_collision(&actor_rect, &upper_rect, &geom.actor_mask, &geom.pipe_mask)
            || pixel_collision(&actor_rect, &lower_rect, &geom.actor_mask, &geom.pipe_mask)
        {
            return CrashTest {
                crashed: true,
                ground_crash: false,
            };
        }
    }

    CrashTest::default()
}

/// Mask-accurate overlap test: bounding boxes must intersect AND both masks
/// must be opaque at some shared cell of the overlap rectangle.
fn pixel_collision(rect1: &Rect, rect2: &Rect, mask1: &Hitmask, mask2: &Hitmask) -> bool {
    let overlap = rect1.clip(rect2);
    if overlap.w == 0 || overlap.h == 0 {
        return false;
    }

    // Translate the overlap into each sprite's local pixel coordinates
    let (x1, y1) = (overlap.x - rect1.x, overlap.y - rect1.y);
    let (x2, y2) = (overlap.x - rect2.x, overlap.y - rect2.y);

    for dx in 0..overlap.w {
        for dy in 0..overlap.h {
            if mask1.opaque((x1 + dx) as usize, (y1 + dy) as usize)
                && mask2.opaque((x2 + dx) as usize, (y2 + dy) as usize)
            {
                return true;
            }
        }
    }
    false
}
