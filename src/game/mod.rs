pub mod collision;
pub mod physics;
pub mod world;

pub use collision::{check_crash, CrashTest};
pub use physics::{step, StepOutcome};
pub use world::{spawn_pipe_pair, Hitmask, Pipe, SessionGeometry, WorldSnapshot};
