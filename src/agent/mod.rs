// Lookahead decision agent: scoring, search, policy, and the background slot

pub mod policy;
pub mod scorer;
pub mod search;
pub mod slot;

pub use policy::{decide, Decision};
pub use search::{explore, TrajectoryResult};
pub use slot::DecisionSlot;
