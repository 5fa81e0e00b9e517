// ABOUTME: Desired-vs-desired comparison: port equivalence and replacement planning.
// ABOUTME: Decides whether a config change is cosmetic, in-place, or needs a new container.

mod plan;
mod ports;

pub use plan::{Plan, force_new_changes, lifecycle_changes, plan};
pub use ports::ports_equivalent;
