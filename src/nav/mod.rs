//! Navigation services consumed by moving agents.

pub mod pathfinding;

pub use pathfinding::{find_path, has_line_of_sight, NavDomain};
