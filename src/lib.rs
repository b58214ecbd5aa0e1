//! Procedural archipelago generation and tile-based navigation.
//!
//! The crate builds the world a pirate sim plays on: a seeded noise
//! pipeline classifies terrain, hydrology guarantees one connected ocean,
//! islands are labeled and bounded in size (regenerating with a perturbed
//! seed when the archipelago comes out malformed), and settlements are
//! placed deterministically. A stateless A* pathfinder with line-of-sight
//! smoothing serves every moving agent against the finished grid.
//!
//! Rendering, audio, persistence, and gameplay balancing live elsewhere;
//! this crate hands them a [`World`] plus coordinate-projection helpers
//! and owns no global state.

pub mod config;
pub mod coords;
pub mod nav;
pub mod world;

pub use config::WorldGenConfig;
pub use nav::{find_path, has_line_of_sight, NavDomain};
pub use world::founding::{build_road, found_village, found_village_at, City};
pub use world::islands::{segment, Island, Segmentation};
pub use world::tiles::{Terrain, TileGrid};
pub use world::{generate_world, Settlement, World};
