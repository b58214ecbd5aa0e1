//! World generation pipeline.
//!
//! A world is built in passes: fractal noise fields are classified into
//! terrain per tile, hydrology removes interior lakes, the coastline is
//! marked, islands are labeled, and oversized islands are eroded. If the
//! archipelago misses its invariants (enough islands, every coast reachable
//! from open ocean) the whole pipeline reruns with the next seed, up to a
//! retry cap, after which the best-effort world is accepted. Settlements
//! are placed once the grid is stable.

pub mod classify;
pub mod erosion;
pub mod founding;
pub mod hydrology;
pub mod islands;
pub mod noise_fields;
pub mod settlements;
pub mod tiles;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::WorldGenConfig;
use classify::classify;
use erosion::{coasts_touch_ocean, erode_oversized};
use hydrology::{fill_lakes, mark_coastline};
use islands::{segment, Island};
use noise_fields::NoiseFields;
use tiles::TileGrid;

/// A placed settlement marker; the grid cell itself carries the matching
/// terrain category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub row: usize,
    pub col: usize,
    pub island_id: usize,
}

/// A fully generated world.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub grid: TileGrid,
    pub islands: Vec<Island>,
    pub villages: Vec<Settlement>,
    pub natives: Vec<Settlement>,
    pub missions: Vec<Settlement>,
    /// The seed that produced this world (base seed plus retry offset),
    /// recorded for reproducibility.
    pub seed: u64,
}

/// Generates a world of `width` x `height` world units at the given tile
/// size.
///
/// Fails fast on malformed options or dimensions; generation itself never
/// errors. When the retry budget runs out the last attempt is returned
/// as-is, so callers always get a playable (if sparse) archipelago.
pub fn generate_world(
    width: f32,
    height: f32,
    tile_size: f32,
    config: &WorldGenConfig,
) -> Result<World, String> {
    config.validate()?;
    if !(width > 0.0 && height > 0.0 && tile_size > 0.0) {
        return Err(format!(
            "world dimensions must be positive, got {}x{} at tile size {}",
            width, height, tile_size
        ));
    }
    let rows = (height / tile_size).floor() as usize;
    let cols = (width / tile_size).floor() as usize;
    if rows == 0 || cols == 0 {
        return Err(format!(
            "world of {}x{} at tile size {} has no tiles",
            width, height, tile_size
        ));
    }

    let mut seed = config.seed;
    let mut grid = generate_attempt(rows, cols, tile_size, seed, config);
    let mut seg = segment(&grid);
    let mut attempt: u32 = 1;
    while seg.islands.len() < config.min_islands || !coasts_touch_ocean(&grid, &seg) {
        if attempt >= config.max_retries {
            warn!(
                "world generation exhausted {} attempts ({} islands, {} wanted); keeping last",
                attempt,
                seg.islands.len(),
                config.min_islands
            );
            break;
        }
        seed = config.seed.wrapping_add(attempt as u64);
        grid = generate_attempt(rows, cols, tile_size, seed, config);
        seg = segment(&grid);
        attempt += 1;
    }

    use rand::SeedableRng;
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(seed);
    let mut villages = settlements::place_villages(&mut grid, &seg, config, &mut rng);
    let natives = settlements::place_natives(&mut grid, &seg, config.native_density, &mut rng);
    let missions = settlements::ensure_mission(&mut grid, &seg, &mut villages);

    info!(
        "generated {}x{} world, seed {}: {} islands, {} villages, {} natives",
        cols,
        rows,
        seed,
        seg.islands.len(),
        villages.len(),
        natives.len()
    );

    Ok(World {
        grid,
        islands: seg.islands,
        villages,
        natives,
        missions,
        seed,
    })
}

/// One full terrain pass for a single seed.
fn generate_attempt(
    rows: usize,
    cols: usize,
    tile_size: f32,
    seed: u64,
    config: &WorldGenConfig,
) -> TileGrid {
    let fields = NoiseFields::new(seed, config);
    let mut grid = TileGrid::new(rows, cols, tile_size);
    for r in 0..rows {
        for c in 0..cols {
            let sample = fields.sample(r, c);
            grid.set(r, c, classify(&sample, config));
        }
    }
    fill_lakes(&mut grid);
    mark_coastline(&mut grid);
    if erode_oversized(&mut grid, config.max_island_size) {
        fill_lakes(&mut grid);
        mark_coastline(&mut grid);
    }
    grid
}
