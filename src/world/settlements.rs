//! Village, native-settlement, and mission placement on a finalized grid.

use rand::Rng;
use tracing::{debug, warn};

use crate::config::WorldGenConfig;
use crate::world::islands::Segmentation;
use crate::world::tiles::{Terrain, TileGrid};
use crate::world::Settlement;

/// Places villages on island coasts.
///
/// Each island with a coast receives `villages_per_island` villages, or
/// `round(coast_len * village_density)` (at least one) when no fixed count
/// is configured. Sites are drawn without replacement from the island's
/// coast; a candidate with a Village anywhere in its 8-neighborhood is
/// rejected, which keeps villages at Chebyshev distance >= 2.
pub fn place_villages(
    grid: &mut TileGrid,
    seg: &Segmentation,
    config: &WorldGenConfig,
    rng: &mut impl Rng,
) -> Vec<Settlement> {
    let mut villages = Vec::new();
    for island in &seg.islands {
        if island.coast.is_empty() {
            continue;
        }
        let target = match config.villages_per_island {
            Some(n) => n as usize,
            None => ((island.coast.len() as f64 * config.village_density).round() as usize).max(1),
        };
        let mut candidates = island.coast.clone();
        let mut placed = 0;
        while placed < target && !candidates.is_empty() {
            let pick = rng.gen_range(0..candidates.len());
            let (r, c) = candidates.swap_remove(pick);
            if grid.get(r, c) != Some(Terrain::Coast) {
                continue;
            }
            if grid.neighbor8_any(r, c, |t| t == Terrain::Village) {
                continue;
            }
            grid.set(r, c, Terrain::Village);
            villages.push(Settlement {
                row: r,
                col: c,
                island_id: island.id,
            });
            placed += 1;
        }
        if placed < target {
            debug!(
                "island {}: placed {} of {} villages before running out of coast",
                island.id, placed, target
            );
        }
    }
    villages
}

/// Scatters native settlements over the interior.
///
/// A Land tile with a Forest or River 8-neighbor becomes Native with
/// probability `native_density`.
pub fn place_natives(
    grid: &mut TileGrid,
    seg: &Segmentation,
    native_density: f64,
    rng: &mut impl Rng,
) -> Vec<Settlement> {
    let mut natives = Vec::new();
    for r in 0..grid.rows() {
        for c in 0..grid.cols() {
            if grid.get(r, c) != Some(Terrain::Land) {
                continue;
            }
            if !grid.neighbor8_any(r, c, |t| matches!(t, Terrain::Forest | Terrain::River)) {
                continue;
            }
            if rng.gen::<f64>() >= native_density {
                continue;
            }
            let Some(island_id) = seg.island_at(r, c) else {
                continue;
            };
            grid.set(r, c, Terrain::Native);
            natives.push(Settlement {
                row: r,
                col: c,
                island_id,
            });
        }
    }
    natives
}

/// Guarantees exactly one mission tile.
///
/// The first-placed village is converted in preference; a world without
/// villages gets its first Coast-or-Land tile in row-major order. Worlds
/// with neither (all water) end up without a mission, which is logged and
/// accepted.
pub fn ensure_mission(
    grid: &mut TileGrid,
    seg: &Segmentation,
    villages: &mut Vec<Settlement>,
) -> Vec<Settlement> {
    if !villages.is_empty() {
        let site = villages.remove(0);
        grid.set(site.row, site.col, Terrain::Mission);
        return vec![site];
    }
    for r in 0..grid.rows() {
        for c in 0..grid.cols() {
            if !matches!(grid.get(r, c), Some(Terrain::Coast | Terrain::Land)) {
                continue;
            }
            let Some(island_id) = seg.island_at(r, c) else {
                continue;
            };
            grid.set(r, c, Terrain::Mission);
            return vec![Settlement {
                row: r,
                col: c,
                island_id,
            }];
        }
    }
    warn!("no coast or land tile available for a mission");
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::islands::segment;
    use rand_chacha::ChaCha8Rng;
    use rand::SeedableRng;

    fn ring_island() -> TileGrid {
        use crate::world::tiles::Terrain::{Coast as C, Land as L, Water as W};
        TileGrid::from_rows(
            vec![
                vec![W, W, W, W, W, W],
                vec![W, C, C, C, C, W],
                vec![W, C, L, L, C, W],
                vec![W, C, L, L, C, W],
                vec![W, C, C, C, C, W],
                vec![W, W, W, W, W, W],
            ],
            16.0,
        )
        .unwrap()
    }

    #[test]
    fn villages_are_never_adjacent() {
        let mut grid = ring_island();
        let seg = segment(&grid);
        let config = WorldGenConfig {
            villages_per_island: Some(6),
            ..Default::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let villages = place_villages(&mut grid, &seg, &config, &mut rng);
        assert!(!villages.is_empty());
        for a in &villages {
            for b in &villages {
                if (a.row, a.col) == (b.row, b.col) {
                    continue;
                }
                let dist = a
                    .row
                    .abs_diff(b.row)
                    .max(a.col.abs_diff(b.col));
                assert!(dist >= 2, "villages at {:?} and {:?}", (a.row, a.col), (b.row, b.col));
            }
        }
        for v in &villages {
            assert_eq!(grid.get(v.row, v.col), Some(Terrain::Village));
        }
    }

    #[test]
    fn village_placement_is_deterministic() {
        let config = WorldGenConfig {
            villages_per_island: Some(3),
            ..Default::default()
        };
        let mut grid_a = ring_island();
        let seg_a = segment(&grid_a);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let villages_a = place_villages(&mut grid_a, &seg_a, &config, &mut rng);

        let mut grid_b = ring_island();
        let seg_b = segment(&grid_b);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let villages_b = place_villages(&mut grid_b, &seg_b, &config, &mut rng);

        assert_eq!(villages_a, villages_b);
        assert_eq!(grid_a, grid_b);
    }

    #[test]
    fn natives_require_forest_or_river_neighbor() {
        use crate::world::tiles::Terrain::{Forest as F, Land as L, Water as W};
        let mut grid = TileGrid::from_rows(
            vec![
                vec![W, W, W, W, W],
                vec![W, L, F, L, W],
                vec![W, L, L, L, W],
                vec![W, W, W, W, L],
            ],
            16.0,
        )
        .unwrap();
        let seg = segment(&grid);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let natives = place_natives(&mut grid, &seg, 1.0, &mut rng);
        // Every land tile next to the forest converts at density 1.0; the
        // isolated corner tile never qualifies.
        assert!(!natives.is_empty());
        assert_eq!(grid.get(3, 4), Some(Terrain::Land));
        for n in &natives {
            assert_eq!(grid.get(n.row, n.col), Some(Terrain::Native));
        }
        let mut grid_none = TileGrid::from_rows(
            vec![vec![W, L, F, L, W]],
            16.0,
        )
        .unwrap();
        let seg_none = segment(&grid_none);
        let natives_none = place_natives(&mut grid_none, &seg_none, 0.0, &mut rng);
        assert!(natives_none.is_empty());
    }

    #[test]
    fn mission_converts_first_village() {
        let mut grid = ring_island();
        let seg = segment(&grid);
        let mut villages = vec![
            Settlement { row: 1, col: 1, island_id: 0 },
            Settlement { row: 4, col: 4, island_id: 0 },
        ];
        grid.set(1, 1, Terrain::Village);
        grid.set(4, 4, Terrain::Village);
        let missions = ensure_mission(&mut grid, &seg, &mut villages);
        assert_eq!(missions.len(), 1);
        assert_eq!(grid.get(1, 1), Some(Terrain::Mission));
        assert_eq!(villages.len(), 1);
        assert_eq!(villages[0].row, 4);
    }

    #[test]
    fn mission_falls_back_to_first_coast_tile() {
        let mut grid = ring_island();
        let seg = segment(&grid);
        let mut villages = Vec::new();
        let missions = ensure_mission(&mut grid, &seg, &mut villages);
        assert_eq!(missions.len(), 1);
        // Row-major scan finds (1, 1) first.
        assert_eq!((missions[0].row, missions[0].col), (1, 1));
        assert_eq!(grid.get(1, 1), Some(Terrain::Mission));
    }

    #[test]
    fn all_water_world_has_no_mission_site() {
        let mut grid = TileGrid::new(3, 3, 16.0);
        let seg = segment(&grid);
        let mut villages = Vec::new();
        assert!(ensure_mission(&mut grid, &seg, &mut villages).is_empty());
    }
}
