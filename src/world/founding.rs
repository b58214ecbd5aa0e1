//! Founding new villages and roads on a settled world.
//!
//! Unlike generation-time placement these operations run against a live
//! grid that already carries villages, so islands are recomputed on every
//! call rather than cached.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::world::islands::segment;
use crate::world::tiles::{Terrain, TileGrid};

/// A founded city: the gameplay-facing record behind a Village tile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub nation: String,
    /// World coordinates of the village tile's center.
    pub x: f32,
    pub y: f32,
    pub island_id: usize,
}

/// Founds a village on a random suitable coast tile.
///
/// Islands are candidates when they have at least one free Coast tile (no
/// Village in its 8-neighborhood) and are open to the founding nation: an
/// island already settled by other nations only admits nations that are
/// already present. Returns `None`, leaving the grid untouched, when no
/// island qualifies.
pub fn found_village(
    grid: &mut TileGrid,
    cities: &mut Vec<City>,
    nation: &str,
    rng: &mut impl Rng,
) -> Option<City> {
    let seg = segment(grid);
    let mut candidates = Vec::new();
    for island in &seg.islands {
        let available: Vec<(usize, usize)> = island
            .coast
            .iter()
            .copied()
            .filter(|&(r, c)| site_is_free(grid, r, c))
            .collect();
        if available.is_empty() {
            continue;
        }
        if !island_open_to(cities, island.id, nation) {
            continue;
        }
        candidates.push((island.id, available));
    }
    if candidates.is_empty() {
        return None;
    }
    let (island_id, available) = &candidates[rng.gen_range(0..candidates.len())];
    let (row, col) = available[rng.gen_range(0..available.len())];
    Some(stamp_city(grid, cities, *island_id, row, col, nation))
}

/// Founds a village on a specific coast tile, subject to the same rules as
/// [`found_village`].
pub fn found_village_at(
    grid: &mut TileGrid,
    cities: &mut Vec<City>,
    nation: &str,
    row: usize,
    col: usize,
) -> Option<City> {
    if !site_is_free(grid, row, col) {
        return None;
    }
    let seg = segment(grid);
    let island_id = seg.island_at(row, col)?;
    if !island_open_to(cities, island_id, nation) {
        return None;
    }
    Some(stamp_city(grid, cities, island_id, row, col, nation))
}

/// Builds an L-shaped orthogonal road between two cities, rows first, then
/// columns. Village tiles along the way are left alone. Returns false when
/// either endpoint lies off the grid.
pub fn build_road(grid: &mut TileGrid, a: &City, b: &City) -> bool {
    let from = grid.world_to_cell(a.x, a.y);
    let to = grid.world_to_cell(b.x, b.y);
    if !grid.in_bounds(from.x, from.y) || !grid.in_bounds(to.x, to.y) {
        return false;
    }
    let mut cell = from;
    let step_r = (to.y - from.y).signum();
    let step_c = (to.x - from.x).signum();
    while cell.y != to.y {
        cell.y += step_r;
        stamp_road(grid, cell);
    }
    while cell.x != to.x {
        cell.x += step_c;
        stamp_road(grid, cell);
    }
    true
}

fn stamp_road(grid: &mut TileGrid, cell: IVec2) {
    match grid.cell(cell) {
        Some(Terrain::Village | Terrain::Native | Terrain::Mission) => {}
        Some(t) if t.is_land_like() => {
            grid.set(cell.y as usize, cell.x as usize, Terrain::Road);
        }
        _ => {}
    }
}

/// A coast tile with no Village anywhere in its 8-neighborhood.
fn site_is_free(grid: &TileGrid, row: usize, col: usize) -> bool {
    grid.get(row, col) == Some(Terrain::Coast)
        && !grid.neighbor8_any(row, col, |t| t == Terrain::Village)
}

fn island_open_to(cities: &[City], island_id: usize, nation: &str) -> bool {
    let mut any_owner = false;
    for city in cities.iter().filter(|c| c.island_id == island_id) {
        if city.nation == nation {
            return true;
        }
        any_owner = true;
    }
    !any_owner
}

fn stamp_city(
    grid: &mut TileGrid,
    cities: &mut Vec<City>,
    island_id: usize,
    row: usize,
    col: usize,
    nation: &str,
) -> City {
    grid.set(row, col, Terrain::Village);
    let count = cities.iter().filter(|c| c.island_id == island_id).count() + 1;
    let center = grid.cell_center(IVec2::new(col as i32, row as i32));
    let city = City {
        name: format!("Village {}-{}", island_id, count),
        nation: nation.to_string(),
        x: center.x,
        y: center.y,
        island_id,
    };
    cities.push(city.clone());
    city
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    fn cross_island() -> TileGrid {
        use crate::world::tiles::Terrain::{Coast as C, Land as L, Water as W};
        TileGrid::from_rows(
            vec![
                vec![W, C, W],
                vec![C, L, C],
                vec![W, C, W],
            ],
            10.0,
        )
        .unwrap()
    }

    #[test]
    fn founds_village_on_first_coast_tile() {
        let mut grid = cross_island();
        let mut cities = Vec::new();
        // A constant-zero RNG picks the first island and its first coast
        // tile, which is (0, 1) in discovery order.
        let mut rng = StepRng::new(0, 0);
        let city = found_village(&mut grid, &mut cities, "England", &mut rng);
        let city = city.expect("founding should succeed");
        assert_eq!(grid.get(0, 1), Some(Terrain::Village));
        assert_eq!(cities.len(), 1);
        assert_eq!(city.nation, "England");
        assert_eq!(city.island_id, 0);
        assert_eq!(city.x, 15.0);
        assert_eq!(city.y, 5.0);
    }

    #[test]
    fn rejects_site_adjacent_to_existing_village() {
        use crate::world::tiles::Terrain::{Coast as C, Village as V};
        let mut grid = TileGrid::from_rows(
            vec![
                vec![C, C, C],
                vec![C, V, C],
                vec![C, C, C],
            ],
            10.0,
        )
        .unwrap();
        let before = grid.clone();
        let mut cities = Vec::new();
        let mut rng = StepRng::new(0, 0);
        let city = found_village(&mut grid, &mut cities, "England", &mut rng);
        assert!(city.is_none());
        assert_eq!(grid, before);
        assert!(cities.is_empty());
    }

    #[test]
    fn island_settled_by_another_nation_is_closed() {
        let mut grid = cross_island();
        let mut cities = Vec::new();
        let mut rng = StepRng::new(0, 0);
        found_village(&mut grid, &mut cities, "France", &mut rng).expect("first village");
        // The only island belongs to France now; its remaining free coast
        // is closed to England.
        let city = found_village(&mut grid, &mut cities, "England", &mut rng);
        assert!(city.is_none());
        // France itself may keep settling: (2, 1) sits two tiles from the
        // first village, outside its 8-neighborhood.
        let followup = found_village(&mut grid, &mut cities, "France", &mut rng);
        let followup = followup.expect("own-nation founding should succeed");
        assert_eq!(grid.get(2, 1), Some(Terrain::Village));
        assert_eq!(followup.name, "Village 0-2");
    }

    #[test]
    fn found_village_at_respects_target() {
        let mut grid = cross_island();
        let mut cities = Vec::new();
        let city = found_village_at(&mut grid, &mut cities, "England", 0, 1);
        assert!(city.is_some());
        assert_eq!(grid.get(0, 1), Some(Terrain::Village));

        // A non-coast target is rejected outright.
        let mut grid = cross_island();
        let mut cities = Vec::new();
        assert!(found_village_at(&mut grid, &mut cities, "England", 1, 1).is_none());
    }

    #[test]
    fn city_names_count_per_island() {
        use crate::world::tiles::Terrain::{Coast as C, Water as W};
        let mut grid = TileGrid::from_rows(
            vec![vec![C, W, C, W, C]],
            10.0,
        )
        .unwrap();
        let mut cities = Vec::new();
        let a = found_village_at(&mut grid, &mut cities, "Spain", 0, 0).expect("site a");
        assert_eq!(a.name, "Village 0-1");
        let b = found_village_at(&mut grid, &mut cities, "Spain", 0, 2).expect("site b");
        assert_eq!(b.name, "Village 1-1");
    }

    #[test]
    fn road_connects_two_villages() {
        use crate::world::tiles::Terrain::{Land as L, Village as V};
        let mut grid = TileGrid::from_rows(
            vec![
                vec![L, L, L],
                vec![L, V, L],
                vec![L, L, V],
            ],
            10.0,
        )
        .unwrap();
        let a = City {
            name: "A".to_string(),
            nation: "Spain".to_string(),
            x: 15.0,
            y: 15.0,
            island_id: 0,
        };
        let b = City {
            name: "B".to_string(),
            nation: "Spain".to_string(),
            x: 25.0,
            y: 25.0,
            island_id: 0,
        };
        assert!(build_road(&mut grid, &a, &b));
        assert_eq!(grid.get(2, 1), Some(Terrain::Road));
        // Endpoints keep their village tiles.
        assert_eq!(grid.get(1, 1), Some(Terrain::Village));
        assert_eq!(grid.get(2, 2), Some(Terrain::Village));
    }
}
