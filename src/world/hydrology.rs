//! Ocean connectivity: lake removal and coastline marking.

use std::collections::VecDeque;

use crate::world::tiles::{Terrain, TileGrid};

/// Orthogonal neighbor offsets as `(d_row, d_col)`.
pub(crate) const ORTHOGONAL: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Flood-fills ocean reachability from the map border.
///
/// Returns a row-major mask where `true` marks Water/Reef tiles connected to
/// the border through orthogonal Water/Reef steps. Rivers do not conduct the
/// fill; they are carved through land and belong to no ocean.
pub fn ocean_mask(grid: &TileGrid) -> Vec<bool> {
    let (rows, cols) = (grid.rows(), grid.cols());
    let mut mask = vec![false; rows * cols];
    let mut queue = VecDeque::new();

    let seed = |r: usize, c: usize, mask: &mut Vec<bool>, queue: &mut VecDeque<(usize, usize)>| {
        let idx = r * cols + c;
        if !mask[idx] && grid.get(r, c).is_some_and(Terrain::is_ocean) {
            mask[idx] = true;
            queue.push_back((r, c));
        }
    };

    for c in 0..cols {
        for r in [0, rows - 1] {
            seed(r, c, &mut mask, &mut queue);
        }
    }
    for r in 0..rows {
        for c in [0, cols - 1] {
            seed(r, c, &mut mask, &mut queue);
        }
    }

    while let Some((r, c)) = queue.pop_front() {
        for (dr, dc) in ORTHOGONAL {
            let nr = r as i32 + dr;
            let nc = c as i32 + dc;
            if !grid.in_bounds(nc, nr) {
                continue;
            }
            let (nr, nc) = (nr as usize, nc as usize);
            let idx = nr * cols + nc;
            if !mask[idx] && grid.get(nr, nc).is_some_and(Terrain::is_ocean) {
                mask[idx] = true;
                queue.push_back((nr, nc));
            }
        }
    }

    mask
}

/// Converts interior lakes to land.
///
/// Every Water/Reef tile not reachable from the border becomes Land, so the
/// finished map has exactly one connected ocean. Returns the number of tiles
/// converted.
pub fn fill_lakes(grid: &mut TileGrid) -> usize {
    let mask = ocean_mask(grid);
    let cols = grid.cols();
    let mut converted = 0;
    for r in 0..grid.rows() {
        for c in 0..cols {
            if !mask[r * cols + c] && grid.get(r, c).is_some_and(Terrain::is_ocean) {
                grid.set(r, c, Terrain::Land);
                converted += 1;
            }
        }
    }
    converted
}

/// Marks base land bordering the ocean as coast.
///
/// A Land/Hill/Desert/Forest tile with at least one in-bounds Water/Reef
/// 8-neighbor becomes Coast. Runs after [`fill_lakes`] so the coastline
/// follows the true ocean boundary.
pub fn mark_coastline(grid: &mut TileGrid) {
    let mut shoreline = Vec::new();
    for (r, c, terrain) in grid.iter() {
        if !matches!(
            terrain,
            Terrain::Land | Terrain::Hill | Terrain::Desert | Terrain::Forest
        ) {
            continue;
        }
        if grid.neighbor8_any(r, c, Terrain::is_ocean) {
            shoreline.push((r, c));
        }
    }
    for (r, c) in shoreline {
        grid.set(r, c, Terrain::Coast);
    }
}
