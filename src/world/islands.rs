//! Connected-component labeling of landmasses.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::world::hydrology::ORTHOGONAL;
use crate::world::tiles::{Terrain, TileGrid};

/// One connected landmass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Island {
    pub id: usize,
    /// Coast tiles of this island as `(row, col)`, in discovery order.
    pub coast: Vec<(usize, usize)>,
    /// Total tile count of the component.
    pub size: usize,
}

/// Result of labeling: the islands plus a per-tile island id grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segmentation {
    pub islands: Vec<Island>,
    island_map: Vec<i32>,
    cols: usize,
}

impl Segmentation {
    /// Island id at `(row, col)`, `None` on water or out of bounds.
    pub fn island_at(&self, row: usize, col: usize) -> Option<usize> {
        if col >= self.cols {
            return None;
        }
        match self.island_map.get(row * self.cols + col) {
            Some(&id) if id >= 0 => Some(id as usize),
            _ => None,
        }
    }
}

/// Labels every 4-connected component of land-like tiles.
///
/// Components are discovered in row-major scan order and receive sequential
/// ids starting at 0, so the labeling is deterministic for a given grid.
pub fn segment(grid: &TileGrid) -> Segmentation {
    let (rows, cols) = (grid.rows(), grid.cols());
    let mut island_map = vec![-1i32; rows * cols];
    let mut islands = Vec::new();

    for r in 0..rows {
        for c in 0..cols {
            if island_map[r * cols + c] != -1 {
                continue;
            }
            if !grid.get(r, c).is_some_and(Terrain::is_land_like) {
                continue;
            }

            let id = islands.len();
            let mut coast = Vec::new();
            let mut size = 0;
            let mut queue = VecDeque::new();
            island_map[r * cols + c] = id as i32;
            queue.push_back((r, c));

            while let Some((qr, qc)) = queue.pop_front() {
                size += 1;
                if grid.get(qr, qc) == Some(Terrain::Coast) {
                    coast.push((qr, qc));
                }
                for (dr, dc) in ORTHOGONAL {
                    let nr = qr as i32 + dr;
                    let nc = qc as i32 + dc;
                    if !grid.in_bounds(nc, nr) {
                        continue;
                    }
                    let (nr, nc) = (nr as usize, nc as usize);
                    if island_map[nr * cols + nc] != -1 {
                        continue;
                    }
                    if !grid.get(nr, nc).is_some_and(Terrain::is_land_like) {
                        continue;
                    }
                    island_map[nr * cols + nc] = id as i32;
                    queue.push_back((nr, nc));
                }
            }

            islands.push(Island { id, coast, size });
        }
    }

    Segmentation {
        islands,
        island_map,
        cols,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagonal_landmasses_are_separate_islands() {
        use crate::world::tiles::Terrain::{Coast as C, Water as W};
        let grid = TileGrid::from_rows(
            vec![
                vec![C, W, W],
                vec![W, C, C],
                vec![W, C, W],
            ],
            16.0,
        )
        .unwrap();
        let seg = segment(&grid);
        assert_eq!(seg.islands.len(), 2);
        // Row-major discovery: the lone corner tile is island 0.
        assert_eq!(seg.islands[0].size, 1);
        assert_eq!(seg.islands[0].coast, vec![(0, 0)]);
        assert_eq!(seg.islands[1].size, 3);
        assert_eq!(seg.island_at(0, 0), Some(0));
        assert_eq!(seg.island_at(1, 1), Some(1));
        assert_eq!(seg.island_at(0, 1), None);
    }

    #[test]
    fn interior_tiles_count_but_are_not_coast() {
        use crate::world::tiles::Terrain::{Coast as C, Hill as H, Water as W};
        let grid = TileGrid::from_rows(
            vec![
                vec![W, W, W, W, W],
                vec![W, C, C, C, W],
                vec![W, C, H, C, W],
                vec![W, C, C, C, W],
                vec![W, W, W, W, W],
            ],
            16.0,
        )
        .unwrap();
        let seg = segment(&grid);
        assert_eq!(seg.islands.len(), 1);
        assert_eq!(seg.islands[0].size, 9);
        assert_eq!(seg.islands[0].coast.len(), 8);
        assert!(!seg.islands[0].coast.contains(&(2, 2)));
    }

    #[test]
    fn rivers_split_islands_but_villages_do_not() {
        use crate::world::tiles::Terrain::{Coast as C, River as R, Village as V, Water as W};
        let grid = TileGrid::from_rows(
            vec![
                vec![C, R, C],
                vec![W, W, W],
                vec![C, V, C],
            ],
            16.0,
        )
        .unwrap();
        let seg = segment(&grid);
        // Row 0 is split in two by the river; row 2 stays one island
        // because the village is land-like.
        assert_eq!(seg.islands.len(), 3);
        assert_eq!(seg.islands[2].size, 3);
        assert_eq!(seg.island_at(2, 1), seg.island_at(2, 2));
    }
}
