//! Tile grid storage and terrain categories.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::coords;

/// Terrain category of a single grid tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    /// Open ocean
    Water,
    /// Plain land
    Land,
    /// Elevated land
    Hill,
    /// Settled coast tile
    Village,
    /// Land bordering ocean
    Coast,
    /// Freshwater channel carved through land
    River,
    /// Shallow water bordering the ocean floor shelf
    Reef,
    /// Hot, dry land
    Desert,
    /// Wet land
    Forest,
    /// Paved land connecting villages
    Road,
    /// Native settlement
    Native,
    /// Mission outpost
    Mission,
}

impl Terrain {
    /// Water-like tiles: part of the hydrosphere, never part of an island.
    pub fn is_water_like(self) -> bool {
        matches!(self, Terrain::Water | Terrain::Reef | Terrain::River)
    }

    /// Ocean tiles as seen by the hydrology pass. Rivers are carved through
    /// land and are not ocean.
    pub fn is_ocean(self) -> bool {
        matches!(self, Terrain::Water | Terrain::Reef)
    }

    /// Land-like tiles: everything that can belong to an island, including
    /// settlement overlays stamped onto former coast/land.
    pub fn is_land_like(self) -> bool {
        !self.is_water_like()
    }
}

/// The world tile grid, stored row-major.
///
/// Mutable while the generation pipeline runs; gameplay afterwards only
/// stamps individual cells (villages, roads), never regenerates structure.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileGrid {
    rows: usize,
    cols: usize,
    tile_size: f32,
    tiles: Vec<Terrain>,
}

impl TileGrid {
    /// Creates a grid of the given dimensions filled with open water.
    pub fn new(rows: usize, cols: usize, tile_size: f32) -> Self {
        Self {
            rows,
            cols,
            tile_size,
            tiles: vec![Terrain::Water; rows * cols],
        }
    }

    /// Builds a grid from nested rows. All rows must have the same length.
    pub fn from_rows(rows: Vec<Vec<Terrain>>, tile_size: f32) -> Result<Self, String> {
        let row_count = rows.len();
        let col_count = rows.first().map(Vec::len).unwrap_or(0);
        if rows.iter().any(|r| r.len() != col_count) {
            return Err("all rows must have the same length".to_string());
        }
        Ok(Self {
            rows: row_count,
            cols: col_count,
            tile_size,
            tiles: rows.into_iter().flatten().collect(),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    fn idx(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Terrain at `(row, col)`, or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<Terrain> {
        if row < self.rows && col < self.cols {
            Some(self.tiles[self.idx(row, col)])
        } else {
            None
        }
    }

    /// Sets the terrain at `(row, col)`. Returns false when out of bounds.
    pub fn set(&mut self, row: usize, col: usize, terrain: Terrain) -> bool {
        if row < self.rows && col < self.cols {
            let i = self.idx(row, col);
            self.tiles[i] = terrain;
            true
        } else {
            false
        }
    }

    /// Whether a signed `(col, row)` cell lies inside the grid.
    pub fn in_bounds(&self, col: i32, row: i32) -> bool {
        col >= 0 && row >= 0 && (col as usize) < self.cols && (row as usize) < self.rows
    }

    /// Terrain at a cell expressed as `(x = col, y = row)`.
    pub fn cell(&self, cell: IVec2) -> Option<Terrain> {
        if self.in_bounds(cell.x, cell.y) {
            self.get(cell.y as usize, cell.x as usize)
        } else {
            None
        }
    }

    /// Bounds-safe terrain lookup at a world coordinate. Everything beyond
    /// the grid edge reads as open water so agents can sail off the map
    /// without special cases.
    pub fn at_world(&self, x: f32, y: f32) -> Terrain {
        let cell = self.world_to_cell(x, y);
        self.cell(cell).unwrap_or(Terrain::Water)
    }

    /// Grid cell containing a world coordinate, as `(x = col, y = row)`.
    pub fn world_to_cell(&self, x: f32, y: f32) -> IVec2 {
        coords::world_to_tile(x, y, self.tile_size)
    }

    /// World coordinate of a cell's center.
    pub fn cell_center(&self, cell: IVec2) -> Vec2 {
        coords::tile_to_world(cell.y as usize, cell.x as usize, self.tile_size)
    }

    /// Iterates every tile with its `(row, col)` position.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Terrain)> + '_ {
        (0..self.rows).flat_map(move |r| {
            (0..self.cols).map(move |c| (r, c, self.tiles[r * self.cols + c]))
        })
    }

    /// Whether any in-bounds 8-neighbor of `(row, col)` satisfies the predicate.
    pub fn neighbor8_any(&self, row: usize, col: usize, pred: impl Fn(Terrain) -> bool) -> bool {
        for dr in -1i32..=1 {
            for dc in -1i32..=1 {
                if dr == 0 && dc == 0 {
                    continue;
                }
                let nr = row as i32 + dr;
                let nc = col as i32 + dc;
                if !self.in_bounds(nc, nr) {
                    continue;
                }
                if pred(self.tiles[self.idx(nr as usize, nc as usize)]) {
                    return true;
                }
            }
        }
        false
    }
}
