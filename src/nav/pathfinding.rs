//! Grid pathfinding for ships and land units.
//!
//! A* over the tile grid, 8-directional with corner-cutting prevention,
//! followed by a line-of-sight smoothing pass so agents cut across open
//! water instead of hugging the grid. Stateless: every query takes the
//! grid and a movement domain.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};
use std::f32::consts::SQRT_2;

use glam::{IVec2, Vec2};

use crate::world::tiles::{Terrain, TileGrid};

/// How many cells the nearest-navigable search around a blocked goal may
/// visit before giving up.
const RETARGET_CELL_BUDGET: usize = 4096;

/// Movement domain of the querying agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavDomain {
    /// Ships: water, reef, and river tiles are open.
    Naval,
    /// Land units: everything that is not water is open.
    Land,
}

impl NavDomain {
    pub fn is_navigable(self, terrain: Terrain) -> bool {
        match self {
            NavDomain::Naval => terrain.is_water_like(),
            NavDomain::Land => terrain.is_land_like(),
        }
    }
}

/// Wrapper for f32 that implements Ord for use in BinaryHeap.
#[derive(Clone, Copy, PartialEq)]
struct OrderedF32(f32);

impl Eq for OrderedF32 {}

impl Ord for OrderedF32 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.partial_cmp(&other.0).unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for OrderedF32 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
struct Node {
    cell: IVec2,
    priority: OrderedF32,
}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (BinaryHeap is max-heap by default)
        other.priority.cmp(&self.priority)
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Finds a path between two world positions.
///
/// Returns tile-center waypoints from start to goal, smoothed by line of
/// sight. A blocked goal is retargeted to the nearest navigable tile within
/// a bounded search. An empty vector means no route; callers treat that as
/// "hold position", never as an error.
pub fn find_path(
    start_x: f32,
    start_y: f32,
    goal_x: f32,
    goal_y: f32,
    grid: &TileGrid,
    domain: NavDomain,
) -> Vec<Vec2> {
    let start = grid.world_to_cell(start_x, start_y);
    let goal = grid.world_to_cell(goal_x, goal_y);
    if !grid.in_bounds(start.x, start.y) || !grid.in_bounds(goal.x, goal.y) {
        return Vec::new();
    }
    let goal = if navigable(grid, goal, domain) {
        goal
    } else {
        match nearest_navigable(goal, grid, domain) {
            Some(cell) => cell,
            None => return Vec::new(),
        }
    };
    if !navigable(grid, start, domain) && start != goal {
        return Vec::new();
    }
    if start == goal {
        return vec![grid.cell_center(goal)];
    }

    let mut open = BinaryHeap::new();
    let mut came_from: HashMap<IVec2, IVec2> = HashMap::new();
    let mut g_score: HashMap<IVec2, f32> = HashMap::new();
    let mut closed: HashSet<IVec2> = HashSet::new();

    g_score.insert(start, 0.0);
    open.push(Node {
        cell: start,
        priority: OrderedF32(heuristic(start, goal)),
    });

    while let Some(current) = open.pop() {
        if current.cell == goal {
            let cells = reconstruct_path(&came_from, goal);
            let cells = smooth_path(&cells, grid, domain);
            return cells.into_iter().map(|c| grid.cell_center(c)).collect();
        }
        if !closed.insert(current.cell) {
            continue;
        }
        let current_g = g_score[&current.cell];
        for (next, step) in neighbors(current.cell, grid, domain) {
            if closed.contains(&next) {
                continue;
            }
            let tentative = current_g + step;
            if tentative < g_score.get(&next).copied().unwrap_or(f32::INFINITY) {
                came_from.insert(next, current.cell);
                g_score.insert(next, tentative);
                open.push(Node {
                    cell: next,
                    priority: OrderedF32(tentative + heuristic(next, goal)),
                });
            }
        }
    }

    Vec::new()
}

/// Checks visibility between two world positions for a movement domain.
///
/// Walks the supercover of the segment: on diagonal steps both adjacent
/// cardinal cells must be open, so a sight line can never slip between two
/// blocked corners.
pub fn has_line_of_sight(
    from_x: f32,
    from_y: f32,
    to_x: f32,
    to_y: f32,
    grid: &TileGrid,
    domain: NavDomain,
) -> bool {
    line_of_sight_cells(
        grid.world_to_cell(from_x, from_y),
        grid.world_to_cell(to_x, to_y),
        grid,
        domain,
    )
}

fn navigable(grid: &TileGrid, cell: IVec2, domain: NavDomain) -> bool {
    grid.cell(cell).is_some_and(|t| domain.is_navigable(t))
}

/// Euclidean distance in cell units.
fn heuristic(a: IVec2, b: IVec2) -> f32 {
    let d = (a - b).as_vec2();
    d.length()
}

const CARDINALS: [IVec2; 4] = [
    IVec2::new(1, 0),
    IVec2::new(-1, 0),
    IVec2::new(0, 1),
    IVec2::new(0, -1),
];

/// Diagonal offsets with the indices of their two flanking cardinals.
const DIAGONALS: [(IVec2, usize, usize); 4] = [
    (IVec2::new(1, 1), 0, 2),
    (IVec2::new(1, -1), 0, 3),
    (IVec2::new(-1, 1), 1, 2),
    (IVec2::new(-1, -1), 1, 3),
];

/// Navigable neighbors with step costs. Diagonal moves cost sqrt(2) and
/// require both flanking cardinal cells to be open, so paths never cut
/// through blocked corners.
fn neighbors(cell: IVec2, grid: &TileGrid, domain: NavDomain) -> Vec<(IVec2, f32)> {
    let mut result = Vec::with_capacity(8);
    let open = CARDINALS.map(|d| navigable(grid, cell + d, domain));
    for (i, d) in CARDINALS.iter().enumerate() {
        if open[i] {
            result.push((cell + *d, 1.0));
        }
    }
    for (d, a, b) in DIAGONALS {
        if open[a] && open[b] && navigable(grid, cell + d, domain) {
            result.push((cell + d, SQRT_2));
        }
    }
    result
}

/// Breadth-first search outward from a blocked goal for the nearest
/// navigable cell, visiting at most [`RETARGET_CELL_BUDGET`] cells.
fn nearest_navigable(goal: IVec2, grid: &TileGrid, domain: NavDomain) -> Option<IVec2> {
    let mut queue = VecDeque::new();
    let mut seen = HashSet::new();
    queue.push_back(goal);
    seen.insert(goal);
    while let Some(cell) = queue.pop_front() {
        for d in CARDINALS {
            let next = cell + d;
            if !grid.in_bounds(next.x, next.y) || !seen.insert(next) {
                continue;
            }
            if navigable(grid, next, domain) {
                return Some(next);
            }
            if seen.len() >= RETARGET_CELL_BUDGET {
                return None;
            }
            queue.push_back(next);
        }
    }
    None
}

fn reconstruct_path(came_from: &HashMap<IVec2, IVec2>, goal: IVec2) -> Vec<IVec2> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&prev) = came_from.get(&current) {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}

/// Collapses waypoints that can see each other, keeping the first and last.
fn smooth_path(cells: &[IVec2], grid: &TileGrid, domain: NavDomain) -> Vec<IVec2> {
    if cells.len() <= 2 {
        return cells.to_vec();
    }
    let mut smoothed = vec![cells[0]];
    let mut i = 0;
    while i < cells.len() - 1 {
        let mut j = cells.len() - 1;
        while j > i + 1 && !line_of_sight_cells(cells[i], cells[j], grid, domain) {
            j -= 1;
        }
        smoothed.push(cells[j]);
        i = j;
    }
    smoothed
}

fn line_of_sight_cells(from: IVec2, to: IVec2, grid: &TileGrid, domain: NavDomain) -> bool {
    let mut x = from.x;
    let mut y = from.y;
    let dx = (to.x - from.x).abs();
    let dy = (to.y - from.y).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };

    if !navigable(grid, IVec2::new(x, y), domain) {
        return false;
    }
    if dx == 0 && dy == 0 {
        return true;
    }

    let mut err = dx - dy;
    while x != to.x || y != to.y {
        let e2 = 2 * err;
        let step_x = e2 > -dy;
        let step_y = e2 < dx;
        if step_x && step_y {
            // Diagonal step: both cells the line squeezes between must be
            // open, same rule as diagonal movement.
            if !navigable(grid, IVec2::new(x + sx, y), domain)
                || !navigable(grid, IVec2::new(x, y + sy), domain)
            {
                return false;
            }
            err -= dy;
            err += dx;
            x += sx;
            y += sy;
        } else if step_x {
            err -= dy;
            x += sx;
        } else {
            err += dx;
            y += sy;
        }
        if !navigable(grid, IVec2::new(x, y), domain) {
            return false;
        }
    }
    true
}
