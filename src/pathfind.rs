//! A* search over an [`crate::InfluenceMap`]'s field.
//!
//! The search is first-reached, not best-cost: a cell's predecessor is fixed
//! the moment it is discovered and never relaxed, even if a cheaper route is
//! found later. On uniform terrain the octile heuristic still discovers cells
//! along a near-optimal route, and path elongation on stamped (dangerous)
//! fields reads as "route around the danger" rather than a bug. Changing
//! this to best-cost A* would re-baseline the wall-detour and threat-avoidance
//! scenarios in the test suite; see `SPEC_FULL.md` section 9.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use log::{trace, warn};

use crate::geometry::{octile_distance, GridPoint, Point2};

/// Compact result for `pathfind_direction`: the hot-loop entry point.
///
/// `next_point` is the cell center of the lookahead-th step along the path
/// from `start` toward `goal` (or `goal`'s own center if the path is shorter
/// than the lookahead). Most callers re-plan every tick and only need this
/// short-horizon direction, not the full path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathDirection {
    /// Number of moves from `start` to `goal`, i.e. the length `pathfind_path`
    /// would return for the same inputs.
    pub path_len: usize,
    /// Cell center of the lookahead step toward `goal`.
    pub next_point: Point2,
}

#[derive(Clone, Copy)]
struct OpenNode {
    priority: f64,
    g: f64,
    index: usize,
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority
    }
}

impl Eq for OpenNode {}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so `BinaryHeap` (a max-heap) pops the lowest priority first.
        other
            .priority
            .partial_cmp(&self.priority)
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// `sqrt(2)`, the diagonal move cost.
const DIAGONAL_COST: f64 = std::f64::consts::SQRT_2;

/// One of the eight neighbor directions, in the fixed enumeration order
/// SW, S, SE, W, E, NW, N, NE.
struct NeighborRule {
    dx: i32,
    dy: i32,
    is_diagonal: bool,
    /// Cardinal flank offsets used by the corner-cut / large-unit rules.
    flanks: [(i32, i32); 2],
}

const NEIGHBOR_RULES: [NeighborRule; 8] = [
    // SW
    NeighborRule { dx: -1, dy: -1, is_diagonal: true, flanks: [(0, -1), (-1, 0)] },
    // S
    NeighborRule { dx: 0, dy: -1, is_diagonal: false, flanks: [(-1, -1), (1, -1)] },
    // SE
    NeighborRule { dx: 1, dy: -1, is_diagonal: true, flanks: [(0, -1), (1, 0)] },
    // W
    NeighborRule { dx: -1, dy: 0, is_diagonal: false, flanks: [(-1, 1), (-1, -1)] },
    // E
    NeighborRule { dx: 1, dy: 0, is_diagonal: false, flanks: [(1, 1), (1, -1)] },
    // NW
    NeighborRule { dx: -1, dy: 1, is_diagonal: true, flanks: [(0, 1), (-1, 0)] },
    // N
    NeighborRule { dx: 0, dy: 1, is_diagonal: false, flanks: [(-1, 1), (1, 1)] },
    // NE
    NeighborRule { dx: 1, dy: 1, is_diagonal: true, flanks: [(0, 1), (1, 0)] },
];

/// Minimal view of the field a search needs: dimensions plus a way to read a
/// cell's weight by grid coordinate. Kept separate from [`crate::InfluenceMap`]
/// so the search logic can be unit-tested against a bare field.
pub(crate) trait SearchField {
    fn width(&self) -> i32;
    fn height(&self) -> i32;
    /// Field value at `(x, y)`. Callers must only invoke this in-bounds.
    fn value_at(&self, x: i32, y: i32) -> f32;

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width() && y < self.height()
    }

    fn index(&self, x: i32, y: i32) -> usize {
        y as usize * self.width() as usize + x as usize
    }

    fn is_open(&self, x: i32, y: i32) -> bool {
        self.in_bounds(x, y) && self.value_at(x, y).is_finite()
    }
}

/// Result of a completed search: the first-reached predecessor map plus the
/// resolved start/goal indices and the goal's move count.
struct SearchOutcome {
    came_from: HashMap<usize, (usize, usize)>,
    start_index: usize,
    goal_index: usize,
    /// Number of moves from `start` to `goal` (0 when `start == goal`).
    path_len: usize,
}

/// Runs A* from `start` to `goal`, returning `None` if the goal is
/// unreachable (including the degenerate case of a walled-off goal).
fn search<F: SearchField>(field: &F, start: Point2, goal: Point2, large: bool) -> Option<SearchOutcome> {
    let start_cell = start.floor();
    let goal_cell = goal.floor();
    let start_index = field.index(start_cell.x, start_cell.y);
    let goal_index = field.index(goal_cell.x, goal_cell.y);

    trace!(
        "pathfind start: start={:?} goal={:?} large={large}",
        start_cell, goal_cell
    );

    if start_index == goal_index {
        return Some(SearchOutcome {
            came_from: HashMap::new(),
            start_index,
            goal_index,
            path_len: 0,
        });
    }

    let mut open = BinaryHeap::new();
    // (predecessor index, this node's move count from start, 1-based)
    let mut came_from: HashMap<usize, (usize, usize)> = HashMap::new();

    open.push(OpenNode {
        priority: octile_distance(start_cell, goal_cell),
        g: 0.0,
        index: start_index,
    });

    while let Some(OpenNode { g, index, .. }) = open.pop() {
        if index == goal_index {
            let path_len = came_from.get(&goal_index).map(|&(_, p)| p).unwrap_or(0);
            trace!("pathfind success: path_len={path_len} expanded={}", came_from.len());
            return Some(SearchOutcome {
                came_from,
                start_index,
                goal_index,
                path_len,
            });
        }

        let x = (index % field.width() as usize) as i32;
        let y = (index / field.width() as usize) as i32;
        let depth = if index == start_index {
            0
        } else {
            came_from.get(&index).map(|&(_, p)| p).unwrap_or(0)
        };

        for rule in &NEIGHBOR_RULES {
            let nx = x + rule.dx;
            let ny = y + rule.dy;
            if !field.is_open(nx, ny) {
                continue;
            }

            if rule.is_diagonal {
                // Corner-cut prevention: both flanking cardinals must be open.
                let [f0, f1] = rule.flanks;
                if !field.is_open(x + f0.0, y + f0.1) || !field.is_open(x + f1.0, y + f1.1) {
                    continue;
                }
            } else if large {
                // Large-unit rule: at least one flanking diagonal must be open.
                let [f0, f1] = rule.flanks;
                if !field.is_open(x + f0.0, y + f0.1) && !field.is_open(x + f1.0, y + f1.1) {
                    continue;
                }
            }

            let neighbor_index = field.index(nx, ny);
            if neighbor_index == start_index || came_from.contains_key(&neighbor_index) {
                continue;
            }

            let move_cost = if rule.is_diagonal { DIAGONAL_COST } else { 1.0 };
            let weight = field.value_at(nx, ny) as f64;
            let neighbor_g = g + move_cost * weight;
            came_from.insert(neighbor_index, (index, depth + 1));

            let h = octile_distance(GridPoint::new(nx, ny), goal_cell);
            open.push(OpenNode {
                priority: neighbor_g + h,
                g: neighbor_g,
                index: neighbor_index,
            });
        }
    }

    warn!(
        "pathfind exhausted: start={:?} goal={:?} large={large} expanded={}",
        start_cell, goal_cell, came_from.len()
    );
    None
}

fn cell_center<F: SearchField>(field: &F, index: usize) -> Point2 {
    let x = (index % field.width() as usize) as i32;
    let y = (index / field.width() as usize) as i32;
    GridPoint::new(x, y).center()
}

/// Reconstructs the path from `start`'s immediate successor through `goal`
/// (inclusive), excluding `start` itself.
fn reconstruct_path<F: SearchField>(field: &F, outcome: &SearchOutcome) -> Vec<Point2> {
    if outcome.path_len == 0 {
        return Vec::new();
    }
    let mut out = vec![Point2::new(0.0, 0.0); outcome.path_len];
    let mut cur = outcome.goal_index;
    let mut i = outcome.path_len - 1;
    loop {
        out[i] = cell_center(field, cur);
        if i == 0 {
            break;
        }
        cur = outcome.came_from[&cur].0;
        i -= 1;
    }
    out
}

/// Walks backward at most `lookahead` steps from the goal to find the cell
/// `lookahead` moves after `start` (or `goal` itself if the path is shorter),
/// without allocating the full path.
fn lookahead_point<F: SearchField>(field: &F, outcome: &SearchOutcome, lookahead: usize) -> Point2 {
    if outcome.path_len == 0 {
        return cell_center(field, outcome.start_index);
    }
    let mut cur = outcome.goal_index;
    let mut steps_back = (outcome.path_len - 1).min(lookahead.saturating_sub(1));
    while steps_back > 0 {
        cur = outcome.came_from[&cur].0;
        steps_back -= 1;
    }
    cell_center(field, cur)
}

/// Runs a full pathfind and returns the path from `start`'s successor
/// through `goal` inclusive, or `None` if unreachable.
pub(crate) fn pathfind_path<F: SearchField>(
    field: &F,
    start: Point2,
    goal: Point2,
    large: bool,
) -> Option<Vec<Point2>> {
    let outcome = search(field, start, goal, large)?;
    Some(reconstruct_path(field, &outcome))
}

/// Runs a pathfind and returns just the length and the lookahead-step
/// direction, or `None` if unreachable.
pub(crate) fn pathfind_direction<F: SearchField>(
    field: &F,
    start: Point2,
    goal: Point2,
    large: bool,
    lookahead: usize,
) -> Option<PathDirection> {
    let outcome = search(field, start, goal, large)?;
    let next_point = lookahead_point(field, &outcome, lookahead);
    Some(PathDirection {
        path_len: outcome.path_len,
        next_point,
    })
}
