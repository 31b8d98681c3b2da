//! Base terrain grid: a fixed-size row-major byte field.

use crate::geometry::{GridPoint, Point2};

/// A row-major byte field describing terrain passability.
///
/// `0` means the cell is blocked; any positive value is passable terrain
/// weight (tests in this crate use `1`; larger values are honored as
/// multipliers by the pathfinder once stamped into an [`crate::InfluenceMap`]).
#[derive(Debug, Clone)]
pub struct BaseGrid {
    width: u16,
    height: u16,
    cells: Vec<u8>,
}

impl BaseGrid {
    /// Creates a grid of the given dimensions with every cell passable (`1`).
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![1; width as usize * height as usize],
        }
    }

    /// Width in cells.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height in cells.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Converts a point to a cell index by flooring both coordinates.
    ///
    /// # Panics
    ///
    /// Panics if the floored point falls outside the grid. Out-of-range
    /// access is a precondition violation, not a recoverable error.
    pub fn point_to_index(&self, p: Point2) -> usize {
        let cell = p.floor();
        self.grid_point_to_index(cell)
    }

    /// Converts a [`GridPoint`] to a cell index.
    pub fn grid_point_to_index(&self, cell: GridPoint) -> usize {
        assert!(
            cell.x >= 0 && cell.y >= 0 && cell.x < self.width as i32 && cell.y < self.height as i32,
            "grid point {:?} out of bounds for {}x{} grid",
            cell,
            self.width,
            self.height
        );
        cell.y as usize * self.width as usize + cell.x as usize
    }

    /// Converts a cell index to its integer corner (not its center).
    pub fn index_to_point(&self, index: usize) -> GridPoint {
        assert!(index < self.cells.len(), "index {index} out of bounds");
        let x = (index % self.width as usize) as i32;
        let y = (index / self.width as usize) as i32;
        GridPoint::new(x, y)
    }

    /// Raw byte value at `point`.
    pub fn get_value(&self, point: Point2) -> u8 {
        self.cells[self.point_to_index(point)]
    }

    /// Raw byte value at a cell index.
    pub fn get_value_at(&self, index: usize) -> u8 {
        self.cells[index]
    }

    /// Sets every cell named by `indices` to `v`.
    pub fn set_values(&mut self, indices: &[usize], v: u8) {
        for &i in indices {
            self.cells[i] = v;
        }
    }

    /// Whether every cell named by `indices` equals `v`.
    pub fn all_equal(&self, indices: &[usize], v: u8) -> bool {
        indices.iter().all(|&i| self.cells[i] == v)
    }

    /// Sum of the byte values named by `indices`, interpreted as unsigned.
    pub fn count(&self, indices: &[usize]) -> u32 {
        indices.iter().map(|&i| self.cells[i] as u32).sum()
    }

    /// Total number of cells (`width * height`).
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid has zero cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub(crate) fn cells(&self) -> &[u8] {
        &self.cells
    }
}
