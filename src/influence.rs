//! The influence map: a row-major field of weights mixing terrain
//! passability with dynamic influence sources, plus the A* pathfinding and
//! safe-spot queries that read it.

use crate::config::PathfindConfig;
use crate::error::{GridError, InfluenceMapError};
use crate::geometry::Point2;
use crate::grid::BaseGrid;
use crate::pathfind::{self, PathDirection, SearchField};

/// How an [`InfluenceMap::add_influence`] stamp falls off from its center.
///
/// A closed variant rather than open polymorphism: extension points
/// (exponential, Gaussian) should be additional variants, not a trait object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decay {
    /// Uniform `amount` everywhere inside the disc.
    None,
    /// Linear interpolation from `amount` at the center to `end_amount` at
    /// the rim (distance `radius`).
    Linear {
        /// Value added at the rim.
        end_amount: f32,
    },
}

/// Snapshot of the field's current distribution, for tick-boundary
/// diagnostics and logging. Read-only: computing it never mutates the map
/// or affects search/stamping semantics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldStats {
    /// Minimum finite cell value (walls are excluded).
    pub min: f32,
    /// Maximum finite cell value (walls are excluded).
    pub max: f32,
    /// Mean of the finite cell values.
    pub mean: f32,
    /// Number of wall (`+inf`) cells.
    pub wall_count: usize,
}

/// Row-major field of floating-point weights, mixing terrain passability
/// with dynamic influence sources added each tick.
///
/// A cell initialized from a base-grid `0` is set to `+inf` and is never
/// written again by [`InfluenceMap::add_influence`]: impassability is
/// permanent for the lifetime of this instance. Callers must [`reset`]
/// the map (or build a new one) to change passability.
///
/// [`reset`]: InfluenceMap::reset
pub struct InfluenceMap {
    width: u16,
    height: u16,
    field: Vec<f32>,
    config: PathfindConfig,
}

impl SearchField for InfluenceMap {
    fn width(&self) -> i32 {
        self.width as i32
    }

    fn height(&self) -> i32 {
        self.height as i32
    }

    fn value_at(&self, x: i32, y: i32) -> f32 {
        self.field[self.index(x, y)]
    }
}

impl InfluenceMap {
    /// Builds a map from a base grid: `1.0` for passable cells, `+inf` for
    /// walls. Fails only if the backing buffer cannot be allocated.
    pub fn from_grid(base: &BaseGrid) -> Result<Self, InfluenceMapError> {
        Self::from_grid_with_config(base, PathfindConfig::default())
    }

    /// Like [`from_grid`], with an explicit [`PathfindConfig`].
    ///
    /// [`from_grid`]: InfluenceMap::from_grid
    pub fn from_grid_with_config(
        base: &BaseGrid,
        config: PathfindConfig,
    ) -> Result<Self, InfluenceMapError> {
        let len = base.len();
        let mut field = Vec::new();
        field
            .try_reserve_exact(len)
            .map_err(|_| InfluenceMapError::Allocation)?;
        field.extend(base.cells().iter().map(|&v| if v > 0 { 1.0 } else { f32::INFINITY }));

        Ok(Self {
            width: base.width(),
            height: base.height(),
            field,
            config,
        })
    }

    /// Re-derives this map's field from `base` in place, same rule as
    /// [`from_grid`]. Requires identical dimensions.
    ///
    /// [`from_grid`]: InfluenceMap::from_grid
    pub fn reset(&mut self, base: &BaseGrid) -> Result<(), GridError> {
        if base.width() != self.width || base.height() != self.height {
            return Err(GridError::DimensionMismatch {
                expected: (self.width, self.height),
                found: (base.width(), base.height()),
            });
        }
        for (cell, &v) in self.field.iter_mut().zip(base.cells()) {
            *cell = if v > 0 { 1.0 } else { f32::INFINITY };
        }
        Ok(())
    }

    /// Width in cells.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height in cells.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// The pathfinding tunables this map was constructed with.
    pub fn config(&self) -> &PathfindConfig {
        &self.config
    }

    fn index(&self, x: i32, y: i32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Field value at cell `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is out of bounds.
    pub fn value_at(&self, x: i32, y: i32) -> f32 {
        assert!(
            x >= 0 && y >= 0 && x < self.width as i32 && y < self.height as i32,
            "({x}, {y}) out of bounds for {}x{} influence map",
            self.width,
            self.height
        );
        self.field[self.index(x, y)]
    }

    /// Computes the clipped integer bounding box `[x0, x1] x [y0, y1]`
    /// (inclusive) of cells whose center could fall within `radius` of
    /// `center`.
    fn bounding_box(&self, center: Point2, radius: f64) -> (i32, i32, i32, i32) {
        let x0 = (center.x - radius).max(0.0) as i32;
        let y0 = (center.y - radius).max(0.0) as i32;
        let x1 = ((center.x + radius).min((self.width - 1) as f64)) as i32;
        let y1 = ((center.y + radius).min((self.height - 1) as f64)) as i32;
        (x0, y0, x1, y1)
    }

    /// Stamps a filled disc of radius `radius` centered on `center`, adding
    /// `amount` (optionally decayed toward `end_amount` at the rim) to every
    /// cell whose center lies strictly inside the disc. Afterward every
    /// touched non-wall cell is clamped to be `>= 1.0`.
    ///
    /// Rim cells (`dist^2 == radius^2`) are not stamped: this keeps the
    /// discrete stamp size stable against floating-point jitter.
    pub fn add_influence(&mut self, center: Point2, radius: f64, amount: f32, decay: Decay) {
        let (x0, y0, x1, y1) = self.bounding_box(center, radius);
        let radius_sq = radius * radius;

        for y in y0..=y1 {
            for x in x0..=x1 {
                let idx = self.index(x, y);
                if !self.field[idx].is_finite() {
                    // Walls never get written; skips the wasted +inf +- finite
                    // arithmetic the original always performed.
                    continue;
                }
                let cell_center = Point2::new(x as f64 + 0.5, y as f64 + 0.5);
                let dist_sq = cell_center.distance_squared_to(center);
                if dist_sq < radius_sq {
                    let delta = match decay {
                        Decay::None => amount,
                        Decay::Linear { end_amount } => {
                            let t = (dist_sq.sqrt() / radius) as f32;
                            (1.0 - t) * amount + t * end_amount
                        }
                    };
                    self.field[idx] = (self.field[idx] + delta).max(1.0);
                }
            }
        }
    }

    /// Stamps a hollow ring (annulus): an outer disc of `radius` with the
    /// given decay, then an inner disc of `hollow_radius` subtracting
    /// `amount` uniformly. Net effect: cells strictly inside `hollow_radius`
    /// receive zero contribution before the `>= 1.0` clamp.
    pub fn add_influence_hollow(
        &mut self,
        center: Point2,
        radius: f64,
        hollow_radius: f64,
        amount: f32,
        decay: Decay,
    ) {
        self.add_influence(center, radius, amount, decay);
        self.add_influence(center, hollow_radius, -amount, Decay::None);
    }

    /// Finds the cell center within `radius` of `pos` with the lowest
    /// influence value, excluding walls. Ties are broken toward proximity to
    /// `pos`; a candidate replaces the current best only when its value is
    /// `<=` the best's and its squared distance is strictly `<` the best's,
    /// so identical value+distance never displaces the earlier (row-major,
    /// x-outer/y-inner) scan winner.
    pub fn find_closest_safe_spot(&self, pos: Point2, radius: f64) -> Option<Point2> {
        let (x0, y0, x1, y1) = self.bounding_box(pos, radius);
        let radius_sq = radius * radius;

        let mut best: Option<(Point2, f32, f64)> = None;
        for x in x0..=x1 {
            for y in y0..=y1 {
                let idx = self.index(x, y);
                let value = self.field[idx];
                if !value.is_finite() {
                    continue;
                }
                let cell_center = Point2::new(x as f64 + 0.5, y as f64 + 0.5);
                let dist_sq = cell_center.distance_squared_to(pos);
                if dist_sq >= radius_sq {
                    continue;
                }
                let better = match best {
                    None => true,
                    Some((_, best_value, best_dist_sq)) => {
                        value <= best_value && dist_sq < best_dist_sq
                    }
                };
                if better {
                    best = Some((cell_center, value, dist_sq));
                }
            }
        }
        best.map(|(p, _, _)| p)
    }

    /// Runs a full pathfind, returning the path from `start`'s successor
    /// through `goal` inclusive, or `None` if unreachable.
    pub fn pathfind_path(&self, start: Point2, goal: Point2, large: bool) -> Option<Vec<Point2>> {
        pathfind::pathfind_path(self, start, goal, large)
    }

    /// Runs a pathfind and returns just the path length and the
    /// lookahead-step direction, or `None` if unreachable. The lookahead
    /// step count is [`PathfindConfig::lookahead_steps`].
    pub fn pathfind_direction(
        &self,
        start: Point2,
        goal: Point2,
        large: bool,
    ) -> Option<PathDirection> {
        pathfind::pathfind_direction(self, start, goal, large, self.config.lookahead_steps)
    }

    /// Like [`pathfind_direction`], using [`PathfindConfig::default_large_unit`]
    /// instead of an explicit flag.
    ///
    /// [`pathfind_direction`]: InfluenceMap::pathfind_direction
    pub fn pathfind_direction_default(&self, start: Point2, goal: Point2) -> Option<PathDirection> {
        let large = self.config.default_large_unit;
        self.pathfind_direction(start, goal, large)
    }

    /// Read-only min/max/mean/wall-count snapshot of the current field, for
    /// logging and telemetry at tick boundaries.
    pub fn stats(&self) -> FieldStats {
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        let mut sum = 0.0f64;
        let mut finite_count = 0usize;
        let mut wall_count = 0usize;

        for &v in &self.field {
            if v.is_finite() {
                min = min.min(v);
                max = max.max(v);
                sum += v as f64;
                finite_count += 1;
            } else {
                wall_count += 1;
            }
        }

        let mean = if finite_count > 0 {
            (sum / finite_count as f64) as f32
        } else {
            0.0
        };
        if finite_count == 0 {
            min = 0.0;
            max = 0.0;
        }

        FieldStats {
            min,
            max,
            mean,
            wall_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_10x10() -> BaseGrid {
        BaseGrid::new(10, 10)
    }

    #[test]
    fn from_grid_marks_walls_as_infinite() {
        let mut base = grid_10x10();
        base.set_values(&[5], 0);
        let map = InfluenceMap::from_grid(&base).unwrap();
        assert!(map.value_at(5, 0).is_infinite());
        assert_eq!(map.value_at(0, 0), 1.0);
    }

    #[test]
    fn reset_requires_matching_dimensions() {
        let base = grid_10x10();
        let mut map = InfluenceMap::from_grid(&base).unwrap();
        let mismatched = BaseGrid::new(5, 5);
        assert_eq!(
            map.reset(&mismatched),
            Err(GridError::DimensionMismatch {
                expected: (10, 10),
                found: (5, 5),
            })
        );
    }

    #[test]
    fn add_influence_clamps_to_one_and_skips_walls() {
        let mut base = grid_10x10();
        base.set_values(&[base.grid_point_to_index(crate::geometry::GridPoint::new(5, 5))], 0);
        let mut map = InfluenceMap::from_grid(&base).unwrap();
        map.add_influence(Point2::new(5.5, 5.5), 3.0, -10.0, Decay::None);
        assert!(map.value_at(5, 5).is_infinite(), "wall must stay infinite");
        assert!(map.value_at(4, 5) >= 1.0, "passable cells never drop below 1.0");
    }

    #[test]
    fn add_influence_rim_is_exclusive() {
        let base = grid_10x10();
        let mut map = InfluenceMap::from_grid(&base).unwrap();
        // Distance from (5.5, 5.5) to (5.5, 2.5) is exactly 3.0 == radius.
        map.add_influence(Point2::new(5.5, 5.5), 3.0, 10.0, Decay::None);
        assert_eq!(map.value_at(5, 2), 1.0, "cell exactly on the rim is not stamped");
        assert!(map.value_at(5, 3) > 1.0, "cell inside the rim is stamped");
    }

    #[test]
    fn linear_decay_interpolates_to_end_amount() {
        let base = grid_10x10();
        let mut map = InfluenceMap::from_grid(&base).unwrap();
        map.add_influence(
            Point2::new(5.5, 5.5),
            4.0,
            10.0,
            Decay::Linear { end_amount: 2.0 },
        );
        let center_value = map.value_at(5, 5);
        assert!((center_value - 11.0).abs() < 0.05, "center gets ~full amount: {center_value}");
    }

    #[test]
    fn hollow_stamp_is_identity_when_radii_match() {
        let base = grid_10x10();
        let a = InfluenceMap::from_grid(&base).unwrap();
        let mut b = InfluenceMap::from_grid(&base).unwrap();
        b.add_influence_hollow(Point2::new(5.5, 5.5), 3.0, 3.0, 10.0, Decay::None);
        for y in 0..10 {
            for x in 0..10 {
                assert_eq!(a.value_at(x, y), b.value_at(x, y));
            }
        }
    }

    #[test]
    fn safe_spot_avoids_high_influence_cells() {
        let base = grid_10x10();
        let mut map = InfluenceMap::from_grid(&base).unwrap();
        map.add_influence(Point2::new(7.0, 3.0), 4.0, 10.0, Decay::None);
        let spot = map.find_closest_safe_spot(Point2::new(7.0, 3.0), 6.0);
        assert!(spot.is_some());
        let spot = spot.unwrap();
        // The stamped region near (7,3) should not be the chosen spot.
        assert!(spot.distance_to(Point2::new(7.0, 3.0)) > 3.0);
    }

    #[test]
    fn safe_spot_returns_none_when_fully_walled() {
        let mut base = BaseGrid::new(3, 3);
        base.set_values(&(0..9).collect::<Vec<_>>(), 0);
        let map = InfluenceMap::from_grid(&base).unwrap();
        assert!(map.find_closest_safe_spot(Point2::new(1.5, 1.5), 5.0).is_none());
    }

    #[test]
    fn stats_reflect_a_single_stamp() {
        let base = grid_10x10();
        let mut map = InfluenceMap::from_grid(&base).unwrap();
        map.add_influence(Point2::new(1.5, 1.5), 1.5, 5.0, Decay::None);
        let stats = map.stats();
        assert_eq!(stats.wall_count, 0);
        assert!(stats.max >= 6.0);
        assert!(stats.min >= 1.0);
    }

    #[test]
    fn pathfind_direction_matches_path_length() {
        let base = grid_10x10();
        let map = InfluenceMap::from_grid(&base).unwrap();
        let start = Point2::new(0.5, 0.5);
        let goal = Point2::new(9.5, 9.5);
        let path = map.pathfind_path(start, goal, false).unwrap();
        let direction = map.pathfind_direction(start, goal, false).unwrap();
        assert_eq!(direction.path_len, path.len());
        assert_eq!(direction.next_point, path[path.len() - 5]);
    }

    #[test]
    fn pathfind_direction_default_uses_config_flag() {
        let base = grid_10x10();
        let config = PathfindConfig {
            lookahead_steps: 5,
            default_large_unit: true,
        };
        let map = InfluenceMap::from_grid_with_config(&base, config).unwrap();
        let explicit = map.pathfind_direction(Point2::new(0.5, 0.5), Point2::new(5.5, 5.5), true);
        let default = map.pathfind_direction_default(Point2::new(0.5, 0.5), Point2::new(5.5, 5.5));
        assert_eq!(explicit, default);
    }
}
