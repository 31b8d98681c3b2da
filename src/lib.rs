//! `navfield`: a 2D influence map with weighted A* pathfinding for
//! real-time strategy game AI.
//!
//! A caller builds an [`InfluenceMap`] from a [`BaseGrid`] each tick (or
//! resets one in place), stamps zero or more influence sources onto it
//! ([`InfluenceMap::add_influence`], [`InfluenceMap::add_influence_hollow`]),
//! then queries it for a safe spot ([`InfluenceMap::find_closest_safe_spot`])
//! or a path ([`InfluenceMap::pathfind_path`], [`InfluenceMap::pathfind_direction`]).
//!
//! The crate is single-threaded with no internal concurrency: every entry
//! point is synchronous and deterministic given its inputs and the current
//! map state. The map may be read-shared across concurrent searches by
//! different callers only if no mutation occurs during those reads;
//! enforcing that is the caller's responsibility, there is no internal lock.
#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::all)]

/// Tunable knobs for pathfinding, loadable from a TOML file.
pub mod config;
/// Error types for the crate's recoverable failure modes.
pub mod error;
/// 2D geometry primitives: points, grid cells, rectangles, octile distance.
pub mod geometry;
/// The base terrain grid external callers build an [`InfluenceMap`] from.
pub mod grid;
/// The influence field, its mutation operations, and pathfinding queries.
pub mod influence;
/// Optional `env_logger` bootstrap for the crate's internal instrumentation.
pub mod logging;
mod pathfind;

pub use config::PathfindConfig;
pub use error::{ConfigError, GridError, InfluenceMapError};
pub use geometry::{octile_distance, GridPoint, Point2, Rectangle};
pub use grid::BaseGrid;
pub use influence::{Decay, FieldStats, InfluenceMap};
pub use logging::{init_logging, LoggingConfig};
pub use pathfind::PathDirection;
