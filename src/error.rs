//! Error types for the parts of `navfield` that have a recoverable failure
//! mode. Index-level preconditions (out-of-bounds cells) remain panics per
//! the data model's invariants; see `SPEC_FULL.md` section 7.

use thiserror::Error;

/// Errors returned by [`crate::InfluenceMap::reset`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    /// `reset` was called with a base grid of different dimensions.
    #[error("dimension mismatch: map is {expected:?}, grid is {found:?}")]
    DimensionMismatch {
        /// Dimensions of the existing influence map.
        expected: (u16, u16),
        /// Dimensions of the base grid passed to `reset`.
        found: (u16, u16),
    },
}

/// Errors returned by [`crate::InfluenceMap::from_grid`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InfluenceMapError {
    /// The backing float buffer could not be allocated.
    #[error("failed to allocate influence map buffer")]
    Allocation,
}

/// Errors returned while loading a [`crate::PathfindConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("io error reading config: {0}")]
    Io(#[from] std::io::Error),
    /// The config file was not valid TOML.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}
