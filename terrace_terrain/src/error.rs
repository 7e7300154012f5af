// Copyright 2025 the Terrace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for collision building.

use terrace_boundary::ExtractError;

use crate::map::Orientation;

/// Why map data or configuration was refused.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum InvalidInput {
    /// Only staggered maps with a Y stagger axis and odd stagger index are supported.
    #[error("expected a staggered map (axis y, index odd), found {0:?}")]
    UnsupportedOrientation(Orientation),
    /// The layer has no cells.
    #[error("layer grid {width}x{height} is empty")]
    EmptyGrid {
        /// Columns.
        width: i32,
        /// Rows.
        height: i32,
    },
    /// Tiles must have a positive, even pixel size so diamond corners land on the lattice.
    #[error("tile size {width}x{height} must be positive and even")]
    TileSize {
        /// Tile width in pixels.
        width: i32,
        /// Tile height in pixels.
        height: i32,
    },
    /// Diamond corners of the far cells would not fit in `i32` pixel coordinates.
    #[error("map pixel extent {width}x{height} exceeds the i32 range")]
    PixelExtent {
        /// Rightmost corner x, in pixels.
        width: i64,
        /// Bottom corner y, in pixels.
        height: i64,
    },
    /// The tile list does not match the grid dimensions.
    #[error("layer has {actual} tiles but its grid needs {expected}")]
    TileCount {
        /// `columns * rows`.
        expected: usize,
        /// Length of the tile list.
        actual: usize,
    },
    /// A configuration value is out of range.
    #[error("configuration value {name} is out of range: {value}")]
    Config {
        /// Field name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },
}

/// Errors returned while building terrain collision.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum TerrainError {
    /// The map or the configuration violates a precondition.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),
    /// Boundary extraction refused the traced segments.
    #[error(transparent)]
    Extract(#[from] ExtractError),
}
