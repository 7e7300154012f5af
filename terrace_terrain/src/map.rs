// Copyright 2025 the Terrace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pre-parsed tile map data consumed by the collision builder.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Point;
use terrace_lattice::{LatticePoint, LatticeSize};

use crate::error::InvalidInput;

/// Axis along which every other row (or column) is shifted.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StaggerAxis {
    /// Columns are shifted.
    X,
    /// Rows are shifted.
    Y,
}

/// Which rows (or columns) are shifted by half a tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StaggerIndex {
    /// Even indices are shifted.
    Even,
    /// Odd indices are shifted.
    Odd,
}

/// Map projection.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Square grid.
    Orthogonal,
    /// Diamond grid drawn as one big rhombus.
    Isometric,
    /// Diamond grid drawn as a rectangle by shifting every other row or column.
    Staggered {
        /// Shifted axis.
        axis: StaggerAxis,
        /// Shifted parity.
        index: StaggerIndex,
    },
}

impl Orientation {
    /// The only orientation the collision builder understands: odd rows
    /// shifted right by half a tile.
    pub const STAGGERED_ODD_ROWS: Self = Self::Staggered {
        axis: StaggerAxis::Y,
        index: StaggerIndex::Odd,
    };
}

/// One tile layer of a map.
///
/// Tiles are stored row-major, one global tile id per cell; id `0` means the
/// cell is empty.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileLayer {
    /// Layer name, for diagnostics.
    pub name: String,
    /// Columns and rows.
    pub grid_size: LatticeSize,
    /// Pixel size of one tile's bounding box.
    pub tile_size: LatticeSize,
    /// Projection of the map the layer belongs to.
    pub orientation: Orientation,
    /// Tile ids, `grid_size.width * grid_size.height` of them.
    pub tiles: Vec<u32>,
}

impl TileLayer {
    /// Create a staggered layer (odd rows shifted) from row-major tile ids.
    pub fn staggered(
        name: impl Into<String>,
        grid_size: LatticeSize,
        tile_size: LatticeSize,
        tiles: Vec<u32>,
    ) -> Self {
        Self {
            name: name.into(),
            grid_size,
            tile_size,
            orientation: Orientation::STAGGERED_ODD_ROWS,
            tiles,
        }
    }

    /// Tile id at `cell`, or `None` outside the grid.
    pub fn tile(&self, cell: LatticePoint) -> Option<u32> {
        let idx = cell_index(self.grid_size, cell)?;
        self.tiles.get(idx).copied()
    }

    /// Check the preconditions of the collision builder.
    pub fn validate(&self) -> Result<(), InvalidInput> {
        if self.orientation != Orientation::STAGGERED_ODD_ROWS {
            return Err(InvalidInput::UnsupportedOrientation(self.orientation));
        }
        let LatticeSize { width, height } = self.grid_size;
        if self.grid_size.is_empty() {
            return Err(InvalidInput::EmptyGrid { width, height });
        }
        let tile = self.tile_size;
        if tile.is_empty() || tile.width % 2 != 0 || tile.height % 2 != 0 {
            return Err(InvalidInput::TileSize {
                width: tile.width,
                height: tile.height,
            });
        }
        // Shifted rows reach half a tile past the last column; rows overlap by half.
        let tile_w = i64::from(tile.width);
        let tile_h = i64::from(tile.height);
        let extent_w = i64::from(width) * tile_w + tile_w / 2;
        let extent_h = (i64::from(height) + 1) * tile_h / 2;
        if extent_w > i64::from(i32::MAX) || extent_h > i64::from(i32::MAX) {
            return Err(InvalidInput::PixelExtent {
                width: extent_w,
                height: extent_h,
            });
        }
        let expected = cell_count(self.grid_size);
        if self.tiles.len() != expected {
            return Err(InvalidInput::TileCount {
                expected,
                actual: self.tiles.len(),
            });
        }
        Ok(())
    }
}

/// A named point object from an object layer.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapObject {
    /// Object name.
    pub name: String,
    /// World position in pixels.
    pub position: Point,
}

impl MapObject {
    /// Create an object.
    pub fn new(name: impl Into<String>, position: Point) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }
}

/// A layer of point objects, such as rocks or trees that block movement.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectLayer {
    /// Layer name.
    pub name: String,
    /// Objects in the layer.
    pub objects: Vec<MapObject>,
}

impl ObjectLayer {
    /// Create an object layer.
    pub fn new(name: impl Into<String>, objects: Vec<MapObject>) -> Self {
        Self {
            name: name.into(),
            objects,
        }
    }
}

pub(crate) fn cell_count(size: LatticeSize) -> usize {
    if size.is_empty() {
        return 0;
    }
    size.width as usize * size.height as usize
}

pub(crate) fn cell_index(size: LatticeSize, cell: LatticePoint) -> Option<usize> {
    if cell.x < 0 || cell.y < 0 || cell.x >= size.width || cell.y >= size.height {
        return None;
    }
    Some(cell.y as usize * size.width as usize + cell.x as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn layer(tiles: Vec<u32>) -> TileLayer {
        TileLayer::staggered(
            "ground",
            LatticeSize::new(3, 2),
            LatticeSize::new(64, 32),
            tiles,
        )
    }

    #[test]
    fn tiles_are_row_major() {
        let l = layer(vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(l.tile(LatticePoint::new(0, 0)), Some(1));
        assert_eq!(l.tile(LatticePoint::new(2, 0)), Some(3));
        assert_eq!(l.tile(LatticePoint::new(0, 1)), Some(4));
        assert_eq!(l.tile(LatticePoint::new(3, 0)), None);
        assert_eq!(l.tile(LatticePoint::new(-1, 0)), None);
        assert_eq!(l.validate(), Ok(()));
    }

    #[test]
    fn validation_rejects_malformed_layers() {
        let mut l = layer(vec![0; 5]);
        assert_eq!(
            l.validate(),
            Err(InvalidInput::TileCount {
                expected: 6,
                actual: 5
            })
        );

        l.tiles.push(0);
        l.tile_size = LatticeSize::new(63, 32);
        assert!(matches!(l.validate(), Err(InvalidInput::TileSize { .. })));

        l.tile_size = LatticeSize::new(64, 32);
        l.orientation = Orientation::Isometric;
        assert_eq!(
            l.validate(),
            Err(InvalidInput::UnsupportedOrientation(Orientation::Isometric))
        );

        l.orientation = Orientation::Staggered {
            axis: StaggerAxis::X,
            index: StaggerIndex::Odd,
        };
        assert!(matches!(
            l.validate(),
            Err(InvalidInput::UnsupportedOrientation(_))
        ));

        l.orientation = Orientation::STAGGERED_ODD_ROWS;
        l.grid_size = LatticeSize::new(0, 2);
        assert!(matches!(l.validate(), Err(InvalidInput::EmptyGrid { .. })));
    }

    #[test]
    fn validation_rejects_layers_beyond_pixel_range() {
        let mut l = TileLayer::staggered(
            "ground",
            LatticeSize::new(4096, 2),
            LatticeSize::new(1 << 20, 2),
            vec![1; 8192],
        );
        assert_eq!(
            l.validate(),
            Err(InvalidInput::PixelExtent {
                width: (4096 << 20) + (1 << 19),
                height: 3,
            })
        );

        // Tall maps overflow through the row height instead.
        l.grid_size = LatticeSize::new(1, 8192);
        l.tile_size = LatticeSize::new(2, 1 << 20);
        assert!(matches!(
            l.validate(),
            Err(InvalidInput::PixelExtent { width: 3, .. })
        ));

        // The largest extent that still fits is accepted.
        l.grid_size = LatticeSize::new(1, 1);
        l.tiles = vec![1];
        l.tile_size = LatticeSize::new(1 << 30, 2);
        assert_eq!(l.validate(), Ok(()));
    }
}
