// Copyright 2025 the Terrace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Land/void classification and staggered boundary tracing.
//!
//! In a staggered map with odd rows shifted, the tile at `(col, row)` is a
//! diamond inscribed in the box whose top-left corner is
//! `(col * w + (row odd ? w / 2 : 0), row * h / 2)`. Each diamond touches
//! four diagonal neighbours, one per side; which cells those are depends on
//! the row parity.

use alloc::vec::Vec;

use terrace_boundary::Segment;
use terrace_lattice::{LatticePoint, LatticeSize};

use crate::error::InvalidInput;
use crate::map::{TileLayer, cell_count, cell_index};

/// Whether a cell blocks movement.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Biome {
    /// Walkable ground (any non-empty tile).
    Land,
    /// Empty cell; bodies must not enter it.
    Void,
}

bitflags::bitflags! {
    /// Diamond sides of a cell, named after the neighbour across them.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct CellSides: u8 {
        /// Upper-left side.
        const NORTH_WEST = 0b0001;
        /// Upper-right side.
        const NORTH_EAST = 0b0010;
        /// Lower-left side.
        const SOUTH_WEST = 0b0100;
        /// Lower-right side.
        const SOUTH_EAST = 0b1000;
    }
}

/// Sides in tracing order, with neighbour offsets for even and odd rows.
const SIDES: [(CellSides, (i32, i32), (i32, i32)); 4] = [
    (CellSides::NORTH_WEST, (-1, -1), (0, -1)),
    (CellSides::NORTH_EAST, (0, -1), (1, -1)),
    (CellSides::SOUTH_WEST, (-1, 1), (0, 1)),
    (CellSides::SOUTH_EAST, (0, 1), (1, 1)),
];

/// The neighbour of `cell` across `side`.
///
/// `side` should be a single flag; combined flags use the first one in
/// north-west, north-east, south-west, south-east order.
pub fn neighbor(cell: LatticePoint, side: CellSides) -> LatticePoint {
    let odd = cell.y.rem_euclid(2) == 1;
    for &(s, even_offset, odd_offset) in &SIDES {
        if side.contains(s) {
            let (dx, dy) = if odd { odd_offset } else { even_offset };
            return cell.offset(dx, dy);
        }
    }
    cell
}

/// Land/void tag per cell of a tile layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellGrid {
    size: LatticeSize,
    cells: Vec<Biome>,
}

impl CellGrid {
    /// Classify a validated layer: non-zero tiles are land.
    pub fn from_layer(layer: &TileLayer) -> Result<Self, InvalidInput> {
        layer.validate()?;
        Ok(Self::from_fn(layer.grid_size, |cell| {
            match layer.tile(cell) {
                Some(0) | None => Biome::Void,
                Some(_) => Biome::Land,
            }
        }))
    }

    /// Build a grid by asking `f` for every cell, row by row.
    pub fn from_fn(size: LatticeSize, mut f: impl FnMut(LatticePoint) -> Biome) -> Self {
        let mut cells = Vec::with_capacity(cell_count(size));
        for y in 0..size.height.max(0) {
            for x in 0..size.width.max(0) {
                cells.push(f(LatticePoint::new(x, y)));
            }
        }
        Self { size, cells }
    }

    /// Columns and rows.
    pub fn size(&self) -> LatticeSize {
        self.size
    }

    /// Biome at `cell`, or `None` outside the grid.
    pub fn get(&self, cell: LatticePoint) -> Option<Biome> {
        cell_index(self.size, cell).map(|i| self.cells[i])
    }

    /// Number of void cells.
    pub fn void_count(&self) -> usize {
        self.cells.iter().filter(|&&b| b == Biome::Void).count()
    }

    /// Sides of `cell` facing an in-range land neighbour.
    ///
    /// Out-of-range neighbours are not boundaries: void regions touching the
    /// map border stay open there.
    pub fn land_sides(&self, cell: LatticePoint) -> CellSides {
        let mut sides = CellSides::empty();
        for &(side, _, _) in &SIDES {
            if self.get(neighbor(cell, side)) == Some(Biome::Land) {
                sides |= side;
            }
        }
        sides
    }

    /// Iterate void cells, row by row.
    pub fn void_cells(&self) -> impl Iterator<Item = LatticePoint> + '_ {
        let width = self.size.width.max(1);
        self.cells
            .iter()
            .zip(0_i32..)
            .filter(|&(&b, _)| b == Biome::Void)
            .map(move |(_, i)| LatticePoint::new(i % width, i / width))
    }
}

/// Pixel geometry of a staggered map with odd rows shifted.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StaggeredGeometry {
    tile_size: LatticeSize,
}

impl StaggeredGeometry {
    /// Geometry for tiles of the given pixel size (positive and even).
    pub fn new(tile_size: LatticeSize) -> Self {
        Self { tile_size }
    }

    /// Top-left corner of the bounding box of `cell`'s diamond.
    pub fn base(&self, cell: LatticePoint) -> LatticePoint {
        let LatticeSize { width, height } = self.tile_size;
        let shift = if cell.y.rem_euclid(2) == 1 { width / 2 } else { 0 };
        LatticePoint::new(cell.x * width + shift, cell.y * height / 2)
    }

    /// Diamond corners of `cell`: north, east, south, west.
    pub fn corners(&self, cell: LatticePoint) -> [LatticePoint; 4] {
        let base = self.base(cell);
        let LatticeSize { width, height } = self.tile_size;
        [
            base.offset(width / 2, 0),
            base.offset(width, height / 2),
            base.offset(width / 2, height),
            base.offset(0, height / 2),
        ]
    }

    /// The diamond side of `cell` shared with its neighbour across `side`.
    pub fn side(&self, cell: LatticePoint, side: CellSides) -> Segment {
        let [north, east, south, west] = self.corners(cell);
        if side.contains(CellSides::NORTH_WEST) {
            Segment::new(west, north)
        } else if side.contains(CellSides::NORTH_EAST) {
            Segment::new(north, east)
        } else if side.contains(CellSides::SOUTH_WEST) {
            Segment::new(south, west)
        } else {
            Segment::new(east, south)
        }
    }
}

/// Emit one segment per (void cell, land neighbour) pair, in pixels.
pub fn boundary_segments(grid: &CellGrid, geometry: &StaggeredGeometry) -> Vec<Segment> {
    let mut out = Vec::new();
    for cell in grid.void_cells() {
        let land = grid.land_sides(cell);
        for &(side, _, _) in &SIDES {
            if land.contains(side) {
                out.push(geometry.side(cell, side));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    const TILE: LatticeSize = LatticeSize::new(64, 32);

    fn grid_with_voids(size: LatticeSize, voids: &[(i32, i32)]) -> CellGrid {
        CellGrid::from_fn(size, |c| {
            if voids.contains(&(c.x, c.y)) {
                Biome::Void
            } else {
                Biome::Land
            }
        })
    }

    #[test]
    fn neighbor_offsets_depend_on_row_parity() {
        let even = LatticePoint::new(2, 4);
        assert_eq!(neighbor(even, CellSides::NORTH_WEST), LatticePoint::new(1, 3));
        assert_eq!(neighbor(even, CellSides::NORTH_EAST), LatticePoint::new(2, 3));
        assert_eq!(neighbor(even, CellSides::SOUTH_WEST), LatticePoint::new(1, 5));
        assert_eq!(neighbor(even, CellSides::SOUTH_EAST), LatticePoint::new(2, 5));

        let odd = LatticePoint::new(2, 3);
        assert_eq!(neighbor(odd, CellSides::NORTH_WEST), LatticePoint::new(2, 2));
        assert_eq!(neighbor(odd, CellSides::NORTH_EAST), LatticePoint::new(3, 2));
        assert_eq!(neighbor(odd, CellSides::SOUTH_WEST), LatticePoint::new(2, 4));
        assert_eq!(neighbor(odd, CellSides::SOUTH_EAST), LatticePoint::new(3, 4));
    }

    #[test]
    fn neighbours_share_a_diamond_side() {
        let geo = StaggeredGeometry::new(TILE);
        for cell in [LatticePoint::new(1, 2), LatticePoint::new(1, 3)] {
            for (side, opposite) in [
                (CellSides::NORTH_WEST, CellSides::SOUTH_EAST),
                (CellSides::NORTH_EAST, CellSides::SOUTH_WEST),
                (CellSides::SOUTH_WEST, CellSides::NORTH_EAST),
                (CellSides::SOUTH_EAST, CellSides::NORTH_WEST),
            ] {
                let other = neighbor(cell, side);
                assert_eq!(
                    geo.side(cell, side).canonical(),
                    geo.side(other, opposite).canonical(),
                    "{cell} / {other}"
                );
            }
        }
    }

    #[test]
    fn odd_rows_are_shifted_by_half_a_tile() {
        let geo = StaggeredGeometry::new(TILE);
        assert_eq!(geo.base(LatticePoint::new(1, 2)), LatticePoint::new(64, 32));
        assert_eq!(geo.base(LatticePoint::new(1, 1)), LatticePoint::new(96, 16));
        assert_eq!(
            geo.corners(LatticePoint::new(1, 2)),
            [
                LatticePoint::new(96, 32),
                LatticePoint::new(128, 48),
                LatticePoint::new(96, 64),
                LatticePoint::new(64, 48),
            ]
        );
    }

    #[test]
    fn enclosed_void_cell_emits_its_four_sides() {
        let grid = grid_with_voids(LatticeSize::new(3, 5), &[(1, 2)]);
        assert_eq!(grid.void_count(), 1);
        assert_eq!(grid.land_sides(LatticePoint::new(1, 2)), CellSides::all());

        let segments = boundary_segments(&grid, &StaggeredGeometry::new(TILE));
        assert_eq!(
            segments,
            vec![
                Segment::from(((64, 48), (96, 32))),
                Segment::from(((96, 32), (128, 48))),
                Segment::from(((96, 64), (64, 48))),
                Segment::from(((128, 48), (96, 64))),
            ]
        );
    }

    #[test]
    fn border_neighbours_are_not_boundaries() {
        // Top row: the two northern neighbours are outside the map.
        let grid = grid_with_voids(LatticeSize::new(3, 3), &[(1, 0)]);
        assert_eq!(
            grid.land_sides(LatticePoint::new(1, 0)),
            CellSides::SOUTH_WEST | CellSides::SOUTH_EAST
        );
        let segments = boundary_segments(&grid, &StaggeredGeometry::new(TILE));
        assert_eq!(segments.len(), 2);
    }

    #[test]
    fn void_neighbours_do_not_emit() {
        let grid = grid_with_voids(LatticeSize::new(3, 5), &[(1, 2), (1, 1)]);
        let segments = boundary_segments(&grid, &StaggeredGeometry::new(TILE));
        assert_eq!(segments.len(), 6, "the shared side is interior");
    }

    #[test]
    fn classification_follows_tile_ids() {
        let layer = TileLayer::staggered(
            "ground",
            LatticeSize::new(2, 2),
            TILE,
            vec![0, 7, 3, 0],
        );
        let grid = CellGrid::from_layer(&layer).unwrap();
        assert_eq!(grid.get(LatticePoint::new(0, 0)), Some(Biome::Void));
        assert_eq!(grid.get(LatticePoint::new(1, 0)), Some(Biome::Land));
        assert_eq!(grid.get(LatticePoint::new(0, 1)), Some(Biome::Land));
        assert_eq!(grid.get(LatticePoint::new(1, 1)), Some(Biome::Void));
        assert_eq!(grid.get(LatticePoint::new(2, 1)), None);
        assert_eq!(
            grid.void_cells().collect::<Vec<_>>(),
            [LatticePoint::new(0, 0), LatticePoint::new(1, 1)]
        );
    }
}
