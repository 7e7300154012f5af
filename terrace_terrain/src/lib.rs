// Copyright 2025 the Terrace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=terrace_terrain --heading-base-level=0

//! Terrace Terrain: static collision geometry for staggered tile maps.
//!
//! Given one tile layer of a staggered map (odd rows shifted by half a
//! tile), this crate keeps moving bodies out of the empty cells:
//!
//! - [`CellGrid`] classifies cells as [`Biome::Land`] (non-zero tile id) or
//!   [`Biome::Void`].
//! - [`boundary_segments`] emits the diamond side between every void cell and
//!   each of its land neighbours.
//! - [`CollisionBuilder`] stitches those sides into polylines with
//!   [`terrace_boundary`], simplifies them, and registers them as static
//!   fixtures through the [`PhysicsWorld`] trait, together with one circle per
//!   obstacle object.
//!
//! Physics engines plug in through [`PhysicsWorld`]. [`CommandLog`] records
//! calls for tests and debugging; with the `rapier` feature,
//! `rapier::RapierWorld` fills `rapier2d` body and collider sets.
//!
//! # Example
//!
//! ```rust
//! use kurbo::Point;
//! use terrace_lattice::LatticeSize;
//! use terrace_terrain::{
//!     CollisionBuilder, CollisionConfig, CommandLog, MapObject, ObjectLayer, TileLayer,
//! };
//!
//! // Land everywhere except the middle cell of the top row.
//! let mut tiles = vec![5; 9];
//! tiles[1] = 0;
//! let layer = TileLayer::staggered("ground", LatticeSize::new(3, 3), LatticeSize::new(64, 32), tiles);
//! let trees = ObjectLayer::new("trees", vec![MapObject::new("oak", Point::new(40.0, 80.0))]);
//!
//! let mut world = CommandLog::new();
//! let summary = CollisionBuilder::new(CollisionConfig::default())
//!     .build(&mut world, &layer, &[trees])
//!     .unwrap();
//!
//! // The void cell touches the map border, so its boundary stays open.
//! assert_eq!(summary.chains, 1);
//! assert_eq!(summary.obstacles, 1);
//! ```
//!
//! Map data is validated up front; unsupported orientations, odd tile sizes,
//! maps too large for `i32` pixel coordinates and mismatched tile counts are
//! reported as [`TerrainError::InvalidInput`] without touching the world.
//!
//! This crate is `no_std` and uses `alloc`; the `rapier` feature needs `std`.

#![no_std]

extern crate alloc;

mod builder;
mod error;
mod grid;
mod map;
mod world;

#[cfg(feature = "rapier")]
pub mod rapier;

pub use builder::{CollisionBuilder, CollisionConfig, CollisionSummary};
pub use error::{InvalidInput, TerrainError};
pub use grid::{Biome, CellGrid, CellSides, StaggeredGeometry, boundary_segments, neighbor};
pub use map::{MapObject, ObjectLayer, Orientation, StaggerAxis, StaggerIndex, TileLayer};
pub use world::{CommandLog, FixtureMaterial, PhysicsCommand, PhysicsWorld};
