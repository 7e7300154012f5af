// Copyright 2025 the Terrace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=terrace_lattice --heading-base-level=0

//! Terrace Lattice: integer points, sizes, and rectangles.
//!
//! These are the shared vocabulary of the Terrace crates. Tile maps, boundary
//! segments, and space partitions all live on the integer lattice; conversion
//! into [`kurbo`] floating point types happens at the edges.
//!
//! - [`LatticePoint`]: a point, ordered lexicographically on `(x, y)`.
//! - [`LatticeSize`]: a width/height pair.
//! - [`LatticeRect`]: a half-open rectangle with vertical/horizontal cuts.
//!
//! # Example
//!
//! ```rust
//! use terrace_lattice::{LatticePoint, LatticeRect};
//!
//! let room = LatticeRect::from_xywh(0, 0, 8, 4);
//! let (left, right) = room.split_vertical(3);
//! assert!(left.contains(LatticePoint::new(2, 1)));
//! assert!(right.contains(LatticePoint::new(3, 1)));
//! assert_eq!(left.area() + right.area(), room.area());
//! ```
//!
//! ## Features
//!
//! - `std` *(default)*: forwards to `kurbo/std`.
//! - `libm`: forwards to `kurbo/libm` for `no_std` targets.
//! - `serde`: derives `Serialize`/`Deserialize` for all types.

#![no_std]

mod types;

pub use types::{LatticePoint, LatticeRect, LatticeSize};
