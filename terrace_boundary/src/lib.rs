// Copyright 2025 the Terrace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=terrace_boundary --heading-base-level=0

//! Terrace Boundary: stitch boundary segments into loops and chains.
//!
//! Tile-based terrain produces its collision boundary as a soup of short
//! edges, one per pair of cells that disagree about being solid. Physics
//! engines want the opposite: a few long polylines. This crate bridges the
//! two.
//!
//! - [`Segment`]: an undirected edge between two lattice points.
//! - [`Extractor`]: partitions segments into the minimal set of simple
//!   [`Polyline`]s, each either a closed [`PolylineKind::Loop`] or an open
//!   [`PolylineKind::Chain`].
//! - [`simplify`]: Douglas–Peucker vertex reduction for the result.
//! - [`VertexDegrees`]: diagnostics for inputs that are not simple curves.
//!
//! # Example
//!
//! ```rust
//! use terrace_boundary::{PolylineKind, Segment, extract};
//!
//! // An open "L" given out of order.
//! let lines = extract([
//!     Segment::from(((2, 0), (2, 3))),
//!     Segment::from(((0, 0), (2, 0))),
//! ]);
//! assert_eq!(lines.len(), 1);
//! assert_eq!(lines[0].kind, PolylineKind::Chain);
//! assert_eq!(lines[0].points.len(), 3);
//! ```
//!
//! ## Branching vertices
//!
//! The stitching walk assumes each vertex touches at most two segments.
//! When that does not hold, [`BranchPolicy::FirstMatch`] keeps going with the
//! first continuation in segment order (and logs a warning through
//! `tracing`), while [`BranchPolicy::Reject`] reports
//! [`ExtractError::BranchingVertex`].
//!
//! ## Complexity
//!
//! Extraction is `O(n log n)` in the number of segments: one sort plus a
//! hashed vertex incidence table.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod extract;
mod polyline;
mod segment;
mod simplify;

pub use extract::{BranchPolicy, ExtractError, ExtractOptions, Extractor, extract};
pub use polyline::{Polyline, PolylineKind};
pub use segment::{Segment, VertexDegrees};
pub use simplify::simplify;
