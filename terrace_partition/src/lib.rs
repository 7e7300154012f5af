// Copyright 2025 the Terrace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=terrace_partition --heading-base-level=0

//! Terrace Partition: random binary space partitioning for procedural layout.
//!
//! A [`SpaceTree`] starts as one integer rectangle and is refined by cutting
//! leaves in two, either one step at a time ([`SpaceTree::split_once`]) or
//! until every region is small enough ([`SpaceTree::split_recursive`],
//! [`SpaceTree::generate`]). Level generators then place rooms in the leaves
//! and corridors between siblings.
//!
//! - Cuts follow the region's aspect ratio: long regions are cut across their
//!   long side, near-square ones on a coin flip.
//! - Children never drop below the minimum size along the cut axis.
//! - The leaves always tile the root exactly; areas are half-open, so every
//!   point of the root lies in exactly one leaf ([`SpaceTree::find`]).
//! - Five walk orders ([`TraversalOrder`]) with early termination.
//!
//! Randomness comes from any [`rand::Rng`] passed in by the caller, so a
//! seeded generator reproduces the same layout.
//!
//! # Example
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use terrace_lattice::{LatticeRect, LatticeSize};
//! use terrace_partition::{SpaceTree, SplitParams, TraversalOrder};
//!
//! let mut rng = StdRng::seed_from_u64(2025);
//! let params = SplitParams::new(6, LatticeSize::splat(4), LatticeSize::splat(12), 1.5);
//! let tree: SpaceTree = SpaceTree::generate(LatticeRect::from_xywh(0, 0, 48, 32), &mut rng, &params)
//!     .unwrap();
//!
//! let mut covered = 0;
//! tree.walk(TraversalOrder::PostOrder, |_, node| {
//!     if node.is_leaf() {
//!         covered += node.area().area();
//!     }
//!     true
//! });
//! assert_eq!(covered, 48 * 32);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod tree;
mod types;

pub use tree::{Node, SpaceTree};
pub use types::{NodeId, ParamsError, SplitAxis, SplitParams, TraversalOrder};
