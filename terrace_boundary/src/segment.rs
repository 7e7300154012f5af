// Copyright 2025 the Terrace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Boundary segments and vertex degree diagnostics.

use alloc::vec::Vec;

use hashbrown::HashMap;
use terrace_lattice::LatticePoint;

/// One edge of a boundary, between two lattice points.
///
/// Segments are undirected: `(a, b)` and `(b, a)` describe the same edge.
/// Ordering is lexicographic on `(p1.x, p1.y, p2.x, p2.y)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    /// First endpoint.
    pub p1: LatticePoint,
    /// Second endpoint.
    pub p2: LatticePoint,
}

impl Segment {
    /// Create a new segment.
    #[inline(always)]
    pub const fn new(p1: LatticePoint, p2: LatticePoint) -> Self {
        Self { p1, p2 }
    }

    /// The same edge with its endpoints swapped.
    #[inline]
    pub const fn reversed(self) -> Self {
        Self::new(self.p2, self.p1)
    }

    /// The same edge with `p1 <= p2`.
    ///
    /// Two segments describe the same edge iff their canonical forms are equal.
    #[inline]
    pub fn canonical(self) -> Self {
        if self.p2 < self.p1 {
            self.reversed()
        } else {
            self
        }
    }

    /// Whether both endpoints coincide.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.p1 == self.p2
    }

    /// Whether `p` is one of the endpoints.
    #[inline]
    pub fn touches(&self, p: LatticePoint) -> bool {
        self.p1 == p || self.p2 == p
    }

    /// The endpoint opposite to `p`, or `None` if `p` is not an endpoint.
    #[inline]
    pub fn other_end(&self, p: LatticePoint) -> Option<LatticePoint> {
        if self.p1 == p {
            Some(self.p2)
        } else if self.p2 == p {
            Some(self.p1)
        } else {
            None
        }
    }
}

impl From<((i32, i32), (i32, i32))> for Segment {
    fn from((a, b): ((i32, i32), (i32, i32))) -> Self {
        Self::new(a.into(), b.into())
    }
}

/// Number of distinct segments incident to each vertex.
///
/// A set of segments describes simple (non-branching) curves iff no vertex
/// has a degree above 2.
#[derive(Clone, Debug, Default)]
pub struct VertexDegrees {
    degrees: HashMap<LatticePoint, usize>,
}

impl VertexDegrees {
    /// Count degrees over the distinct, non-degenerate edges in `segments`.
    pub fn from_segments<I>(segments: I) -> Self
    where
        I: IntoIterator<Item = Segment>,
    {
        let mut edges: Vec<Segment> = segments
            .into_iter()
            .filter(|s| !s.is_degenerate())
            .map(Segment::canonical)
            .collect();
        edges.sort_unstable();
        edges.dedup();

        let mut degrees = HashMap::new();
        for s in &edges {
            *degrees.entry(s.p1).or_insert(0) += 1;
            *degrees.entry(s.p2).or_insert(0) += 1;
        }
        Self { degrees }
    }

    /// Degree of `p`, zero for unknown vertices.
    pub fn degree(&self, p: LatticePoint) -> usize {
        self.degrees.get(&p).copied().unwrap_or(0)
    }

    /// Number of distinct vertices.
    pub fn len(&self) -> usize {
        self.degrees.len()
    }

    /// Whether no vertex was recorded.
    pub fn is_empty(&self) -> bool {
        self.degrees.is_empty()
    }

    /// Vertices shared by more than two segments, sorted by point.
    pub fn branching(&self) -> Vec<(LatticePoint, usize)> {
        let mut out: Vec<_> = self
            .degrees
            .iter()
            .filter(|&(_, &d)| d > 2)
            .map(|(&p, &d)| (p, d))
            .collect();
        out.sort_unstable();
        out
    }

    /// Vertices with a single incident segment (open chain ends), sorted by point.
    pub fn ends(&self) -> Vec<LatticePoint> {
        let mut out: Vec<_> = self
            .degrees
            .iter()
            .filter(|&(_, &d)| d == 1)
            .map(|(&p, _)| p)
            .collect();
        out.sort_unstable();
        out
    }

    /// Whether every vertex has degree 1 or 2.
    pub fn is_simple(&self) -> bool {
        self.degrees.values().all(|&d| d <= 2)
    }
}
