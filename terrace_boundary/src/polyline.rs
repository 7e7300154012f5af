// Copyright 2025 the Terrace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Polylines produced by boundary extraction.

use alloc::vec::Vec;

use kurbo::{Line, Point, Rect};

use crate::simplify::simplify;

/// Whether a polyline closes on itself.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PolylineKind {
    /// Open curve; the last point does not connect back to the first.
    Chain,
    /// Closed curve; an implicit edge joins the last point to the first.
    #[default]
    Loop,
}

/// An ordered sequence of points tagged as a [`Loop`](PolylineKind::Loop) or
/// a [`Chain`](PolylineKind::Chain).
///
/// Loops never repeat their first point at the end.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polyline {
    /// Open or closed.
    pub kind: PolylineKind,
    /// Vertices in order.
    pub points: Vec<Point>,
}

impl Polyline {
    /// Create a polyline.
    pub fn new(kind: PolylineKind, points: Vec<Point>) -> Self {
        Self { kind, points }
    }

    /// Whether this polyline is a closed loop.
    #[inline]
    pub fn is_loop(&self) -> bool {
        self.kind == PolylineKind::Loop
    }

    /// Number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the polyline has no vertex.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether the polyline has enough vertices to describe a shape: three
    /// for a loop, two for a chain.
    pub fn is_degenerate(&self) -> bool {
        match self.kind {
            PolylineKind::Loop => self.points.len() < 3,
            PolylineKind::Chain => self.points.len() < 2,
        }
    }

    /// Iterate the edges implied by the vertices, including the closing edge
    /// of a loop.
    pub fn edges(&self) -> impl Iterator<Item = Line> + '_ {
        let closing = match (self.kind, self.points.first(), self.points.last()) {
            (PolylineKind::Loop, Some(&first), Some(&last)) if self.points.len() >= 3 => {
                Some(Line::new(last, first))
            }
            _ => None,
        };
        self.points
            .windows(2)
            .map(|w| Line::new(w[0], w[1]))
            .chain(closing)
    }

    /// Bounding box of the vertices, `None` when empty.
    pub fn bounding_box(&self) -> Option<Rect> {
        let mut it = self.points.iter().copied();
        let first = it.next()?;
        Some(it.fold(Rect::from_points(first, first), |acc, p| {
            acc.union_pt(p)
        }))
    }

    /// A copy with every vertex passed through `f`.
    pub fn map_points(&self, mut f: impl FnMut(Point) -> Point) -> Self {
        Self {
            kind: self.kind,
            points: self.points.iter().map(|&p| f(p)).collect(),
        }
    }

    /// A Douglas–Peucker reduced copy. See [`simplify`].
    pub fn simplified(&self, epsilon: f64) -> Self {
        Self {
            kind: self.kind,
            points: simplify(&self.points, self.kind, epsilon),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ]
    }

    #[test]
    fn loop_edges_include_closing_edge() {
        let p = Polyline::new(PolylineKind::Loop, square());
        let edges: Vec<_> = p.edges().collect();
        assert_eq!(edges.len(), 4);
        assert_eq!(edges[3], Line::new((0.0, 1.0), (0.0, 0.0)));
    }

    #[test]
    fn chain_edges_do_not_close() {
        let p = Polyline::new(PolylineKind::Chain, square());
        assert_eq!(p.edges().count(), 3);
    }

    #[test]
    fn degenerate_thresholds() {
        let two = vec![Point::ZERO, Point::new(1.0, 0.0)];
        assert!(Polyline::new(PolylineKind::Loop, two.clone()).is_degenerate());
        assert!(!Polyline::new(PolylineKind::Chain, two).is_degenerate());
        assert!(Polyline::new(PolylineKind::Chain, vec![Point::ZERO]).is_degenerate());
    }

    #[test]
    fn bounding_box_and_mapping() {
        let p = Polyline::new(PolylineKind::Loop, square());
        assert_eq!(p.bounding_box(), Some(Rect::new(0.0, 0.0, 1.0, 1.0)));
        let scaled = p.map_points(|pt| Point::new(pt.x * 2.0, pt.y * 2.0));
        assert_eq!(scaled.bounding_box(), Some(Rect::new(0.0, 0.0, 2.0, 2.0)));
        assert_eq!(Polyline::default().bounding_box(), None);
    }
}
