// Copyright 2025 the Terrace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Segment stitching: from an unordered edge soup to loops and chains.

use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::Point;
use smallvec::SmallVec;
use terrace_lattice::LatticePoint;

use crate::polyline::{Polyline, PolylineKind};
use crate::segment::{Segment, VertexDegrees};

/// What to do when a vertex is shared by more than two segments.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BranchPolicy {
    /// Follow the first continuation in ascending segment order and log a
    /// warning. Every segment still ends up in exactly one polyline, but the
    /// split into polylines at a branching vertex is arbitrary.
    #[default]
    FirstMatch,
    /// Refuse the input with [`ExtractError::BranchingVertex`].
    Reject,
}

/// Options for an [`Extractor`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtractOptions {
    /// Handling of branching vertices.
    pub branch_policy: BranchPolicy,
    /// Douglas–Peucker tolerance applied to every polyline, or `None` to
    /// return the raw lattice vertices.
    pub simplify: Option<f64>,
}

impl ExtractOptions {
    /// Set the branch policy.
    pub fn branch_policy(mut self, policy: BranchPolicy) -> Self {
        self.branch_policy = policy;
        self
    }

    /// Simplify the output with the given tolerance.
    pub fn simplify(mut self, epsilon: f64) -> Self {
        self.simplify = Some(epsilon);
        self
    }
}

/// Errors reported by [`Extractor::extract`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    /// A vertex has more than two incident segments, so the boundary is not
    /// a set of simple curves.
    #[error("boundary vertex {point} is shared by {degree} segments")]
    BranchingVertex {
        /// The offending vertex (the smallest one if there are several).
        point: LatticePoint,
        /// Number of distinct segments incident to it.
        degree: usize,
    },
}

/// Stitches boundary segments into polylines.
///
/// ## Example
///
/// ```rust
/// use terrace_boundary::{ExtractOptions, Extractor, PolylineKind, Segment};
///
/// let square = [
///     Segment::from(((0, 0), (1, 0))),
///     Segment::from(((1, 0), (1, 1))),
///     Segment::from(((1, 1), (0, 1))),
///     Segment::from(((0, 1), (0, 0))),
/// ];
/// let lines = Extractor::new(ExtractOptions::default())
///     .extract(square)
///     .unwrap();
/// assert_eq!(lines.len(), 1);
/// assert_eq!(lines[0].kind, PolylineKind::Loop);
/// assert_eq!(lines[0].points.len(), 4);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Extractor {
    options: ExtractOptions,
}

impl Extractor {
    /// Create an extractor with the given options.
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    /// The options in use.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Partition `segments` into simple polylines.
    ///
    /// Segments are deduplicated regardless of direction and zero-length
    /// segments are dropped. Each remaining segment lands in exactly one
    /// output polyline. Curves that close become [`PolylineKind::Loop`]s;
    /// the others become [`PolylineKind::Chain`]s whose endpoints are the
    /// curve's two free ends.
    ///
    /// Output order is deterministic: polylines are seeded by ascending
    /// segment order.
    pub fn extract<I>(&self, segments: I) -> Result<Vec<Polyline>, ExtractError>
    where
        I: IntoIterator<Item = Segment>,
    {
        let pool = SegmentPool::new(segments);
        let branching = pool.branching();
        if let Some(&(point, degree)) = branching.first() {
            match self.options.branch_policy {
                BranchPolicy::Reject => {
                    return Err(ExtractError::BranchingVertex { point, degree });
                }
                BranchPolicy::FirstMatch => warn_branching(&branching),
            }
        }
        Ok(pool.stitch(self.options.simplify))
    }
}

/// Stitch `segments` with the default options: first-match branching and no
/// simplification.
///
/// Same output as `Extractor::default().extract(segments)`, without the
/// `Result` wrapper.
pub fn extract<I>(segments: I) -> Vec<Polyline>
where
    I: IntoIterator<Item = Segment>,
{
    let pool = SegmentPool::new(segments);
    warn_branching(&pool.branching());
    pool.stitch(None)
}

fn warn_branching(branching: &[(LatticePoint, usize)]) {
    for (point, degree) in branching {
        tracing::warn!(%point, degree, "boundary branches; following first match");
    }
}

/// Canonical, sorted segments with a consumed flag and a vertex → segment
/// incidence table.
struct SegmentPool {
    segments: Vec<Segment>,
    consumed: Vec<bool>,
    incident: HashMap<LatticePoint, SmallVec<[usize; 2]>>,
    cursor: usize,
}

impl SegmentPool {
    fn new<I>(segments: I) -> Self
    where
        I: IntoIterator<Item = Segment>,
    {
        let mut segments: Vec<Segment> = segments
            .into_iter()
            .filter(|s| !s.is_degenerate())
            .map(Segment::canonical)
            .collect();
        segments.sort_unstable();
        segments.dedup();

        // Indices are pushed in ascending order, so the first unconsumed
        // entry of a list is always the smallest candidate.
        let mut incident: HashMap<LatticePoint, SmallVec<[usize; 2]>> = HashMap::new();
        for (i, s) in segments.iter().enumerate() {
            incident.entry(s.p1).or_default().push(i);
            incident.entry(s.p2).or_default().push(i);
        }

        Self {
            consumed: alloc::vec![false; segments.len()],
            segments,
            incident,
            cursor: 0,
        }
    }

    /// Consume and return the smallest remaining segment.
    fn next_seed(&mut self) -> Option<Segment> {
        while self.cursor < self.segments.len() {
            let i = self.cursor;
            self.cursor += 1;
            if !self.consumed[i] {
                self.consumed[i] = true;
                return Some(self.segments[i]);
            }
        }
        None
    }

    /// Consume the smallest remaining segment touching `p` and return its
    /// other endpoint.
    fn take_from(&mut self, p: LatticePoint) -> Option<LatticePoint> {
        let list = self.incident.get(&p)?;
        let i = list.iter().copied().find(|&i| !self.consumed[i])?;
        self.consumed[i] = true;
        self.segments[i].other_end(p)
    }

    /// Vertices shared by more than two segments, smallest first.
    fn branching(&self) -> Vec<(LatticePoint, usize)> {
        VertexDegrees::from_segments(self.segments.iter().copied()).branching()
    }

    /// Drain the pool into polylines, seeded in ascending segment order.
    fn stitch(mut self, simplify: Option<f64>) -> Vec<Polyline> {
        let mut out = Vec::new();
        while let Some(seed) = self.next_seed() {
            let polyline = self.trace(seed);
            tracing::trace!(
                kind = ?polyline.kind,
                points = polyline.len(),
                "traced boundary curve"
            );
            out.push(match simplify {
                Some(epsilon) => polyline.simplified(epsilon),
                None => polyline,
            });
        }

        tracing::debug!(
            segments = self.segments.len(),
            polylines = out.len(),
            loops = out.iter().filter(|p| p.is_loop()).count(),
            "extracted boundary polylines"
        );
        out
    }

    fn trace(&mut self, seed: Segment) -> Polyline {
        let start = seed.p1;
        let mut forward = alloc::vec![start, seed.p2];
        let mut end = seed.p2;
        while let Some(next) = self.take_from(end) {
            if next == start {
                return Polyline::new(PolylineKind::Loop, to_points(&forward));
            }
            forward.push(next);
            end = next;
        }

        // Dead end: the seed may sit in the middle of an open curve, so walk
        // the other direction too.
        let mut backward = Vec::new();
        let mut head = start;
        while let Some(next) = self.take_from(head) {
            backward.push(next);
            head = next;
        }
        backward.reverse();
        backward.extend_from_slice(&forward);
        Polyline::new(PolylineKind::Chain, to_points(&backward))
    }
}

fn to_points(points: &[LatticePoint]) -> Vec<Point> {
    points.iter().map(|&p| Point::from(p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use kurbo::Line;

    fn seg(a: (i32, i32), b: (i32, i32)) -> Segment {
        Segment::from((a, b))
    }

    fn unit_square() -> Vec<Segment> {
        vec![
            seg((0, 0), (1, 0)),
            seg((1, 0), (1, 1)),
            seg((1, 1), (0, 1)),
            seg((0, 1), (0, 0)),
        ]
    }

    /// Canonical integer edges implied by a polyline.
    fn edge_set(p: &Polyline) -> Vec<Segment> {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Test polylines only carry small integer coordinates."
        )]
        let to_lattice = |pt: Point| LatticePoint::new(pt.x as i32, pt.y as i32);
        let mut out: Vec<Segment> = p
            .edges()
            .map(|Line { p0, p1 }| Segment::new(to_lattice(p0), to_lattice(p1)).canonical())
            .collect();
        out.sort_unstable();
        out
    }

    fn canonical_sorted(mut segments: Vec<Segment>) -> Vec<Segment> {
        for s in &mut segments {
            *s = s.canonical();
        }
        segments.sort_unstable();
        segments
    }

    #[test]
    fn unit_square_is_one_loop() {
        let lines = extract(unit_square());
        assert_eq!(lines.len(), 1);
        let square = &lines[0];
        assert_eq!(square.kind, PolylineKind::Loop);
        assert_eq!(square.points.len(), 4);
        for corner in [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)] {
            assert!(square.points.contains(&Point::new(corner.0, corner.1)));
        }
        assert_eq!(edge_set(square), canonical_sorted(unit_square()));
    }

    #[test]
    fn empty_input_gives_no_polylines() {
        assert!(extract(Vec::new()).is_empty());
        assert!(extract([seg((3, 3), (3, 3))]).is_empty());
    }

    #[test]
    fn lone_segment_is_a_two_point_chain() {
        let lines = extract([seg((4, 2), (1, 1))]);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].kind, PolylineKind::Chain);
        assert_eq!(lines[0].points, [Point::new(1.0, 1.0), Point::new(4.0, 2.0)]);
    }

    #[test]
    fn reversed_duplicates_are_merged() {
        let mut segments = unit_square();
        segments.push(seg((1, 0), (0, 0)));
        segments.push(seg((1, 1), (1, 0)));
        let lines = extract(segments);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].points.len(), 4);
    }

    #[test]
    fn open_path_endpoints_are_free_ends() {
        // The smallest segment sits in the middle of the path, so the
        // forward walk alone would miss the part before it.
        let path = vec![
            seg((4, 0), (6, 0)),
            seg((3, 3), (9, 9)),
            seg((6, 0), (6, 1)),
            seg((2, 0), (4, 0)),
            seg((9, 9), (0, 0)),
            seg((0, 0), (2, 0)),
        ];
        let lines = extract(path.clone());
        assert_eq!(lines.len(), 1);
        let chain = &lines[0];
        assert_eq!(chain.kind, PolylineKind::Chain);
        assert_eq!(chain.points.len(), 7);
        assert_eq!(chain.points[0], Point::new(3.0, 3.0));
        assert_eq!(chain.points[6], Point::new(6.0, 1.0));
        assert_eq!(edge_set(chain), canonical_sorted(path));
    }

    #[test]
    fn disjoint_curves_are_reconstructed_individually() {
        let mut segments = unit_square();
        // A triangle far away, given in scrambled order and direction.
        segments.extend([
            seg((12, 10), (10, 10)),
            seg((10, 12), (12, 10)),
            seg((10, 10), (10, 12)),
        ]);
        // And an open L.
        segments.extend([seg((20, 0), (20, 5)), seg((25, 5), (20, 5))]);

        let lines = extract(segments.clone());
        assert_eq!(lines.len(), 3);
        assert_eq!(lines.iter().filter(|p| p.is_loop()).count(), 2);

        let mut all: Vec<Segment> = lines.iter().flat_map(edge_set).collect();
        all.sort_unstable();
        assert_eq!(all, canonical_sorted(segments));
    }

    #[test]
    fn branching_vertex_is_rejected_on_request() {
        // Two squares touching at (1, 1).
        let mut segments = unit_square();
        segments.extend([
            seg((1, 1), (2, 1)),
            seg((2, 1), (2, 2)),
            seg((2, 2), (1, 2)),
            seg((1, 2), (1, 1)),
        ]);
        let strict = Extractor::new(ExtractOptions::default().branch_policy(BranchPolicy::Reject));
        assert_eq!(
            strict.extract(segments.clone()),
            Err(ExtractError::BranchingVertex {
                point: LatticePoint::new(1, 1),
                degree: 4,
            })
        );

        // First-match still uses every segment exactly once.
        let lenient = Extractor::default();
        let lines = lenient.extract(segments.clone()).unwrap();
        let mut all: Vec<Segment> = lines.iter().flat_map(edge_set).collect();
        all.sort_unstable();
        assert_eq!(all, canonical_sorted(segments));
    }

    #[test]
    fn free_extract_matches_default_extractor() {
        // Two squares sharing the corner (1, 1), plus an open tail off it.
        let mut segments = unit_square();
        segments.extend([
            seg((1, 1), (2, 1)),
            seg((2, 1), (2, 2)),
            seg((2, 2), (1, 2)),
            seg((1, 2), (1, 1)),
            seg((2, 2), (3, 3)),
        ]);
        let expected = Extractor::default().extract(segments.clone()).unwrap();
        assert_eq!(extract(segments.clone()), expected);
        // Input order does not matter for either entry point.
        segments.reverse();
        assert_eq!(extract(segments), expected);
    }

    #[test]
    fn extractor_simplifies_when_asked() {
        // A 2x2 square traced with unit segments.
        let segments = vec![
            seg((0, 0), (1, 0)),
            seg((1, 0), (2, 0)),
            seg((2, 0), (2, 1)),
            seg((2, 1), (2, 2)),
            seg((2, 2), (1, 2)),
            seg((1, 2), (0, 2)),
            seg((0, 2), (0, 1)),
            seg((0, 1), (0, 0)),
        ];
        let raw = extract(segments.clone());
        assert_eq!(raw[0].points.len(), 8);

        let lines = Extractor::new(ExtractOptions::default().simplify(0.1))
            .extract(segments)
            .unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].kind, PolylineKind::Loop);
        assert_eq!(lines[0].points.len(), 4);
    }
}
