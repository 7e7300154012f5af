// Copyright 2025 the Terrace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Douglas–Peucker point reduction.

use alloc::{vec, vec::Vec};

use kurbo::{Line, ParamCurveNearest, Point};

use crate::polyline::PolylineKind;

/// Reduce the vertex count of a polyline with the Douglas–Peucker algorithm.
///
/// A vertex is kept when it lies farther than `epsilon` from the chord that
/// would replace it. Chain endpoints are always kept. Loops are anchored at
/// their first vertex and the vertex farthest from it, and each half is
/// reduced as a chain.
///
/// Ties on the farthest vertex resolve to the earliest one, which makes the
/// reduction idempotent: simplifying an already simplified polyline with the
/// same `epsilon` returns it unchanged.
///
/// A negative or non-finite `epsilon` is treated as zero, which still drops
/// exactly collinear vertices.
pub fn simplify(points: &[Point], kind: PolylineKind, epsilon: f64) -> Vec<Point> {
    let epsilon = if epsilon.is_finite() && epsilon > 0.0 {
        epsilon
    } else {
        0.0
    };
    let tolerance_sq = epsilon * epsilon;

    match kind {
        PolylineKind::Chain => {
            if points.len() <= 2 {
                return points.to_vec();
            }
            let mut keep = vec![false; points.len()];
            mark_kept(points, 0, points.len() - 1, tolerance_sq, &mut keep);
            collect_kept(points, &keep)
        }
        PolylineKind::Loop => {
            if points.len() <= 3 {
                return points.to_vec();
            }
            let anchor = points[0];
            let mut far = 0;
            let mut far_sq = 0.0;
            for (i, &p) in points.iter().enumerate().skip(1) {
                let d = (p - anchor).hypot2();
                if d > far_sq {
                    far = i;
                    far_sq = d;
                }
            }
            if far == 0 {
                // Every vertex sits on the anchor; nothing meaningful to reduce.
                return points.to_vec();
            }

            let mut ring = Vec::with_capacity(points.len() + 1);
            ring.extend_from_slice(points);
            ring.push(anchor);
            let mut keep = vec![false; ring.len()];
            mark_kept(&ring, 0, far, tolerance_sq, &mut keep);
            mark_kept(&ring, far, ring.len() - 1, tolerance_sq, &mut keep);
            ring.pop();
            keep.pop();
            collect_kept(&ring, &keep)
        }
    }
}

fn mark_kept(points: &[Point], first: usize, last: usize, tolerance_sq: f64, keep: &mut [bool]) {
    keep[first] = true;
    keep[last] = true;
    let mut stack = vec![(first, last)];
    while let Some((a, b)) = stack.pop() {
        if b <= a + 1 {
            continue;
        }
        let chord = Line::new(points[a], points[b]);
        let mut best = a;
        let mut best_sq = tolerance_sq;
        for (i, &p) in points.iter().enumerate().take(b).skip(a + 1) {
            let d = distance_sq(chord, p);
            if d > best_sq {
                best = i;
                best_sq = d;
            }
        }
        if best != a {
            keep[best] = true;
            stack.push((best, b));
            stack.push((a, best));
        }
    }
}

fn distance_sq(chord: Line, p: Point) -> f64 {
    if chord.p0 == chord.p1 {
        (p - chord.p0).hypot2()
    } else {
        chord.nearest(p, 0.0).distance_sq
    }
}

fn collect_kept(points: &[Point], keep: &[bool]) -> Vec<Point> {
    points
        .iter()
        .zip(keep)
        .filter_map(|(&p, &k)| k.then_some(p))
        .collect()
}
