use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Four vertices of a detected region outline, in no particular order.
///
/// Invariant: the polygon is expected to be simple (non-self-intersecting);
/// detectors only guarantee "4 vertices survived polygon approximation",
/// so convexity is checked later via [`OrderedQuad::is_convex`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quad {
    pub points: [Point2<f32>; 4],
}

impl Quad {
    pub fn new(points: [Point2<f32>; 4]) -> Self {
        Self { points }
    }

    /// Shoelace area of the quadrilateral.
    pub fn area(&self) -> f32 {
        shoelace_area(&self.points)
    }

    /// Canonically order the corners, see [`order_corners`].
    pub fn order(&self) -> OrderedQuad {
        order_corners(self.points)
    }
}

/// A quadrilateral with corners in canonical order:
/// top-left, top-right, bottom-right, bottom-left.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderedQuad {
    corners: [Point2<f32>; 4],
}

impl OrderedQuad {
    /// Corners as `[TL, TR, BR, BL]`.
    #[inline]
    pub fn corners(&self) -> &[Point2<f32>; 4] {
        &self.corners
    }

    pub fn area(&self) -> f32 {
        shoelace_area(&self.corners)
    }

    /// Strict convexity and non-degeneracy check.
    ///
    /// Walks the corner cycle and requires every consecutive edge pair to
    /// turn in the same direction with a turn angle bounded away from zero.
    /// Near-collinear corner triples produce a garbage homography, so they
    /// are treated as degenerate here rather than discovered via a failed
    /// decode.
    pub fn is_convex(&self) -> bool {
        const MIN_TURN_SIN: f32 = 1e-3;

        let mut sign = 0.0f32;
        for i in 0..4 {
            let a = self.corners[i];
            let b = self.corners[(i + 1) % 4];
            let c = self.corners[(i + 2) % 4];
            let e1 = b - a;
            let e2 = c - b;
            let n1 = e1.norm();
            let n2 = e2.norm();
            if n1 <= f32::EPSILON || n2 <= f32::EPSILON {
                return false;
            }
            // sin of the turn angle at b
            let turn = (e1.x * e2.y - e1.y * e2.x) / (n1 * n2);
            if turn.abs() < MIN_TURN_SIN {
                return false;
            }
            if sign == 0.0 {
                sign = turn.signum();
            } else if turn.signum() != sign {
                return false;
            }
        }
        true
    }
}

/// Shoelace area of a simple polygon given by its ordered vertices.
pub fn shoelace_area(points: &[Point2<f32>]) -> f32 {
    let n = points.len();
    let mut acc = 0.0f32;
    for i in 0..n {
        let j = (i + 1) % n;
        acc += points[i].x * points[j].y;
        acc -= points[j].x * points[i].y;
    }
    acc.abs() / 2.0
}

/// Canonically order four corners as `[TL, TR, BR, BL]`.
///
/// Sorts the points by polar angle around their centroid (stable, so ties
/// fall back to input order), then rotates the cycle so that the corner
/// with minimal `x + y` comes first. The result is deterministic for all
/// 24 permutations of the same four points.
pub fn order_corners(points: [Point2<f32>; 4]) -> OrderedQuad {
    let cx = points.iter().map(|p| p.x).sum::<f32>() / 4.0;
    let cy = points.iter().map(|p| p.y).sum::<f32>() / 4.0;

    let mut sorted = points;
    sorted.sort_by(|a, b| {
        let ang_a = (a.y - cy).atan2(a.x - cx);
        let ang_b = (b.y - cy).atan2(b.x - cx);
        ang_a
            .partial_cmp(&ang_b)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut tl = 0;
    for (i, p) in sorted.iter().enumerate() {
        if p.x + p.y < sorted[tl].x + sorted[tl].y {
            tl = i;
        }
    }
    sorted.rotate_left(tl);

    OrderedQuad { corners: sorted }
}
