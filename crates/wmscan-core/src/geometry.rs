//! Contour simplification and corner-selection helpers shared by the
//! detection strategies.

use nalgebra::Point2;

use crate::quad::Quad;

/// Default polygon-approximation tolerance, as a fraction of the closed
/// contour perimeter.
pub const DEFAULT_EPSILON_RATIO: f32 = 0.02;

/// Arc length of a closed contour, including the closing segment.
pub fn closed_perimeter(points: &[Point2<f32>]) -> f32 {
    let n = points.len();
    if n < 2 {
        return 0.0;
    }
    let mut len = 0.0f32;
    for i in 0..n {
        let j = (i + 1) % n;
        len += (points[j] - points[i]).norm();
    }
    len
}

/// Simplify a closed pixel contour with Ramer-Douglas-Peucker and return
/// the result only if exactly four vertices survive.
///
/// The tolerance is `epsilon_ratio * closed_perimeter(contour)`. A `None`
/// is the normal "this contour is not a quadrilateral" outcome, not an
/// error.
pub fn approx_polygon(contour: &[Point2<f32>], epsilon_ratio: f32) -> Option<Quad> {
    if contour.len() < 4 {
        return None;
    }
    let epsilon = epsilon_ratio * closed_perimeter(contour);

    // Split the closed contour at its two most distant anchor points and
    // simplify each open chain separately.
    let mut far = 0;
    let mut far_dist = 0.0f32;
    for (i, p) in contour.iter().enumerate() {
        let d = (p - contour[0]).norm_squared();
        if d > far_dist {
            far_dist = d;
            far = i;
        }
    }
    if far == 0 {
        return None; // all points coincide
    }

    let mut first = Vec::new();
    rdp(&contour[..=far], epsilon, &mut first);
    let mut second: Vec<Point2<f32>> = contour[far..].to_vec();
    second.push(contour[0]);
    let mut tail = Vec::new();
    rdp(&second, epsilon, &mut tail);

    // Each chain ends where the other begins; drop the duplicated anchors.
    let mut simplified = first;
    simplified.pop();
    simplified.extend_from_slice(&tail[..tail.len() - 1]);

    if simplified.len() == 4 {
        Some(Quad::new([
            simplified[0],
            simplified[1],
            simplified[2],
            simplified[3],
        ]))
    } else {
        None
    }
}

/// Recursive Douglas-Peucker on an open polyline. Appends the simplified
/// chain, including both endpoints, to `out`.
fn rdp(points: &[Point2<f32>], epsilon: f32, out: &mut Vec<Point2<f32>>) {
    let n = points.len();
    if n < 2 {
        out.extend_from_slice(points);
        return;
    }

    let mut split = 0;
    let mut max_dist = 0.0f32;
    for (i, p) in points.iter().enumerate().take(n - 1).skip(1) {
        let d = segment_distance(*p, points[0], points[n - 1]);
        if d > max_dist {
            max_dist = d;
            split = i;
        }
    }

    if max_dist > epsilon {
        rdp(&points[..=split], epsilon, out);
        out.pop(); // split point would be duplicated
        rdp(&points[split..], epsilon, out);
    } else {
        out.push(points[0]);
        out.push(points[n - 1]);
    }
}

/// Distance from `p` to the segment `a..b`.
fn segment_distance(p: Point2<f32>, a: Point2<f32>, b: Point2<f32>) -> f32 {
    let ab = b - a;
    let len2 = ab.norm_squared();
    if len2 <= f32::EPSILON {
        return (p - a).norm();
    }
    let t = ((p - a).dot(&ab) / len2).clamp(0.0, 1.0);
    let proj = a + ab * t;
    (p - proj).norm()
}

/// Intersection of two lines given in polar normal form `(rho, theta)`,
/// i.e. the line `x cos(theta) + y sin(theta) = rho`.
///
/// Returns `None` when the lines are (nearly) parallel instead of
/// producing a wild far-away point.
pub fn polar_line_intersection(a: (f32, f32), b: (f32, f32)) -> Option<Point2<f32>> {
    let (rho_a, theta_a) = a;
    let (rho_b, theta_b) = b;

    let (sin_a, cos_a) = theta_a.sin_cos();
    let (sin_b, cos_b) = theta_b.sin_cos();

    let denom = cos_a * sin_b - sin_a * cos_b;
    if denom.abs() < 1e-6 {
        return None;
    }

    let x = (rho_a * sin_b - rho_b * sin_a) / denom;
    let y = (rho_b * cos_a - rho_a * cos_b) / denom;
    Some(Point2::new(x, y))
}

/// Pick four "outer corner" candidates from a point cloud using the
/// extremal `(x + y)` / `(x - y)` heuristic, returned as `[TL, TR, BR, BL]`.
///
/// This is only an approximation of true corner identification: it works
/// for roughly axis-aligned convex blobs and degrades for strongly rotated
/// or concave point sets (the cascade compensates by retrying with other
/// strategies). The selected points are not guaranteed to be distinct.
pub fn extremal_corners(points: &[Point2<f32>]) -> Option<[Point2<f32>; 4]> {
    if points.len() < 4 {
        return None;
    }

    let mut tl = points[0];
    let mut tr = points[0];
    let mut br = points[0];
    let mut bl = points[0];
    for p in &points[1..] {
        if p.x + p.y < tl.x + tl.y {
            tl = *p;
        }
        if p.x - p.y > tr.x - tr.y {
            tr = *p;
        }
        if p.x + p.y > br.x + br.y {
            br = *p;
        }
        if p.x - p.y < bl.x - bl.y {
            bl = *p;
        }
    }
    Some([tl, tr, br, bl])
}
