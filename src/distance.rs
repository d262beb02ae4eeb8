use crate::point::Point;
use rayon::prelude::*;

/// Label held by a slot that no assignment step has written yet
pub const UNASSIGNED: i64 = -1;

/// Euclidean distance between two points
#[inline]
pub fn distance(a: &Point, b: &Point) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

/// Index of the centroid closest to `point`.
///
/// Centroids are scanned left to right and only a strictly smaller distance
/// replaces the running minimum, so ties go to the lowest index.
///
/// # Panics
///
/// Panics if `centroids` is empty.
#[inline]
pub fn nearest_centroid(point: &Point, centroids: &[Point]) -> usize {
    assert!(!centroids.is_empty(), "centroid set must not be empty");

    let mut best_label = 0;
    let mut best_dist = f64::INFINITY;

    for (j, centroid) in centroids.iter().enumerate() {
        let dist = distance(point, centroid);
        if dist < best_dist {
            best_dist = dist;
            best_label = j;
        }
    }

    best_label
}

/// Overwrite every slot of `assignments` with the nearest centroid of the
/// matching point.
///
/// Each rayon task reads the shared point and centroid sets and writes only
/// its own slot.
///
/// # Panics
///
/// Panics if `points` and `assignments` differ in length or `centroids` is empty.
pub fn assign_points(points: &[Point], centroids: &[Point], assignments: &mut [i64]) {
    assert_eq!(
        points.len(),
        assignments.len(),
        "assignment vector must match the point set"
    );

    assignments
        .par_iter_mut()
        .zip(points.par_iter())
        .for_each(|(label, point)| {
            *label = nearest_centroid(point, centroids) as i64;
        });
}

/// Same as [`assign_points`] on the calling thread (for small inputs)
pub fn assign_points_serial(points: &[Point], centroids: &[Point], assignments: &mut [i64]) {
    assert_eq!(
        points.len(),
        assignments.len(),
        "assignment vector must match the point set"
    );

    for (label, point) in assignments.iter_mut().zip(points) {
        *label = nearest_centroid(point, centroids) as i64;
    }
}

/// Exact coordinate-wise equality of two centroid sets
pub fn centroids_equal(a: &[Point], b: &[Point]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(p, q)| p.x == q.x && p.y == q.y)
}

/// Compute centroid shift (sum of distances moved by each centroid)
pub fn centroid_shift(old_centroids: &[Point], new_centroids: &[Point]) -> f64 {
    old_centroids
        .iter()
        .zip(new_centroids)
        .map(|(old, new)| distance(old, new))
        .sum()
}

/// Sum of squared distances from each point to its assigned centroid
///
/// # Panics
///
/// Panics if a label is not an index into `centroids`, including [`UNASSIGNED`].
pub fn inertia(points: &[Point], centroids: &[Point], assignments: &[i64]) -> f64 {
    points
        .iter()
        .zip(assignments)
        .map(|(point, &label)| {
            assert!(
                (0..centroids.len() as i64).contains(&label),
                "label {} is not a cluster id in 0..{}",
                label,
                centroids.len()
            );
            let d = distance(point, &centroids[label as usize]);
            d * d
        })
        .sum()
}
