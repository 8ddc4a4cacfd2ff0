use crate::align;
use crate::error::Result;
use crate::geometry::Curve;
use crate::math::Point3;
use crate::spatial::KdTree;

/// Returns the Euclidean distance from `query` to the closest point of
/// `reference`.
///
/// # Errors
///
/// Returns [`crate::error::IndexError::EmptyIndex`] if the reference has
/// no points.
pub fn nearest_point_distance(reference: &Curve, query: &Point3) -> Result<f64> {
    let index = KdTree::build(reference.points());
    Ok(index.nearest_neighbor(query)?.distance)
}

/// For every point of `curve`, the distance to the nearest point of
/// `reference`, in `curve`'s point order.
///
/// The spatial index over the reference is built once and shared by all
/// queries.
///
/// # Errors
///
/// Returns [`crate::error::IndexError::EmptyIndex`] if the reference has
/// no points.
pub fn min_distances(reference: &Curve, curve: &Curve) -> Result<Vec<f64>> {
    let index = KdTree::build(reference.points());
    curve
        .points()
        .iter()
        .map(|p| Ok(index.nearest_neighbor(p)?.distance))
        .collect()
}

/// Scores the dissimilarity of two curve shapes, independent of position,
/// scale, and orientation.
///
/// The curves are superposed with [`align::superpose`] and each aligned
/// sample point is matched to its nearest aligned reference point. The
/// score is the square root of the sum of those per-point distances (the
/// distances themselves, not their squares); identical shapes score 0.
///
/// # Errors
///
/// Propagates the errors of [`align::superpose`] and [`min_distances`].
pub fn shape_distance(reference: &Curve, curve: &Curve) -> Result<f64> {
    let (reference, curve) = align::superpose(reference, curve)?;
    let distances = min_distances(&reference, &curve)?;
    Ok(distances.iter().sum::<f64>().sqrt())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::{Rotation3, Unit, Vector3};

    use super::*;

    fn curve(points: &[(f64, f64, f64)]) -> Curve {
        Curve::new(
            points
                .iter()
                .map(|&(x, y, z)| Point3::new(x, y, z))
                .collect(),
        )
        .unwrap()
    }

    fn zigzag() -> Curve {
        curve(&[
            (0.0, 0.0, 0.0),
            (1.0, 0.0, 0.0),
            (1.0, 2.0, 0.0),
            (2.0, 2.0, 1.0),
            (2.0, 4.0, 3.0),
        ])
    }

    #[test]
    fn nearest_point_distance_picks_closest_vertex() {
        let reference = curve(&[(0.0, 0.0, 0.0), (10.0, 0.0, 0.0)]);
        let d = nearest_point_distance(&reference, &Point3::new(10.0, 1.0, 0.0)).unwrap();
        assert_relative_eq!(d, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn min_distances_follow_curve_order() {
        let reference = curve(&[(0.0, 0.0, 0.0), (10.0, 0.0, 0.0)]);
        let sample = curve(&[(0.0, 2.0, 0.0), (10.0, 3.0, 0.0)]);
        let distances = min_distances(&reference, &sample).unwrap();
        assert_eq!(distances.len(), 2);
        assert_relative_eq!(distances[0], 2.0, epsilon = 1e-12);
        assert_relative_eq!(distances[1], 3.0, epsilon = 1e-12);
    }

    #[test]
    fn identical_curves_score_zero() {
        let a = zigzag();
        let score = shape_distance(&a, &a).unwrap();
        assert_relative_eq!(score, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn chord_against_collinear_reference_scores_zero() {
        // Both normalize to the same evenly spaced collinear point set.
        let reference = curve(&[
            (1.0, 1.0, 1.0),
            (2.0, 2.0, 2.0),
            (3.0, 3.0, 3.0),
            (4.0, 4.0, 4.0),
        ]);
        let sample = curve(&[(1.0, 1.0, 1.0), (3.0, 3.0, 3.0)]);
        let score = shape_distance(&reference, &sample).unwrap();
        assert_relative_eq!(score, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn similarity_transform_scores_zero() {
        let original = zigzag();
        let axis = Unit::new_normalize(Vector3::new(0.3, 1.0, -0.7));
        let rotation = Rotation3::from_axis_angle(&axis, 0.9);
        let moved = original.map_points(|p| {
            Point3::from(rotation * (p.coords * 2.5) + Vector3::new(5.0, -3.0, 7.0))
        });
        let score = shape_distance(&original, &moved).unwrap();
        assert_relative_eq!(score, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn dissimilar_shapes_score_positive() {
        let line = curve(&[
            (0.0, 0.0, 0.0),
            (1.0, 0.0, 0.0),
            (2.0, 0.0, 0.0),
            (3.0, 0.0, 0.0),
            (4.0, 0.0, 0.0),
        ]);
        let hook = curve(&[
            (0.0, 0.0, 0.0),
            (1.0, 0.0, 0.0),
            (1.0, 1.0, 0.0),
            (0.0, 1.0, 0.0),
            (0.0, 0.5, 1.0),
        ]);
        let score = shape_distance(&line, &hook).unwrap();
        assert!(score > 0.1, "score {score} too small for distinct shapes");
    }

    #[test]
    fn score_is_root_of_summed_distances() {
        let reference = zigzag();
        let sample = curve(&[(0.0, 0.0, 0.0), (3.0, 1.0, 2.0), (2.0, 4.0, 3.0)]);
        let (a, b) = align::superpose(&reference, &sample).unwrap();
        let expected: f64 = min_distances(&a, &b).unwrap().iter().sum::<f64>().sqrt();
        let score = shape_distance(&reference, &sample).unwrap();
        assert_relative_eq!(score, expected, epsilon = 1e-12);
    }
}
